//! Legacy recurrence-rule (RRULE) parsing.
//!
//! The grammar is fixed: a known set of attribute keys, day and ordinal
//! enumerations, and `YYYYMMDDThhmmss[Z]` date tokens. Anything outside
//! it fails the parse; a migration surfaces that as a data error on the
//! offending record.

pub mod error;
pub mod lexer;
pub mod parser;
pub mod values;

pub use parser::{ByDay, ParsedRule, parse_rule};
pub use values::{DateRange, DayOccurrence, Weekday};
