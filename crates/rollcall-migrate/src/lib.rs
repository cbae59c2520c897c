//! One-time migration of legacy recurrence data.
//!
//! Legacy records carry an RFC-style RRULE string next to a flat list of
//! occurrence date pairs. [`translate::translate`] turns one record into
//! the native recurrence configuration (weekly / monthly / custom) that
//! the recurring-events module persists; [`batch::translate_rows`] runs
//! it across a whole export, isolating per-row failures.

pub mod batch;
pub mod error;
pub mod rule;
pub mod translate;
