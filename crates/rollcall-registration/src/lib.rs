//! Registration availability for recurring events.
//!
//! Given a [`policy::RegistrationPolicy`] and an event occurrence, the
//! [`availability::AvailabilityEngine`] answers three read-only questions:
//! is registration open right now, how many spaces remain, and does the
//! waitlist apply. Registrant counts come through the
//! [`counter::RegistrantCounter`] port; the engine holds no state and
//! never mutates anything.

pub mod availability;
pub mod clock;
pub mod counter;
pub mod error;
pub mod filter;
pub mod policy;
pub mod schedule;
