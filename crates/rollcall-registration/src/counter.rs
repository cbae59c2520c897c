//! Registrant counting port.
//!
//! The engine never stores registrants; whatever does (entity storage,
//! out of scope here) supplies point-in-time counts through this trait.
//! Counts are eventually consistent: a caller acting on them must accept
//! that a concurrent registration may have changed them already.

use std::collections::HashMap;

use rollcall_core::types::{EventInstanceId, EventSeriesId};

/// Whether a registrant holds a confirmed space or sits on the waitlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrantStatus {
    Confirmed,
    Waitlisted,
}

impl RegistrantStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Waitlisted => "waitlisted",
        }
    }
}

/// Which registrant population a count covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountScope {
    Instance(EventInstanceId),
    Series(EventSeriesId),
}

/// Read-only registrant count lookup.
///
/// Failures propagate to the caller unchanged; the engine performs no
/// retry.
pub trait RegistrantCounter {
    /// Number of registrants with `status` in `scope`.
    ///
    /// ## Errors
    /// Returns whatever error the underlying lookup produced.
    fn count(&self, scope: CountScope, status: RegistrantStatus) -> anyhow::Result<u32>;
}

/// Map-backed counter. The reference implementation used by tests and
/// examples; production callers wire in their own storage-backed one.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistrantCounter {
    counts: HashMap<(CountScope, RegistrantStatus), u32>,
}

impl InMemoryRegistrantCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, scope: CountScope, status: RegistrantStatus, count: u32) {
        self.counts.insert((scope, status), count);
    }
}

impl RegistrantCounter for InMemoryRegistrantCounter {
    fn count(&self, scope: CountScope, status: RegistrantStatus) -> anyhow::Result<u32> {
        Ok(self.counts.get(&(scope, status)).copied().unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_scope_counts_zero() {
        let counter = InMemoryRegistrantCounter::new();
        let scope = CountScope::Instance(EventInstanceId::new());
        assert_eq!(counter.count(scope, RegistrantStatus::Confirmed).unwrap(), 0);
    }

    #[test]
    fn statuses_are_counted_separately() {
        let mut counter = InMemoryRegistrantCounter::new();
        let scope = CountScope::Series(EventSeriesId::new());
        counter.set(scope, RegistrantStatus::Confirmed, 4);
        counter.set(scope, RegistrantStatus::Waitlisted, 2);
        assert_eq!(counter.count(scope, RegistrantStatus::Confirmed).unwrap(), 4);
        assert_eq!(counter.count(scope, RegistrantStatus::Waitlisted).unwrap(), 2);
    }
}
