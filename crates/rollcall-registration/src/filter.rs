//! Availability as a filterable attribute.
//!
//! Presentation layers expose availability as a list filter with two
//! buckets: "spaces available" (unlimited or positive) and "event full"
//! (exactly zero). The bucketing runs over the numeric wire convention
//! so a reporting column and a filter can never disagree.

use rollcall_core::types::EventInstance;

use crate::availability::AvailabilityEngine;
use crate::clock::Clock;
use crate::counter::RegistrantCounter;
use crate::error::RegistrationResult;
use crate::policy::RegistrationPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityFilter {
    /// Unlimited availability or more than zero spaces.
    Available,
    /// Exactly zero spaces.
    Full,
}

impl AvailabilityFilter {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Full => "full",
        }
    }

    /// Whether an availability count (`-1`/`n`/`0`) falls in this bucket.
    #[must_use]
    pub fn matches(self, count: i64) -> bool {
        match self {
            Self::Available => count == -1 || count > 0,
            Self::Full => count == 0,
        }
    }
}

impl<C: RegistrantCounter, K: Clock> AvailabilityEngine<C, K> {
    /// ## Summary
    /// Keeps the instances whose availability falls in `filter`'s bucket.
    ///
    /// Order is preserved. Every instance is evaluated against the same
    /// policy; a heterogeneous listing calls this once per policy.
    ///
    /// ## Errors
    /// Returns the first availability error encountered.
    pub fn filter_instances<'a>(
        &self,
        policy: &RegistrationPolicy,
        instances: &'a [EventInstance],
        filter: AvailabilityFilter,
    ) -> RegistrationResult<Vec<&'a EventInstance>> {
        let mut kept = Vec::new();
        for instance in instances {
            let count = self.availability(policy, instance)?.as_count();
            if filter.matches(count) {
                kept.push(instance);
            }
        }
        tracing::trace!(
            filter = filter.as_str(),
            total = instances.len(),
            kept = kept.len(),
            "Filtered instances by availability"
        );
        Ok(kept)
    }
}
