//! The availability engine: pure read-side queries over one occurrence.

use rollcall_core::types::EventInstance;

use crate::clock::Clock;
use crate::counter::{CountScope, RegistrantCounter, RegistrantStatus};
use crate::error::{RegistrationError, RegistrationResult};
use crate::policy::{RegistrationPolicy, RegistrationScope, ScheduleMode};
use crate::schedule::window_contains;

/// How many spaces remain for an occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// No capacity limit configured.
    Unlimited,
    /// This many confirmed spaces left (always positive).
    Spaces(u32),
    /// Capacity reached.
    Full,
}

impl Availability {
    fn from_counts(capacity: u32, confirmed: u32) -> Self {
        match capacity.saturating_sub(confirmed) {
            0 => Self::Full,
            spaces => Self::Spaces(spaces),
        }
    }

    /// Numeric wire convention for reporting columns: `-1` unlimited,
    /// `n` spaces remaining, `0` full.
    #[must_use]
    pub fn as_count(self) -> i64 {
        match self {
            Self::Unlimited => -1,
            Self::Spaces(n) => i64::from(n),
            Self::Full => 0,
        }
    }
}

/// Read-only availability queries over registration policies.
///
/// Holds no mutable state; safe to share across concurrent queries. The
/// counts it reports are a snapshot — whether they still hold when the
/// caller acts on them is the caller's concern.
#[derive(Debug, Clone)]
pub struct AvailabilityEngine<C, K> {
    counter: C,
    clock: K,
}

impl<C: RegistrantCounter, K: Clock> AvailabilityEngine<C, K> {
    pub fn new(counter: C, clock: K) -> Self {
        Self { counter, clock }
    }

    /// The registrant population this policy counts against.
    fn count_scope(
        policy: &RegistrationPolicy,
        instance: &EventInstance,
    ) -> RegistrationResult<CountScope> {
        match policy.scope {
            RegistrationScope::Instance => Ok(CountScope::Instance(instance.id)),
            RegistrationScope::Series => instance
                .series_id
                .map(CountScope::Series)
                .ok_or(RegistrationError::MissingSeries),
        }
    }

    /// ## Summary
    /// Computes remaining spaces for `instance` under `policy`.
    ///
    /// Absent or zero capacity is unlimited. Otherwise spaces are
    /// `capacity - confirmed`, clamped at zero; a series-scoped policy
    /// counts confirmed registrants across the whole series.
    ///
    /// ## Errors
    /// Returns an error if the policy is series-scoped but the instance
    /// has no parent series, or if the count lookup fails.
    pub fn availability(
        &self,
        policy: &RegistrationPolicy,
        instance: &EventInstance,
    ) -> RegistrationResult<Availability> {
        let Some(capacity) = policy.capacity.filter(|&c| c > 0) else {
            return Ok(Availability::Unlimited);
        };

        let scope = Self::count_scope(policy, instance)?;
        let confirmed = self.counter.count(scope, RegistrantStatus::Confirmed)?;
        let availability = Availability::from_counts(capacity, confirmed);
        tracing::trace!(
            instance = %instance.id,
            capacity,
            confirmed,
            spaces = availability.as_count(),
            "Computed availability"
        );
        Ok(availability)
    }

    /// ## Summary
    /// Whether registration for `instance` is open at the current
    /// instant.
    ///
    /// Open-mode registration runs until the occurrence starts. A
    /// scheduled series policy uses its fixed window; a scheduled
    /// instance policy resolves its symbolic rules against this
    /// occurrence's own start and end. All windows are half-open:
    /// `open <= now < close`.
    ///
    /// ## Errors
    /// Returns an error if a scheduled series policy is missing its
    /// window or a schedule rule resolves out of range.
    pub fn is_open(
        &self,
        policy: &RegistrationPolicy,
        instance: &EventInstance,
    ) -> RegistrationResult<bool> {
        if !policy.enabled {
            return Ok(false);
        }

        let now = self.clock.now();
        match (policy.mode, policy.scope) {
            (ScheduleMode::Open, _) => Ok(now < instance.start),
            (ScheduleMode::Scheduled, RegistrationScope::Series) => {
                let window = policy
                    .series_window
                    .ok_or(RegistrationError::MissingSeriesWindow)?;
                Ok(window.opens_at <= now && now < window.closes_at)
            }
            (ScheduleMode::Scheduled, RegistrationScope::Instance) => {
                let open = policy.open_rule.resolve(instance.start)?;
                let close = policy.close_rule.resolve(instance.start, instance.end)?;
                Ok(window_contains(open, close, now))
            }
        }
    }

    /// ## Summary
    /// Whether a new registrant would be routed to the waitlist.
    ///
    /// True only when the waitlist is enabled, registration is still
    /// time-wise open, and the occurrence is full. The caller decides
    /// what to do with the answer; the engine routes nothing itself.
    ///
    /// ## Errors
    /// Propagates errors from the open check or the count lookup.
    pub fn waitlist_active(
        &self,
        policy: &RegistrationPolicy,
        instance: &EventInstance,
    ) -> RegistrationResult<bool> {
        if !policy.waitlist {
            return Ok(false);
        }
        Ok(self.is_open(policy, instance)?
            && self.availability(policy, instance)? == Availability::Full)
    }

    /// ## Summary
    /// Number of waitlisted registrants at the policy's scope.
    ///
    /// ## Errors
    /// Returns an error if the scope cannot be resolved or the count
    /// lookup fails.
    pub fn waitlist_count(
        &self,
        policy: &RegistrationPolicy,
        instance: &EventInstance,
    ) -> RegistrationResult<u32> {
        let scope = Self::count_scope(policy, instance)?;
        Ok(self.counter.count(scope, RegistrantStatus::Waitlisted)?)
    }
}
