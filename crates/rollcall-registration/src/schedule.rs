//! Resolution of symbolic open/close rules into concrete instants.
//!
//! Rules are evaluated against a single occurrence's own start and end.
//! Month spans use calendar arithmetic (a rule of "1 month before" lands
//! on the same day-of-month, clamped at month end); all other units are
//! fixed-length.

use chrono::{DateTime, Months, TimeDelta, Utc};

use crate::error::{RegistrationError, RegistrationResult};
use crate::policy::{CloseDirection, CloseRule, OpenRule, TimeUnit};

/// Fixed-length span for every unit except `Month`.
fn fixed_delta(amount: u32, unit: TimeUnit) -> Option<TimeDelta> {
    let amount = i64::from(amount);
    match unit {
        TimeUnit::Second => Some(TimeDelta::seconds(amount)),
        TimeUnit::Minute => Some(TimeDelta::minutes(amount)),
        TimeUnit::Hour => Some(TimeDelta::hours(amount)),
        TimeUnit::Day => Some(TimeDelta::days(amount)),
        TimeUnit::Week => Some(TimeDelta::weeks(amount)),
        TimeUnit::Month => None,
    }
}

fn shift(
    instant: DateTime<Utc>,
    amount: u32,
    unit: TimeUnit,
    direction: CloseDirection,
) -> RegistrationResult<DateTime<Utc>> {
    let shifted = if let Some(delta) = fixed_delta(amount, unit) {
        match direction {
            CloseDirection::Before => instant.checked_sub_signed(delta),
            CloseDirection::After => instant.checked_add_signed(delta),
        }
    } else {
        let months = Months::new(amount);
        match direction {
            CloseDirection::Before => instant.checked_sub_months(months),
            CloseDirection::After => instant.checked_add_months(months),
        }
    };
    shifted.ok_or(RegistrationError::WindowOutOfRange)
}

impl OpenRule {
    /// Resolves the opening instant for an occurrence starting at `start`.
    ///
    /// `None` means registration has no lower bound (already open).
    ///
    /// ## Errors
    /// Returns an error if the shifted instant falls outside the
    /// representable datetime range.
    pub fn resolve(self, start: DateTime<Utc>) -> RegistrationResult<Option<DateTime<Utc>>> {
        match self {
            Self::Now => Ok(None),
            Self::AtStart => Ok(Some(start)),
            Self::Before { amount, unit } => {
                shift(start, amount, unit, CloseDirection::Before).map(Some)
            }
        }
    }
}

impl CloseRule {
    /// Resolves the closing instant for an occurrence spanning
    /// `start..end`. Custom rules count from the start in either
    /// direction.
    ///
    /// ## Errors
    /// Returns an error if the shifted instant falls outside the
    /// representable datetime range.
    pub fn resolve(
        self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RegistrationResult<DateTime<Utc>> {
        match self {
            Self::AtStart => Ok(start),
            Self::AtEnd => Ok(end),
            Self::Custom {
                direction,
                amount,
                unit,
            } => shift(start, amount, unit, direction),
        }
    }
}

/// Half-open window check: `open <= now < close`, with `None` as no
/// lower bound.
#[must_use]
pub fn window_contains(
    open: Option<DateTime<Utc>>,
    close: DateTime<Utc>,
    now: DateTime<Utc>,
) -> bool {
    open.is_none_or(|opens_at| opens_at <= now) && now < close
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    #[test]
    fn open_now_has_no_lower_bound() {
        assert_eq!(OpenRule::Now.resolve(instant(2025, 6, 1, 10)).unwrap(), None);
    }

    #[test]
    fn open_before_weeks_is_fixed_length() {
        let start = instant(2025, 6, 15, 10);
        let open = OpenRule::Before {
            amount: 2,
            unit: TimeUnit::Week,
        }
        .resolve(start)
        .unwrap();
        assert_eq!(open, Some(instant(2025, 6, 1, 10)));
    }

    #[test]
    fn open_before_month_uses_calendar_arithmetic() {
        // One month before March 31 is February 28, not 30 fixed days.
        let start = instant(2025, 3, 31, 10);
        let open = OpenRule::Before {
            amount: 1,
            unit: TimeUnit::Month,
        }
        .resolve(start)
        .unwrap();
        assert_eq!(open, Some(instant(2025, 2, 28, 10)));
    }

    #[test]
    fn close_custom_after_start() {
        let start = instant(2025, 6, 1, 10);
        let close = CloseRule::Custom {
            direction: CloseDirection::After,
            amount: 30,
            unit: TimeUnit::Minute,
        }
        .resolve(start, instant(2025, 6, 1, 12))
        .unwrap();
        assert_eq!(close, instant(2025, 6, 1, 10) + TimeDelta::minutes(30));
    }

    #[test]
    fn close_at_end_uses_occurrence_end() {
        let start = instant(2025, 6, 1, 10);
        let end = instant(2025, 6, 1, 12);
        assert_eq!(CloseRule::AtEnd.resolve(start, end).unwrap(), end);
    }

    #[test]
    fn window_is_half_open() {
        let open = instant(2025, 6, 1, 10);
        let close = instant(2025, 6, 2, 10);
        assert!(!window_contains(Some(open), close, open - TimeDelta::seconds(1)));
        assert!(window_contains(Some(open), close, open));
        assert!(window_contains(Some(open), close, close - TimeDelta::seconds(1)));
        assert!(!window_contains(Some(open), close, close));
    }
}
