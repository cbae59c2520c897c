//! Registration policy model.
//!
//! A policy is attached to an event series or instance and controls
//! whether attendees can sign up, when the sign-up window opens and
//! closes, how many spaces exist, and whether a waitlist applies.
//!
//! The CMS persists the policy as a bundle of loosely-typed field values
//! ([`RawRegistrationField`]); conversion into the closed
//! [`RegistrationPolicy`] form applies the documented defaults and
//! rejects anything outside the known vocabularies.

use chrono::{DateTime, NaiveDateTime, Utc};
use rollcall_core::constants::STORAGE_DATETIME_FORMAT;
use serde::Deserialize;

use crate::error::{RegistrationError, RegistrationResult};

/// Default amount for schedule rules when the stored field is empty.
pub const DEFAULT_SCHEDULE_AMOUNT: u32 = 1;

/// Whether one capacity applies per occurrence or across the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationScope {
    Instance,
    Series,
}

impl RegistrationScope {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Instance => "instance",
            Self::Series => "series",
        }
    }

    fn parse(value: &str) -> RegistrationResult<Self> {
        match value {
            "instance" => Ok(Self::Instance),
            "series" => Ok(Self::Series),
            other => Err(RegistrationError::InvalidPolicy(format!(
                "unknown registration type \"{other}\""
            ))),
        }
    }
}

/// Open registration runs from now until the occurrence starts;
/// scheduled registration applies explicit open/close rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleMode {
    Open,
    Scheduled,
}

impl ScheduleMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Scheduled => "scheduled",
        }
    }

    fn parse(value: &str) -> RegistrationResult<Self> {
        match value {
            "open" => Ok(Self::Open),
            "scheduled" => Ok(Self::Scheduled),
            other => Err(RegistrationError::InvalidPolicy(format!(
                "unknown registration dates mode \"{other}\""
            ))),
        }
    }
}

/// Units a schedule rule can be expressed in. Months use calendar
/// arithmetic; every other unit is fixed-length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

impl TimeUnit {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    fn parse(value: &str) -> RegistrationResult<Self> {
        match value {
            "second" => Ok(Self::Second),
            "minute" => Ok(Self::Minute),
            "hour" => Ok(Self::Hour),
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(RegistrationError::InvalidPolicy(format!(
                "unknown schedule unit \"{other}\""
            ))),
        }
    }
}

/// When instance-scoped scheduled registration opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenRule {
    /// No lower bound; registration is already open.
    Now,
    /// Opens when the occurrence starts.
    AtStart,
    /// Opens a fixed span before the occurrence starts.
    Before { amount: u32, unit: TimeUnit },
}

/// Which side of the occurrence start a custom close rule counts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDirection {
    Before,
    After,
}

impl CloseDirection {
    fn parse(value: &str) -> RegistrationResult<Self> {
        match value {
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            other => Err(RegistrationError::InvalidPolicy(format!(
                "unknown close direction \"{other}\""
            ))),
        }
    }
}

/// When instance-scoped scheduled registration closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseRule {
    /// Closes when the occurrence starts.
    AtStart,
    /// Closes when the occurrence ends.
    AtEnd,
    /// Closes a fixed span before or after the occurrence starts.
    Custom {
        direction: CloseDirection,
        amount: u32,
        unit: TimeUnit,
    },
}

/// Fixed open/close instants for series-scoped scheduled registration,
/// identical for every occurrence in the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesWindow {
    pub opens_at: DateTime<Utc>,
    pub closes_at: DateTime<Utc>,
}

/// A fully-validated registration policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationPolicy {
    pub enabled: bool,
    pub scope: RegistrationScope,
    pub mode: ScheduleMode,
    /// Present iff `scope` is `Series` and `mode` is `Scheduled`.
    pub series_window: Option<SeriesWindow>,
    pub open_rule: OpenRule,
    pub close_rule: CloseRule,
    /// `None` means unlimited capacity.
    pub capacity: Option<u32>,
    pub waitlist: bool,
}

impl RegistrationPolicy {
    /// Open-mode policy: registration runs until each occurrence starts.
    #[must_use]
    pub fn open(scope: RegistrationScope, capacity: Option<u32>, waitlist: bool) -> Self {
        Self {
            enabled: true,
            scope,
            mode: ScheduleMode::Open,
            series_window: None,
            open_rule: OpenRule::Now,
            close_rule: CloseRule::AtStart,
            capacity,
            waitlist,
        }
    }

    /// Series-scoped policy with a fixed open/close window.
    #[must_use]
    pub fn series_scheduled(window: SeriesWindow, capacity: Option<u32>, waitlist: bool) -> Self {
        Self {
            enabled: true,
            scope: RegistrationScope::Series,
            mode: ScheduleMode::Scheduled,
            series_window: Some(window),
            open_rule: OpenRule::Now,
            close_rule: CloseRule::AtStart,
            capacity,
            waitlist,
        }
    }

    /// Instance-scoped policy with symbolic open/close rules.
    #[must_use]
    pub fn instance_scheduled(
        open_rule: OpenRule,
        close_rule: CloseRule,
        capacity: Option<u32>,
        waitlist: bool,
    ) -> Self {
        Self {
            enabled: true,
            scope: RegistrationScope::Instance,
            mode: ScheduleMode::Scheduled,
            series_window: None,
            open_rule,
            close_rule,
            capacity,
            waitlist,
        }
    }
}

/// Registration field values as the CMS stores them.
///
/// Empty strings and absent values are equivalent; zero capacity means
/// unlimited.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRegistrationField {
    #[serde(default)]
    pub registration: bool,
    #[serde(default)]
    pub registration_type: Option<String>,
    #[serde(default)]
    pub registration_dates: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub end_value: Option<String>,
    #[serde(default)]
    pub instance_schedule_open: Option<String>,
    #[serde(default)]
    pub instance_schedule_open_amount: Option<u32>,
    #[serde(default)]
    pub instance_schedule_open_units: Option<String>,
    #[serde(default)]
    pub instance_schedule_close: Option<String>,
    #[serde(default)]
    pub instance_schedule_close_type: Option<String>,
    #[serde(default)]
    pub instance_schedule_close_amount: Option<u32>,
    #[serde(default)]
    pub instance_schedule_close_units: Option<String>,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub waitlist: bool,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

fn parse_storage_datetime(value: &str, field: &str) -> RegistrationResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, STORAGE_DATETIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|err| {
            RegistrationError::InvalidPolicy(format!("unparsable {field} date \"{value}\": {err}"))
        })
}

fn parse_open_rule(raw: &RawRegistrationField) -> RegistrationResult<OpenRule> {
    match non_empty(raw.instance_schedule_open.as_ref()) {
        Some("now") => Ok(OpenRule::Now),
        Some("start") => Ok(OpenRule::AtStart),
        Some("custom") => Ok(OpenRule::Before {
            amount: raw
                .instance_schedule_open_amount
                .unwrap_or(DEFAULT_SCHEDULE_AMOUNT),
            // Open unit defaults to months when unset.
            unit: non_empty(raw.instance_schedule_open_units.as_ref())
                .map_or(Ok(TimeUnit::Month), TimeUnit::parse)?,
        }),
        Some(other) => Err(RegistrationError::InvalidPolicy(format!(
            "unknown open schedule \"{other}\""
        ))),
        None => Err(RegistrationError::InvalidPolicy(
            "scheduled instance registration has no open schedule".into(),
        )),
    }
}

fn parse_close_rule(raw: &RawRegistrationField) -> RegistrationResult<CloseRule> {
    match non_empty(raw.instance_schedule_close.as_ref()) {
        Some("start") => Ok(CloseRule::AtStart),
        Some("end") => Ok(CloseRule::AtEnd),
        Some("custom") => {
            let direction = non_empty(raw.instance_schedule_close_type.as_ref())
                .ok_or_else(|| {
                    RegistrationError::InvalidPolicy(
                        "custom close schedule has no before/after direction".into(),
                    )
                })
                .and_then(CloseDirection::parse)?;
            Ok(CloseRule::Custom {
                direction,
                amount: raw
                    .instance_schedule_close_amount
                    .unwrap_or(DEFAULT_SCHEDULE_AMOUNT),
                // Close unit defaults to weeks when unset.
                unit: non_empty(raw.instance_schedule_close_units.as_ref())
                    .map_or(Ok(TimeUnit::Week), TimeUnit::parse)?,
            })
        }
        Some(other) => Err(RegistrationError::InvalidPolicy(format!(
            "unknown close schedule \"{other}\""
        ))),
        None => Err(RegistrationError::InvalidPolicy(
            "scheduled instance registration has no close schedule".into(),
        )),
    }
}

impl TryFrom<&RawRegistrationField> for RegistrationPolicy {
    type Error = RegistrationError;

    fn try_from(raw: &RawRegistrationField) -> RegistrationResult<Self> {
        let scope = non_empty(raw.registration_type.as_ref())
            .map_or(Ok(RegistrationScope::Instance), RegistrationScope::parse)?;
        let mode = non_empty(raw.registration_dates.as_ref())
            .map_or(Ok(ScheduleMode::Open), ScheduleMode::parse)?;

        let series_window = if scope == RegistrationScope::Series && mode == ScheduleMode::Scheduled
        {
            let opens_at = non_empty(raw.value.as_ref()).ok_or_else(|| {
                RegistrationError::InvalidPolicy(
                    "scheduled series registration has no open date".into(),
                )
            })?;
            let closes_at = non_empty(raw.end_value.as_ref()).ok_or_else(|| {
                RegistrationError::InvalidPolicy(
                    "scheduled series registration has no close date".into(),
                )
            })?;
            Some(SeriesWindow {
                opens_at: parse_storage_datetime(opens_at, "open")?,
                closes_at: parse_storage_datetime(closes_at, "close")?,
            })
        } else {
            None
        };

        let (open_rule, close_rule) =
            if scope == RegistrationScope::Instance && mode == ScheduleMode::Scheduled {
                (parse_open_rule(raw)?, parse_close_rule(raw)?)
            } else {
                (OpenRule::Now, CloseRule::AtStart)
            };

        Ok(Self {
            enabled: raw.registration,
            scope,
            mode,
            series_window,
            open_rule,
            close_rule,
            capacity: (raw.capacity > 0).then_some(raw.capacity),
            waitlist: raw.waitlist,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduled_instance_raw() -> RawRegistrationField {
        RawRegistrationField {
            registration: true,
            registration_type: Some("instance".into()),
            registration_dates: Some("scheduled".into()),
            instance_schedule_open: Some("custom".into()),
            instance_schedule_close: Some("custom".into()),
            instance_schedule_close_type: Some("before".into()),
            capacity: 25,
            ..RawRegistrationField::default()
        }
    }

    #[test]
    fn open_rule_defaults_amount_and_unit() {
        let raw = scheduled_instance_raw();
        let policy = RegistrationPolicy::try_from(&raw).unwrap();
        assert_eq!(
            policy.open_rule,
            OpenRule::Before {
                amount: 1,
                unit: TimeUnit::Month
            }
        );
    }

    #[test]
    fn close_rule_defaults_amount_and_unit() {
        let raw = scheduled_instance_raw();
        let policy = RegistrationPolicy::try_from(&raw).unwrap();
        assert_eq!(
            policy.close_rule,
            CloseRule::Custom {
                direction: CloseDirection::Before,
                amount: 1,
                unit: TimeUnit::Week
            }
        );
    }

    #[test]
    fn custom_close_without_direction_is_error() {
        let mut raw = scheduled_instance_raw();
        raw.instance_schedule_close_type = Some(String::new());
        let err = RegistrationPolicy::try_from(&raw).unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidPolicy(_)));
    }

    #[test]
    fn unknown_unit_is_error() {
        let mut raw = scheduled_instance_raw();
        raw.instance_schedule_open_units = Some("fortnight".into());
        let err = RegistrationPolicy::try_from(&raw).unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidPolicy(_)));
    }

    #[test]
    fn series_scheduled_requires_window() {
        let raw = RawRegistrationField {
            registration: true,
            registration_type: Some("series".into()),
            registration_dates: Some("scheduled".into()),
            ..RawRegistrationField::default()
        };
        assert!(RegistrationPolicy::try_from(&raw).is_err());
    }

    #[test]
    fn series_window_parses_storage_dates() {
        let raw = RawRegistrationField {
            registration: true,
            registration_type: Some("series".into()),
            registration_dates: Some("scheduled".into()),
            value: Some("2025-05-01T09:00:00".into()),
            end_value: Some("2025-05-31T17:00:00".into()),
            ..RawRegistrationField::default()
        };
        let policy = RegistrationPolicy::try_from(&raw).unwrap();
        let window = policy.series_window.unwrap();
        assert_eq!(
            window.opens_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "2025-05-01T09:00:00"
        );
        assert!(window.opens_at < window.closes_at);
    }

    #[test]
    fn zero_capacity_means_unlimited() {
        let raw = RawRegistrationField {
            registration: true,
            ..RawRegistrationField::default()
        };
        let policy = RegistrationPolicy::try_from(&raw).unwrap();
        assert_eq!(policy.capacity, None);
    }

    #[test]
    fn defaults_are_instance_open() {
        let raw = RawRegistrationField::default();
        let policy = RegistrationPolicy::try_from(&raw).unwrap();
        assert_eq!(policy.scope, RegistrationScope::Instance);
        assert_eq!(policy.mode, ScheduleMode::Open);
        assert!(!policy.enabled);
    }
}
