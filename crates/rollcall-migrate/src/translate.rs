//! Translation of one legacy record into the native recurrence config.
//!
//! Dispatches on the rule's `FREQ`: weekly and monthly rules become the
//! corresponding structured options; everything else (including records
//! with no rule at all) falls back to an explicit custom-date list.

use chrono::{Datelike, NaiveDateTime, TimeDelta, TimeZone};
use chrono_tz::Tz;
use rollcall_core::constants::{STORAGE_DATETIME_FORMAT, STORAGE_TIME_FORMAT};
use serde::{Deserialize, Serialize};

use crate::error::{MigrateError, MigrateResult};
use crate::rule::error::ParseError;
use crate::rule::values::format_storage_datetime;
use crate::rule::{DateRange, DayOccurrence, ParsedRule, Weekday, parse_rule};

/// One legacy date-field item: a start/end pair in storage format, with
/// the recurrence rule riding on the first item of a record.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcePeriod {
    pub value: String,
    pub value2: String,
    #[serde(default)]
    pub rrule: Option<String>,
}

/// Native recurrence type names as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurType {
    Weekly,
    Monthly,
    Custom,
}

impl RecurType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly_recurring_date",
            Self::Monthly => "monthly_recurring_date",
            Self::Custom => "custom",
        }
    }
}

/// Options for a weekly recurring date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyOptions {
    pub value: String,
    pub end_value: String,
    pub time: String,
    pub duration: i64,
    pub days: Vec<Weekday>,
}

/// Whether a monthly rule pins a day of the month or an ordinal weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthlyDayType {
    MonthDay,
    Weekday,
}

/// Options for a monthly recurring date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyOptions {
    pub value: String,
    pub end_value: String,
    pub time: String,
    pub duration: i64,
    pub days: Vec<Weekday>,
    #[serde(rename = "type")]
    pub kind: MonthlyDayType,
    pub day_occurrence: Option<DayOccurrence>,
    pub day_of_month: Option<String>,
}

/// The native recurrence configuration for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurConfig {
    Weekly(WeeklyOptions),
    Monthly(MonthlyOptions),
    Custom(Vec<DateRange>),
}

impl RecurConfig {
    #[must_use]
    pub const fn recur_type(&self) -> RecurType {
        match self {
            Self::Weekly(_) => RecurType::Weekly,
            Self::Monthly(_) => RecurType::Monthly,
            Self::Custom(_) => RecurType::Custom,
        }
    }
}

/// Translator output: the recurrence config plus any exception dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub config: RecurConfig,
    pub excluded_dates: Vec<DateRange>,
}

impl Translation {
    /// ## Summary
    /// Renders the persisted destination shape: `recur_type`, the
    /// options under the matching key (`custom_date` for the fallback),
    /// and `excluded_dates` when any were parsed.
    ///
    /// ## Errors
    /// Returns an error if serialization fails.
    pub fn into_destination(self) -> MigrateResult<serde_json::Value> {
        let mut map = serde_json::Map::new();
        map.insert(
            "recur_type".to_string(),
            serde_json::Value::from(self.config.recur_type().as_str()),
        );
        match self.config {
            RecurConfig::Weekly(options) => {
                map.insert(
                    RecurType::Weekly.as_str().to_string(),
                    serde_json::to_value(options)?,
                );
            }
            RecurConfig::Monthly(options) => {
                map.insert(
                    RecurType::Monthly.as_str().to_string(),
                    serde_json::to_value(options)?,
                );
            }
            RecurConfig::Custom(dates) => {
                map.insert("custom_date".to_string(), serde_json::to_value(dates)?);
            }
        }
        if !self.excluded_dates.is_empty() {
            map.insert(
                "excluded_dates".to_string(),
                serde_json::to_value(self.excluded_dates)?,
            );
        }
        Ok(serde_json::Value::Object(map))
    }
}

fn parse_storage(value: &str) -> MigrateResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, STORAGE_DATETIME_FORMAT)
        .map_err(|_| MigrateError::InvalidSourceDate(value.to_string()))
}

/// Shifts a stored instant (UTC wall time) into the source zone.
fn to_source_zone(stored: NaiveDateTime, timezone: Tz) -> NaiveDateTime {
    chrono::Utc
        .from_utc_datetime(&stored)
        .with_timezone(&timezone)
        .naive_local()
}

/// `days` option: the rule's `BYDAY` days, or the weekday the event
/// starts on when the rule has none.
fn days_option(parsed: &ParsedRule, start_event: NaiveDateTime) -> Vec<Weekday> {
    parsed.by_day.as_ref().map_or_else(
        || vec![Weekday::from_chrono(start_event.weekday())],
        |by_day| by_day.days.clone(),
    )
}

/// `end_value` option: the rule's `UNTIL`, or the end of the last source
/// period.
fn end_value_option(parsed: &ParsedRule, end_series: NaiveDateTime) -> String {
    parsed
        .until
        .clone()
        .unwrap_or_else(|| format_storage_datetime(end_series))
}

fn weekly_options(
    parsed: &ParsedRule,
    start_event: NaiveDateTime,
    end_series: NaiveDateTime,
    duration: i64,
) -> MigrateResult<WeeklyOptions> {
    // COUNT with no UNTIL: treat COUNT as a week multiplier from the
    // event start. Not calendar-accurate for INTERVAL > 1; preserved
    // from the source system as-is.
    let end_value = if let (Some(count), None) = (&parsed.count, &parsed.until) {
        let weeks: i64 = count.trim().parse().map_err(|_| {
            ParseError::invalid_value(format!("non-numeric COUNT \"{count}\""))
        })?;
        format_storage_datetime(start_event + TimeDelta::days(7 * weeks))
    } else {
        end_value_option(parsed, end_series)
    };

    Ok(WeeklyOptions {
        value: format_storage_datetime(start_event),
        end_value,
        time: start_event.format(STORAGE_TIME_FORMAT).to_string(),
        duration,
        days: days_option(parsed, start_event),
    })
}

fn monthly_options(
    parsed: &ParsedRule,
    start_event: NaiveDateTime,
    end_series: NaiveDateTime,
    duration: i64,
) -> MonthlyOptions {
    MonthlyOptions {
        value: format_storage_datetime(start_event),
        end_value: end_value_option(parsed, end_series),
        time: start_event.format(STORAGE_TIME_FORMAT).to_string(),
        duration,
        days: days_option(parsed, start_event),
        kind: if parsed.by_month_day.is_some() {
            MonthlyDayType::MonthDay
        } else {
            MonthlyDayType::Weekday
        },
        day_occurrence: parsed.by_day.as_ref().and_then(|by_day| by_day.occurrence),
        day_of_month: parsed.by_month_day.clone(),
    }
}

/// Custom dates keep their stored wall time; the source system
/// reinterprets them in the source zone without shifting.
fn custom_dates(periods: &[SourcePeriod]) -> MigrateResult<Vec<DateRange>> {
    periods
        .iter()
        .map(|period| {
            Ok(DateRange {
                value: format_storage_datetime(parse_storage(&period.value)?),
                end_value: format_storage_datetime(parse_storage(&period.value2)?),
            })
        })
        .collect()
}

/// ## Summary
/// Translates one legacy record into its native recurrence config.
///
/// `rule` is the legacy RRULE string, if the record has one; `periods`
/// are its source date pairs in storage order; `timezone` is the zone
/// the legacy dates were authored in.
///
/// ## Errors
/// Fails if the record has no source dates, a source date is
/// unparsable, or the rule fails to parse. A failed translation
/// produces no partial output.
pub fn translate(
    rule: Option<&str>,
    periods: &[SourcePeriod],
    timezone: Tz,
) -> MigrateResult<Translation> {
    let (first, last) = match (periods.first(), periods.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(MigrateError::NoSourceDates),
    };

    let start_event = to_source_zone(parse_storage(&first.value)?, timezone);
    let end_event = to_source_zone(parse_storage(&first.value2)?, timezone);
    let duration = end_event.signed_duration_since(start_event).num_seconds();
    let end_series = to_source_zone(parse_storage(&last.value2)?, timezone);

    let parsed = match rule {
        Some(rule) => parse_rule(rule)?,
        None => ParsedRule::default(),
    };

    let config = match parsed.freq.as_deref() {
        Some("WEEKLY") => {
            RecurConfig::Weekly(weekly_options(&parsed, start_event, end_series, duration)?)
        }
        Some("MONTHLY") => {
            RecurConfig::Monthly(monthly_options(&parsed, start_event, end_series, duration))
        }
        _ => RecurConfig::Custom(custom_dates(periods)?),
    };

    tracing::debug!(
        recur_type = config.recur_type().as_str(),
        excluded = parsed.exdates.len(),
        "Translated legacy recurrence"
    );

    Ok(Translation {
        config,
        excluded_dates: parsed.exdates,
    })
}
