//! Value types and token parsers for rule attributes.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rollcall_core::constants::{STORAGE_DATE_FORMAT, STORAGE_DATETIME_FORMAT};
use serde::Serialize;

use super::error::{ParseError, ParseResult};

/// Days of the week as the native recurrence options name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    /// Two-letter rule code (`MO`, `TU`, ...) to weekday.
    ///
    /// ## Errors
    /// Returns an invalid-value error for anything outside the table.
    pub fn from_code(code: &str) -> ParseResult<Self> {
        match code {
            "MO" => Ok(Self::Monday),
            "TU" => Ok(Self::Tuesday),
            "WE" => Ok(Self::Wednesday),
            "TH" => Ok(Self::Thursday),
            "FR" => Ok(Self::Friday),
            "SA" => Ok(Self::Saturday),
            "SU" => Ok(Self::Sunday),
            other => Err(ParseError::invalid_value(format!(
                "unknown day code \"{other}\""
            ))),
        }
    }

    #[must_use]
    pub const fn from_chrono(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

/// Ordinal occurrence of a weekday within a month (`+1TH` is the first
/// Thursday, `-1SU` the last Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOccurrence {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

impl DayOccurrence {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
            Self::Third => "third",
            Self::Fourth => "fourth",
            Self::Last => "last",
        }
    }

    /// Signed ordinal token (`+1`..`+4`, `-1`) to occurrence.
    ///
    /// ## Errors
    /// Returns an invalid-value error for ordinals outside the table.
    pub fn from_ordinal(token: &str) -> ParseResult<Self> {
        match token {
            "+1" => Ok(Self::First),
            "+2" => Ok(Self::Second),
            "+3" => Ok(Self::Third),
            "+4" => Ok(Self::Fourth),
            "-1" => Ok(Self::Last),
            other => Err(ParseError::invalid_value(format!(
                "unknown day occurrence \"{other}\""
            ))),
        }
    }
}

/// A start/end date pair in the native storage formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub value: String,
    pub end_value: String,
}

/// Parses a rule date token: `YYYYMMDDThhmmss` with an optional trailing
/// `Z`, or a bare `YYYYMMDD` (midnight). The `T`/`Z` letters are
/// separators only; no timezone conversion happens here.
///
/// ## Errors
/// Returns an invalid-date error if the token does not match.
pub fn parse_rule_datetime(token: &str) -> ParseResult<NaiveDateTime> {
    let trimmed = token.trim();
    let bare = trimmed.strip_suffix('Z').unwrap_or(trimmed);

    if let Some((date_part, time_part)) = bare.split_once('T') {
        let date = NaiveDate::parse_from_str(date_part, "%Y%m%d")
            .map_err(|_| ParseError::invalid_date(token))?;
        let time = NaiveTime::parse_from_str(time_part, "%H%M%S")
            .map_err(|_| ParseError::invalid_date(token))?;
        Ok(NaiveDateTime::new(date, time))
    } else {
        let date = NaiveDate::parse_from_str(bare, "%Y%m%d")
            .map_err(|_| ParseError::invalid_date(token))?;
        Ok(date.and_time(NaiveTime::MIN))
    }
}

/// Formats an instant in the native datetime storage format.
#[must_use]
pub fn format_storage_datetime(datetime: NaiveDateTime) -> String {
    datetime.format(STORAGE_DATETIME_FORMAT).to_string()
}

/// Formats an instant in the native date-only storage format.
#[must_use]
pub fn format_storage_date(datetime: NaiveDateTime) -> String {
    datetime.format(STORAGE_DATE_FORMAT).to_string()
}

/// Parses a comma-joined day-code list (`MO,WE,FR`), dropping empty
/// entries.
///
/// ## Errors
/// Returns an invalid-value error for any unknown code.
pub fn parse_weekday_list(value: &str) -> ParseResult<Vec<Weekday>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(Weekday::from_code)
        .collect()
}

/// Rewrites every two-letter day code inside `value` to its full name,
/// leaving everything else untouched. Single pass, no re-replacement.
#[must_use]
pub fn translate_day_codes(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut rest = value;
    while !rest.is_empty() {
        if let Some(code) = rest.get(..2)
            && let Ok(day) = Weekday::from_code(code)
        {
            result.push_str(day.as_str());
            rest = &rest[2..];
            continue;
        }
        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            result.push(ch);
        }
        rest = chars.as_str();
    }
    result
}
