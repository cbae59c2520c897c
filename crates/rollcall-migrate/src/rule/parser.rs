//! Per-attribute interpretation of a tokenized rule.
//!
//! The grammar is closed: [`RuleKey`] enumerates every attribute the
//! translator understands, and an exhaustive match decides how each
//! value is interpreted. Duplicate keys overwrite (last wins), except
//! `EXDATE`, whose entries accumulate.

use super::error::{ParseError, ParseResult};
use super::lexer::tokenize;
use super::values::{
    DateRange, DayOccurrence, Weekday, format_storage_date, format_storage_datetime,
    parse_rule_datetime, parse_weekday_list, translate_day_codes,
};

/// The fixed attribute grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleKey {
    Count,
    Interval,
    BySetPos,
    ByMonthDay,
    ByYearDay,
    ByWeekNo,
    ByHour,
    ByMinute,
    BySecond,
    Freq,
    Wkst,
    DtStart,
    Tzid,
    ByEaster,
    Until,
    ByDay,
    ByMonth,
    ByWeekday,
    ExDate,
}

impl RuleKey {
    fn parse(key: &str) -> ParseResult<Self> {
        match key {
            "COUNT" => Ok(Self::Count),
            "INTERVAL" => Ok(Self::Interval),
            "BYSETPOS" => Ok(Self::BySetPos),
            "BYMONTHDAY" => Ok(Self::ByMonthDay),
            "BYYEARDAY" => Ok(Self::ByYearDay),
            "BYWEEKNO" => Ok(Self::ByWeekNo),
            "BYHOUR" => Ok(Self::ByHour),
            "BYMINUTE" => Ok(Self::ByMinute),
            "BYSECOND" => Ok(Self::BySecond),
            "FREQ" => Ok(Self::Freq),
            "WKST" => Ok(Self::Wkst),
            "DTSTART" => Ok(Self::DtStart),
            "TZID" => Ok(Self::Tzid),
            "BYEASTER" => Ok(Self::ByEaster),
            "UNTIL" => Ok(Self::Until),
            "BYDAY" => Ok(Self::ByDay),
            "BYMONTH" => Ok(Self::ByMonth),
            "BYWEEKDAY" => Ok(Self::ByWeekday),
            "EXDATE" => Ok(Self::ExDate),
            other => Err(ParseError::unknown_attribute(other)),
        }
    }
}

/// `BYDAY` value: an optional ordinal occurrence plus one or more days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByDay {
    pub occurrence: Option<DayOccurrence>,
    pub days: Vec<Weekday>,
}

/// A fully-interpreted rule.
///
/// Pass-through attributes keep their raw string values; the ones the
/// native options read are typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRule {
    pub freq: Option<String>,
    pub count: Option<String>,
    pub interval: Option<String>,
    pub by_set_pos: Option<String>,
    pub by_month_day: Option<String>,
    pub by_year_day: Option<String>,
    pub by_week_no: Option<String>,
    pub by_hour: Option<String>,
    pub by_minute: Option<String>,
    pub by_second: Option<String>,
    pub wkst: Option<String>,
    pub dt_start: Option<String>,
    pub tzid: Option<String>,
    pub by_easter: Option<String>,
    /// Reformatted to the native datetime storage format.
    pub until: Option<String>,
    pub by_day: Option<ByDay>,
    pub by_month: Option<Vec<String>>,
    pub by_weekday: Option<Vec<String>>,
    /// Exception dates, one `Y-m-d` pair per token.
    pub exdates: Vec<DateRange>,
}

fn parse_by_day(value: &str) -> ParseResult<ByDay> {
    let trimmed = value.trim();
    let mut chars = trimmed.chars();
    let has_ordinal = matches!(chars.next(), Some('+' | '-'))
        && chars.next().is_some_and(|c| c.is_ascii_digit());

    if has_ordinal {
        let (ordinal, days) = trimmed.split_at(2);
        Ok(ByDay {
            occurrence: Some(DayOccurrence::from_ordinal(ordinal)?),
            days: parse_weekday_list(days)?,
        })
    } else {
        Ok(ByDay {
            occurrence: None,
            days: parse_weekday_list(trimmed)?,
        })
    }
}

/// Comma-splits a day-code-translated value, dropping empty entries.
fn translated_set(value: &str) -> Vec<String> {
    translate_day_codes(value)
        .split(',')
        .filter(|entry| !entry.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// ## Summary
/// Parses a legacy recurrence rule into a [`ParsedRule`].
///
/// ## Errors
/// Fails on an empty rule, a token without a value, an attribute key
/// outside the fixed grammar (the error names the key), or a malformed
/// date / day / ordinal token. A failed parse populates nothing.
pub fn parse_rule(rule: &str) -> ParseResult<ParsedRule> {
    let mut parsed = ParsedRule::default();

    for attr in tokenize(rule)? {
        match RuleKey::parse(&attr.key)? {
            RuleKey::Count => parsed.count = Some(attr.value),
            RuleKey::Interval => parsed.interval = Some(attr.value),
            RuleKey::BySetPos => parsed.by_set_pos = Some(attr.value),
            RuleKey::ByMonthDay => parsed.by_month_day = Some(attr.value),
            RuleKey::ByYearDay => parsed.by_year_day = Some(attr.value),
            RuleKey::ByWeekNo => parsed.by_week_no = Some(attr.value),
            RuleKey::ByHour => parsed.by_hour = Some(attr.value),
            RuleKey::ByMinute => parsed.by_minute = Some(attr.value),
            RuleKey::BySecond => parsed.by_second = Some(attr.value),
            RuleKey::Freq => parsed.freq = Some(attr.value),
            RuleKey::Wkst => parsed.wkst = Some(attr.value),
            RuleKey::DtStart => parsed.dt_start = Some(attr.value),
            RuleKey::Tzid => parsed.tzid = Some(attr.value),
            RuleKey::ByEaster => parsed.by_easter = Some(attr.value),
            RuleKey::Until => {
                let instant = parse_rule_datetime(&attr.value)?;
                parsed.until = Some(format_storage_datetime(instant));
            }
            RuleKey::ByDay => parsed.by_day = Some(parse_by_day(&attr.value)?),
            RuleKey::ByMonth => parsed.by_month = Some(translated_set(&attr.value)),
            RuleKey::ByWeekday => parsed.by_weekday = Some(translated_set(&attr.value)),
            RuleKey::ExDate => {
                for token in attr.value.split(',').filter(|t| !t.is_empty()) {
                    let day = format_storage_date(parse_rule_datetime(token)?);
                    parsed.exdates.push(DateRange {
                        value: day.clone(),
                        end_value: day,
                    });
                }
            }
        }
    }

    Ok(parsed)
}
