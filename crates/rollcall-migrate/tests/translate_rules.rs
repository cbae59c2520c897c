//! End-to-end translation tests over the persisted destination shape.

use chrono::NaiveDateTime;
use rollcall_migrate::batch::{SourceRow, translate_rows};
use rollcall_migrate::error::MigrateError;
use rollcall_migrate::rule::error::ParseErrorKind;
use rollcall_migrate::translate::{SourcePeriod, translate};

fn period(value: &str, value2: &str, rrule: Option<&str>) -> SourcePeriod {
    serde_json::from_value(serde_json::json!({
        "value": value,
        "value2": value2,
        "rrule": rrule,
    }))
    .unwrap()
}

fn destination(rule: Option<&str>, periods: &[SourcePeriod]) -> serde_json::Value {
    translate(rule, periods, chrono_tz::UTC)
        .unwrap()
        .into_destination()
        .unwrap()
}

#[test]
fn weekly_rule_with_days_and_until() {
    let src = vec![
        period("2025-05-05T14:00:00", "2025-05-05T15:30:00", None),
        period("2025-05-12T14:00:00", "2025-05-12T15:30:00", None),
    ];
    let dest = destination(Some("FREQ=WEEKLY;BYDAY=MO,WE;UNTIL=20250601T000000Z"), &src);

    assert_eq!(dest["recur_type"], "weekly_recurring_date");
    let options = &dest["weekly_recurring_date"];
    assert_eq!(options["end_value"], "2025-06-01T00:00:00");
    let days: Vec<&str> = options["days"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d.as_str().unwrap())
        .collect();
    assert_eq!(days, vec!["monday", "wednesday"]);
    assert_eq!(options["duration"], 5400);
    assert_eq!(options["time"], "02:00 pm");
}

#[test]
fn monthly_second_tuesday() {
    let src = vec![period("2025-05-13T09:00:00", "2025-05-13T10:00:00", None)];
    let dest = destination(Some("FREQ=MONTHLY;BYDAY=+2TU"), &src);

    assert_eq!(dest["recur_type"], "monthly_recurring_date");
    let options = &dest["monthly_recurring_date"];
    assert_eq!(options["type"], "weekday");
    assert_eq!(options["day_occurrence"], "second");
    assert_eq!(options["days"][0], "tuesday");
    assert_eq!(options["day_of_month"], serde_json::Value::Null);
}

#[test]
fn ruleless_record_becomes_custom_dates() {
    let src = vec![
        period("2025-05-05T14:00:00", "2025-05-05T15:00:00", None),
        period("2025-06-10T09:00:00", "2025-06-10T10:00:00", None),
        period("2025-07-19T18:00:00", "2025-07-19T21:00:00", None),
    ];
    let dest = destination(None, &src);

    assert_eq!(dest["recur_type"], "custom");
    let dates = dest["custom_date"].as_array().unwrap();
    assert_eq!(dates.len(), 3);
    assert_eq!(dates[0]["value"], "2025-05-05T14:00:00");
    assert_eq!(dates[2]["end_value"], "2025-07-19T21:00:00");
}

#[test]
fn unsupported_frequency_ignores_rule_keys() {
    let src = vec![
        period("2025-05-05T14:00:00", "2025-05-05T15:00:00", None),
        period("2025-05-06T14:00:00", "2025-05-06T15:00:00", None),
    ];
    let dest = destination(Some("FREQ=DAILY;COUNT=9;BYDAY=MO"), &src);

    assert_eq!(dest["recur_type"], "custom");
    assert_eq!(dest["custom_date"].as_array().unwrap().len(), 2);
    assert!(dest.get("weekly_recurring_date").is_none());
}

#[test]
fn exdate_entries_become_excluded_date_pairs() {
    let src = vec![period("2025-01-06T10:00:00", "2025-01-06T11:00:00", None)];
    let dest = destination(
        Some("FREQ=WEEKLY;EXDATE=20250101T000000Z,20250201T000000Z"),
        &src,
    );

    let excluded = dest["excluded_dates"].as_array().unwrap();
    assert_eq!(excluded.len(), 2);
    assert_eq!(excluded[0]["value"], "2025-01-01");
    assert_eq!(excluded[0]["end_value"], "2025-01-01");
    assert_eq!(excluded[1]["value"], "2025-02-01");
    assert_eq!(excluded[1]["end_value"], "2025-02-01");
}

#[test]
fn until_round_trips_without_drift() {
    let src = vec![period("2025-05-05T14:00:00", "2025-05-05T15:00:00", None)];
    let dest = destination(Some("FREQ=WEEKLY;UNTIL=20250601T083000Z"), &src);

    let formatted = dest["weekly_recurring_date"]["end_value"].as_str().unwrap();
    let reparsed = NaiveDateTime::parse_from_str(formatted, "%Y-%m-%dT%H:%M:%S").unwrap();
    assert_eq!(reparsed.format("%Y%m%dT%H%M%S").to_string(), "20250601T083000");
}

#[test]
fn unknown_attribute_fails_without_partial_output() {
    let src = vec![period("2025-05-05T14:00:00", "2025-05-05T15:00:00", None)];
    let result = translate(Some("FREQ=WEEKLY;FOO=BAR"), &src, chrono_tz::UTC);

    let Err(MigrateError::Parse(parse_error)) = result else {
        panic!("expected a parse error");
    };
    assert_eq!(parse_error.kind, ParseErrorKind::UnknownAttribute);
    assert!(parse_error.to_string().contains("FOO"));
}

#[test]
fn batch_rows_parse_from_the_export_format() {
    let raw = serde_json::json!([
        {
            "id": "17",
            "dates": [
                {
                    "value": "2025-05-05T14:00:00",
                    "value2": "2025-05-05T15:00:00",
                    "rrule": "FREQ=WEEKLY;COUNT=3"
                },
                { "value": "2025-05-12T14:00:00", "value2": "2025-05-12T15:00:00" }
            ]
        },
        { "id": "18", "dates": [] }
    ]);
    let rows: Vec<SourceRow> = serde_json::from_value(raw).unwrap();

    let report = translate_rows(&rows, chrono_tz::UTC);
    assert_eq!(report.destinations.len(), 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.destinations[0]["recur_type"], "weekly_recurring_date");
    // Three 7-day weeks past the start.
    assert_eq!(
        report.destinations[0]["weekly_recurring_date"]["end_value"],
        "2025-05-26T14:00:00"
    );
}
