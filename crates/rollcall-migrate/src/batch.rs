//! Batch translation over a legacy export.
//!
//! Each row translates independently: a bad rule or date fails that row
//! and the batch moves on. The caller gets every outcome back in a
//! [`MigrationReport`] rather than a process-wide abort.

use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::MigrateError;
use crate::translate::{SourcePeriod, Translation, translate};

/// One legacy record: its date-field items in storage order.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceRow {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub dates: Vec<SourcePeriod>,
}

/// A row that failed to translate.
#[derive(Debug)]
pub struct RowFailure {
    pub index: usize,
    pub id: Option<String>,
    pub error: MigrateError,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct MigrationReport {
    /// Destination values for the rows that translated, in input order.
    pub destinations: Vec<serde_json::Value>,
    /// Rows skipped because they had no dates at all.
    pub skipped: usize,
    pub failures: Vec<RowFailure>,
}

impl MigrationReport {
    /// True when at least one row was attempted and none succeeded.
    #[must_use]
    pub fn all_failed(&self) -> bool {
        self.destinations.is_empty() && !self.failures.is_empty()
    }
}

/// ## Summary
/// Translates every row of a legacy export.
///
/// The rule string rides on the first date item of each row, as the
/// legacy date field stores it. Rows without dates are skipped; rows
/// that fail are logged and recorded, and the batch continues.
#[must_use]
pub fn translate_rows(rows: &[SourceRow], timezone: Tz) -> MigrationReport {
    let mut report = MigrationReport::default();

    for (index, row) in rows.iter().enumerate() {
        if row.dates.is_empty() {
            tracing::debug!(index, id = ?row.id, "Row has no source dates, skipping");
            report.skipped += 1;
            continue;
        }

        let rule = row.dates[0].rrule.as_deref();
        match translate(rule, &row.dates, timezone).and_then(Translation::into_destination) {
            Ok(destination) => report.destinations.push(destination),
            Err(error) => {
                tracing::warn!(index, id = ?row.id, error = %error, "Row translation failed");
                report.failures.push(RowFailure {
                    index,
                    id: row.id.clone(),
                    error,
                });
            }
        }
    }

    tracing::info!(
        translated = report.destinations.len(),
        skipped = report.skipped,
        failed = report.failures.len(),
        "Batch translation finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, rrule: Option<&str>, pairs: &[(&str, &str)]) -> SourceRow {
        let mut dates: Vec<SourcePeriod> = pairs
            .iter()
            .map(|(value, value2)| SourcePeriod {
                value: (*value).to_string(),
                value2: (*value2).to_string(),
                rrule: None,
            })
            .collect();
        if let Some(first) = dates.first_mut() {
            first.rrule = rrule.map(ToString::to_string);
        }
        SourceRow {
            id: Some(id.to_string()),
            dates,
        }
    }

    #[test_log::test]
    fn bad_rows_do_not_stop_the_batch() {
        let rows = vec![
            row(
                "good",
                Some("FREQ=WEEKLY;COUNT=2"),
                &[("2025-05-05T14:00:00", "2025-05-05T15:00:00")],
            ),
            row(
                "bad",
                Some("FREQ=WEEKLY;FOO=BAR"),
                &[("2025-05-05T14:00:00", "2025-05-05T15:00:00")],
            ),
            row(
                "also-good",
                None,
                &[("2025-06-01T09:00:00", "2025-06-01T10:00:00")],
            ),
        ];

        let report = translate_rows(&rows, chrono_tz::UTC);
        assert_eq!(report.destinations.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, 1);
        assert_eq!(report.failures[0].id.as_deref(), Some("bad"));
        assert!(!report.all_failed());
    }

    #[test]
    fn dateless_rows_are_skipped_not_failed() {
        let rows = vec![SourceRow {
            id: None,
            dates: Vec::new(),
        }];
        let report = translate_rows(&rows, chrono_tz::UTC);
        assert_eq!(report.skipped, 1);
        assert!(report.failures.is_empty());
        assert!(report.destinations.is_empty());
        assert!(!report.all_failed());
    }

    #[test]
    fn ruleless_row_falls_back_to_custom() {
        let rows = vec![row(
            "custom",
            None,
            &[
                ("2025-05-05T14:00:00", "2025-05-05T15:00:00"),
                ("2025-05-20T14:00:00", "2025-05-20T15:00:00"),
            ],
        )];
        let report = translate_rows(&rows, chrono_tz::UTC);
        assert_eq!(report.destinations[0]["recur_type"], "custom");
        assert_eq!(
            report.destinations[0]["custom_date"]
                .as_array()
                .map(Vec::len),
            Some(2)
        );
    }
}
