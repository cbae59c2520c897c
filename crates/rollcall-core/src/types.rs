//! Shared domain model for event series and their occurrences.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an event series (the recurring parent entity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventSeriesId(pub Uuid);

impl EventSeriesId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventSeriesId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventSeriesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of a single event occurrence within a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventInstanceId(pub Uuid);

impl EventInstanceId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventInstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventInstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One occurrence of an event: a start/end pair, optionally tied to a
/// parent series. Immutable once handed to an availability query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInstance {
    pub id: EventInstanceId,
    pub series_id: Option<EventSeriesId>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl EventInstance {
    /// Builds a standalone occurrence with no parent series.
    #[must_use]
    pub fn standalone(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id: EventInstanceId::new(),
            series_id: None,
            start,
            end,
        }
    }

    /// Builds an occurrence belonging to `series`.
    #[must_use]
    pub fn in_series(series: EventSeriesId, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id: EventInstanceId::new(),
            series_id: Some(series),
            start,
            end,
        }
    }

    /// Occurrence length in whole seconds.
    #[must_use]
    pub fn duration_seconds(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn duration_is_end_minus_start() {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 1, 11, 30, 0).unwrap();
        let instance = EventInstance::standalone(start, end);
        assert_eq!(instance.duration_seconds(), 5400);
    }

    #[test]
    fn in_series_records_parent() {
        let series = EventSeriesId::new();
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
        let instance = EventInstance::in_series(series, start, start);
        assert_eq!(instance.series_id, Some(series));
    }
}
