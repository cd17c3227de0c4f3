//! Persisted record types: one session, one day, and the whole document.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::timer::TimerMode;

/// Current on-disk schema version of [`StorageData`].
pub const SCHEMA_VERSION: u64 = 1;

/// Immutable log entry for one completed focus or rest interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,
    pub task_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub points: u32,
    pub focus_minutes: u32,
    #[serde(rename = "type")]
    pub kind: TimerMode,
}

impl SessionRecord {
    /// Calendar day this record belongs to, in local time.
    pub fn date_key(&self) -> String {
        date_key(day_of(self.start_time))
    }

    pub fn is_focus(&self) -> bool {
        self.kind == TimerMode::Focus
    }
}

/// Per-day rollup of points, focus minutes and that day's sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub date: String,
    pub total_points: u64,
    pub total_focus_minutes: u64,
    #[serde(default)]
    pub sessions: Vec<SessionRecord>,
}

impl DailyStats {
    pub fn empty(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            total_points: 0,
            total_focus_minutes: 0,
            sessions: Vec::new(),
        }
    }

    /// Append a session, updating totals for focus sessions only.
    pub(crate) fn push(&mut self, session: SessionRecord) {
        if session.is_focus() {
            self.total_points += u64::from(session.points);
            self.total_focus_minutes += u64::from(session.focus_minutes);
        }
        self.sessions.push(session);
    }

    pub fn has_task_name(&self, name: &str) -> bool {
        let wanted = name.to_lowercase();
        self.sessions
            .iter()
            .any(|s| s.task_name.to_lowercase() == wanted)
    }
}

/// The entire durable state: date key to daily aggregate.
///
/// Iteration order of `days` carries no meaning; callers sort explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageData {
    pub schema_version: u64,
    #[serde(default)]
    pub days: BTreeMap<String, DailyStats>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            days: BTreeMap::new(),
        }
    }
}

impl StorageData {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Local calendar day of an instant.
pub fn day_of(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}

/// `YYYY-MM-DD` key for a calendar day.
pub fn date_key(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(name: &str, kind: TimerMode, points: u32, minutes: u32) -> SessionRecord {
        let start = Local
            .with_ymd_and_hms(2024, 3, 9, 12, 0, 0)
            .single()
            .unwrap()
            .with_timezone(&Utc);
        SessionRecord {
            id: "id".into(),
            task_name: name.into(),
            start_time: start,
            end_time: start + chrono::Duration::minutes(i64::from(minutes.max(1))),
            points,
            focus_minutes: minutes,
            kind,
        }
    }

    #[test]
    fn date_key_uses_local_day_of_start() {
        assert_eq!(record("a", TimerMode::Focus, 1, 1).date_key(), "2024-03-09");
    }

    #[test]
    fn rest_sessions_do_not_touch_totals() {
        let mut day = DailyStats::empty("2024-03-09");
        day.push(record("Read", TimerMode::Focus, 20, 10));
        day.push(record("", TimerMode::Rest, 0, 0));
        assert_eq!(day.total_points, 20);
        assert_eq!(day.total_focus_minutes, 10);
        assert_eq!(day.sessions.len(), 2);
    }

    #[test]
    fn task_name_match_ignores_case() {
        let mut day = DailyStats::empty("2024-03-09");
        day.push(record("Write Report", TimerMode::Focus, 20, 10));
        assert!(day.has_task_name("write report"));
        assert!(day.has_task_name("WRITE REPORT"));
        assert!(!day.has_task_name("Write"));
    }

    #[test]
    fn session_serializes_with_camel_case_and_type() {
        let json = serde_json::to_value(record("Read", TimerMode::Focus, 20, 10)).unwrap();
        assert_eq!(json["taskName"], "Read");
        assert_eq!(json["focusMinutes"], 10);
        assert_eq!(json["type"], "focus");
        assert!(json.get("startTime").is_some());
    }
}
