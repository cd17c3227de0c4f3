//! Read-only history views over the aggregate repository.
//!
//! Nothing is cached: every call re-reads the store.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::storage::{AggregateRepository, DailyStats, KvStore, SessionRecord};

/// Totals across every recorded day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub days: usize,
    pub total_sessions: usize,
    pub total_points: u64,
    pub total_focus_minutes: u64,
}

pub struct History<'a, S> {
    repo: &'a AggregateRepository<S>,
}

impl<'a, S: KvStore> History<'a, S> {
    pub fn new(repo: &'a AggregateRepository<S>) -> Self {
        Self { repo }
    }

    /// All days, most recent first.
    pub fn days(&self) -> Result<Vec<DailyStats>, StoreError> {
        self.repo.list_all_days()
    }

    /// Sessions of one day (`YYYY-MM-DD`) in the order they were recorded.
    /// Unknown days yield an empty list.
    pub fn sessions_for(&self, date: &str) -> Result<Vec<SessionRecord>, StoreError> {
        let mut data = self.repo.read_all()?;
        Ok(data
            .days
            .remove(date)
            .map(|day| day.sessions)
            .unwrap_or_default())
    }

    pub fn summary(&self) -> Result<HistorySummary, StoreError> {
        Ok(self
            .days()?
            .iter()
            .fold(HistorySummary::default(), |mut acc, day| {
                acc.days += 1;
                acc.total_sessions += day.sessions.len();
                acc.total_points += day.total_points;
                acc.total_focus_minutes += day.total_focus_minutes;
                acc
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::timer::TimerMode;
    use chrono::{Duration, Local, TimeZone, Utc};

    fn record(id: &str, day: u32, hour: u32, points: u32, minutes: u32) -> SessionRecord {
        let start = Local
            .with_ymd_and_hms(2024, 1, day, hour, 0, 0)
            .single()
            .unwrap()
            .with_timezone(&Utc);
        SessionRecord {
            id: id.into(),
            task_name: format!("task {id}"),
            start_time: start,
            end_time: start + Duration::minutes(i64::from(minutes)),
            points,
            focus_minutes: minutes,
            kind: TimerMode::Focus,
        }
    }

    #[test]
    fn empty_history() {
        let repo = AggregateRepository::new(MemoryStore::new());
        let history = History::new(&repo);
        assert!(history.days().unwrap().is_empty());
        assert!(history.sessions_for("2024-01-01").unwrap().is_empty());
        assert_eq!(history.summary().unwrap(), HistorySummary::default());
    }

    #[test]
    fn sessions_keep_chronological_order() {
        let repo = AggregateRepository::new(MemoryStore::new());
        repo.record_session(record("a", 1, 9, 20, 10)).unwrap();
        repo.record_session(record("b", 1, 11, 20, 10)).unwrap();
        repo.record_session(record("c", 2, 9, 20, 10)).unwrap();
        let history = History::new(&repo);
        let ids: Vec<_> = history
            .sessions_for("2024-01-01")
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn summary_folds_all_days() {
        let repo = AggregateRepository::new(MemoryStore::new());
        repo.record_session(record("a", 1, 9, 20, 10)).unwrap();
        repo.record_session(record("b", 3, 9, 80, 25)).unwrap();
        repo.record_session(record("c", 3, 11, 35, 15)).unwrap();
        let summary = History::new(&repo).summary().unwrap();
        assert_eq!(
            summary,
            HistorySummary {
                days: 2,
                total_sessions: 3,
                total_points: 135,
                total_focus_minutes: 50,
            }
        );
    }
}
