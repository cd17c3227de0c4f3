//! Daily aggregate repository.
//!
//! Reads and rewrites the whole [`StorageData`] document through a
//! [`KvStore`]. [`AggregateRepository::record_session`] is the only write
//! path; everything else is a read.
//!
//! Documents are versioned. A bare `date -> DailyStats` object (written
//! before versioning existed, keyed by UTC date) is regrouped by local date
//! in memory and saved as the current version on the next write. Unknown versions and unparsable blobs are
//! reported, never discarded.

use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::database::{KvStore, STORAGE_KEY};
use super::records::{date_key, DailyStats, SessionRecord, StorageData, SCHEMA_VERSION};
use crate::error::StoreError;

pub struct AggregateRepository<S> {
    store: S,
}

impl<S: KvStore> AggregateRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Load the entire document. A missing document is the empty state.
    pub fn read_all(&self) -> Result<StorageData, StoreError> {
        match self.store.get(STORAGE_KEY)? {
            Some(raw) => decode(&raw),
            None => Ok(StorageData::default()),
        }
    }

    /// Append `session` to the day of its start time and persist.
    ///
    /// Totals move only for focus sessions. Returns that day's updated
    /// aggregate.
    pub fn record_session(&self, session: SessionRecord) -> Result<DailyStats, StoreError> {
        validate(&session)?;

        let mut data = self.read_all()?;
        let key = session.date_key();
        let id = session.id.clone();

        let day = data
            .days
            .entry(key.clone())
            .or_insert_with(|| DailyStats::empty(key.clone()));
        day.push(session);
        let updated = day.clone();

        data.schema_version = SCHEMA_VERSION;
        self.write(&data)?;

        info!(
            session = %id,
            date = %key,
            total_points = updated.total_points,
            total_focus_minutes = updated.total_focus_minutes,
            "session recorded"
        );
        Ok(updated)
    }

    /// Aggregate for one calendar day, if anything was recorded on it.
    pub fn day(&self, date: NaiveDate) -> Result<Option<DailyStats>, StoreError> {
        let mut data = self.read_all()?;
        Ok(data.days.remove(&date_key(date)))
    }

    /// Whether `name` is unused (case-insensitively) on `date`.
    pub fn is_task_name_unique_on(&self, name: &str, date: NaiveDate) -> Result<bool, StoreError> {
        Ok(match self.day(date)? {
            Some(day) => !day.has_task_name(name),
            None => true,
        })
    }

    /// Whether `name` is unused today. Earlier days never count.
    pub fn is_task_name_unique_today(&self, name: &str) -> Result<bool, StoreError> {
        self.is_task_name_unique_on(name, Local::now().date_naive())
    }

    /// Every day on record, most recent first.
    pub fn list_all_days(&self) -> Result<Vec<DailyStats>, StoreError> {
        let data = self.read_all()?;
        let mut days: Vec<DailyStats> = data.days.into_values().collect();
        days.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(days)
    }

    fn write(&self, data: &StorageData) -> Result<(), StoreError> {
        let raw = serde_json::to_string(data)?;
        self.store.set(STORAGE_KEY, &raw)
    }
}

fn validate(session: &SessionRecord) -> Result<(), StoreError> {
    let invalid = |message: &str| StoreError::InvalidSession {
        id: session.id.clone(),
        message: message.to_string(),
    };
    if session.end_time <= session.start_time {
        return Err(invalid("end time must be after start time"));
    }
    if session.is_focus() && session.task_name.trim().is_empty() {
        return Err(invalid("focus sessions need a task name"));
    }
    Ok(())
}

fn decode(raw: &str) -> Result<StorageData, StoreError> {
    let corrupt = |message: String| StoreError::CorruptStore {
        key: STORAGE_KEY.to_string(),
        message,
    };

    let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| corrupt(e.to_string()))?;
    if !value.is_object() {
        return Err(corrupt("document is not a JSON object".into()));
    }

    let version = match value.get("schemaVersion") {
        Some(v) => Some(
            v.as_u64()
                .ok_or_else(|| corrupt(format!("schemaVersion is not an integer: {v}")))?,
        ),
        None => None,
    };

    match version {
        Some(SCHEMA_VERSION) => {
            serde_json::from_value(value).map_err(|e| corrupt(e.to_string()))
        }
        Some(found) => Err(StoreError::UnsupportedSchema {
            found,
            expected: SCHEMA_VERSION,
        }),
        None => {
            let legacy: BTreeMap<String, DailyStats> =
                serde_json::from_value(value).map_err(|e| corrupt(e.to_string()))?;
            debug!(days = legacy.len(), "upgrading unversioned store document");
            Ok(StorageData {
                schema_version: SCHEMA_VERSION,
                days: regroup_by_local_day(legacy),
            })
        }
    }
}

/// Unversioned documents keyed days by UTC date. File every session under
/// the local day of its start and recompute the totals from the sessions.
fn regroup_by_local_day(legacy: BTreeMap<String, DailyStats>) -> BTreeMap<String, DailyStats> {
    let mut days: BTreeMap<String, DailyStats> = BTreeMap::new();
    for (key, day) in legacy {
        if day.sessions.is_empty() {
            days.entry(key.clone())
                .or_insert_with(|| DailyStats::empty(key));
            continue;
        }
        for session in day.sessions {
            let date = session.date_key();
            days.entry(date.clone())
                .or_insert_with(|| DailyStats::empty(date))
                .push(session);
        }
    }
    days
}
