use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::SessionRecord;
use crate::timer::TimerMode;

/// Every state change of the timer produces an Event.
/// Front ends print or render them; nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ConfigSelected {
        label: String,
        focus_minutes: u32,
        rest_minutes: u32,
        points: u32,
        at: DateTime<Utc>,
    },
    TimerStarted {
        mode: TimerMode,
        remaining_secs: u64,
        /// True when continuing a partially elapsed interval.
        resumed: bool,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A focus interval ran out and was recorded; rest is set up but idle.
    FocusCompleted {
        record: SessionRecord,
        day_total_points: u64,
        day_total_focus_minutes: u64,
        rest_secs: u64,
        at: DateTime<Utc>,
    },
    /// A rest interval ran out; the next focus interval is idle.
    RestCompleted {
        focus_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: TimerMode,
        active: bool,
        remaining_secs: u64,
        total_secs: u64,
        progress: f64,
        task_name: String,
        config_label: String,
        validation_error: Option<String>,
        at: DateTime<Utc>,
    },
}
