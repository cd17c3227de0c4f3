//! # ForgeFocus Core Library
//!
//! Business logic for the ForgeFocus focus timer: timed focus and rest
//! intervals, points for completed focus work, and a per-day history.
//! The CLI binary is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer**: a tick-driven state machine; the caller supplies one tick
//!   per second and injects the clock and notification port
//! - **Storage**: one versioned JSON document in a key-value store
//!   (SQLite or in-memory), plus TOML configuration
//! - **History**: read-only projections over the stored aggregates
//!
//! ## Key Components
//!
//! - [`FocusTimer`]: Core timer state machine
//! - [`AggregateRepository`]: Daily aggregate persistence
//! - [`History`]: Historical views and totals
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod history;
pub mod logging;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, NotificationError, StoreError, ValidationError};
pub use events::Event;
pub use history::{History, HistorySummary};
pub use storage::{
    AggregateRepository, Config, DailyStats, Database, KvStore, MemoryStore, SessionRecord,
    StorageData,
};
pub use timer::{FocusTimer, SessionConfig, TimerMode};
