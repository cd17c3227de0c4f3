//! Focus timer state machine.
//!
//! The timer does not own a thread or read wall-clock time to count down.
//! The caller feeds it one `tick()` per elapsed second while it is active;
//! see [`crate::timer::ticker`] for an async driver.
//!
//! ## State Transitions
//!
//! ```text
//! Idle(focus) -> Running(focus) -> [recorded] -> Idle(rest) -> Running(rest) -> Idle(focus)
//!                    |   ^                                        |   ^
//!                  pause start                                  pause start
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = FocusTimer::new(repo, preset(0).unwrap());
//! timer.set_task_name("Read")?;
//! timer.start()?;
//! // once per second:
//! if let Some(event) = timer.tick()? { /* interval finished */ }
//! ```

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use super::clock::{Clock, SystemClock};
use super::notify::{NotificationKind, Notifier, SilentNotifier};
use super::preset::{SessionConfig, TimerMode};
use crate::error::{CoreError, ValidationError};
use crate::events::Event;
use crate::storage::{AggregateRepository, KvStore, SessionRecord};

/// Label recorded for a focus session whose name went missing.
pub const DEFAULT_TASK_LABEL: &str = "Focus Session";

type CompletionCallback = Box<dyn FnMut() + Send>;

pub struct FocusTimer<S> {
    repo: AggregateRepository<S>,
    config: SessionConfig,
    mode: TimerMode,
    active: bool,
    time_left_secs: u64,
    task_name: String,
    session_start: Option<DateTime<Utc>>,
    validation_error: Option<String>,
    default_task_label: String,
    clock: Box<dyn Clock>,
    notifier: Box<dyn Notifier>,
    on_session_completed: Option<CompletionCallback>,
}

impl<S: KvStore> FocusTimer<S> {
    /// Create an idle timer in focus mode with the full focus duration.
    pub fn new(repo: AggregateRepository<S>, config: SessionConfig) -> Self {
        let time_left_secs = config.duration_secs(TimerMode::Focus);
        Self {
            repo,
            config,
            mode: TimerMode::Focus,
            active: false,
            time_left_secs,
            task_name: String::new(),
            session_start: None,
            validation_error: None,
            default_task_label: DEFAULT_TASK_LABEL.to_string(),
            clock: Box::new(SystemClock),
            notifier: Box::new(SilentNotifier),
            on_session_completed: None,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn with_default_task_label(mut self, label: impl Into<String>) -> Self {
        self.default_task_label = label.into();
        self
    }

    /// Register the zero-argument hook run after a focus session is persisted.
    pub fn on_session_completed(mut self, callback: impl FnMut() + Send + 'static) -> Self {
        self.on_session_completed = Some(Box::new(callback));
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn time_left_secs(&self) -> u64 {
        self.time_left_secs
    }

    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    pub fn session_start(&self) -> Option<DateTime<Utc>> {
        self.session_start
    }

    /// Reason the last `start()` was rejected, cleared by the next success.
    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn repository(&self) -> &AggregateRepository<S> {
        &self.repo
    }

    /// Full length of the current mode in seconds.
    pub fn total_secs(&self) -> u64 {
        self.config.duration_secs(self.mode)
    }

    /// 0.0 .. 1.0 progress within the current interval.
    pub fn progress_fraction(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.time_left_secs as f64 / total as f64)
    }

    /// Remaining time as `MM:SS`.
    pub fn format_remaining(&self) -> String {
        format_mm_ss(self.time_left_secs)
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.mode,
            active: self.active,
            remaining_secs: self.time_left_secs,
            total_secs: self.total_secs(),
            progress: self.progress_fraction(),
            task_name: self.task_name.clone(),
            config_label: self.config.label.clone(),
            validation_error: self.validation_error.clone(),
            at: self.clock.now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Switch presets. Only allowed while the countdown is stopped.
    pub fn select_config(&mut self, config: SessionConfig) -> Result<Event, ValidationError> {
        if self.active {
            return Err(ValidationError::TimerActive);
        }
        self.config = config;
        self.mode = TimerMode::Focus;
        self.time_left_secs = self.config.duration_secs(TimerMode::Focus);
        self.task_name.clear();
        self.session_start = None;
        debug!(label = %self.config.label, "config selected");
        Ok(Event::ConfigSelected {
            label: self.config.label.clone(),
            focus_minutes: self.config.focus_minutes,
            rest_minutes: self.config.rest_minutes,
            points: self.config.points,
            at: self.clock.now(),
        })
    }

    /// Edit the task name of the upcoming focus interval.
    pub fn set_task_name(&mut self, text: impl Into<String>) -> Result<(), ValidationError> {
        if self.active {
            return Err(ValidationError::TimerActive);
        }
        if self.mode != TimerMode::Focus {
            return Err(ValidationError::WrongMode);
        }
        self.task_name = text.into();
        Ok(())
    }

    /// Start or resume the countdown.
    ///
    /// Focus intervals need a non-blank task name that has not been used
    /// today. A rejection leaves the countdown and the store untouched and
    /// is also kept in [`FocusTimer::validation_error`].
    pub fn start(&mut self) -> Result<Event, CoreError> {
        if self.active {
            return Err(ValidationError::TimerActive.into());
        }

        if self.mode == TimerMode::Focus {
            let name = self.task_name.trim().to_string();
            if name.is_empty() {
                return Err(self.reject(ValidationError::EmptyTaskName));
            }
            if !self.repo.is_task_name_unique_on(&name, self.clock.today())? {
                return Err(self.reject(ValidationError::DuplicateTaskName(name)));
            }
            self.task_name = name;
        }

        let now = self.clock.now();
        let resumed = self.time_left_secs < self.total_secs();
        self.session_start.get_or_insert(now);
        self.active = true;
        self.validation_error = None;
        debug!(mode = %self.mode, remaining = self.time_left_secs, resumed, "timer started");

        Ok(Event::TimerStarted {
            mode: self.mode,
            remaining_secs: self.time_left_secs,
            resumed,
            at: now,
        })
    }

    /// Stop the countdown, keeping the remaining time and start marker.
    pub fn pause(&mut self) -> Result<Event, ValidationError> {
        if !self.active {
            return Err(ValidationError::NotActive);
        }
        self.active = false;
        debug!(mode = %self.mode, remaining = self.time_left_secs, "timer paused");
        Ok(Event::TimerPaused {
            mode: self.mode,
            remaining_secs: self.time_left_secs,
            at: self.clock.now(),
        })
    }

    /// One elapsed second. Ticks while inactive are ignored.
    ///
    /// The tick that brings the countdown to zero completes the interval
    /// before returning, so a completion is never skipped or repeated.
    pub fn tick(&mut self) -> Result<Option<Event>, CoreError> {
        if !self.active {
            return Ok(None);
        }
        self.time_left_secs = self.time_left_secs.saturating_sub(1);
        if self.time_left_secs == 0 {
            return self.complete_session().map(Some);
        }
        Ok(None)
    }

    /// Finish the current interval now.
    ///
    /// Focus: record the session, notify, run the completion hook and set up
    /// an idle rest interval. If recording fails the timer stays stopped in
    /// focus mode and this may be called again.
    /// Rest: notify and set up an idle focus interval.
    pub fn complete_session(&mut self) -> Result<Event, CoreError> {
        self.active = false;
        let end = self.clock.now();

        match self.mode {
            TimerMode::Focus => {
                let record = self.build_focus_record(end);
                let day = self.repo.record_session(record.clone())?;

                self.notify(NotificationKind::Success);
                if let Some(callback) = self.on_session_completed.as_mut() {
                    callback();
                }

                self.mode = TimerMode::Rest;
                self.time_left_secs = self.config.duration_secs(TimerMode::Rest);
                self.session_start = Some(end);
                debug!(task = %record.task_name, "focus complete, rest ready");

                Ok(Event::FocusCompleted {
                    record,
                    day_total_points: day.total_points,
                    day_total_focus_minutes: day.total_focus_minutes,
                    rest_secs: self.time_left_secs,
                    at: end,
                })
            }
            TimerMode::Rest => {
                self.notify(NotificationKind::Fail);

                self.mode = TimerMode::Focus;
                self.time_left_secs = self.config.duration_secs(TimerMode::Focus);
                self.task_name.clear();
                self.session_start = None;
                debug!("rest complete, focus ready");

                Ok(Event::RestCompleted {
                    focus_secs: self.time_left_secs,
                    at: end,
                })
            }
        }
    }

    /// Stop and refill the current mode's full duration.
    pub fn reset(&mut self) -> Event {
        self.active = false;
        self.time_left_secs = self.total_secs();
        debug!(mode = %self.mode, "timer reset");
        Event::TimerReset {
            mode: self.mode,
            remaining_secs: self.time_left_secs,
            at: self.clock.now(),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn reject(&mut self, err: ValidationError) -> CoreError {
        self.validation_error = Some(err.to_string());
        err.into()
    }

    fn build_focus_record(&self, end: DateTime<Utc>) -> SessionRecord {
        let task_name = if self.task_name.trim().is_empty() {
            self.default_task_label.clone()
        } else {
            self.task_name.clone()
        };
        let fallback_start = end - Duration::minutes(i64::from(self.config.focus_minutes));
        let start = self
            .session_start
            .filter(|start| *start < end)
            .unwrap_or(fallback_start);

        SessionRecord {
            id: Uuid::new_v4().to_string(),
            task_name,
            start_time: start,
            end_time: end,
            points: self.config.points,
            focus_minutes: self.config.focus_minutes,
            kind: TimerMode::Focus,
        }
    }

    fn notify(&self, kind: NotificationKind) {
        if let Err(e) = self.notifier.play(kind) {
            warn!(error = %e, ?kind, "notification failed");
        }
    }
}

/// Render seconds as zero-padded `MM:SS`.
pub fn format_mm_ss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
