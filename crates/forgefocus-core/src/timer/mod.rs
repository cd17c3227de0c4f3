pub mod clock;
mod engine;
pub mod notify;
mod preset;
pub mod ticker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{format_mm_ss, FocusTimer, DEFAULT_TASK_LABEL};
pub use notify::{NotificationKind, Notifier, RecordingNotifier, SilentNotifier, TerminalBell};
pub use preset::{preset, preset_or_err, presets, SessionConfig, TimerMode, DEFAULT_PRESET};
