//! Completion notification port.
//!
//! The timer calls [`Notifier::play`] when an interval ends and logs any
//! failure; a notifier can never fail a completion.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::error::NotificationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// A focus interval was completed and recorded.
    Success,
    /// A rest interval ran out.
    Fail,
}

pub trait Notifier: Send {
    fn play(&self, kind: NotificationKind) -> Result<(), NotificationError>;
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn play(&self, kind: NotificationKind) -> Result<(), NotificationError> {
        (**self).play(kind)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn play(&self, _kind: NotificationKind) -> Result<(), NotificationError> {
        Ok(())
    }
}

/// Rings the terminal bell: once for success, twice for fail.
pub struct TerminalBell<W> {
    out: Mutex<W>,
}

impl TerminalBell<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write + Send> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> Notifier for TerminalBell<W> {
    fn play(&self, kind: NotificationKind) -> Result<(), NotificationError> {
        let bells: &[u8] = match kind {
            NotificationKind::Success => b"\x07",
            NotificationKind::Fail => b"\x07\x07",
        };
        let mut out = self
            .out
            .lock()
            .map_err(|_| NotificationError::Playback("bell writer poisoned".into()))?;
        out.write_all(bells)?;
        out.flush()?;
        Ok(())
    }
}

/// Test double for embedders' own tests: remembers every notification.
///
/// Clones share the log, so keep one handle and pass the other to the timer.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    played: Arc<Mutex<Vec<NotificationKind>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<NotificationKind> {
        self.played.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn play(&self, kind: NotificationKind) -> Result<(), NotificationError> {
        self.played
            .lock()
            .map_err(|_| NotificationError::Playback("recorder poisoned".into()))?
            .push(kind);
        Ok(())
    }
}
