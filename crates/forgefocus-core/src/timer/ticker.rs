//! Async one-second driver for [`FocusTimer`].
//!
//! Each tick, including a completion it triggers, finishes before the next
//! one is awaited. Dropping the future cancels the pending tick at once, so
//! a caller that races this against a pause signal can pause right after.

use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

use super::engine::FocusTimer;
use crate::error::CoreError;
use crate::events::Event;
use crate::storage::KvStore;

/// Tick `timer` every `period` until the current interval completes.
///
/// Returns the completion event, or `None` if the timer was not active.
/// `on_tick` sees the timer after every non-completing tick.
pub async fn run_interval<S, F>(
    timer: &mut FocusTimer<S>,
    period: Duration,
    mut on_tick: F,
) -> Result<Option<Event>, CoreError>
where
    S: KvStore,
    F: FnMut(&FocusTimer<S>),
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick of a tokio interval fires immediately.
    ticker.tick().await;

    while timer.is_active() {
        ticker.tick().await;
        if let Some(event) = timer.tick()? {
            return Ok(Some(event));
        }
        on_tick(timer);
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{AggregateRepository, MemoryStore};
    use crate::timer::{preset, TimerMode};

    #[tokio::test(start_paused = true)]
    async fn runs_focus_interval_to_completion() {
        let repo = AggregateRepository::new(MemoryStore::new());
        let mut timer = FocusTimer::new(repo, preset(0).unwrap());
        timer.set_task_name("Read").unwrap();
        timer.start().unwrap();

        let mut seen = 0u64;
        let event = run_interval(&mut timer, Duration::from_secs(1), |_| seen += 1)
            .await
            .unwrap();

        assert!(matches!(event, Some(Event::FocusCompleted { .. })));
        assert_eq!(seen, 599);
        assert_eq!(timer.mode(), TimerMode::Rest);
        assert!(!timer.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn idle_timer_returns_immediately() {
        let repo = AggregateRepository::new(MemoryStore::new());
        let mut timer = FocusTimer::new(repo, preset(0).unwrap());
        let event = run_interval(&mut timer, Duration::from_secs(1), |_| {})
            .await
            .unwrap();
        assert!(event.is_none());
        assert_eq!(timer.time_left_secs(), 600);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_driver_stops_ticking() {
        let repo = AggregateRepository::new(MemoryStore::new());
        let mut timer = FocusTimer::new(repo, preset(0).unwrap());
        timer.set_task_name("Read").unwrap();
        timer.start().unwrap();

        let outcome = tokio::time::timeout(
            Duration::from_millis(30_500),
            run_interval(&mut timer, Duration::from_secs(1), |_| {}),
        )
        .await;
        assert!(outcome.is_err());
        timer.pause().unwrap();
        assert_eq!(timer.time_left_secs(), 570);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(timer.time_left_secs(), 570);
    }
}
