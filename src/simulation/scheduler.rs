//! Repeating timers driven by the session tick.
//!
//! Timers accumulate elapsed time and fire once per full interval, so a large
//! delta fires a timer several times in one `advance`. After
//! [`Scheduler::shutdown`] nothing fires and nothing can be scheduled.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The periodic jobs of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Hunger drain and starvation damage.
    HungerDecay,
    /// Enemy spawning.
    Spawn,
    /// Survival score.
    Survival,
    /// Health regeneration.
    Regeneration,
    /// Storm pulse around the player.
    StormPulse,
}

/// Handle returned by [`Scheduler::schedule`], used to cancel a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(u64);

/// Scheduling failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulerError {
    /// The scheduler was shut down.
    #[error("scheduler is shut down")]
    ShutDown,
    /// Intervals must be positive and finite.
    #[error("invalid timer interval {0} ms")]
    InvalidInterval(f32),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Timer {
    handle: TimerHandle,
    kind: TimerKind,
    interval_ms: f32,
    elapsed_ms: f32,
}

/// Owns the session's repeating timers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    timers: Vec<Timer>,
    next_handle: u64,
    shut_down: bool,
}

impl Scheduler {
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a repeating timer.
    ///
    /// # Arguments
    ///
    /// * `kind` - Job reported when the timer fires
    /// * `interval_ms` - Period in milliseconds
    ///
    /// # Returns
    ///
    /// A handle for [`Scheduler::cancel`].
    pub fn schedule(&mut self, kind: TimerKind, interval_ms: f32) -> Result<TimerHandle, SchedulerError> {
        if self.shut_down {
            return Err(SchedulerError::ShutDown);
        }
        if !interval_ms.is_finite() || interval_ms <= 0.0 {
            return Err(SchedulerError::InvalidInterval(interval_ms));
        }

        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.push(Timer {
            handle,
            kind,
            interval_ms,
            elapsed_ms: 0.0,
        });
        Ok(handle)
    }

    /// Stops a timer.
    ///
    /// # Returns
    ///
    /// `true` if the timer was running.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.handle != handle);
        self.timers.len() != before
    }

    /// Advances every timer.
    ///
    /// # Returns
    ///
    /// Fired jobs in firing order. Timers are visited in scheduling order,
    /// each firing as many times as full intervals elapsed.
    pub fn advance(&mut self, delta_ms: f32) -> Vec<TimerKind> {
        let mut fired = Vec::new();
        if self.shut_down || delta_ms.is_nan() || delta_ms <= 0.0 {
            return fired;
        }

        for timer in &mut self.timers {
            timer.elapsed_ms += delta_ms;
            while timer.elapsed_ms >= timer.interval_ms {
                timer.elapsed_ms -= timer.interval_ms;
                fired.push(timer.kind);
            }
        }
        fired
    }

    /// Number of running timers.
    pub fn active(&self) -> usize {
        self.timers.len()
    }

    /// Checks whether [`Scheduler::shutdown`] was called.
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Cancels every timer and refuses new ones.
    ///
    /// # Returns
    ///
    /// Number of timers stopped; 0 on every call after the first.
    pub fn shutdown(&mut self) -> usize {
        if self.shut_down {
            return 0;
        }
        self.shut_down = true;
        let stopped = self.timers.len();
        self.timers.clear();
        stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_interval() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(TimerKind::Survival, 1000.0).unwrap();

        assert!(scheduler.advance(999.0).is_empty());
        assert_eq!(scheduler.advance(1.0), vec![TimerKind::Survival]);
        assert_eq!(scheduler.advance(2500.0).len(), 2);
        assert_eq!(scheduler.advance(500.0).len(), 1);
    }

    #[test]
    fn cancelled_timer_stays_silent() {
        let mut scheduler = Scheduler::new();
        let spawn = scheduler.schedule(TimerKind::Spawn, 100.0).unwrap();
        scheduler.schedule(TimerKind::HungerDecay, 100.0).unwrap();

        assert!(scheduler.cancel(spawn));
        assert!(!scheduler.cancel(spawn));
        assert_eq!(scheduler.advance(100.0), vec![TimerKind::HungerDecay]);
    }

    #[test]
    fn shutdown_happens_once() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(TimerKind::Spawn, 100.0).unwrap();
        scheduler.schedule(TimerKind::Survival, 100.0).unwrap();

        assert_eq!(scheduler.shutdown(), 2);
        assert_eq!(scheduler.shutdown(), 0);
        assert!(scheduler.advance(1000.0).is_empty());
        assert_eq!(
            scheduler.schedule(TimerKind::Spawn, 100.0),
            Err(SchedulerError::ShutDown)
        );
    }

    #[test]
    fn rejects_zero_interval() {
        let mut scheduler = Scheduler::new();
        assert!(scheduler.schedule(TimerKind::StormPulse, 0.0).is_err());
    }
}
