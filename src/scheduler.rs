//! Tick scheduling for the game loop
//!
//! The engine never owns a timer. It hands back a [`ScheduleCommand`] and the
//! driver applies it here, with cancel-and-restart semantics: a speed change
//! drops the old registration and creates a new one.

use std::future;
use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::debug;

use crate::game::ScheduleCommand;

/// A periodic callback source that can be started and cancelled
pub trait Scheduler {
    /// Begin firing every `period`, replacing any current registration
    fn start(&mut self, period: Duration);

    /// Stop firing
    fn cancel(&mut self);

    fn is_active(&self) -> bool;

    /// Current period, if active
    fn period(&self) -> Option<Duration>;

    fn apply(&mut self, command: ScheduleCommand) {
        match command {
            ScheduleCommand::Start(period) | ScheduleCommand::Restart(period) => {
                self.start(period)
            }
            ScheduleCommand::Stop => self.cancel(),
        }
    }
}

/// Scheduler backed by `tokio::time::Interval`.
///
/// The first tick fires one full period after `start`, not immediately.
#[derive(Debug, Default)]
pub struct IntervalScheduler {
    timer: Option<Interval>,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self { timer: None }
    }

    /// Wait for the next tick. Never resolves while cancelled, so it can sit
    /// in a `select!` next to other event sources.
    pub async fn next_tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }
}

impl Scheduler for IntervalScheduler {
    fn start(&mut self, period: Duration) {
        debug!(period_ms = period.as_millis() as u64, "scheduler started");
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
    }

    fn cancel(&mut self) {
        if self.timer.take().is_some() {
            debug!("scheduler cancelled");
        }
    }

    fn is_active(&self) -> bool {
        self.timer.is_some()
    }

    fn period(&self) -> Option<Duration> {
        self.timer.as_ref().map(Interval::period)
    }
}
