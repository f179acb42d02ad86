//! Local progress clock
//!
//! A single tokio task that emits one [`ClockTick`] per quantum while the session is
//! playing. Ticks go into a channel drained by the event loop that owns the session, so
//! the clock never touches session state itself. Each `start` bumps the epoch; ticks from
//! an earlier run that are still sitting in the channel are recognised and dropped.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// Fixed step by which local progress advances
pub const PROGRESS_QUANTUM_MS: u32 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockTick {
    pub epoch: u64,
}

pub type ClockTicks = mpsc::UnboundedReceiver<ClockTick>;

pub struct ProgressClock {
    sender: mpsc::UnboundedSender<ClockTick>,
    handle: Option<JoinHandle<()>>,
    epoch: u64,
    period: Duration,
}

impl ProgressClock {
    pub fn new() -> (Self, ClockTicks) {
        Self::with_period(Duration::from_millis(PROGRESS_QUANTUM_MS as u64))
    }

    pub fn with_period(period: Duration) -> (Self, ClockTicks) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let clock = Self {
            sender,
            handle: None,
            epoch: 0,
            period,
        };
        (clock, receiver)
    }

    /// Start ticking. Any running task is cancelled first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        self.stop();
        self.epoch += 1;

        let epoch = self.epoch;
        let sender = self.sender.clone();
        let period = self.period;

        self.handle = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if sender.send(ClockTick { epoch }).is_err() {
                    break;
                }
            }
        }));

        tracing::trace!(epoch, "Progress clock started");
    }

    /// Stop ticking. Idempotent.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::trace!(epoch = self.epoch, "Progress clock stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether a tick was produced by the run that is currently active
    pub fn accepts(&self, tick: ClockTick) -> bool {
        self.is_running() && tick.epoch == self.epoch
    }
}

impl Drop for ProgressClock {
    fn drop(&mut self) {
        self.stop();
    }
}
