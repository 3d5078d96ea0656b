// SPDX-License-Identifier: MPL-2.0
//! Repeating tick schedules for timed playback.
//!
//! A [`Scheduler`] only hands out handles and stops schedules; the ticks
//! themselves are delivered back to the driver by whatever event loop owns it
//! (see [`PlaybackDriver::on_tick`](super::PlaybackDriver::on_tick)). This keeps
//! the reconstruction logic free of any particular event-loop implementation.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Identifies one repeating schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduleHandle(u64);

impl ScheduleHandle {
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Capability to start and stop periodic ticks.
pub trait Scheduler {
    /// Starts ticking every `interval` and returns the schedule's handle.
    fn schedule_repeating(&mut self, interval: Duration) -> ScheduleHandle;

    /// Stops a schedule. Unknown or already cancelled handles are ignored.
    fn cancel(&mut self, handle: ScheduleHandle);
}

// =============================================================================
// ManualScheduler
// =============================================================================

/// Scheduler whose ticks are fired explicitly by the caller.
///
/// Used for deterministic tests and for driving playback from an external
/// clock that is not a tokio runtime.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    active: BTreeMap<ScheduleHandle, Duration>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_active(&self, handle: ScheduleHandle) -> bool {
        self.active.contains_key(&handle)
    }

    /// Number of schedules currently running.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// The oldest running schedule, i.e. the next one to fire.
    #[must_use]
    pub fn next_due(&self) -> Option<ScheduleHandle> {
        self.active.keys().next().copied()
    }

    #[must_use]
    pub fn interval(&self, handle: ScheduleHandle) -> Option<Duration> {
        self.active.get(&handle).copied()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, interval: Duration) -> ScheduleHandle {
        self.next_id += 1;
        let handle = ScheduleHandle(self.next_id);
        self.active.insert(handle, interval);
        handle
    }

    fn cancel(&mut self, handle: ScheduleHandle) {
        self.active.remove(&handle);
    }
}

// =============================================================================
// TokioScheduler
// =============================================================================

/// Receiving end of the ticks produced by a [`TokioScheduler`].
pub type TickReceiver = mpsc::UnboundedReceiver<ScheduleHandle>;

/// Scheduler backed by one `tokio::time::interval` task per schedule.
///
/// Ticks are forwarded through an unbounded channel; the owner of the
/// [`TickReceiver`] passes them on to the driver. Must be used from within a
/// tokio runtime.
#[derive(Debug)]
pub struct TokioScheduler {
    next_id: u64,
    tasks: HashMap<ScheduleHandle, JoinHandle<()>>,
    ticks: mpsc::UnboundedSender<ScheduleHandle>,
}

impl TokioScheduler {
    #[must_use]
    pub fn new() -> (Self, TickReceiver) {
        let (ticks, receiver) = mpsc::unbounded_channel();
        (
            Self {
                next_id: 0,
                tasks: HashMap::new(),
                ticks,
            },
            receiver,
        )
    }

    #[must_use]
    pub fn is_active(&self, handle: ScheduleHandle) -> bool {
        self.tasks.contains_key(&handle)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&mut self, interval: Duration) -> ScheduleHandle {
        self.next_id += 1;
        let handle = ScheduleHandle(self.next_id);
        let sender = self.ticks.clone();

        let task = tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick of an interval completes immediately; the first
            // delivered tick should come one full interval after scheduling.
            timer.tick().await;
            loop {
                timer.tick().await;
                if sender.send(handle).is_err() {
                    break;
                }
            }
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: ScheduleHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_handles_are_unique_and_cancellable() {
        let mut scheduler = ManualScheduler::new();
        let first = scheduler.schedule_repeating(Duration::from_millis(10));
        let second = scheduler.schedule_repeating(Duration::from_millis(20));

        assert_ne!(first, second);
        assert_eq!(scheduler.active_count(), 2);
        assert_eq!(scheduler.next_due(), Some(first));
        assert_eq!(scheduler.interval(second), Some(Duration::from_millis(20)));

        scheduler.cancel(first);
        assert!(!scheduler.is_active(first));
        assert_eq!(scheduler.next_due(), Some(second));

        // Cancelling twice is harmless.
        scheduler.cancel(first);
        assert_eq!(scheduler.active_count(), 1);
    }

    #[test]
    fn manual_handles_are_not_reused_after_cancel() {
        let mut scheduler = ManualScheduler::new();
        let first = scheduler.schedule_repeating(Duration::from_millis(5));
        scheduler.cancel(first);
        let second = scheduler.schedule_repeating(Duration::from_millis(5));
        assert!(second.id() > first.id());
    }

    #[tokio::test]
    async fn tokio_scheduler_delivers_ticks_until_cancelled() {
        let (mut scheduler, mut ticks) = TokioScheduler::new();
        let handle = scheduler.schedule_repeating(Duration::from_millis(1));
        assert!(scheduler.is_active(handle));

        for _ in 0..3 {
            let tick = tokio::time::timeout(Duration::from_secs(2), ticks.recv())
                .await
                .expect("tick should arrive")
                .expect("channel open");
            assert_eq!(tick, handle);
        }

        scheduler.cancel(handle);
        assert!(!scheduler.is_active(handle));
    }

    #[tokio::test]
    async fn dropping_scheduler_closes_tick_channel() {
        let (mut scheduler, mut ticks) = TokioScheduler::new();
        scheduler.schedule_repeating(Duration::from_millis(1));
        drop(scheduler);

        // Drain anything already queued; the channel must then close.
        let closed = tokio::time::timeout(Duration::from_secs(2), async {
            while ticks.recv().await.is_some() {}
        })
        .await;
        assert!(closed.is_ok());
    }
}
