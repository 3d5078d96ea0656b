// SPDX-License-Identifier: MPL-2.0
//! Playback driver: sequences reconstruction steps over time or on input.
//!
//! Three mutually exclusive policies share one [`ReconstructionState`]:
//! - Burst: timed batches of steps toward a target, one schedule at most
//! - Stepwise: exactly one step per external trigger
//! - Seek: a full replay to an absolute position
//!
//! Switching from a burst to stepping or seeking cancels the burst first.

use super::scheduler::{ScheduleHandle, Scheduler};
use super::PlaybackSettings;
use crate::application::port::Renderer;
use crate::domain::FrequencyCoord;
use crate::reconstruction::ReconstructionState;

/// Which policy last drove the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPolicy {
    Burst,
    Stepwise,
    Seek,
}

/// Coarse state of the whole session.
///
/// `Complete` is a saturation point, not a terminal state: seeking re-enters
/// `Running` or `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nothing applied and no burst pending.
    Idle,
    /// Some steps applied, or a burst is underway.
    Running,
    /// Every step of the order has been applied.
    Complete,
}

/// A discrete event from the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer click or designated key: advance one step.
    Trigger,
    /// Absolute position from a slider or similar control. Clamped.
    Position(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveBurst {
    handle: ScheduleHandle,
    target: usize,
}

/// Drives one reconstruction session.
pub struct PlaybackDriver<S: Scheduler, R: Renderer> {
    state: ReconstructionState,
    scheduler: S,
    renderer: R,
    settings: PlaybackSettings,
    burst: Option<ActiveBurst>,
    policy: Option<PlaybackPolicy>,
}

impl<S: Scheduler, R: Renderer> PlaybackDriver<S, R> {
    #[must_use]
    pub fn new(
        state: ReconstructionState,
        scheduler: S,
        renderer: R,
        settings: PlaybackSettings,
    ) -> Self {
        Self {
            state,
            scheduler,
            renderer,
            settings,
            burst: None,
            policy: None,
        }
    }

    // =========================================================================
    // Burst
    // =========================================================================

    /// Animates toward `target` total steps (clamped to the order length).
    ///
    /// An active burst keeps its schedule and only has its target redefined.
    /// A target at or below the cursor stops any burst. Returns the clamped
    /// target.
    pub fn burst_to(&mut self, target: usize) -> usize {
        let target = target.min(self.state.total_steps());
        if target <= self.state.cursor() {
            self.stop_burst();
            return target;
        }

        self.policy = Some(PlaybackPolicy::Burst);
        match self.burst.as_mut() {
            Some(burst) => {
                log::debug!("burst target redefined {} -> {}", burst.target, target);
                burst.target = target;
            }
            None => {
                let handle = self
                    .scheduler
                    .schedule_repeating(self.settings.tick_interval.as_duration());
                log::debug!(
                    "burst started toward {} ({} steps/tick every {}ms)",
                    target,
                    self.settings.steps_per_tick.value(),
                    self.settings.tick_interval.as_millis()
                );
                self.burst = Some(ActiveBurst { handle, target });
            }
        }
        target
    }

    /// Bursts `count` more steps past the cursor (at least one).
    pub fn burst_by(&mut self, count: usize) -> usize {
        let target = self.state.cursor().saturating_add(count.max(1));
        self.burst_to(target)
    }

    /// Bursts through every remaining step.
    pub fn run_to_completion(&mut self) -> usize {
        self.burst_to(self.state.total_steps())
    }

    /// Cancels the active burst, leaving the state exactly as far as it got.
    pub fn stop_burst(&mut self) {
        if let Some(burst) = self.burst.take() {
            self.scheduler.cancel(burst.handle);
            log::debug!(
                "burst stopped at {} of target {}",
                self.state.cursor(),
                burst.target
            );
        }
    }

    /// Handles one scheduled tick: applies up to one batch of steps.
    ///
    /// Ticks from a cancelled or replaced schedule are ignored. Returns the
    /// number of steps applied.
    pub fn on_tick(&mut self, handle: ScheduleHandle) -> usize {
        let Some(burst) = self.burst else {
            return 0;
        };
        if burst.handle != handle {
            log::trace!("ignoring stale tick from schedule {}", handle.id());
            return 0;
        }

        let remaining = burst.target.saturating_sub(self.state.cursor());
        let batch = self.settings.steps_per_tick.value().min(remaining);
        let mut applied = 0;
        for _ in 0..batch {
            if self.state.apply_next().is_none() {
                break;
            }
            applied += 1;
        }
        self.render();

        if self.state.cursor() >= burst.target || self.state.is_complete() {
            self.stop_burst();
        }
        applied
    }

    // =========================================================================
    // Stepwise
    // =========================================================================

    /// Applies exactly one step, cancelling any burst first.
    ///
    /// Returns the consumed coordinate, or `None` once the order is exhausted.
    pub fn step(&mut self) -> Option<FrequencyCoord> {
        self.switch_policy(PlaybackPolicy::Stepwise);
        let coord = self.state.apply_next()?;
        self.render();
        Some(coord)
    }

    // =========================================================================
    // Seek
    // =========================================================================

    /// Replays from scratch up to `position`, cancelling any burst first.
    ///
    /// Negative positions clamp to 0, positions past the end to the order
    /// length. Returns the clamped position.
    pub fn seek(&mut self, position: i64) -> usize {
        self.switch_policy(PlaybackPolicy::Seek);
        let target = usize::try_from(position.max(0)).unwrap_or(usize::MAX);
        let reached = self.state.seek_to(target);
        self.render();
        reached
    }

    /// Dispatches an input event to the matching policy.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Trigger => {
                self.step();
            }
            InputEvent::Position(position) => {
                self.seek(position);
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.state.is_complete() {
            SessionPhase::Complete
        } else if self.state.cursor() == 0 && self.burst.is_none() {
            SessionPhase::Idle
        } else {
            SessionPhase::Running
        }
    }

    #[must_use]
    pub fn is_bursting(&self) -> bool {
        self.burst.is_some()
    }

    /// Target of the active burst, if any.
    #[must_use]
    pub fn burst_target(&self) -> Option<usize> {
        self.burst.map(|b| b.target)
    }

    /// Handle of the active burst schedule, if any.
    #[must_use]
    pub fn burst_handle(&self) -> Option<ScheduleHandle> {
        self.burst.map(|b| b.handle)
    }

    /// Policy that last drove the cursor.
    #[must_use]
    pub fn policy(&self) -> Option<PlaybackPolicy> {
        self.policy
    }

    #[must_use]
    pub fn settings(&self) -> PlaybackSettings {
        self.settings
    }

    /// Header describing the burst cadence.
    #[must_use]
    pub fn status_header(&self) -> String {
        format!(
            "Autoplay: {} comps/tick • {}ms",
            self.settings.steps_per_tick.value(),
            self.settings.tick_interval.as_millis()
        )
    }

    #[must_use]
    pub fn state(&self) -> &ReconstructionState {
        &self.state
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Pushes the current state to the renderer.
    pub fn render(&mut self) {
        let frame = self.state.frame();
        self.renderer.render(&frame);
    }

    fn switch_policy(&mut self, policy: PlaybackPolicy) {
        if self.policy != Some(policy) {
            log::debug!("playback policy {:?} -> {:?}", self.policy, policy);
        }
        self.stop_burst();
        self.policy = Some(policy);
    }
}
