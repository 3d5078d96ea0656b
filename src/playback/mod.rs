// SPDX-License-Identifier: MPL-2.0
//! Playback of a reconstruction session.
//!
//! The [`PlaybackDriver`] owns the single [`ReconstructionState`] of a session
//! and advances it under one of three policies. Timed playback goes through a
//! [`Scheduler`]; everything else runs synchronously inside the handling of
//! one input event.
//!
//! [`ReconstructionState`]: crate::reconstruction::ReconstructionState

mod driver;
pub mod scheduler;

pub use driver::{InputEvent, PlaybackDriver, PlaybackPolicy, SessionPhase};
pub use scheduler::{ManualScheduler, ScheduleHandle, Scheduler, TickReceiver, TokioScheduler};

use crate::domain::{StepsPerTick, TickInterval};

/// Burst cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackSettings {
    pub steps_per_tick: StepsPerTick,
    pub tick_interval: TickInterval,
}
