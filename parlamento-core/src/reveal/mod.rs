//! Scroll-triggered, staggered reveal of page sections.
//!
//! Each `ViewportSection` moves through `Unobserved -> Observed -> Triggered`
//! and never back. Once triggered it has started all of its transitions and
//! stopped watching the viewport, so scrolling past it again does nothing.

mod host;
mod motion;
mod section;
mod sequencer;
mod timer;

pub use host::{TransitionHandle, TransitionPlayer, VisibilityObserver, WatchHandle};
pub use motion::{Easing, Keyframe, Keyframes, Timing};
pub use section::{AnimationTarget, ViewportSection};
pub use sequencer::{AnimationSequencer, ScheduledTransition};
pub use timer::{PlaybackEvent, TimerPlayer};

use std::fmt;

use serde::Serialize;

use crate::constants::DEFAULT_THRESHOLD;
use crate::error::{ParlamentoError, ParlamentoResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionState {
    Unobserved,
    Observed,
    Triggered,
}

/// Key of a section registered with an `AnimationSequencer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionId(u64);

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "section-{}", self.0)
    }
}

/// Minimum visible fraction of a section, in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    pub fn new(value: f64) -> ParlamentoResult<Self> {
        if value > 0.0 && value <= 1.0 {
            Ok(Threshold(value))
        } else {
            Err(ParlamentoError::InvalidThreshold(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Whether an intersection `ratio` counts as visible.
    pub fn is_met(&self, ratio: f64) -> bool {
        ratio >= self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold(DEFAULT_THRESHOLD)
    }
}
