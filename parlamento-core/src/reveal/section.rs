use std::rc::{Rc, Weak};
use std::time::Duration;

use super::host::{TransitionHandle, Watch};
use super::motion::{Easing, Keyframes, Timing};
use super::{SectionState, Threshold};
use crate::constants::DEFAULT_STEP_DELAY;

/// One element revealed as part of a section.
///
/// The element is held weakly: if the host drops it before the section
/// triggers, the target is skipped.
pub struct AnimationTarget<E> {
    pub(crate) element: Weak<E>,
    pub(crate) keyframes: Keyframes,
    pub(crate) timing: Timing,
}

impl<E> AnimationTarget<E> {
    pub fn new(element: &Rc<E>, keyframes: Keyframes) -> Self {
        AnimationTarget {
            element: Rc::downgrade(element),
            keyframes,
            timing: Timing::default(),
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.timing.duration = duration;
        self
    }

    /// Base delay, before the per-index stagger is added.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.timing.delay = delay;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.timing.easing = easing;
        self
    }

    pub fn keyframes(&self) -> &Keyframes {
        &self.keyframes
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }
}

/// A group of elements revealed together when `root` scrolls into view.
pub struct ViewportSection<E> {
    pub(crate) root: Weak<E>,
    pub(crate) targets: Vec<AnimationTarget<E>>,
    pub(crate) threshold: Threshold,
    pub(crate) step_delay: Duration,
    pub(crate) state: SectionState,
    pub(crate) watch: Option<Watch<E>>,
    pub(crate) running: Vec<Box<dyn TransitionHandle>>,
}

impl<E> ViewportSection<E> {
    pub fn new(root: &Rc<E>) -> Self {
        ViewportSection {
            root: Rc::downgrade(root),
            targets: Vec::new(),
            threshold: Threshold::default(),
            step_delay: DEFAULT_STEP_DELAY,
            state: SectionState::Unobserved,
            watch: None,
            running: Vec::new(),
        }
    }

    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Extra delay added per target index.
    pub fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }

    pub fn with_target(mut self, target: AnimationTarget<E>) -> Self {
        self.targets.push(target);
        self
    }

    pub fn state(&self) -> SectionState {
        self.state
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn targets(&self) -> &[AnimationTarget<E>] {
        &self.targets
    }

    /// Transitions started and not yet finished.
    pub fn in_flight(&self) -> usize {
        self.running.iter().filter(|h| !h.is_finished()).count()
    }

    /// Release the watch and cancel every transition still playing.
    pub(crate) fn teardown(&mut self) {
        self.watch = None;
        for mut handle in self.running.drain(..) {
            if !handle.is_finished() {
                handle.cancel();
            }
        }
    }
}

impl<E> Drop for ViewportSection<E> {
    fn drop(&mut self) {
        self.teardown();
    }
}
