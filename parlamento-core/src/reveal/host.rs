//! Capabilities the host environment provides to the sequencer.
//!
//! The sequencer never inspects elements itself. It asks the host to watch a
//! section root and to play transitions; the host reports visibility back via
//! `AnimationSequencer::on_intersection` or `AnimationSequencer::on_visible`.

use std::fmt;
use std::rc::Rc;

use super::motion::{Keyframes, Timing};
use super::{SectionId, Threshold};

/// Token identifying one registration with a `VisibilityObserver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchHandle(pub u64);

pub trait VisibilityObserver<E> {
    /// Start watching `root`. Visibility changes must be reported for `section`.
    fn observe(&self, section: SectionId, root: &Rc<E>, threshold: Threshold) -> WatchHandle;

    fn unobserve(&self, handle: WatchHandle);
}

pub trait TransitionPlayer<E> {
    /// Start a transition. Playback runs on its own; the handle may cancel it.
    fn animate(&self, element: &Rc<E>, keyframes: &Keyframes, timing: &Timing)
    -> Box<dyn TransitionHandle>;
}

pub trait TransitionHandle {
    fn cancel(&mut self);

    fn is_finished(&self) -> bool;
}

/// A live registration with a `VisibilityObserver`, released on drop.
pub(crate) struct Watch<E> {
    observer: Rc<dyn VisibilityObserver<E>>,
    handle: WatchHandle,
}

impl<E> Watch<E> {
    pub(crate) fn new(observer: Rc<dyn VisibilityObserver<E>>, handle: WatchHandle) -> Self {
        Watch { observer, handle }
    }
}

impl<E> Drop for Watch<E> {
    fn drop(&mut self) {
        self.observer.unobserve(self.handle);
    }
}

impl<E> fmt::Debug for Watch<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Watch").field(&self.handle).finish()
    }
}
