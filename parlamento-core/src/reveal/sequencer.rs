use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use serde::Serialize;

use super::host::{TransitionPlayer, VisibilityObserver, Watch};
use super::motion::Timing;
use super::section::ViewportSection;
use super::{SectionId, SectionState};

/// A transition started by `on_visible`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduledTransition {
    /// Position of the target within its section.
    pub index: usize,
    /// Base delay plus the stagger for `index`.
    pub delay: Duration,
}

/// Drives the reveal of every section on a page.
///
/// Sections are registered up front and addressed by `SectionId`. Dropping the
/// sequencer tears every section down: watches are released and running
/// transitions cancelled.
pub struct AnimationSequencer<E: 'static> {
    observer: Rc<dyn VisibilityObserver<E>>,
    player: Rc<dyn TransitionPlayer<E>>,
    sections: BTreeMap<SectionId, ViewportSection<E>>,
    next_id: u64,
}

impl<E: 'static> AnimationSequencer<E> {
    pub fn new<O, P>(observer: Rc<O>, player: Rc<P>) -> Self
    where
        O: VisibilityObserver<E> + 'static,
        P: TransitionPlayer<E> + 'static,
    {
        AnimationSequencer {
            observer,
            player,
            sections: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn register(&mut self, section: ViewportSection<E>) -> SectionId {
        let id = SectionId(self.next_id);
        self.next_id += 1;
        self.sections.insert(id, section);
        id
    }

    /// Start watching the section root. Returns the section state afterwards,
    /// or `None` for an unknown section.
    pub fn attach(&mut self, id: SectionId) -> Option<SectionState> {
        let section = self.sections.get_mut(&id)?;
        if section.state != SectionState::Unobserved {
            return Some(section.state);
        }

        let Some(root) = section.root.upgrade() else {
            tracing::warn!(section = %id, "section root is gone, not watching it");
            return Some(section.state);
        };

        let handle = self.observer.observe(id, &root, section.threshold);
        section.watch = Some(Watch::new(Rc::clone(&self.observer), handle));
        section.state = SectionState::Observed;
        tracing::debug!(section = %id, threshold = section.threshold.value(), "section observed");

        Some(section.state)
    }

    /// Host callback with the section's current intersection ratio.
    pub fn on_intersection(&mut self, id: SectionId, ratio: f64) -> Vec<ScheduledTransition> {
        let visible = self
            .sections
            .get(&id)
            .is_some_and(|section| section.threshold.is_met(ratio));

        if visible { self.on_visible(id) } else { Vec::new() }
    }

    /// Trigger the section: start every target's transition with its stagger.
    ///
    /// Only an observed section triggers. Later calls, and calls for sections
    /// that are not watched, return nothing.
    pub fn on_visible(&mut self, id: SectionId) -> Vec<ScheduledTransition> {
        let Some(section) = self.sections.get_mut(&id) else {
            tracing::debug!(section = %id, "visibility for unknown section ignored");
            return Vec::new();
        };

        match section.state {
            SectionState::Observed => {}
            SectionState::Triggered => return Vec::new(),
            SectionState::Unobserved => {
                tracing::debug!(section = %id, "visibility for unattached section ignored");
                return Vec::new();
            }
        }

        section.state = SectionState::Triggered;
        // Stop watching before anything plays so the section cannot fire twice.
        section.watch = None;

        let mut scheduled = Vec::with_capacity(section.targets.len());
        for (index, target) in section.targets.iter().enumerate() {
            let delay = target.timing.delay + section.step_delay * index as u32;

            let Some(element) = target.element.upgrade() else {
                tracing::debug!(section = %id, index, "target element is gone, skipping");
                continue;
            };

            let timing = Timing {
                delay,
                ..target.timing
            };
            let handle = self.player.animate(&element, &target.keyframes, &timing);
            section.running.push(handle);
            scheduled.push(ScheduledTransition { index, delay });
        }

        tracing::debug!(section = %id, started = scheduled.len(), "section triggered");
        scheduled
    }

    /// Tear the section down whatever its state: release the watch and cancel
    /// running transitions. Returns false for an unknown section.
    pub fn detach(&mut self, id: SectionId) -> bool {
        match self.sections.remove(&id) {
            Some(mut section) => {
                section.teardown();
                tracing::debug!(section = %id, "section detached");
                true
            }
            None => false,
        }
    }

    pub fn state(&self, id: SectionId) -> Option<SectionState> {
        self.sections.get(&id).map(ViewportSection::state)
    }

    pub fn is_triggered(&self, id: SectionId) -> bool {
        self.state(id) == Some(SectionState::Triggered)
    }

    pub fn section(&self, id: SectionId) -> Option<&ViewportSection<E>> {
        self.sections.get(&id)
    }

    pub fn section_ids(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.sections.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::host::{TransitionHandle, WatchHandle};
    use crate::reveal::motion::Keyframes;
    use crate::reveal::section::AnimationTarget;
    use crate::reveal::Threshold;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct FakeObserver {
        next: Cell<u64>,
        active: RefCell<Vec<WatchHandle>>,
    }

    impl VisibilityObserver<&'static str> for FakeObserver {
        fn observe(&self, _: SectionId, _: &Rc<&'static str>, _: Threshold) -> WatchHandle {
            let handle = WatchHandle(self.next.get());
            self.next.set(self.next.get() + 1);
            self.active.borrow_mut().push(handle);
            handle
        }

        fn unobserve(&self, handle: WatchHandle) {
            self.active.borrow_mut().retain(|h| *h != handle);
        }
    }

    struct FakeHandle {
        cancelled: Rc<Cell<usize>>,
    }

    impl TransitionHandle for FakeHandle {
        fn cancel(&mut self) {
            self.cancelled.set(self.cancelled.get() + 1);
        }

        fn is_finished(&self) -> bool {
            false
        }
    }

    #[derive(Default)]
    struct FakePlayer {
        started: RefCell<Vec<(&'static str, Duration)>>,
        cancelled: Rc<Cell<usize>>,
    }

    impl TransitionPlayer<&'static str> for FakePlayer {
        fn animate(
            &self,
            element: &Rc<&'static str>,
            _: &Keyframes,
            timing: &Timing,
        ) -> Box<dyn TransitionHandle> {
            self.started.borrow_mut().push((**element, timing.delay));
            Box::new(FakeHandle {
                cancelled: Rc::clone(&self.cancelled),
            })
        }
    }

    fn setup() -> (Rc<FakeObserver>, Rc<FakePlayer>, AnimationSequencer<&'static str>) {
        let observer = Rc::new(FakeObserver::default());
        let player = Rc::new(FakePlayer::default());
        let sequencer = AnimationSequencer::new(Rc::clone(&observer), Rc::clone(&player));
        (observer, player, sequencer)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_full_lifecycle() {
        let (observer, player, mut sequencer) = setup();
        let root = Rc::new("story");
        let title = Rc::new("title");
        let text = Rc::new("text");

        let id = sequencer.register(
            ViewportSection::new(&root)
                .with_step_delay(ms(150))
                .with_target(AnimationTarget::new(&title, Keyframes::fade_up(30.0)).with_delay(ms(200)))
                .with_target(AnimationTarget::new(&text, Keyframes::fade_up(30.0)).with_delay(ms(200))),
        );

        assert_eq!(sequencer.state(id), Some(SectionState::Unobserved));
        assert_eq!(sequencer.attach(id), Some(SectionState::Observed));
        assert_eq!(observer.active.borrow().len(), 1);

        let scheduled = sequencer.on_visible(id);
        assert_eq!(
            scheduled.iter().map(|s| s.delay).collect::<Vec<_>>(),
            vec![ms(200), ms(350)]
        );
        assert!(sequencer.is_triggered(id));
        assert!(observer.active.borrow().is_empty(), "watch released on trigger");
        assert_eq!(*player.started.borrow(), vec![("title", ms(200)), ("text", ms(350))]);
    }

    #[test]
    fn test_triggers_at_most_once() {
        let (_, player, mut sequencer) = setup();
        let root = Rc::new("values");
        let card = Rc::new("card");
        let id = sequencer.register(
            ViewportSection::new(&root).with_target(AnimationTarget::new(&card, Keyframes::fade_up(30.0))),
        );
        sequencer.attach(id);

        assert_eq!(sequencer.on_visible(id).len(), 1);
        assert!(sequencer.on_visible(id).is_empty());
        assert!(sequencer.on_intersection(id, 1.0).is_empty());
        assert_eq!(sequencer.attach(id), Some(SectionState::Triggered));
        assert_eq!(player.started.borrow().len(), 1);
    }

    #[test]
    fn test_intersection_below_threshold_waits() {
        let (_, _, mut sequencer) = setup();
        let root = Rc::new("spaces");
        let image = Rc::new("image");
        let id = sequencer.register(
            ViewportSection::new(&root)
                .with_threshold(Threshold::new(0.5).unwrap())
                .with_target(AnimationTarget::new(&image, Keyframes::slide_in_x(50.0))),
        );
        sequencer.attach(id);

        assert!(sequencer.on_intersection(id, 0.3).is_empty());
        assert_eq!(sequencer.state(id), Some(SectionState::Observed));
        assert_eq!(sequencer.on_intersection(id, 0.5).len(), 1);
    }

    #[test]
    fn test_unattached_section_does_not_trigger() {
        let (_, player, mut sequencer) = setup();
        let root = Rc::new("team");
        let photo = Rc::new("photo");
        let id = sequencer.register(
            ViewportSection::new(&root).with_target(AnimationTarget::new(&photo, Keyframes::fade_up(20.0))),
        );

        assert!(sequencer.on_visible(id).is_empty());
        assert_eq!(sequencer.state(id), Some(SectionState::Unobserved));
        assert!(player.started.borrow().is_empty());
    }

    #[test]
    fn test_missing_element_is_skipped_and_keeps_stagger_slot() {
        let (_, player, mut sequencer) = setup();
        let root = Rc::new("gallery");
        let first = Rc::new("first");
        let third = Rc::new("third");
        let id = {
            let second = Rc::new("second");
            sequencer.register(
                ViewportSection::new(&root)
                    .with_step_delay(ms(100))
                    .with_target(AnimationTarget::new(&first, Keyframes::fade_up(10.0)))
                    .with_target(AnimationTarget::new(&second, Keyframes::fade_up(10.0)))
                    .with_target(AnimationTarget::new(&third, Keyframes::fade_up(10.0))),
            )
        };
        sequencer.attach(id);

        let scheduled = sequencer.on_visible(id);
        assert_eq!(
            scheduled,
            vec![
                ScheduledTransition { index: 0, delay: ms(0) },
                ScheduledTransition { index: 2, delay: ms(200) },
            ]
        );
        assert_eq!(player.started.borrow().len(), 2);
    }

    #[test]
    fn test_empty_section_still_triggers() {
        let (_, _, mut sequencer) = setup();
        let root = Rc::new("footer");
        let id = sequencer.register(ViewportSection::new(&root));
        sequencer.attach(id);

        assert!(sequencer.on_visible(id).is_empty());
        assert!(sequencer.is_triggered(id));
    }

    #[test]
    fn test_detach_releases_watch_and_cancels_transitions() {
        let (observer, player, mut sequencer) = setup();
        let root = Rc::new("hero");
        let a = Rc::new("a");
        let b = Rc::new("b");

        let watching = sequencer.register(ViewportSection::new(&root));
        sequencer.attach(watching);
        assert!(sequencer.detach(watching));
        assert!(observer.active.borrow().is_empty());
        assert_eq!(sequencer.state(watching), None);
        assert!(sequencer.on_visible(watching).is_empty());

        let playing = sequencer.register(
            ViewportSection::new(&root)
                .with_target(AnimationTarget::new(&a, Keyframes::fade_up(10.0)))
                .with_target(AnimationTarget::new(&b, Keyframes::fade_up(10.0))),
        );
        sequencer.attach(playing);
        sequencer.on_visible(playing);
        assert_eq!(sequencer.section(playing).map(ViewportSection::in_flight), Some(2));

        assert!(sequencer.detach(playing));
        assert_eq!(player.cancelled.get(), 2);
        assert!(!sequencer.detach(playing));
    }

    #[test]
    fn test_dropping_sequencer_releases_everything() {
        let (observer, player, mut sequencer) = setup();
        let root = Rc::new("menu");
        let dish = Rc::new("dish");

        let waiting = sequencer.register(ViewportSection::new(&root));
        let running = sequencer.register(
            ViewportSection::new(&root).with_target(AnimationTarget::new(&dish, Keyframes::fade_up(10.0))),
        );
        sequencer.attach(waiting);
        sequencer.attach(running);
        sequencer.on_visible(running);
        assert_eq!(observer.active.borrow().len(), 1);

        drop(sequencer);
        assert!(observer.active.borrow().is_empty());
        assert_eq!(player.cancelled.get(), 1);
    }
}
