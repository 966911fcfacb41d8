//! A `TransitionPlayer` that plays transitions on the tokio timer.
//!
//! Useful wherever there is no real rendering surface: the CLI preview and
//! tests. Each transition runs as its own task and reports progress on a
//! channel. Must be used from inside a tokio runtime.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::host::{TransitionHandle, TransitionPlayer};
use super::motion::{Keyframe, Keyframes, Timing};

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    Started { element: String },
    Frame { element: String, progress: f64, frame: Keyframe },
    Finished { element: String },
}

pub struct TimerPlayer {
    events: mpsc::UnboundedSender<PlaybackEvent>,
    frame_interval: Option<Duration>,
}

impl TimerPlayer {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PlaybackEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let player = TimerPlayer {
            events,
            frame_interval: None,
        };
        (player, rx)
    }

    /// Also emit interpolated frames every `interval` while playing.
    pub fn with_frames(mut self, interval: Duration) -> Self {
        self.frame_interval = Some(interval);
        self
    }
}

impl<E: fmt::Display> TransitionPlayer<E> for TimerPlayer {
    fn animate(
        &self,
        element: &Rc<E>,
        keyframes: &Keyframes,
        timing: &Timing,
    ) -> Box<dyn TransitionHandle> {
        let element = element.to_string();
        let events = self.events.clone();
        let frame_interval = self.frame_interval;
        let keyframes = *keyframes;
        let timing = *timing;

        let task = tokio::spawn(async move {
            tokio::time::sleep(timing.delay).await;
            // A closed receiver only means nobody is listening any more.
            let _ = events.send(PlaybackEvent::Started {
                element: element.clone(),
            });

            match frame_interval {
                Some(interval) if !timing.duration.is_zero() => {
                    let started = Instant::now();
                    let mut ticker = tokio::time::interval(interval);
                    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

                    loop {
                        ticker.tick().await;
                        let linear = (started.elapsed().as_secs_f64()
                            / timing.duration.as_secs_f64())
                        .min(1.0);
                        let _ = events.send(PlaybackEvent::Frame {
                            element: element.clone(),
                            progress: linear,
                            frame: keyframes.at(timing.easing.apply(linear)),
                        });
                        if linear >= 1.0 {
                            break;
                        }
                    }
                }
                _ => tokio::time::sleep(timing.duration).await,
            }

            let _ = events.send(PlaybackEvent::Finished { element });
        });

        Box::new(TimerHandle { task })
    }
}

struct TimerHandle {
    task: JoinHandle<()>,
}

impl TransitionHandle for TimerHandle {
    fn cancel(&mut self) {
        self.task.abort();
    }

    fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
