use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use owo_colors::OwoColorize;
use parlamento_core::config::SiteConfig;
use parlamento_core::reveal::{
    AnimationSequencer, AnimationTarget, Keyframe, Keyframes, PlaybackEvent, SectionId,
    Threshold, TimerPlayer, ViewportSection, VisibilityObserver, WatchHandle,
};
use tokio::time::Instant;

use crate::render::Render;

/// Intersection ratios reported while "scrolling" past the section.
const SCROLL: [f64; 6] = [0.0, 0.1, 0.35, 0.8, 0.2, 1.0];

/// Prints watch registrations instead of observing a real viewport.
#[derive(Default)]
struct ConsoleObserver {
    next: Cell<u64>,
}

impl VisibilityObserver<String> for ConsoleObserver {
    fn observe(&self, section: SectionId, root: &Rc<String>, threshold: Threshold) -> WatchHandle {
        let handle = WatchHandle(self.next.get());
        self.next.set(self.next.get() + 1);
        println!(
            "{}",
            format!("watching {} ({}) at {:.0}%", root, section, threshold.value() * 100.0).dimmed()
        );
        handle
    }

    fn unobserve(&self, handle: WatchHandle) {
        println!("{}", format!("released watch {}", handle.0).dimmed());
    }
}

pub async fn run(
    config: &SiteConfig,
    targets: usize,
    step: Option<Duration>,
    threshold: Option<f64>,
    frames: Option<Duration>,
) -> Result<()> {
    let settings = &config.reveal;
    let threshold = Threshold::new(threshold.unwrap_or(settings.threshold))?;
    let step = step.unwrap_or(settings.step_delay);

    let (player, mut events) = TimerPlayer::new();
    let player = match frames {
        Some(interval) => player.with_frames(interval),
        None => player,
    };
    let mut sequencer = AnimationSequencer::new(Rc::new(ConsoleObserver::default()), Rc::new(player));

    let root = Rc::new("section".to_string());
    let elements: Vec<Rc<String>> = (1..=targets).map(|i| Rc::new(format!("item-{i}"))).collect();
    let section = elements.iter().fold(
        ViewportSection::new(&root)
            .with_threshold(threshold)
            .with_step_delay(step),
        |section, element| {
            section.with_target(
                AnimationTarget::new(element, Keyframes::fade_up(30.0)).with_duration(settings.duration),
            )
        },
    );

    let id = sequencer.register(section);
    sequencer.attach(id);

    let mut started = 0;
    for ratio in SCROLL {
        let scheduled = sequencer.on_intersection(id, ratio);
        let state = sequencer.state(id).map(|s| s.render()).unwrap_or_default();
        println!("{:>4.0}% visible  {}", ratio * 100.0, state);

        for transition in &scheduled {
            println!(
                "      {} starts after {}",
                elements[transition.index],
                humantime::format_duration(transition.delay)
            );
        }
        started += scheduled.len();
    }

    println!();
    let clock = Instant::now();
    let mut finished = 0;
    while finished < started {
        let Some(event) = events.recv().await else {
            break;
        };
        let at = format!(
            "[{:>6}]",
            humantime::format_duration(round_ms(clock.elapsed())).to_string()
        );

        match event {
            PlaybackEvent::Started { element } => println!("{} {} started", at.dimmed(), element),
            PlaybackEvent::Frame {
                element,
                progress,
                frame,
            } => println!(
                "{} {} {:>3.0}% {}",
                at.dimmed(),
                element,
                progress * 100.0,
                describe(&frame).dimmed()
            ),
            PlaybackEvent::Finished { element } => {
                finished += 1;
                println!("{} {} {}", at.dimmed(), element, "done".green());
            }
        }
    }

    sequencer.detach(id);
    Ok(())
}

fn round_ms(elapsed: Duration) -> Duration {
    Duration::from_millis(elapsed.as_millis() as u64)
}

fn describe(frame: &Keyframe) -> String {
    [
        ("opacity", frame.opacity),
        ("x", frame.x),
        ("y", frame.y),
        ("scale", frame.scale),
    ]
    .iter()
    .filter_map(|(name, value)| value.map(|v| format!("{}={:.2}", name, v)))
    .collect::<Vec<_>>()
    .join(" ")
}
