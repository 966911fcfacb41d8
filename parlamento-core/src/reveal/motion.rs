//! Keyframes, easing curves and transition timing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BEZIER, DEFAULT_DURATION};

/// Visual properties at one end of a transition. Unset properties are left
/// alone by the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

impl Keyframe {
    /// Interpolate towards `to`. A property set on only one side holds that value.
    pub fn lerp(&self, to: &Keyframe, progress: f64) -> Keyframe {
        fn mix(a: Option<f64>, b: Option<f64>, t: f64) -> Option<f64> {
            match (a, b) {
                (Some(a), Some(b)) => Some(a + (b - a) * t),
                (a, b) => a.or(b),
            }
        }

        Keyframe {
            opacity: mix(self.opacity, to.opacity, progress),
            x: mix(self.x, to.x, progress),
            y: mix(self.y, to.y, progress),
            scale: mix(self.scale, to.scale, progress),
        }
    }
}

/// Start and end keyframes of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframes {
    pub from: Keyframe,
    pub to: Keyframe,
}

impl Keyframes {
    pub fn new(from: Keyframe, to: Keyframe) -> Self {
        Keyframes { from, to }
    }

    /// Fade in while rising `distance` pixels.
    pub fn fade_up(distance: f64) -> Self {
        Keyframes {
            from: Keyframe {
                opacity: Some(0.0),
                y: Some(distance),
                ..Default::default()
            },
            to: Keyframe {
                opacity: Some(1.0),
                y: Some(0.0),
                ..Default::default()
            },
        }
    }

    /// Fade in while sliding `distance` pixels horizontally into place.
    pub fn slide_in_x(distance: f64) -> Self {
        Keyframes {
            from: Keyframe {
                opacity: Some(0.0),
                x: Some(distance),
                ..Default::default()
            },
            to: Keyframe {
                opacity: Some(1.0),
                x: Some(0.0),
                ..Default::default()
            },
        }
    }

    /// Scale down from `scale` to natural size while fading from 0.7.
    pub fn settle_scale(scale: f64) -> Self {
        Keyframes {
            from: Keyframe {
                opacity: Some(0.7),
                scale: Some(scale),
                ..Default::default()
            },
            to: Keyframe {
                opacity: Some(1.0),
                scale: Some(1.0),
                ..Default::default()
            },
        }
    }

    /// Frame at `progress` (already eased), clamped to [0, 1].
    pub fn at(&self, progress: f64) -> Keyframe {
        self.from.lerp(&self.to, progress.clamp(0.0, 1.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    CubicBezier(f64, f64, f64, f64),
}

impl Default for Easing {
    fn default() -> Self {
        let (x1, y1, x2, y2) = DEFAULT_BEZIER;
        Easing::CubicBezier(x1, y1, x2, y2)
    }
}

impl Easing {
    /// Map linear time `t` in [0, 1] to eased progress.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::CubicBezier(x1, y1, x2, y2) => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                // x(s) is monotonic for x1, x2 in [0, 1]; bisect for s.
                let (mut lo, mut hi) = (0.0, 1.0);
                let mut s = t;
                for _ in 0..48 {
                    let x = bezier(s, x1, x2);
                    if (x - t).abs() < 1e-7 {
                        break;
                    }
                    if x < t {
                        lo = s;
                    } else {
                        hi = s;
                    }
                    s = (lo + hi) / 2.0;
                }
                bezier(s, y1, y2)
            }
        }
    }
}

fn bezier(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

/// When and how a single transition plays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub duration: Duration,
    pub delay: Duration,
    pub easing: Easing,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            duration: DEFAULT_DURATION,
            delay: Duration::ZERO,
            easing: Easing::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_easing_is_identity() {
        assert_eq!(Easing::Linear.apply(0.25), 0.25);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn test_bezier_endpoints_and_monotonicity() {
        let ease = Easing::default();
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);

        let samples: Vec<f64> = (0..=10).map(|i| ease.apply(i as f64 / 10.0)).collect();
        assert!(samples.windows(2).all(|w| w[0] <= w[1]));
        // The standard curve runs ahead of linear at the midpoint.
        assert!(ease.apply(0.5) > 0.5);
    }

    #[test]
    fn test_linear_bezier_matches_linear() {
        let ease = Easing::CubicBezier(0.0, 0.0, 1.0, 1.0);
        for t in [0.1, 0.3, 0.5, 0.9] {
            assert!((ease.apply(t) - t).abs() < 1e-4);
        }
    }

    #[test]
    fn test_fade_up_interpolates_only_set_properties() {
        let frames = Keyframes::fade_up(30.0);
        let mid = frames.at(0.5);

        assert_eq!(mid.opacity, Some(0.5));
        assert_eq!(mid.y, Some(15.0));
        assert_eq!(mid.x, None);
        assert_eq!(frames.at(1.5), frames.to);
    }

    #[test]
    fn test_one_sided_property_holds() {
        let from = Keyframe {
            opacity: Some(0.0),
            scale: Some(1.05),
            ..Default::default()
        };
        let to = Keyframe {
            opacity: Some(1.0),
            ..Default::default()
        };
        assert_eq!(from.lerp(&to, 0.5).scale, Some(1.05));
    }
}
