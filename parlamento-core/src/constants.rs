use std::time::Duration;

/// Fraction of a section that must be visible before it reveals.
pub const DEFAULT_THRESHOLD: f64 = 0.2;

/// Offset added per target index when a section reveals.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(150);

/// Length of a single reveal transition.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(700);

/// Control points of the site's standard easing curve.
pub const DEFAULT_BEZIER: (f64, f64, f64, f64) = (0.25, 0.1, 0.25, 1.0);
