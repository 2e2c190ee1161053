// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawer configuration.

use core::time::Duration;

use understory_transition::CompletionCurves;

/// Panel width used when neither the configuration nor the delegate supplies a usable one.
pub const DEFAULT_DRAWER_WIDTH: f64 = 300.0;

/// Standard platform transition duration.
pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(250);

/// Setup for one drawer attachment point.
///
/// Each transition copies what it needs from the configuration when it
/// starts; later changes only affect later transitions.
///
/// ```
/// use core::time::Duration;
/// use understory_drawer::{DEFAULT_DRAWER_WIDTH, DrawerConfiguration};
///
/// let config = DrawerConfiguration::new(280.0).with_duration(Duration::from_millis(300));
/// assert_eq!(config.width(), 280.0);
///
/// // Unusable widths fall back to the default.
/// assert_eq!(DrawerConfiguration::new(f64::NAN).width(), DEFAULT_DRAWER_WIDTH);
/// assert_eq!(DrawerConfiguration::new(-10.0).width(), DEFAULT_DRAWER_WIDTH);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawerConfiguration {
    width: f64,
    duration: Duration,
    curves: CompletionCurves,
}

impl Default for DrawerConfiguration {
    fn default() -> Self {
        Self {
            width: DEFAULT_DRAWER_WIDTH,
            duration: DEFAULT_TRANSITION_DURATION,
            curves: CompletionCurves::default(),
        }
    }
}

impl DrawerConfiguration {
    /// Creates a configuration with the given panel width and default timing.
    #[must_use]
    pub fn new(width: f64) -> Self {
        Self::default().with_width(width)
    }

    /// Sets the panel width; widths that are not finite and positive are ignored.
    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = resolve_width(Some(width), DEFAULT_DRAWER_WIDTH);
        self
    }

    /// Sets the full-distance transition duration.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the curves used to settle transitions.
    #[must_use]
    pub fn with_curves(mut self, curves: CompletionCurves) -> Self {
        self.curves = curves;
        self
    }

    /// Panel width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Full-distance transition duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Settle curves. The commit curve also drives programmatic transitions.
    #[must_use]
    pub fn curves(&self) -> CompletionCurves {
        self.curves
    }
}

/// Picks `candidate` when it is finite and positive, otherwise `fallback`.
pub(crate) fn resolve_width(candidate: Option<f64>, fallback: f64) -> f64 {
    candidate
        .filter(|w| w.is_finite() && *w > 0.0)
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use understory_transition::{CompletionCurves, TimingCurve};

    use super::{
        DEFAULT_DRAWER_WIDTH, DEFAULT_TRANSITION_DURATION, DrawerConfiguration, resolve_width,
    };

    #[test]
    fn defaults() {
        let config = DrawerConfiguration::default();
        assert_eq!(config.width(), DEFAULT_DRAWER_WIDTH);
        assert_eq!(config.duration(), DEFAULT_TRANSITION_DURATION);
        assert_eq!(config.curves().commit, TimingCurve::EaseOut);
    }

    #[test]
    fn builders_override() {
        let config = DrawerConfiguration::new(320.0)
            .with_duration(Duration::from_millis(400))
            .with_curves(CompletionCurves::uniform(TimingCurve::EaseInOut));
        assert_eq!(config.width(), 320.0);
        assert_eq!(config.duration(), Duration::from_millis(400));
        assert_eq!(config.curves().rollback, TimingCurve::EaseInOut);
    }

    #[test]
    fn width_resolution() {
        assert_eq!(resolve_width(Some(120.0), 300.0), 120.0);
        assert_eq!(resolve_width(None, 300.0), 300.0);
        assert_eq!(resolve_width(Some(0.0), 300.0), 300.0);
        assert_eq!(resolve_width(Some(f64::INFINITY), 300.0), 300.0);
    }
}
