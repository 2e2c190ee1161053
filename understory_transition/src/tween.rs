// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-driven interpolation between two scalar values.
//!
//! A [`Tween`] never reads a clock. The host advances it with the elapsed time
//! of each frame and reads back the current value.
//!
//! ```
//! use core::time::Duration;
//! use understory_transition::{TimingCurve, Tween};
//!
//! let mut tween = Tween::new(0.0, 1.0, Duration::from_millis(200), TimingCurve::Linear);
//! assert_eq!(tween.advance(Duration::from_millis(50)), 0.25);
//! assert!(!tween.is_finished());
//!
//! // Overshooting the duration lands exactly on the target.
//! assert_eq!(tween.advance(Duration::from_secs(1)), 1.0);
//! assert!(tween.is_finished());
//! ```

use core::time::Duration;

use crate::TimingCurve;

/// Interpolates from one value to another over a fixed duration.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
    curve: TimingCurve,
}

impl Tween {
    /// Creates a tween that has not advanced yet.
    ///
    /// A zero `duration` finishes on the first [`advance`](Self::advance).
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration, curve: TimingCurve) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            curve,
        }
    }

    /// Start value.
    #[must_use]
    pub fn from(&self) -> f64 {
        self.from
    }

    /// Target value.
    #[must_use]
    pub fn to(&self) -> f64 {
        self.to
    }

    /// Total duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Time advanced so far, never more than [`duration`](Self::duration).
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Curve applied to the time fraction.
    #[must_use]
    pub fn curve(&self) -> TimingCurve {
        self.curve
    }

    /// Fraction of the duration that has elapsed, in `[0, 1]`.
    #[must_use]
    pub fn time_fraction(&self) -> f64 {
        if self.duration.is_zero() {
            return if self.elapsed.is_zero() { 0.0 } else { 1.0 };
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Current interpolated value.
    #[must_use]
    pub fn value(&self) -> f64 {
        if self.is_finished() {
            return self.to;
        }
        let eased = self.curve.apply(self.time_fraction());
        self.from + (self.to - self.from) * eased
    }

    /// Advances by `dt` and returns the new value.
    pub fn advance(&mut self, dt: Duration) -> f64 {
        if self.duration.is_zero() {
            // Any tick, even an empty one, completes a zero-length tween.
            self.elapsed = Duration::from_nanos(1);
        } else {
            self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        }
        self.value()
    }

    /// Returns `true` once the full duration has elapsed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        if self.duration.is_zero() {
            !self.elapsed.is_zero()
        } else {
            self.elapsed >= self.duration
        }
    }
}
