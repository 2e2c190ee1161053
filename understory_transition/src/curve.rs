// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timing curves: map a normalized time fraction to a normalized value fraction.
//!
//! The named curves use the conventional cubic Bézier control points shared by
//! CSS and most platform animation APIs:
//!
//! | Curve                   | Control points           |
//! |-------------------------|--------------------------|
//! | [`TimingCurve::EaseIn`]    | `(0.42, 0.0, 1.0, 1.0)`  |
//! | [`TimingCurve::EaseOut`]   | `(0.0, 0.0, 0.58, 1.0)`  |
//! | [`TimingCurve::EaseInOut`] | `(0.42, 0.0, 0.58, 1.0)` |
//!
//! ## Minimal example
//!
//! ```
//! use understory_transition::TimingCurve;
//!
//! assert_eq!(TimingCurve::Linear.apply(0.25), 0.25);
//!
//! // Ease-out front-loads motion.
//! assert!(TimingCurve::EaseOut.apply(0.25) > 0.25);
//!
//! // Endpoints are fixed for every curve.
//! assert_eq!(TimingCurve::EaseInOut.apply(0.0), 0.0);
//! assert_eq!(TimingCurve::EaseInOut.apply(1.0), 1.0);
//! ```

/// Newton iterations before falling back to bisection.
const NEWTON_ITERATIONS: usize = 8;
/// Bisection iterations; 2^-40 is well below a device pixel at any sane duration.
const BISECTION_ITERATIONS: usize = 40;
const SOLVE_EPSILON: f64 = 1e-7;

/// A timing curve applied to the time fraction of a transition.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum TimingCurve {
    /// Value tracks time exactly.
    #[default]
    Linear,
    /// Starts slow, ends at full speed.
    EaseIn,
    /// Starts at full speed, decelerates into the target.
    EaseOut,
    /// Slow at both ends.
    EaseInOut,
    /// A custom cubic Bézier through `(0, 0)`, `(x1, y1)`, `(x2, y2)`, `(1, 1)`.
    ///
    /// `x1` and `x2` must lie in `[0, 1]` so the curve is a function of time;
    /// out-of-range values are clamped.
    CubicBezier {
        /// First control point, x.
        x1: f64,
        /// First control point, y.
        y1: f64,
        /// Second control point, x.
        x2: f64,
        /// Second control point, y.
        y2: f64,
    },
}

impl TimingCurve {
    /// Evaluates the curve at time fraction `t`.
    ///
    /// `t` is clamped to `[0, 1]`. The result is exactly `0.0` at `t == 0` and
    /// exactly `1.0` at `t == 1` for every curve.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match self {
            Self::Linear => t,
            Self::EaseIn => UnitBezier::new(0.42, 0.0, 1.0, 1.0).solve(t),
            Self::EaseOut => UnitBezier::new(0.0, 0.0, 0.58, 1.0).solve(t),
            Self::EaseInOut => UnitBezier::new(0.42, 0.0, 0.58, 1.0).solve(t),
            Self::CubicBezier { x1, y1, x2, y2 } => {
                UnitBezier::new(x1.clamp(0.0, 1.0), y1, x2.clamp(0.0, 1.0), y2).solve(t)
            }
        }
    }
}

/// Polynomial form of a cubic Bézier anchored at `(0, 0)` and `(1, 1)`.
#[derive(Copy, Clone, Debug)]
struct UnitBezier {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

impl UnitBezier {
    fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let ax = 1.0 - cx - bx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        let ay = 1.0 - cy - by;
        Self {
            ax,
            bx,
            cx,
            ay,
            by,
            cy,
        }
    }

    fn sample_x(&self, s: f64) -> f64 {
        ((self.ax * s + self.bx) * s + self.cx) * s
    }

    fn sample_y(&self, s: f64) -> f64 {
        ((self.ay * s + self.by) * s + self.cy) * s
    }

    fn sample_dx(&self, s: f64) -> f64 {
        (3.0 * self.ax * s + 2.0 * self.bx) * s + self.cx
    }

    /// Finds the curve parameter whose x equals `x`.
    fn parameter_for_x(&self, x: f64) -> f64 {
        let mut s = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = self.sample_x(s) - x;
            if err.abs() < SOLVE_EPSILON {
                return s;
            }
            let slope = self.sample_dx(s);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= err / slope;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        s = x;
        for _ in 0..BISECTION_ITERATIONS {
            let sx = self.sample_x(s);
            if (sx - x).abs() < SOLVE_EPSILON {
                break;
            }
            if x > sx {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) * 0.5;
        }
        s
    }

    fn solve(&self, x: f64) -> f64 {
        self.sample_y(self.parameter_for_x(x))
    }
}
