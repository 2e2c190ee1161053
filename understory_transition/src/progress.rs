// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Percent-driven interactive progress: scrub, commit, or roll back.
//!
//! ## Usage
//!
//! 1) Create an [`InteractiveProgressController`] when a drag takes over a transition.
//! 2) On every drag move, call [`update`](InteractiveProgressController::update) with the
//!    completion fraction derived from the drag.
//! 3) When the drag ends, call [`finish`](InteractiveProgressController::finish) to commit
//!    or [`cancel`](InteractiveProgressController::cancel) to roll back. Either returns the
//!    [`Tween`] that settles the remaining distance.
//! 4) The controller is now terminal: further `update`, `finish`, and `cancel` calls are
//!    rejected.
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use understory_transition::{CompletionCurves, InteractiveProgressController, ProgressState};
//!
//! let mut progress =
//!     InteractiveProgressController::new(Duration::from_millis(200), CompletionCurves::default());
//!
//! assert!(progress.update(0.4));
//! assert!(progress.update(1.7));
//! assert_eq!(progress.fraction(), 1.0);
//! assert!(progress.update(0.5));
//!
//! let settle = progress.finish().unwrap();
//! assert_eq!(settle.from(), 0.5);
//! assert_eq!(settle.to(), 1.0);
//! assert_eq!(settle.duration(), Duration::from_millis(100));
//!
//! assert_eq!(progress.state(), ProgressState::Finished);
//! assert!(!progress.update(0.1));
//! assert!(progress.cancel().is_none());
//! ```

use core::time::Duration;

use crate::{TimingCurve, Tween};

/// Curves used to settle an interactive transition once the drag lets go.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CompletionCurves {
    /// Curve for settling toward completion.
    pub commit: TimingCurve,
    /// Curve for settling back to the starting state.
    pub rollback: TimingCurve,
}

impl Default for CompletionCurves {
    fn default() -> Self {
        Self {
            commit: TimingCurve::EaseOut,
            rollback: TimingCurve::Linear,
        }
    }
}

impl CompletionCurves {
    /// Uses the same curve for both outcomes.
    #[must_use]
    pub const fn uniform(curve: TimingCurve) -> Self {
        Self {
            commit: curve,
            rollback: curve,
        }
    }
}

/// Lifecycle of an [`InteractiveProgressController`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProgressState {
    /// Accepting updates.
    Active,
    /// Committed toward `1.0`. Terminal.
    Finished,
    /// Rolled back toward `0.0`. Terminal.
    Cancelled,
}

/// A resumable, percent-driven interpolation with a terminal flag.
///
/// The stored fraction is always in `[0, 1]`: every input to
/// [`update`](Self::update) is clamped before it is stored.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractiveProgressController {
    fraction: f64,
    state: ProgressState,
    duration: Duration,
    curves: CompletionCurves,
}

impl InteractiveProgressController {
    /// Creates an active controller at fraction `0.0`.
    ///
    /// `duration` is the time a full `0 → 1` settle would take; settles cover
    /// only the remaining distance and take proportionally less.
    #[must_use]
    pub fn new(duration: Duration, curves: CompletionCurves) -> Self {
        Self {
            fraction: 0.0,
            state: ProgressState::Active,
            duration,
            curves,
        }
    }

    /// Current completion fraction in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ProgressState {
        self.state
    }

    /// Returns `true` after [`finish`](Self::finish) or [`cancel`](Self::cancel).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state != ProgressState::Active
    }

    /// Full-distance settle duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Settle curves.
    #[must_use]
    pub fn curves(&self) -> CompletionCurves {
        self.curves
    }

    /// Scrubs to `percent`, clamped to `[0, 1]`.
    ///
    /// Returns `false` without changing anything if the controller is terminal
    /// or `percent` is NaN.
    pub fn update(&mut self, percent: f64) -> bool {
        if self.is_terminal() || percent.is_nan() {
            return false;
        }
        self.fraction = percent.clamp(0.0, 1.0);
        true
    }

    /// Commits toward `1.0` and returns the settle tween.
    ///
    /// Returns `None` if the controller is already terminal.
    pub fn finish(&mut self) -> Option<Tween> {
        self.settle(ProgressState::Finished, 1.0, self.curves.commit)
    }

    /// Rolls back toward `0.0` and returns the settle tween.
    ///
    /// Returns `None` if the controller is already terminal.
    pub fn cancel(&mut self) -> Option<Tween> {
        self.settle(ProgressState::Cancelled, 0.0, self.curves.rollback)
    }

    fn settle(&mut self, state: ProgressState, target: f64, curve: TimingCurve) -> Option<Tween> {
        if self.is_terminal() {
            return None;
        }
        self.state = state;
        let remaining = (target - self.fraction).abs();
        Some(Tween::new(
            self.fraction,
            target,
            self.duration.mul_f64(remaining),
            curve,
        ))
    }
}
