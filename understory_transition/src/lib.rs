// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_transition --heading-base-level=0

//! Understory Transition: host-agnostic building blocks for animated UI transitions.
//!
//! This crate provides three small pieces that a transition engine composes:
//!
//! - [`TimingCurve`]: maps a normalized time fraction to a normalized value
//!   fraction (linear, the standard ease curves, or a custom cubic Bézier).
//! - [`Tween`]: interpolates between two values over a duration. The host
//!   advances it with elapsed frame time; it never reads a clock.
//! - [`InteractiveProgressController`]: a percent-driven transition that a drag
//!   scrubs live, then commits ([`finish`](InteractiveProgressController::finish))
//!   or rolls back ([`cancel`](InteractiveProgressController::cancel)). Both
//!   return the [`Tween`] that settles the remaining distance with the
//!   configured [`CompletionCurves`].
//!
//! The crate does not know about views, layers, or gestures. Callers map the
//! fraction they read back onto whatever they render.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use understory_transition::{CompletionCurves, InteractiveProgressController};
//!
//! let mut progress =
//!     InteractiveProgressController::new(Duration::from_millis(250), CompletionCurves::default());
//!
//! // A drag scrubs the transition.
//! progress.update(0.3);
//! progress.update(0.6);
//!
//! // The drag ends with a decisive flick: commit.
//! let mut settle = progress.finish().unwrap();
//! while !settle.is_finished() {
//!     let fraction = settle.advance(Duration::from_millis(16));
//!     assert!((0.6..=1.0).contains(&fraction));
//! }
//! assert_eq!(settle.value(), 1.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod curve;
mod progress;
mod tween;

pub use curve::TimingCurve;
pub use progress::{CompletionCurves, InteractiveProgressController, ProgressState};
pub use tween::Tween;
