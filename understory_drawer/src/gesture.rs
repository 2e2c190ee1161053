// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture input: normalized drag snapshots, a pan tracker that produces them,
//! and the scroll geometry used to arbitrate against scrollable content.
//!
//! Hosts that already run platform recognizers build [`GestureSnapshot`]s
//! directly. Hosts that only see raw pointer events can feed a [`PanTracker`]
//! instead.
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Point, Vec2};
//! use understory_drawer::gesture::{GesturePhase, PanTracker};
//!
//! let mut pan = PanTracker::default();
//!
//! let began = pan.start(Point::new(2.0, 300.0), Duration::from_millis(0));
//! assert_eq!(began.phase, GesturePhase::Began);
//!
//! let moved = pan.update(Point::new(42.0, 300.0), Duration::from_millis(100)).unwrap();
//! assert_eq!(moved.phase, GesturePhase::Changed);
//! assert_eq!(moved.translation, Vec2::new(40.0, 0.0));
//! assert_eq!(moved.velocity, Vec2::new(400.0, 0.0));
//!
//! let ended = pan.end(Point::new(42.0, 300.0), Duration::from_millis(100)).unwrap();
//! assert_eq!(ended.phase, GesturePhase::Ended);
//! assert!(!pan.is_tracking());
//! ```

use core::time::Duration;

use kurbo::{Insets, Point, Size, Vec2};

/// Lifecycle phase of a continuous drag recognizer.
///
/// Events for one recognizer arrive as `Began`, zero or more `Changed`, then
/// exactly one of `Ended` or `Cancelled`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// The recognizer has recognized its gesture.
    Began,
    /// The touch moved.
    Changed,
    /// The touch lifted normally.
    Ended,
    /// The system or a peer cancelled the gesture.
    Cancelled,
}

impl GesturePhase {
    /// Returns `true` for `Ended` and `Cancelled`.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled)
    }
}

/// Normalized drag signal at one instant.
///
/// `translation` is measured from where the gesture began; `velocity` is in
/// units per second. Both are in the host view's coordinate space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureSnapshot {
    /// Phase of the recognizer that produced this snapshot.
    pub phase: GesturePhase,
    /// Offset from the gesture's starting point.
    pub translation: Vec2,
    /// Instantaneous velocity.
    pub velocity: Vec2,
}

impl GestureSnapshot {
    /// Creates a snapshot from its parts.
    #[must_use]
    pub const fn new(phase: GesturePhase, translation: Vec2, velocity: Vec2) -> Self {
        Self {
            phase,
            translation,
            velocity,
        }
    }

    /// A `Began` snapshot with no motion.
    #[must_use]
    pub const fn began() -> Self {
        Self::new(GesturePhase::Began, Vec2::ZERO, Vec2::ZERO)
    }

    /// A `Changed` snapshot with the given translation.
    #[must_use]
    pub const fn changed(translation: Vec2) -> Self {
        Self::new(GesturePhase::Changed, translation, Vec2::ZERO)
    }

    /// An `Ended` snapshot with the given translation and release velocity.
    #[must_use]
    pub const fn ended(translation: Vec2, velocity: Vec2) -> Self {
        Self::new(GesturePhase::Ended, translation, velocity)
    }

    /// A `Cancelled` snapshot.
    #[must_use]
    pub const fn cancelled() -> Self {
        Self::new(GesturePhase::Cancelled, Vec2::ZERO, Vec2::ZERO)
    }
}

/// Tracks raw pointer samples and turns them into [`GestureSnapshot`]s.
///
/// Velocity is the displacement of the most recent sample divided by the time
/// since the one before it. A sample with no elapsed time keeps the previous
/// velocity.
#[derive(Clone, Debug, Default, Copy)]
pub struct PanTracker {
    /// Position where the pan started.
    pub start_pos: Option<Point>,
    /// Most recent sample position.
    pub last_pos: Option<Point>,
    /// Timestamp of the most recent sample.
    pub last_time: Option<Duration>,
    /// Velocity computed from the most recent pair of samples.
    pub velocity: Vec2,
}

impl PanTracker {
    /// Starts tracking from `pos` at `time`.
    pub fn start(&mut self, pos: Point, time: Duration) -> GestureSnapshot {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.last_time = Some(time);
        self.velocity = Vec2::ZERO;
        GestureSnapshot::began()
    }

    /// Records a move and returns a `Changed` snapshot, or `None` when idle.
    pub fn update(&mut self, pos: Point, time: Duration) -> Option<GestureSnapshot> {
        let translation = self.sample(pos, time)?;
        Some(GestureSnapshot::new(
            GesturePhase::Changed,
            translation,
            self.velocity,
        ))
    }

    /// Records the release point, stops tracking, and returns an `Ended` snapshot.
    ///
    /// Returns `None` when no pan is being tracked.
    pub fn end(&mut self, pos: Point, time: Duration) -> Option<GestureSnapshot> {
        let translation = self.sample(pos, time)?;
        let snapshot = GestureSnapshot::ended(translation, self.velocity);
        self.reset();
        Some(snapshot)
    }

    /// Stops tracking and returns a `Cancelled` snapshot, or `None` when idle.
    pub fn cancel(&mut self) -> Option<GestureSnapshot> {
        if !self.is_tracking() {
            return None;
        }
        self.reset();
        Some(GestureSnapshot::cancelled())
    }

    /// Returns `true` while a pan is being tracked.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.start_pos.is_some()
    }

    fn sample(&mut self, pos: Point, time: Duration) -> Option<Vec2> {
        let start = self.start_pos?;
        if let (Some(last_pos), Some(last_time)) = (self.last_pos, self.last_time) {
            let dt = time.saturating_sub(last_time).as_secs_f64();
            if dt > 0.0 {
                self.velocity = (pos - last_pos) / dt;
            }
        }
        self.last_pos = Some(pos);
        self.last_time = Some(time);
        Some(pos - start)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Geometry of a scroll container whose recognizer competes with the drawer.
///
/// Offsets follow the container's natural coordinate space: a horizontal
/// offset of `0` means the leading edge of the content is visible.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollGeometry {
    /// Current content offset.
    pub content_offset: Vec2,
    /// Size of the visible viewport; one page along each axis.
    pub viewport: Size,
    /// Effective content inset; `x0` is the leading inset.
    pub content_inset: Insets,
    /// Whether the container snaps to whole pages.
    pub paging_enabled: bool,
}

impl ScrollGeometry {
    /// Creates a free-scrolling container with no inset.
    #[must_use]
    pub fn new(content_offset: Vec2, viewport: Size) -> Self {
        Self {
            content_offset,
            viewport,
            content_inset: Insets::ZERO,
            paging_enabled: false,
        }
    }

    /// Sets the effective content inset.
    #[must_use]
    pub fn with_content_inset(mut self, inset: Insets) -> Self {
        self.content_inset = inset;
        self
    }

    /// Marks the container as paging.
    #[must_use]
    pub fn with_paging(mut self, paging_enabled: bool) -> Self {
        self.paging_enabled = paging_enabled;
        self
    }

    /// Leading content inset.
    #[must_use]
    pub fn leading_inset(&self) -> f64 {
        self.content_inset.x0
    }

    /// Width of one page.
    #[must_use]
    pub fn page_width(&self) -> f64 {
        self.viewport.width
    }
}
