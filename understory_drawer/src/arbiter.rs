// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture arbitration: which recognizers may begin, and which may run together.
//!
//! A drag that starts over scrollable content has two readings: scroll the
//! content, or reveal the drawer. The arbiter resolves it with a leading-edge
//! test so the content scrolls normally everywhere except from the exact
//! leading edge.
//!
//! Policy:
//!
//! - The drawer's present pan and its edge swipe always run together; the
//!   swipe gates the pan.
//! - A foreign recognizer may run together with the present pan or edge swipe
//!   only if it belongs to a scroll container that sits at its leading edge.
//!   Every such scroll recognizer is registered for later cancellation,
//!   whatever the verdict.
//! - The edge swipe may not begin while the host is below the root of a
//!   navigation stack.
//! - The dismiss pan never shares its touches.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::{Rc, Weak};
//!
//! use kurbo::{Size, Vec2};
//! use understory_drawer::arbiter::{DrawerRecognizer, GestureArbiter, Peer};
//! use understory_drawer::gesture::ScrollGeometry;
//! use understory_drawer::registry::{CancellableGesture, CancellableGestureRegistry};
//!
//! struct Scroll(Cell<bool>);
//! impl CancellableGesture for Scroll {
//!     fn cancel(&self) {
//!         self.0.set(true);
//!     }
//! }
//!
//! let arbiter = GestureArbiter::new();
//! let mut registry = CancellableGestureRegistry::new();
//! let scroll = Rc::new(Scroll(Cell::new(false)));
//! let handle = Rc::downgrade(&scroll) as Weak<dyn CancellableGesture>;
//!
//! let at_edge = ScrollGeometry::new(Vec2::ZERO, Size::new(390.0, 800.0));
//! let peer = Peer::Foreign { gesture: &handle, scroll: Some(&at_edge) };
//! assert!(arbiter.recognize_simultaneously(DrawerRecognizer::PresentPan, peer, &mut registry));
//!
//! let scrolled = ScrollGeometry::new(Vec2::new(120.0, 0.0), Size::new(390.0, 800.0));
//! let peer = Peer::Foreign { gesture: &handle, scroll: Some(&scrolled) };
//! assert!(!arbiter.recognize_simultaneously(DrawerRecognizer::PresentPan, peer, &mut registry));
//!
//! // The same scroll recognizer is tracked once.
//! assert_eq!(registry.len(), 1);
//! ```

use alloc::rc::Weak;

use crate::delegate::HostContext;
use crate::gesture::ScrollGeometry;
use crate::registry::{CancellableGesture, CancellableGestureRegistry};

/// The recognizers a drawer installs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DrawerRecognizer {
    /// Continuous pan on the host that drives presentation.
    PresentPan,
    /// Directional edge swipe on the host that signals intent to open.
    EdgeSwipe,
    /// Continuous pan on the presented container that drives dismissal.
    DismissPan,
}

/// The other side of a simultaneous-recognition query.
#[derive(Copy, Clone, Debug)]
pub enum Peer<'a> {
    /// Another recognizer installed by the same drawer.
    Drawer(DrawerRecognizer),
    /// A recognizer owned by someone else.
    Foreign {
        /// Non-owning handle used to cancel the recognizer later.
        gesture: &'a Weak<dyn CancellableGesture>,
        /// Geometry of the scroll container the recognizer belongs to, if any.
        scroll: Option<&'a ScrollGeometry>,
    },
}

/// Stateless arbitration policy.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GestureArbiter {
    tolerance: f64,
}

impl GestureArbiter {
    /// Creates an arbiter that compares offsets exactly.
    #[must_use]
    pub const fn new() -> Self {
        Self { tolerance: 0.0 }
    }

    /// Allows offsets within `tolerance` of an edge to count as at the edge.
    ///
    /// Useful for hosts whose scroll offsets pick up rounding noise.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.abs();
        self
    }

    /// Edge tolerance.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Decides whether `recognizer` may begin recognizing at all.
    #[must_use]
    pub fn should_begin(&self, recognizer: DrawerRecognizer, host: &HostContext) -> bool {
        match recognizer {
            DrawerRecognizer::EdgeSwipe => !host.is_navigating(),
            DrawerRecognizer::PresentPan | DrawerRecognizer::DismissPan => true,
        }
    }

    /// Decides whether `own` may recognize at the same time as `peer`.
    ///
    /// Foreign recognizers that belong to a scroll container are registered in
    /// `registry` so they can be cancelled once the drawer commits.
    pub fn recognize_simultaneously(
        &self,
        own: DrawerRecognizer,
        peer: Peer<'_>,
        registry: &mut CancellableGestureRegistry,
    ) -> bool {
        match (own, peer) {
            (DrawerRecognizer::PresentPan, Peer::Drawer(DrawerRecognizer::EdgeSwipe))
            | (DrawerRecognizer::EdgeSwipe, Peer::Drawer(DrawerRecognizer::PresentPan)) => true,
            (DrawerRecognizer::DismissPan, _) | (_, Peer::Drawer(_)) => false,
            (_, Peer::Foreign { gesture, scroll }) => {
                let Some(scroll) = scroll else {
                    return false;
                };
                registry.register(gesture.clone());
                self.is_at_leading_edge(scroll)
            }
        }
    }

    /// Returns `true` when `scroll` shows the leading edge of its content.
    ///
    /// A paging container that keeps its current page centered rests one page
    /// past the origin; it counts as at the edge when it rests there with no
    /// leading inset.
    #[must_use]
    pub fn is_at_leading_edge(&self, scroll: &ScrollGeometry) -> bool {
        let x = scroll.content_offset.x;
        if scroll.paging_enabled
            && (x - scroll.page_width()).abs() <= self.tolerance
            && scroll.leading_inset() <= 0.0
        {
            return true;
        }
        x <= self.tolerance
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::{Rc, Weak};
    use core::cell::Cell;

    use kurbo::{Insets, Size, Vec2};

    use super::{DrawerRecognizer, GestureArbiter, Peer};
    use crate::delegate::HostContext;
    use crate::gesture::ScrollGeometry;
    use crate::registry::{CancellableGesture, CancellableGestureRegistry};

    #[derive(Default)]
    struct Recognizer {
        cancelled: Cell<bool>,
    }

    impl CancellableGesture for Recognizer {
        fn cancel(&self) {
            self.cancelled.set(true);
        }
    }

    const PAGE: Size = Size::new(390.0, 844.0);

    fn scroll_at(x: f64) -> ScrollGeometry {
        ScrollGeometry::new(Vec2::new(x, 0.0), PAGE)
    }

    fn ask(own: DrawerRecognizer, geometry: Option<&ScrollGeometry>) -> (bool, usize) {
        let peer = Rc::new(Recognizer::default());
        let handle = Rc::downgrade(&peer) as Weak<dyn CancellableGesture>;
        let mut registry = CancellableGestureRegistry::new();
        let allowed = GestureArbiter::new().recognize_simultaneously(
            own,
            Peer::Foreign {
                gesture: &handle,
                scroll: geometry,
            },
            &mut registry,
        );
        (allowed, registry.len())
    }

    #[test]
    fn own_pan_and_swipe_cooperate() {
        let arbiter = GestureArbiter::new();
        let mut registry = CancellableGestureRegistry::new();
        assert!(arbiter.recognize_simultaneously(
            DrawerRecognizer::PresentPan,
            Peer::Drawer(DrawerRecognizer::EdgeSwipe),
            &mut registry
        ));
        assert!(arbiter.recognize_simultaneously(
            DrawerRecognizer::EdgeSwipe,
            Peer::Drawer(DrawerRecognizer::PresentPan),
            &mut registry
        ));
        assert!(!arbiter.recognize_simultaneously(
            DrawerRecognizer::DismissPan,
            Peer::Drawer(DrawerRecognizer::PresentPan),
            &mut registry
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn scroll_at_origin_is_allowed_and_registered() {
        assert_eq!(ask(DrawerRecognizer::PresentPan, Some(&scroll_at(0.0))), (true, 1));
        assert_eq!(ask(DrawerRecognizer::EdgeSwipe, Some(&scroll_at(0.0))), (true, 1));
    }

    #[test]
    fn scrolled_content_is_denied_but_still_registered() {
        assert_eq!(ask(DrawerRecognizer::PresentPan, Some(&scroll_at(0.5))), (false, 1));
        assert_eq!(ask(DrawerRecognizer::PresentPan, Some(&scroll_at(200.0))), (false, 1));
    }

    #[test]
    fn overscrolled_leading_edge_is_allowed() {
        assert_eq!(ask(DrawerRecognizer::PresentPan, Some(&scroll_at(-30.0))), (true, 1));
    }

    #[test]
    fn foreign_without_scroll_container_is_denied_and_ignored() {
        assert_eq!(ask(DrawerRecognizer::PresentPan, None), (false, 0));
    }

    #[test]
    fn dismiss_pan_never_shares() {
        assert_eq!(ask(DrawerRecognizer::DismissPan, Some(&scroll_at(0.0))), (false, 0));
    }

    #[test]
    fn centered_paging_rests_one_page_in() {
        let arbiter = GestureArbiter::new();
        let centered = scroll_at(PAGE.width).with_paging(true);
        assert!(arbiter.is_at_leading_edge(&centered));

        let inset = centered.with_content_inset(Insets::new(390.0, 0.0, 0.0, 0.0));
        assert!(!arbiter.is_at_leading_edge(&inset));

        let mid_flight = scroll_at(PAGE.width + 12.0).with_paging(true);
        assert!(!arbiter.is_at_leading_edge(&mid_flight));
    }

    #[test]
    fn one_page_in_without_paging_is_scrolled() {
        let arbiter = GestureArbiter::new();
        assert!(!arbiter.is_at_leading_edge(&scroll_at(PAGE.width)));
    }

    #[test]
    fn paging_at_origin_is_at_edge() {
        let arbiter = GestureArbiter::new();
        assert!(arbiter.is_at_leading_edge(&scroll_at(0.0).with_paging(true)));
    }

    #[test]
    fn vertical_scrolling_does_not_matter() {
        let arbiter = GestureArbiter::new();
        let list = ScrollGeometry::new(Vec2::new(0.0, 1_200.0), PAGE);
        assert!(arbiter.is_at_leading_edge(&list));
    }

    #[test]
    fn tolerance_absorbs_rounding_noise() {
        let arbiter = GestureArbiter::new().with_tolerance(0.5);
        assert!(arbiter.is_at_leading_edge(&scroll_at(0.25)));
        assert!(arbiter.is_at_leading_edge(&scroll_at(PAGE.width - 0.25).with_paging(true)));
        assert!(!arbiter.is_at_leading_edge(&scroll_at(1.0)));
    }

    #[test]
    fn edge_swipe_yields_to_back_navigation() {
        let arbiter = GestureArbiter::new();
        let root = HostContext::new().with_navigation_depth(1);
        let pushed = HostContext::new().with_navigation_depth(2);

        assert!(arbiter.should_begin(DrawerRecognizer::EdgeSwipe, &root));
        assert!(!arbiter.should_begin(DrawerRecognizer::EdgeSwipe, &pushed));
        assert!(arbiter.should_begin(DrawerRecognizer::PresentPan, &pushed));
        assert!(arbiter.should_begin(DrawerRecognizer::DismissPan, &pushed));
    }
}
