// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawer's view of the host hierarchy: host content, dimming overlay, and panel.
//!
//! [`DrawerScene`] is the state a host renders each frame. The
//! [`TransitionAnimator`](crate::animator::TransitionAnimator) is the only
//! writer of the transient layers; hosts read it back through the accessors.
//!
//! Stacking order, back to front: host content, dimming overlay, panel.

use kurbo::{Affine, Point, Rect};

/// Alpha of the dimming overlay's black fill when fully faded in.
pub const DIMMING_BASE_ALPHA: f64 = 0.5;

/// The drawer panel while it is in the hierarchy.
#[derive(Clone, Debug, PartialEq)]
pub struct Panel<C> {
    /// Content presented inside the panel.
    pub content: C,
    /// Fixed width of the panel.
    pub width: f64,
    /// Horizontal translation from the container's leading edge; `-width` is fully hidden.
    pub offset: f64,
}

/// The overlay between host content and the panel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Dimming {
    /// Animated opacity in `[0, 1]`.
    pub alpha: f64,
}

impl Dimming {
    /// Opacity of the black fill as rendered.
    #[must_use]
    pub fn fill_alpha(&self) -> f64 {
        self.alpha * DIMMING_BASE_ALPHA
    }
}

/// Which layer a point lands on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SceneLayer {
    /// The drawer panel.
    Panel,
    /// The dimming overlay.
    Dimming,
    /// The host content underneath.
    Host,
}

/// Presentation state of one drawer attachment point.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawerScene<C> {
    pub(crate) container: Rect,
    pub(crate) host_offset: f64,
    pub(crate) progress: f64,
    pub(crate) dimming: Option<Dimming>,
    pub(crate) panel: Option<Panel<C>>,
    pub(crate) dismiss_pan_attached: bool,
}

impl<C> DrawerScene<C> {
    /// Creates a closed scene over `container`.
    #[must_use]
    pub fn new(container: Rect) -> Self {
        Self {
            container,
            host_offset: 0.0,
            progress: 0.0,
            dimming: None,
            panel: None,
            dismiss_pan_attached: false,
        }
    }

    /// Bounds of the container that hosts every layer.
    #[must_use]
    pub fn container(&self) -> Rect {
        self.container
    }

    /// Updates the container bounds, for example after a window resize.
    pub fn set_container(&mut self, container: Rect) {
        self.container = container;
    }

    /// How open the drawer is: `0` closed, `1` open.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Horizontal push applied to the host content.
    #[must_use]
    pub fn host_offset(&self) -> f64 {
        self.host_offset
    }

    /// Transform the host applies to its content layer.
    #[must_use]
    pub fn host_transform(&self) -> Affine {
        Affine::translate((self.host_offset, 0.0))
    }

    /// The dimming overlay, if it is in the hierarchy.
    #[must_use]
    pub fn dimming(&self) -> Option<&Dimming> {
        self.dimming.as_ref()
    }

    /// The panel, if it is in the hierarchy.
    #[must_use]
    pub fn panel(&self) -> Option<&Panel<C>> {
        self.panel.as_ref()
    }

    /// Content of the panel, if it is in the hierarchy.
    #[must_use]
    pub fn content(&self) -> Option<&C> {
        self.panel.as_ref().map(|p| &p.content)
    }

    /// Returns `true` while the panel is in the hierarchy.
    #[must_use]
    pub fn is_panel_attached(&self) -> bool {
        self.panel.is_some()
    }

    /// Returns `true` while the dismiss pan is installed on the container.
    #[must_use]
    pub fn is_dismiss_pan_attached(&self) -> bool {
        self.dismiss_pan_attached
    }

    /// Transform the host applies to the panel layer.
    #[must_use]
    pub fn panel_transform(&self) -> Option<Affine> {
        self.panel
            .as_ref()
            .map(|p| Affine::translate((p.offset, 0.0)))
    }

    /// Frame of the panel in container coordinates, after its translation.
    ///
    /// The panel is pinned to the leading edge and spans the full height.
    #[must_use]
    pub fn panel_frame(&self) -> Option<Rect> {
        self.panel.as_ref().map(|p| {
            let x0 = self.container.x0 + p.offset;
            Rect::new(x0, self.container.y0, x0 + p.width, self.container.y1)
        })
    }

    /// Frame of the dimming overlay; it always fills the container.
    #[must_use]
    pub fn dimming_frame(&self) -> Option<Rect> {
        self.dimming.map(|_| self.container)
    }

    /// Finds the topmost layer under `pt`.
    ///
    /// Points outside the container land on the host.
    #[must_use]
    pub fn hit_test(&self, pt: Point) -> SceneLayer {
        if self.panel_frame().is_some_and(|frame| frame.contains(pt)) {
            return SceneLayer::Panel;
        }
        if self.dimming_frame().is_some_and(|frame| frame.contains(pt)) {
            return SceneLayer::Dimming;
        }
        SceneLayer::Host
    }
}
