// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-phase transition animator: slides the panel, fades the dimming, pushes the host.
//!
//! One animator runs exactly one [`TransitionPhase`]. Its side effects on the
//! [`DrawerScene`] are:
//!
//! - [`start`](TransitionAnimator::start): when presenting, attaches the dimming
//!   overlay (alpha `0`) and the panel (offset `-width`). Dismissing starts from
//!   the layers already in place.
//! - [`render`](TransitionAnimator::render): maps a completion fraction onto the
//!   panel offset (`-width → 0`), the dimming alpha (`0 → 1`) and the host push
//!   (`0 → +width`); dismissing runs the same mapping in reverse.
//! - [`complete`](TransitionAnimator::complete): settles the scene. A run that
//!   ends closed (committed dismissal, cancelled presentation) removes both
//!   transient layers, restores the host offset, and detaches the dismiss pan.
//!   A run that ends open keeps the layers and installs the dismiss pan.

use crate::scene::{Dimming, DrawerScene, Panel};

/// Direction of a transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransitionPhase {
    /// Closed to open.
    Presenting,
    /// Open to closed.
    Dismissing,
}

impl TransitionPhase {
    /// Maps a completion fraction of this phase to drawer openness.
    #[must_use]
    pub fn openness(self, fraction: f64) -> f64 {
        let fraction = clamp_unit(fraction);
        match self {
            Self::Presenting => fraction,
            Self::Dismissing => 1.0 - fraction,
        }
    }

    /// Completion fraction implied by a drag of `dx` for a drawer `width` wide.
    ///
    /// Presenting follows rightward drags, dismissing follows leftward drags;
    /// motion the other way counts as zero.
    #[must_use]
    pub fn fraction_for_translation(self, dx: f64, width: f64) -> f64 {
        if width <= 0.0 {
            return 0.0;
        }
        match self {
            Self::Presenting => (dx / width).max(0.0),
            Self::Dismissing => -(dx / width).min(0.0),
        }
    }

    /// Whether a drag released with horizontal velocity `vx` commits this phase.
    ///
    /// Completion follows the flick direction, not the distance dragged. A
    /// release at rest never commits.
    #[must_use]
    pub fn commits_with_velocity(self, vx: f64) -> bool {
        match self {
            Self::Presenting => vx > 0.0,
            Self::Dismissing => vx < 0.0,
        }
    }

    /// Whether the drawer is open once a run of this phase ends.
    #[must_use]
    pub fn ends_open(self, committed: bool) -> bool {
        match self {
            Self::Presenting => committed,
            Self::Dismissing => !committed,
        }
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Renders one presenting or dismissing run onto a [`DrawerScene`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransitionAnimator {
    phase: TransitionPhase,
    width: f64,
    interactive: bool,
}

impl TransitionAnimator {
    /// Creates an animator for `phase` with a panel `width` wide.
    #[must_use]
    pub fn new(phase: TransitionPhase, width: f64, interactive: bool) -> Self {
        Self {
            phase,
            width,
            interactive,
        }
    }

    /// Direction of this run.
    #[must_use]
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Panel width used by this run.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Whether a drag scrubs this run.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Prepares the scene for the run.
    ///
    /// When presenting, `content` becomes the panel's content. When dismissing
    /// it is ignored and the attached panel is reused.
    pub fn start<C>(&self, scene: &mut DrawerScene<C>, content: Option<C>) {
        if self.phase == TransitionPhase::Presenting {
            scene.dimming = Some(Dimming { alpha: 0.0 });
            if let Some(content) = content {
                scene.panel = Some(Panel {
                    content,
                    width: self.width,
                    offset: -self.width,
                });
            }
        }
        self.render(scene, 0.0);
    }

    /// Writes the frame for completion `fraction` into the scene.
    ///
    /// `fraction` is clamped to `[0, 1]` before use.
    pub fn render<C>(&self, scene: &mut DrawerScene<C>, fraction: f64) {
        let open = self.phase.openness(fraction);
        scene.progress = open;
        scene.host_offset = self.width * open;
        if let Some(dimming) = scene.dimming.as_mut() {
            dimming.alpha = open;
        }
        if let Some(panel) = scene.panel.as_mut() {
            panel.offset = -panel.width * (1.0 - open);
        }
    }

    /// Settles the scene once the run is over and reports whether the drawer is open.
    pub fn complete<C>(&self, scene: &mut DrawerScene<C>, committed: bool) -> bool {
        let open = self.phase.ends_open(committed);
        self.render(scene, if committed { 1.0 } else { 0.0 });
        if open {
            scene.dismiss_pan_attached = true;
        } else {
            scene.panel = None;
            scene.dimming = None;
            scene.host_offset = 0.0;
            scene.progress = 0.0;
            scene.dismiss_pan_attached = false;
        }
        open
    }
}
