// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drawer --heading-base-level=0

//! Understory Drawer: a headless side drawer that slides in from the leading edge.
//!
//! A drawer panel is revealed by a drag from the leading edge or presented
//! programmatically. While it slides in, the host content is pushed aside by the
//! panel's width and a dimming overlay fades in between the two. The drag scrubs
//! the transition live; on release the flick direction decides whether it
//! commits or rolls back. An open drawer is dismissed by a drag back, a tap on
//! the dimming overlay, or a call to [`DrawerInteraction::dismiss`].
//!
//! The crate renders nothing and reads no clock. Hosts forward recognizer
//! callbacks and frame ticks to a [`DrawerInteraction`] and paint the
//! [`DrawerScene`](scene::DrawerScene) it maintains.
//!
//! ## Modules
//!
//! - [`gesture`]: gesture phases and snapshots, a pointer tracker that produces
//!   them, and the scroll geometry the arbiter reads.
//! - [`arbiter`]: which recognizers may begin and which may run together with
//!   the drawer's pan, including the leading-edge test for scroll containers.
//! - [`registry`]: weak handles to peer recognizers that are cancelled once the
//!   drawer takes over a touch sequence.
//! - [`animator`]: maps a completion fraction onto the panel offset, dimming
//!   alpha, and host push, and settles the scene at the end of a run.
//! - [`scene`]: the layers a host renders, with frames and hit testing.
//! - [`delegate`]: the host-supplied content factory and host description.
//! - [`config`]: panel width, transition duration, and settle curves.
//!
//! Timing curves, tweens, and the percent-driven progress controller live in
//! `understory_transition`; the types a drawer configuration names are
//! re-exported here.
//!
//! ## Interactive presentation
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::{Rect, Vec2};
//! use understory_drawer::gesture::{GesturePhase, GestureSnapshot};
//! use understory_drawer::{DrawerConfiguration, DrawerInteraction, FactoryDelegate, InteractionState};
//!
//! let mut drawer = DrawerInteraction::new(DrawerConfiguration::new(300.0));
//! drawer
//!     .attach(Rect::new(0.0, 0.0, 390.0, 844.0), FactoryDelegate::new(|| "menu"))
//!     .unwrap();
//!
//! // The edge swipe fires first and gates the pan.
//! drawer.handle_present_pan(&GestureSnapshot::began());
//! drawer.handle_swipe(GesturePhase::Ended);
//!
//! // The first move after the swipe starts the run; later moves scrub it.
//! drawer.handle_present_pan(&GestureSnapshot::changed(Vec2::new(20.0, 0.0)));
//! drawer.handle_present_pan(&GestureSnapshot::changed(Vec2::new(150.0, 0.0)));
//! assert_eq!(drawer.state(), InteractionState::GestureTracking);
//! assert_eq!(drawer.progress(), 0.5);
//!
//! // Released with a rightward flick: the drawer finishes opening.
//! drawer.handle_present_pan(&GestureSnapshot::ended(
//!     Vec2::new(150.0, 0.0),
//!     Vec2::new(400.0, 0.0),
//! ));
//! assert_eq!(drawer.state(), InteractionState::Committing);
//! while drawer.tick(Duration::from_millis(16)).is_none() {}
//!
//! assert!(drawer.is_presented());
//! let scene = drawer.scene().unwrap();
//! assert_eq!(scene.host_offset(), 300.0);
//! assert_eq!(scene.dimming().unwrap().fill_alpha(), 0.5);
//! assert!(scene.is_dismiss_pan_attached());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod animator;
pub mod arbiter;
pub mod config;
mod coordinator;
pub mod delegate;
pub mod gesture;
pub mod registry;
pub mod scene;

pub use animator::TransitionPhase;
pub use config::{DEFAULT_DRAWER_WIDTH, DEFAULT_TRANSITION_DURATION, DrawerConfiguration};
pub use coordinator::{
    AttachError, DrawerInteraction, IgnoreReason, InteractionState, PresentOutcome,
    TransitionCompletion,
};
pub use delegate::{DrawerDelegate, FactoryDelegate, HostContext};
pub use understory_transition::{CompletionCurves, TimingCurve};
