// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Side menu walkthrough.
//!
//! Drive a drawer the way a host would: an edge drag from raw pointer samples,
//! a tap on the dimming overlay, a drag back that is abandoned, and a
//! programmatic round trip. Every frame of the scene is logged.
//!
//! Run:
//! - `cargo run -p understory_drawer_demos --example side_menu`
//! - `RUST_LOG=debug cargo run -p understory_drawer_demos --example side_menu`

use std::cell::Cell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use kurbo::{Point, Rect, Size, Vec2};
use log::info;
use understory_drawer::arbiter::{DrawerRecognizer, Peer};
use understory_drawer::gesture::{GesturePhase, GestureSnapshot, PanTracker, ScrollGeometry};
use understory_drawer::registry::CancellableGesture;
use understory_drawer::scene::SceneLayer;
use understory_drawer::{
    CompletionCurves, DrawerConfiguration, DrawerDelegate, DrawerInteraction, HostContext,
    TimingCurve,
};
use understory_drawer_demos::{FRAME, init_logging, log_scene, run_frames};

/// The screen that owns the drawer.
struct Inbox {
    unread: u32,
}

impl DrawerDelegate for Inbox {
    type Content = String;

    fn width_for_drawer(&self, _content: &String) -> Option<f64> {
        Some(280.0)
    }

    fn content_to_present(&mut self, _host: &HostContext) -> Option<String> {
        Some(format!("Mailboxes ({} unread)", self.unread))
    }
}

/// A horizontal carousel on the inbox screen.
#[derive(Default)]
struct Carousel {
    cancelled: Cell<bool>,
}

impl CancellableGesture for Carousel {
    fn cancel(&self) {
        self.cancelled.set(true);
    }
}

fn main() {
    init_logging();

    let config = DrawerConfiguration::default()
        .with_duration(Duration::from_millis(200))
        .with_curves(CompletionCurves {
            commit: TimingCurve::EaseOut,
            rollback: TimingCurve::EaseInOut,
        });
    let mut drawer = DrawerInteraction::new(config);
    if let Err(err) = drawer.attach(Rect::new(0.0, 0.0, 390.0, 844.0), Inbox { unread: 3 }) {
        log::error!("{err}");
        return;
    }

    // The carousel rests at its first page, so it shares the touch with the drawer.
    let carousel = Rc::new(Carousel::default());
    let handle = Rc::downgrade(&carousel) as Weak<dyn CancellableGesture>;
    let geometry = ScrollGeometry::new(Vec2::ZERO, Size::new(390.0, 200.0)).with_paging(true);
    let shared = drawer.should_recognize_simultaneously(
        DrawerRecognizer::PresentPan,
        Peer::Foreign {
            gesture: &handle,
            scroll: Some(&geometry),
        },
    );
    info!("carousel shares the edge drag: {shared}");

    info!("-- edge drag");
    let mut pan = PanTracker::default();
    let mut now = Duration::ZERO;
    drawer.handle_present_pan(&pan.start(Point::new(2.0, 420.0), now));
    drawer.handle_swipe(GesturePhase::Began);
    drawer.handle_swipe(GesturePhase::Ended);
    for x in [12.0, 40.0, 85.0, 130.0, 160.0] {
        now += FRAME;
        if let Some(moved) = pan.update(Point::new(x, 421.0), now) {
            drawer.handle_present_pan(&moved);
        }
        if let Some(scene) = drawer.scene() {
            log_scene("dragging", scene);
        }
    }
    info!("carousel cancelled: {}", carousel.cancelled.get());
    now += FRAME;
    if let Some(released) = pan.end(Point::new(190.0, 421.0), now) {
        info!("released with velocity {:.0}", released.velocity.x);
        drawer.handle_present_pan(&released);
    }
    if let Some(done) = run_frames("settling", &mut drawer) {
        info!("{done:?}");
    }

    if let Some(scene) = drawer.scene() {
        let tap = Point::new(360.0, 400.0);
        info!("tap at {tap:?} lands on {:?}", scene.hit_test(tap));
        if scene.hit_test(tap) == SceneLayer::Dimming {
            info!("-- tap on dimming: {:?}", drawer.tap_dimming());
            if let Some(done) = run_frames("dismissing", &mut drawer) {
                info!("{done:?}");
            }
        }
    }

    info!("-- present, then an abandoned drag back");
    info!("present: {:?}", drawer.present());
    run_frames("presenting", &mut drawer);
    drawer.handle_dismiss_pan(&GestureSnapshot::began());
    drawer.handle_dismiss_pan(&GestureSnapshot::changed(Vec2::new(-90.0, 0.0)));
    if let Some(scene) = drawer.scene() {
        log_scene("dragging back", scene);
    }
    drawer.handle_dismiss_pan(&GestureSnapshot::ended(
        Vec2::new(-90.0, 0.0),
        Vec2::new(35.0, 0.0),
    ));
    if let Some(done) = run_frames("rolling back", &mut drawer) {
        info!("{done:?}");
    }

    info!("-- programmatic dismissal");
    info!("dismiss: {:?}", drawer.dismiss_with_duration(Duration::from_millis(120)));
    run_frames("dismissing", &mut drawer);
    info!("presented: {}", drawer.is_presented());
}
