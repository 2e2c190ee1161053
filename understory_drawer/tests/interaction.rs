// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end drawer runs driven the way a host drives them.

use std::cell::Cell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use kurbo::{Point, Rect, Size, Vec2};
use understory_drawer::arbiter::{DrawerRecognizer, Peer};
use understory_drawer::gesture::{GesturePhase, GestureSnapshot, PanTracker, ScrollGeometry};
use understory_drawer::registry::CancellableGesture;
use understory_drawer::scene::SceneLayer;
use understory_drawer::{
    DrawerConfiguration, DrawerDelegate, DrawerInteraction, FactoryDelegate, HostContext,
    IgnoreReason, InteractionState, PresentOutcome, TransitionCompletion, TransitionPhase,
};

const WIDTH: f64 = 300.0;
const CONTAINER: Rect = Rect::new(0.0, 0.0, 390.0, 844.0);
const FRAME: Duration = Duration::from_millis(16);

/// Counts how often the drawer asked for content.
struct Menu {
    built: Rc<Cell<u32>>,
}

impl DrawerDelegate for Menu {
    type Content = u32;

    fn content_to_present(&mut self, _host: &HostContext) -> Option<u32> {
        self.built.set(self.built.get() + 1);
        Some(self.built.get())
    }
}

#[derive(Default)]
struct ScrollRecognizer {
    cancels: Cell<u32>,
}

impl CancellableGesture for ScrollRecognizer {
    fn cancel(&self) {
        self.cancels.set(self.cancels.get() + 1);
    }
}

fn drawer() -> (DrawerInteraction<Menu>, Rc<Cell<u32>>) {
    let built = Rc::new(Cell::new(0));
    let mut drawer = DrawerInteraction::new(DrawerConfiguration::new(WIDTH));
    drawer
        .attach(
            CONTAINER,
            Menu {
                built: built.clone(),
            },
        )
        .unwrap();
    (drawer, built)
}

fn run_to_end<D: DrawerDelegate>(drawer: &mut DrawerInteraction<D>) -> TransitionCompletion {
    for _ in 0..1_000 {
        if let Some(done) = drawer.tick(FRAME) {
            return done;
        }
    }
    panic!("transition never completed");
}

fn drag_open<D: DrawerDelegate>(drawer: &mut DrawerInteraction<D>, dx: f64) {
    drawer.handle_present_pan(&GestureSnapshot::began());
    drawer.handle_swipe(GesturePhase::Began);
    drawer.handle_swipe(GesturePhase::Ended);
    drawer.handle_present_pan(&GestureSnapshot::changed(Vec2::new(4.0, 0.0)));
    drawer.handle_present_pan(&GestureSnapshot::changed(Vec2::new(dx, 0.0)));
}

fn open<D: DrawerDelegate>(drawer: &mut DrawerInteraction<D>) {
    assert!(drawer.present().is_started(), "present should start");
    let done = run_to_end(drawer);
    assert!(done.presented, "programmatic presentation should end open");
}

#[test]
fn programmatic_presentation_opens_the_drawer() {
    let (mut drawer, built) = drawer();
    assert_eq!(drawer.present(), PresentOutcome::Started);

    let done = run_to_end(&mut drawer);
    assert_eq!(
        done,
        TransitionCompletion {
            phase: TransitionPhase::Presenting,
            committed: true,
            interactive: false,
            presented: true,
        }
    );

    let scene = drawer.scene().unwrap();
    assert_eq!(scene.content(), Some(&1));
    assert_eq!(scene.panel().unwrap().offset, 0.0);
    assert_eq!(scene.dimming().unwrap().alpha, 1.0);
    assert_eq!(scene.host_offset(), WIDTH);
    assert_eq!(built.get(), 1);
}

#[test]
fn drag_released_with_rightward_velocity_commits() {
    let (mut drawer, _) = drawer();
    drag_open(&mut drawer, WIDTH / 2.0);
    assert_eq!(drawer.progress(), 0.5);

    drawer.handle_present_pan(&GestureSnapshot::ended(
        Vec2::new(WIDTH / 2.0, 0.0),
        Vec2::new(50.0, 0.0),
    ));
    assert_eq!(drawer.state(), InteractionState::Committing);

    let done = run_to_end(&mut drawer);
    assert!(done.committed && done.interactive && done.presented);
    assert_eq!(drawer.progress(), 1.0);
    assert_eq!(drawer.state(), InteractionState::Idle);
}

#[test]
fn drag_released_with_leftward_velocity_cancels() {
    let (mut drawer, _) = drawer();
    drag_open(&mut drawer, WIDTH / 2.0);
    drawer.handle_present_pan(&GestureSnapshot::ended(
        Vec2::new(WIDTH / 2.0, 0.0),
        Vec2::new(-10.0, 0.0),
    ));
    assert_eq!(drawer.state(), InteractionState::Cancelling);

    let done = run_to_end(&mut drawer);
    assert!(!done.committed && !done.presented);

    let scene = drawer.scene().unwrap();
    assert!(!scene.is_panel_attached());
    assert!(scene.dimming().is_none());
    assert_eq!(scene.host_offset(), 0.0);
}

#[test]
fn release_at_rest_cancels_even_past_halfway() {
    let (mut drawer, _) = drawer();
    drag_open(&mut drawer, WIDTH * 0.9);
    drawer.handle_present_pan(&GestureSnapshot::ended(
        Vec2::new(WIDTH * 0.9, 0.0),
        Vec2::ZERO,
    ));
    assert_eq!(drawer.state(), InteractionState::Cancelling);
    assert!(!run_to_end(&mut drawer).presented);
}

#[test]
fn tap_on_dimming_dismisses_without_a_drag() {
    let (mut drawer, _) = drawer();
    open(&mut drawer);
    let scene = drawer.scene().unwrap();
    assert_eq!(scene.hit_test(Point::new(350.0, 400.0)), SceneLayer::Dimming);

    assert_eq!(drawer.tap_dimming(), PresentOutcome::Started);
    assert_eq!(drawer.state(), InteractionState::Dismissing);

    let done = run_to_end(&mut drawer);
    assert_eq!(
        done,
        TransitionCompletion {
            phase: TransitionPhase::Dismissing,
            committed: true,
            interactive: false,
            presented: false,
        }
    );
    let scene = drawer.scene().unwrap();
    assert!(!scene.is_panel_attached());
    assert!(scene.dimming().is_none());
    assert_eq!(scene.host_offset(), 0.0);
    assert!(!scene.is_dismiss_pan_attached());
}

#[test]
fn present_during_a_drag_does_not_start_a_second_run() {
    let (mut drawer, built) = drawer();
    drag_open(&mut drawer, 60.0);
    assert_eq!(drawer.state(), InteractionState::GestureTracking);

    assert_eq!(drawer.present(), PresentOutcome::Ignored(IgnoreReason::Busy));
    assert_eq!(drawer.state(), InteractionState::GestureTracking);
    assert_eq!(built.get(), 1);
    assert_eq!(drawer.scene().unwrap().content(), Some(&1));

    // The drag still owns the run.
    drawer.handle_present_pan(&GestureSnapshot::changed(Vec2::new(90.0, 0.0)));
    assert_eq!(drawer.progress(), 0.3);
}

#[test]
fn present_while_settling_is_busy() {
    let (mut drawer, _) = drawer();
    drag_open(&mut drawer, 60.0);
    drawer.handle_present_pan(&GestureSnapshot::ended(
        Vec2::new(60.0, 0.0),
        Vec2::new(200.0, 0.0),
    ));
    assert_eq!(drawer.present(), PresentOutcome::Ignored(IgnoreReason::Busy));
    assert!(run_to_end(&mut drawer).presented);
}

#[test]
fn taking_over_cancels_registered_scroll_peers() {
    let (mut drawer, _) = drawer();
    let scroll = Rc::new(ScrollRecognizer::default());
    let handle = Rc::downgrade(&scroll) as Weak<dyn CancellableGesture>;
    let geometry = ScrollGeometry::new(Vec2::ZERO, Size::new(390.0, 844.0));

    let allowed = drawer.should_recognize_simultaneously(
        DrawerRecognizer::PresentPan,
        Peer::Foreign {
            gesture: &handle,
            scroll: Some(&geometry),
        },
    );
    assert!(allowed);
    assert_eq!(drawer.registry().len(), 1);

    drawer.handle_present_pan(&GestureSnapshot::began());
    assert_eq!(scroll.cancels.get(), 0);

    drawer.handle_swipe(GesturePhase::Ended);
    drawer.handle_present_pan(&GestureSnapshot::changed(Vec2::new(8.0, 0.0)));
    assert_eq!(scroll.cancels.get(), 1);

    // Scrubbing does not cancel again.
    drawer.handle_present_pan(&GestureSnapshot::changed(Vec2::new(80.0, 0.0)));
    assert_eq!(scroll.cancels.get(), 1);

    drawer.handle_present_pan(&GestureSnapshot::ended(
        Vec2::new(80.0, 0.0),
        Vec2::new(10.0, 0.0),
    ));
    assert!(drawer.registry().is_empty());
}

#[test]
fn scrolled_peer_is_denied_and_untouched_without_a_run() {
    let (mut drawer, _) = drawer();
    let scroll = Rc::new(ScrollRecognizer::default());
    let handle = Rc::downgrade(&scroll) as Weak<dyn CancellableGesture>;
    let geometry = ScrollGeometry::new(Vec2::new(240.0, 0.0), Size::new(390.0, 844.0));

    assert!(!drawer.should_recognize_simultaneously(
        DrawerRecognizer::EdgeSwipe,
        Peer::Foreign {
            gesture: &handle,
            scroll: Some(&geometry),
        },
    ));
    assert_eq!(drawer.registry().len(), 1);

    // The swipe never ends, so the pan never starts a run.
    drawer.handle_present_pan(&GestureSnapshot::began());
    drawer.handle_present_pan(&GestureSnapshot::changed(Vec2::new(40.0, 0.0)));
    drawer.handle_present_pan(&GestureSnapshot::cancelled());

    assert_eq!(scroll.cancels.get(), 0);
    assert!(drawer.registry().is_empty());
    assert_eq!(drawer.state(), InteractionState::Idle);
}

#[test]
fn dropped_peers_are_skipped() {
    let (mut drawer, _) = drawer();
    let geometry = ScrollGeometry::new(Vec2::ZERO, Size::new(390.0, 844.0));
    {
        let scroll: Rc<dyn CancellableGesture> = Rc::new(ScrollRecognizer::default());
        let handle = Rc::downgrade(&scroll);
        drawer.should_recognize_simultaneously(
            DrawerRecognizer::PresentPan,
            Peer::Foreign {
                gesture: &handle,
                scroll: Some(&geometry),
            },
        );
    }
    assert_eq!(drawer.registry().live_count(), 0);

    drag_open(&mut drawer, 30.0);
    assert_eq!(drawer.state(), InteractionState::GestureTracking);
}

#[test]
fn drag_back_dismisses_an_open_drawer() {
    let (mut drawer, _) = drawer();
    open(&mut drawer);
    assert!(drawer.should_begin(DrawerRecognizer::DismissPan));

    drawer.handle_dismiss_pan(&GestureSnapshot::began());
    assert_eq!(drawer.state(), InteractionState::GestureTracking);

    drawer.handle_dismiss_pan(&GestureSnapshot::changed(Vec2::new(-75.0, 0.0)));
    assert_eq!(drawer.progress(), 0.75);
    assert_eq!(drawer.scene().unwrap().host_offset(), 225.0);

    // Present-pan traffic does not touch a dismissal.
    drawer.handle_present_pan(&GestureSnapshot::changed(Vec2::new(200.0, 0.0)));
    assert_eq!(drawer.progress(), 0.75);

    drawer.handle_dismiss_pan(&GestureSnapshot::ended(
        Vec2::new(-75.0, 0.0),
        Vec2::new(-300.0, 0.0),
    ));
    let done = run_to_end(&mut drawer);
    assert!(done.committed && done.interactive && !done.presented);
    assert!(!drawer.scene().unwrap().is_panel_attached());
    assert!(!drawer.should_begin(DrawerRecognizer::DismissPan));
}

#[test]
fn abandoned_drag_back_leaves_the_drawer_open() {
    let (mut drawer, _) = drawer();
    open(&mut drawer);

    drawer.handle_dismiss_pan(&GestureSnapshot::began());
    drawer.handle_dismiss_pan(&GestureSnapshot::changed(Vec2::new(-200.0, 0.0)));
    drawer.handle_dismiss_pan(&GestureSnapshot::cancelled());
    assert_eq!(drawer.state(), InteractionState::Cancelling);

    let done = run_to_end(&mut drawer);
    assert!(!done.committed && done.presented);
    let scene = drawer.scene().unwrap();
    assert_eq!(scene.progress(), 1.0);
    assert_eq!(scene.host_offset(), WIDTH);
    assert!(scene.is_dismiss_pan_attached());
}

#[test]
fn programmatic_round_trip_honours_explicit_durations() {
    let (mut drawer, built) = drawer();
    assert!(
        drawer
            .present_with_duration(Duration::from_millis(32))
            .is_started()
    );
    assert!(drawer.tick(FRAME).is_none());
    assert!(drawer.tick(FRAME).is_some());

    assert_eq!(
        drawer.present(),
        PresentOutcome::Ignored(IgnoreReason::AlreadyPresented)
    );
    assert!(drawer.dismiss_with_duration(Duration::ZERO).is_started());
    let done = drawer.tick(Duration::ZERO).unwrap();
    assert!(!done.presented);

    assert_eq!(
        drawer.dismiss(),
        PresentOutcome::Ignored(IgnoreReason::NotPresented)
    );

    // Every presentation asks for fresh content.
    open(&mut drawer);
    assert_eq!(built.get(), 2);
    assert_eq!(drawer.scene().unwrap().content(), Some(&2));
}

#[test]
fn edge_swipe_is_off_below_the_navigation_root() {
    let mut drawer = DrawerInteraction::new(DrawerConfiguration::default());
    drawer
        .attach(
            CONTAINER,
            FactoryDelegate::new(|| "menu")
                .with_host_context(HostContext::new().with_navigation_depth(3)),
        )
        .unwrap();
    assert!(!drawer.should_begin(DrawerRecognizer::EdgeSwipe));

    // Programmatic presentation is unaffected.
    open(&mut drawer);
}

#[test]
fn nothing_begins_before_attach() {
    let drawer = DrawerInteraction::<FactoryDelegate<fn() -> u8>>::default();
    assert!(!drawer.should_begin(DrawerRecognizer::PresentPan));
    assert!(!drawer.should_begin(DrawerRecognizer::EdgeSwipe));
    assert_eq!(drawer.progress(), 0.0);
}

#[test]
fn pan_tracker_feeds_the_drawer() {
    let (mut drawer, _) = drawer();
    let mut pan = PanTracker::default();

    let began = pan.start(Point::new(1.0, 400.0), Duration::ZERO);
    drawer.handle_present_pan(&began);
    drawer.handle_swipe(GesturePhase::Ended);

    let first = pan
        .update(Point::new(11.0, 400.0), Duration::from_millis(16))
        .unwrap();
    drawer.handle_present_pan(&first);
    let second = pan
        .update(Point::new(151.0, 402.0), Duration::from_millis(32))
        .unwrap();
    drawer.handle_present_pan(&second);
    assert_eq!(drawer.progress(), 0.5);

    let ended = pan
        .end(Point::new(181.0, 402.0), Duration::from_millis(48))
        .unwrap();
    assert!(ended.velocity.x > 0.0);
    drawer.handle_present_pan(&ended);
    assert!(run_to_end(&mut drawer).presented);
}

#[test]
fn detach_returns_the_delegate_and_allows_reattach() {
    let (mut drawer, built) = drawer();
    open(&mut drawer);

    let delegate = drawer.detach().unwrap();
    assert!(!drawer.is_attached());
    assert!(!drawer.is_presented());
    assert_eq!(drawer.tap_dimming(), PresentOutcome::Ignored(IgnoreReason::NotPresented));

    drawer.attach(CONTAINER, delegate).unwrap();
    assert!(!drawer.scene().unwrap().is_panel_attached());
    open(&mut drawer);
    assert_eq!(built.get(), 2);
}
