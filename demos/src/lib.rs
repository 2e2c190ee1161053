// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the drawer demos.

use std::time::Duration;

use log::info;
use understory_drawer::scene::DrawerScene;
use understory_drawer::{DrawerDelegate, DrawerInteraction, TransitionCompletion};

/// One 60 Hz frame.
pub const FRAME: Duration = Duration::from_millis(16);

/// Logs at `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Logs the layers a host would paint for `scene`.
pub fn log_scene<C>(label: &str, scene: &DrawerScene<C>) {
    let panel = scene
        .panel_frame()
        .map_or_else(|| "-".to_owned(), |frame| format!("{frame:?}"));
    let dimming = scene
        .dimming()
        .map_or_else(|| "-".to_owned(), |d| format!("{:.2}", d.fill_alpha()));
    info!(
        "{label:<18} progress {:.2}  host +{:>6.1}  dimming {dimming:>4}  panel {panel}",
        scene.progress(),
        scene.host_offset(),
    );
}

/// Ticks `drawer` frame by frame, logging every frame, until the run ends.
pub fn run_frames<D: DrawerDelegate>(
    label: &str,
    drawer: &mut DrawerInteraction<D>,
) -> Option<TransitionCompletion> {
    // Far more frames than any configured duration needs.
    for _ in 0..600 {
        let done = drawer.tick(FRAME);
        if let Some(scene) = drawer.scene() {
            log_scene(label, scene);
        }
        if done.is_some() {
            return done;
        }
    }
    None
}
