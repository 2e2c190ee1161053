// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawer interaction: state machine, entry points, and frame driving.
//!
//! ## States
//!
//! ```text
//! Idle ──(pan Changed, swipe Ended)──▶ GestureTracking ──(pan Ended/Cancelled)──▶ Committing | Cancelling ──(settled)──▶ Idle
//! Idle ──(present / dismiss / dimming tap)──▶ Presenting | Dismissing ──(settled)──▶ Idle
//! ```
//!
//! At most one run is in flight. Every entry point that would start a second
//! one while another is active is ignored with [`IgnoreReason::Busy`].
//!
//! ## Driving
//!
//! The host forwards recognizer callbacks to
//! [`handle_swipe`](DrawerInteraction::handle_swipe),
//! [`handle_present_pan`](DrawerInteraction::handle_present_pan) and
//! [`handle_dismiss_pan`](DrawerInteraction::handle_dismiss_pan), consults
//! [`should_begin`](DrawerInteraction::should_begin) and
//! [`should_recognize_simultaneously`](DrawerInteraction::should_recognize_simultaneously)
//! from its arbitration hooks, and calls [`tick`](DrawerInteraction::tick) once
//! per frame. After every call it renders [`scene`](DrawerInteraction::scene).

use core::fmt;
use core::time::Duration;

use kurbo::Rect;
use log::{debug, trace};
use understory_transition::{InteractiveProgressController, Tween};

use crate::animator::{TransitionAnimator, TransitionPhase};
use crate::arbiter::{DrawerRecognizer, GestureArbiter, Peer};
use crate::config::{DrawerConfiguration, resolve_width};
use crate::delegate::{DrawerDelegate, HostContext};
use crate::gesture::{GesturePhase, GestureSnapshot};
use crate::registry::CancellableGestureRegistry;
use crate::scene::DrawerScene;

/// Where the interaction state machine is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum InteractionState {
    /// Nothing in flight.
    #[default]
    Idle,
    /// A drag is scrubbing an interactive run.
    GestureTracking,
    /// An interactive run was released toward completion and is settling.
    Committing,
    /// An interactive run was released toward its start and is settling.
    Cancelling,
    /// A programmatic presentation is animating.
    Presenting,
    /// A programmatic dismissal is animating.
    Dismissing,
}

/// Why a presentation or dismissal request did nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// The delegate returned no content.
    NoContent,
    /// Another run is in flight.
    Busy,
    /// The drawer is already open.
    AlreadyPresented,
    /// The drawer is not open.
    NotPresented,
}

/// Result of a presentation or dismissal request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PresentOutcome {
    /// A run started.
    Started,
    /// Nothing happened.
    Ignored(IgnoreReason),
}

impl PresentOutcome {
    /// Returns `true` if a run started.
    #[must_use]
    pub fn is_started(self) -> bool {
        self == Self::Started
    }
}

/// Error returned by [`DrawerInteraction::attach`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttachError {
    /// The interaction is already attached to a host.
    AlreadyAttached,
}

impl fmt::Display for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyAttached => {
                f.write_str("drawer interaction is already attached to a host")
            }
        }
    }
}

impl core::error::Error for AttachError {}

/// Reported by [`DrawerInteraction::tick`] when a run reaches its end.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransitionCompletion {
    /// Direction of the run.
    pub phase: TransitionPhase,
    /// `true` if the run reached its target, `false` if it rolled back.
    pub committed: bool,
    /// Whether a drag scrubbed the run.
    pub interactive: bool,
    /// Whether the drawer is open now.
    pub presented: bool,
}

struct Attachment<D: DrawerDelegate> {
    delegate: D,
    scene: DrawerScene<D::Content>,
}

/// The transition in flight.
#[derive(Debug)]
struct Run {
    animator: TransitionAnimator,
    /// The pan that scrubs this run; `None` for programmatic runs.
    source: Option<DrawerRecognizer>,
    progress: Option<InteractiveProgressController>,
    settle: Option<Tween>,
    committing: bool,
}

/// Drives one drawer attached to one host.
///
/// ```
/// use core::time::Duration;
/// use kurbo::Rect;
/// use understory_drawer::{DrawerConfiguration, DrawerInteraction, FactoryDelegate};
///
/// let mut drawer = DrawerInteraction::new(DrawerConfiguration::new(280.0));
/// drawer
///     .attach(Rect::new(0.0, 0.0, 390.0, 844.0), FactoryDelegate::new(|| "side menu"))
///     .unwrap();
///
/// assert!(drawer.present().is_started());
/// let done = loop {
///     if let Some(done) = drawer.tick(Duration::from_millis(16)) {
///         break done;
///     }
/// };
/// assert!(done.committed && done.presented);
///
/// let scene = drawer.scene().unwrap();
/// assert_eq!(scene.content(), Some(&"side menu"));
/// assert_eq!(scene.host_offset(), 280.0);
/// ```
pub struct DrawerInteraction<D: DrawerDelegate> {
    config: DrawerConfiguration,
    arbiter: GestureArbiter,
    registry: CancellableGestureRegistry,
    attachment: Option<Attachment<D>>,
    state: InteractionState,
    run: Option<Run>,
    swipe: Option<GesturePhase>,
    presented: bool,
}

impl<D: DrawerDelegate> fmt::Debug for DrawerInteraction<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawerInteraction")
            .field("config", &self.config)
            .field("arbiter", &self.arbiter)
            .field("registry", &self.registry)
            .field("attached", &self.attachment.is_some())
            .field("state", &self.state)
            .field("run", &self.run)
            .field("swipe", &self.swipe)
            .field("presented", &self.presented)
            .finish()
    }
}

impl<D: DrawerDelegate> Default for DrawerInteraction<D> {
    fn default() -> Self {
        Self::new(DrawerConfiguration::default())
    }
}

impl<D: DrawerDelegate> DrawerInteraction<D> {
    /// Creates a detached interaction.
    #[must_use]
    pub fn new(config: DrawerConfiguration) -> Self {
        Self {
            config,
            arbiter: GestureArbiter::new(),
            registry: CancellableGestureRegistry::new(),
            attachment: None,
            state: InteractionState::Idle,
            run: None,
            swipe: None,
            presented: false,
        }
    }

    /// Replaces the arbitration policy.
    #[must_use]
    pub fn with_arbiter(mut self, arbiter: GestureArbiter) -> Self {
        self.arbiter = arbiter;
        self
    }

    /// Current configuration.
    #[must_use]
    pub fn configuration(&self) -> &DrawerConfiguration {
        &self.config
    }

    /// Replaces the configuration. Runs already in flight keep their settings.
    pub fn set_configuration(&mut self, config: DrawerConfiguration) {
        self.config = config;
    }

    /// Attaches to a host whose container spans `container`.
    ///
    /// `delegate` is the drawer's content factory and host description. An
    /// attachment point accepts exactly one attach.
    pub fn attach(&mut self, container: Rect, delegate: D) -> Result<(), AttachError> {
        if self.attachment.is_some() {
            return Err(AttachError::AlreadyAttached);
        }
        self.attachment = Some(Attachment {
            delegate,
            scene: DrawerScene::new(container),
        });
        debug!("drawer attached to container {container:?}");
        Ok(())
    }

    /// Tears the attachment down and hands back the delegate.
    ///
    /// Any run in flight is dropped and every drawer layer leaves the hierarchy
    /// with the scene.
    pub fn detach(&mut self) -> Option<D> {
        let attachment = self.attachment.take()?;
        if let Some(run) = self.run.take() {
            debug!("detached during {:?} run", run.animator.phase());
        }
        self.registry.clear();
        self.state = InteractionState::Idle;
        self.swipe = None;
        self.presented = false;
        Some(attachment.delegate)
    }

    /// Returns `true` between [`attach`](Self::attach) and [`detach`](Self::detach).
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// The attached delegate.
    #[must_use]
    pub fn delegate(&self) -> Option<&D> {
        self.attachment.as_ref().map(|a| &a.delegate)
    }

    /// The attached delegate, mutably.
    pub fn delegate_mut(&mut self) -> Option<&mut D> {
        self.attachment.as_mut().map(|a| &mut a.delegate)
    }

    /// The scene to render, while attached.
    #[must_use]
    pub fn scene(&self) -> Option<&DrawerScene<D::Content>> {
        self.attachment.as_ref().map(|a| &a.scene)
    }

    /// Updates the container bounds after a host resize.
    pub fn set_container(&mut self, container: Rect) {
        if let Some(attachment) = self.attachment.as_mut() {
            attachment.scene.set_container(container);
        }
    }

    /// Current state-machine state.
    #[must_use]
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Returns `true` while the drawer rests open or is leaving the open state.
    #[must_use]
    pub fn is_presented(&self) -> bool {
        self.presented
    }

    /// How open the drawer is, `0` when detached.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.scene().map_or(0.0, DrawerScene::progress)
    }

    /// The progress controller of the interactive run in flight, if any.
    #[must_use]
    pub fn interactive_progress(&self) -> Option<&InteractiveProgressController> {
        self.run.as_ref().and_then(|run| run.progress.as_ref())
    }

    /// Peer recognizers observed during arbitration.
    #[must_use]
    pub fn registry(&self) -> &CancellableGestureRegistry {
        &self.registry
    }

    /// Arbitration hook: may `recognizer` begin?
    #[must_use]
    pub fn should_begin(&self, recognizer: DrawerRecognizer) -> bool {
        let Some(attachment) = self.attachment.as_ref() else {
            return false;
        };
        if recognizer == DrawerRecognizer::DismissPan
            && !attachment.scene.is_dismiss_pan_attached()
        {
            return false;
        }
        self.arbiter
            .should_begin(recognizer, &attachment.delegate.host_context())
    }

    /// Arbitration hook: may `own` recognize together with `peer`?
    pub fn should_recognize_simultaneously(
        &mut self,
        own: DrawerRecognizer,
        peer: Peer<'_>,
    ) -> bool {
        self.arbiter
            .recognize_simultaneously(own, peer, &mut self.registry)
    }

    /// Records the edge-swipe recognizer's latest phase.
    pub fn handle_swipe(&mut self, phase: GesturePhase) {
        trace!("edge swipe {phase:?}");
        self.swipe = Some(phase);
    }

    /// Handles a callback from the present pan on the host.
    ///
    /// The interactive run starts on the first `Changed` after the edge swipe
    /// has ended within the same touch sequence, not on `Began`. Starting it cancels every registered peer.
    pub fn handle_present_pan(&mut self, gesture: &GestureSnapshot) {
        if self.attachment.is_none() {
            return;
        }
        match gesture.phase {
            GesturePhase::Began => {
                // A new touch sequence; the swipe must end again within it.
                self.swipe = None;
            }
            GesturePhase::Changed => {
                if self.state != InteractionState::Idle {
                    self.scrub(DrawerRecognizer::PresentPan, gesture.translation.x);
                    return;
                }
                if self.swipe != Some(GesturePhase::Ended) {
                    trace!("present pan moved before the edge swipe ended");
                    return;
                }
                let outcome = self.begin(
                    TransitionPhase::Presenting,
                    Some(DrawerRecognizer::PresentPan),
                    None,
                );
                if outcome.is_started() {
                    let cancelled = self.registry.cancel_all();
                    debug!(
                        "interactive presentation took over; cancelled {cancelled} peer gestures"
                    );
                }
            }
            GesturePhase::Ended => {
                self.release(DrawerRecognizer::PresentPan, Some(gesture.velocity.x));
                self.end_touch_sequence();
            }
            GesturePhase::Cancelled => {
                self.release(DrawerRecognizer::PresentPan, None);
                self.end_touch_sequence();
            }
        }
    }

    /// Handles a callback from the dismiss pan on the presented container.
    ///
    /// Unlike presentation, the interactive run starts on `Began`.
    pub fn handle_dismiss_pan(&mut self, gesture: &GestureSnapshot) {
        let Some(attachment) = self.attachment.as_ref() else {
            return;
        };
        match gesture.phase {
            GesturePhase::Began => {
                if self.state == InteractionState::Idle
                    && attachment.scene.is_dismiss_pan_attached()
                {
                    self.begin(
                        TransitionPhase::Dismissing,
                        Some(DrawerRecognizer::DismissPan),
                        None,
                    );
                }
            }
            GesturePhase::Changed => {
                self.scrub(DrawerRecognizer::DismissPan, gesture.translation.x);
            }
            GesturePhase::Ended => {
                self.release(DrawerRecognizer::DismissPan, Some(gesture.velocity.x));
            }
            GesturePhase::Cancelled => {
                self.release(DrawerRecognizer::DismissPan, None);
            }
        }
    }

    /// Presents the drawer with the configured duration.
    ///
    /// # Panics
    ///
    /// Panics if called before [`attach`](Self::attach): presenting without a
    /// content factory is a wiring bug.
    pub fn present(&mut self) -> PresentOutcome {
        self.request(TransitionPhase::Presenting, None)
    }

    /// Presents the drawer over `duration`.
    ///
    /// # Panics
    ///
    /// Panics if called before [`attach`](Self::attach).
    pub fn present_with_duration(&mut self, duration: Duration) -> PresentOutcome {
        self.request(TransitionPhase::Presenting, Some(duration))
    }

    /// Dismisses the drawer with the configured duration.
    pub fn dismiss(&mut self) -> PresentOutcome {
        self.request(TransitionPhase::Dismissing, None)
    }

    /// Dismisses the drawer over `duration`.
    pub fn dismiss_with_duration(&mut self, duration: Duration) -> PresentOutcome {
        self.request(TransitionPhase::Dismissing, Some(duration))
    }

    /// Handles a tap on the dimming overlay: a discrete, non-interactive dismissal.
    pub fn tap_dimming(&mut self) -> PresentOutcome {
        let has_dimming = self
            .scene()
            .is_some_and(|scene| scene.dimming().is_some());
        if !self.presented || !has_dimming {
            return PresentOutcome::Ignored(IgnoreReason::NotPresented);
        }
        self.dismiss()
    }

    /// Advances the settling run by `elapsed` and renders the frame.
    ///
    /// Returns the completion exactly once, on the frame the run ends. While a
    /// drag is still tracking there is nothing to advance.
    pub fn tick(&mut self, elapsed: Duration) -> Option<TransitionCompletion> {
        let run = self.run.as_mut()?;
        let settle = run.settle.as_mut()?;
        let attachment = self.attachment.as_mut()?;

        let fraction = settle.advance(elapsed);
        run.animator.render(&mut attachment.scene, fraction);
        if !settle.is_finished() {
            return None;
        }

        let animator = run.animator;
        let committed = run.committing;
        let presented = animator.complete(&mut attachment.scene, committed);
        self.run = None;
        self.state = InteractionState::Idle;
        self.presented = presented;
        debug!(
            "{:?} run {} (presented: {presented})",
            animator.phase(),
            if committed { "committed" } else { "rolled back" },
        );
        Some(TransitionCompletion {
            phase: animator.phase(),
            committed,
            interactive: animator.is_interactive(),
            presented,
        })
    }

    fn request(&mut self, phase: TransitionPhase, duration: Option<Duration>) -> PresentOutcome {
        if phase == TransitionPhase::Dismissing && self.attachment.is_none() {
            return PresentOutcome::Ignored(IgnoreReason::NotPresented);
        }
        let outcome = self.begin(phase, None, duration);
        if let PresentOutcome::Ignored(reason) = outcome {
            debug!("{phase:?} request ignored: {reason:?}");
        }
        outcome
    }

    /// Starts a run. `source` makes it interactive.
    fn begin(
        &mut self,
        phase: TransitionPhase,
        source: Option<DrawerRecognizer>,
        duration: Option<Duration>,
    ) -> PresentOutcome {
        let Some(attachment) = self.attachment.as_mut() else {
            panic!("present() called before attach(): no drawer content factory is registered");
        };
        if self.state != InteractionState::Idle {
            return PresentOutcome::Ignored(IgnoreReason::Busy);
        }

        let interactive = source.is_some();
        let animator = match phase {
            TransitionPhase::Presenting => {
                if self.presented {
                    return PresentOutcome::Ignored(IgnoreReason::AlreadyPresented);
                }
                let host: HostContext = attachment.delegate.host_context();
                let Some(content) = attachment.delegate.content_to_present(&host) else {
                    return PresentOutcome::Ignored(IgnoreReason::NoContent);
                };
                let width = resolve_width(
                    attachment.delegate.width_for_drawer(&content),
                    self.config.width(),
                );
                let animator = TransitionAnimator::new(phase, width, interactive);
                animator.start(&mut attachment.scene, Some(content));
                animator
            }
            TransitionPhase::Dismissing => {
                if !self.presented {
                    return PresentOutcome::Ignored(IgnoreReason::NotPresented);
                }
                let width = attachment
                    .scene
                    .panel()
                    .map_or(self.config.width(), |panel| panel.width);
                let animator = TransitionAnimator::new(phase, width, interactive);
                animator.start(&mut attachment.scene, None);
                animator
            }
        };

        let duration = duration.unwrap_or(self.config.duration());
        let curves = self.config.curves();
        let run = if interactive {
            self.state = InteractionState::GestureTracking;
            Run {
                animator,
                source,
                progress: Some(InteractiveProgressController::new(duration, curves)),
                settle: None,
                committing: false,
            }
        } else {
            self.state = match phase {
                TransitionPhase::Presenting => InteractionState::Presenting,
                TransitionPhase::Dismissing => InteractionState::Dismissing,
            };
            Run {
                animator,
                source,
                progress: None,
                settle: Some(Tween::new(0.0, 1.0, duration, curves.commit)),
                committing: true,
            }
        };
        debug!(
            "{phase:?} started: width {}, {duration:?}, interactive: {interactive}",
            animator.width()
        );
        self.run = Some(run);
        PresentOutcome::Started
    }

    /// Forwards a drag translation to the interactive run scrubbed by `source`.
    fn scrub(&mut self, source: DrawerRecognizer, dx: f64) {
        if self.state != InteractionState::GestureTracking {
            return;
        }
        let (Some(run), Some(attachment)) = (self.run.as_mut(), self.attachment.as_mut()) else {
            return;
        };
        if run.source != Some(source) {
            return;
        }
        let Some(progress) = run.progress.as_mut() else {
            return;
        };
        let phase = run.animator.phase();
        if progress.update(phase.fraction_for_translation(dx, run.animator.width())) {
            run.animator.render(&mut attachment.scene, progress.fraction());
            trace!("{phase:?} scrubbed to {:.3}", progress.fraction());
        }
    }

    /// Ends the interactive run scrubbed by `source`.
    ///
    /// `velocity` is the release velocity; `None` means the gesture was cancelled.
    fn release(&mut self, source: DrawerRecognizer, velocity: Option<f64>) {
        if self.state != InteractionState::GestureTracking {
            return;
        }
        let Some(run) = self.run.as_mut() else {
            return;
        };
        if run.source != Some(source) {
            return;
        }
        let phase = run.animator.phase();
        let commit = velocity.is_some_and(|vx| phase.commits_with_velocity(vx));
        let Some(progress) = run.progress.as_mut() else {
            return;
        };
        let settle = if commit {
            progress.finish()
        } else {
            progress.cancel()
        };
        debug!(
            "{phase:?} released at {:.3} with velocity {velocity:?}: {}",
            progress.fraction(),
            if commit { "committing" } else { "cancelling" },
        );
        run.settle = settle;
        run.committing = commit;
        self.state = if commit {
            InteractionState::Committing
        } else {
            InteractionState::Cancelling
        };
    }

    /// The touch sequence that fed the present pan is over.
    fn end_touch_sequence(&mut self) {
        self.registry.clear();
        self.swipe = None;
    }
}
