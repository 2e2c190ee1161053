// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Non-owning registry of peer recognizers to cancel once the drawer commits to a drag.
//!
//! Peer recognizers belong to the host's view tree. The registry only holds
//! [`Weak`] handles: entries whose recognizer has been dropped are skipped and
//! eventually pruned, never reported as errors.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::{Rc, Weak};
//!
//! use understory_drawer::registry::{CancellableGesture, CancellableGestureRegistry};
//!
//! #[derive(Default)]
//! struct ListScroll {
//!     cancelled: Cell<bool>,
//! }
//!
//! impl CancellableGesture for ListScroll {
//!     fn cancel(&self) {
//!         self.cancelled.set(true);
//!     }
//! }
//!
//! let scroll = Rc::new(ListScroll::default());
//! let handle = Rc::downgrade(&scroll) as Weak<dyn CancellableGesture>;
//!
//! let mut registry = CancellableGestureRegistry::new();
//! assert!(registry.register(handle.clone()));
//! assert!(!registry.register(handle));
//!
//! assert_eq!(registry.cancel_all(), 1);
//! assert!(scroll.cancelled.get());
//! ```

use alloc::rc::Weak;
use core::fmt;

use smallvec::SmallVec;

/// A recognizer that the drawer may force into its cancelled state.
///
/// Cancellation is a one-way signal; implementors use interior mutability
/// since the registry only ever holds shared, non-owning handles.
pub trait CancellableGesture {
    /// Moves the recognizer to its cancelled state.
    fn cancel(&self);
}

/// Weak handles to peer recognizers observed during arbitration.
#[derive(Default)]
pub struct CancellableGestureRegistry {
    entries: SmallVec<[Weak<dyn CancellableGesture>; 4]>,
}

impl fmt::Debug for CancellableGestureRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancellableGestureRegistry")
            .field("len", &self.entries.len())
            .field("live", &self.live_count())
            .finish()
    }
}

impl CancellableGestureRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a peer recognizer.
    ///
    /// Returns `false` if the same recognizer is already registered or has
    /// already been dropped. Dead entries are pruned on every registration.
    pub fn register(&mut self, gesture: Weak<dyn CancellableGesture>) -> bool {
        self.prune();
        if gesture.strong_count() == 0 || self.entries.iter().any(|e| Weak::ptr_eq(e, &gesture)) {
            return false;
        }
        self.entries.push(gesture);
        true
    }

    /// Cancels every recognizer that is still alive and returns how many were cancelled.
    ///
    /// Entries stay registered; call [`clear`](Self::clear) once the gesture ends.
    pub fn cancel_all(&self) -> usize {
        let mut cancelled = 0;
        for entry in &self.entries {
            if let Some(gesture) = entry.upgrade() {
                gesture.cancel();
                cancelled += 1;
            }
        }
        cancelled
    }

    /// Drops entries whose recognizer no longer exists.
    pub fn prune(&mut self) {
        self.entries.retain(|e| e.strong_count() > 0);
    }

    /// Forgets every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries, dead or alive.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries whose recognizer is still alive.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.entries.iter().filter(|e| e.strong_count() > 0).count()
    }
}
