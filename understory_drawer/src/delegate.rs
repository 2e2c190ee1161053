// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability interface a host screen provides to its drawer.

use core::fmt;

/// What the drawer needs to know about the screen it is attached to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct HostContext {
    navigation_depth: usize,
}

impl HostContext {
    /// A host that is not inside any navigation stack.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            navigation_depth: 0,
        }
    }

    /// Sets the number of entries in the navigation stack that governs the host.
    ///
    /// Hosts resolve this themselves: the host's own stack, the stack the host
    /// is pushed onto, or the stack of a tab container's selected tab.
    #[must_use]
    pub const fn with_navigation_depth(mut self, depth: usize) -> Self {
        self.navigation_depth = depth;
        self
    }

    /// Number of entries in the governing navigation stack.
    #[must_use]
    pub const fn navigation_depth(&self) -> usize {
        self.navigation_depth
    }

    /// Returns `true` when the host is below the root of a navigation stack.
    ///
    /// An edge swipe in that state belongs to back navigation.
    #[must_use]
    pub const fn is_navigating(&self) -> bool {
        self.navigation_depth > 1
    }
}

/// Callbacks the drawer calls into while presenting.
///
/// Implemented by whichever screen owns the drawer and handed to
/// [`DrawerInteraction::attach`](crate::DrawerInteraction::attach).
pub trait DrawerDelegate {
    /// The drawer's content, whatever the host renders inside the panel.
    type Content;

    /// Width of the drawer panel for `content`.
    ///
    /// `None`, or a width that is not finite and positive, falls back to the
    /// configured width.
    fn width_for_drawer(&self, content: &Self::Content) -> Option<f64> {
        let _ = content;
        None
    }

    /// Produces the content to present from `host`.
    ///
    /// Returning `None` silently aborts the presentation.
    fn content_to_present(&mut self, host: &HostContext) -> Option<Self::Content>;

    /// Describes the host the drawer is attached to.
    fn host_context(&self) -> HostContext {
        HostContext::new()
    }
}

/// A [`DrawerDelegate`] built from a content factory closure.
///
/// ```
/// use understory_drawer::{DrawerDelegate, FactoryDelegate, HostContext};
///
/// let mut delegate = FactoryDelegate::new(|| "menu").with_width(280.0);
/// let host = delegate.host_context();
/// let content = delegate.content_to_present(&host).unwrap();
/// assert_eq!(content, "menu");
/// assert_eq!(delegate.width_for_drawer(&content), Some(280.0));
/// ```
pub struct FactoryDelegate<F> {
    factory: F,
    width: Option<f64>,
    host: HostContext,
}

impl<F> fmt::Debug for FactoryDelegate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryDelegate")
            .field("width", &self.width)
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

impl<F> FactoryDelegate<F> {
    /// Wraps `factory`; width and host context use their defaults.
    #[must_use]
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            width: None,
            host: HostContext::new(),
        }
    }

    /// Sets the drawer width reported for every piece of content.
    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the host context reported to the drawer.
    #[must_use]
    pub fn with_host_context(mut self, host: HostContext) -> Self {
        self.host = host;
        self
    }

    /// Replaces the host context, for example after a navigation push.
    pub fn set_host_context(&mut self, host: HostContext) {
        self.host = host;
    }
}

impl<C, F> DrawerDelegate for FactoryDelegate<F>
where
    F: FnMut() -> C,
{
    type Content = C;

    fn width_for_drawer(&self, _content: &C) -> Option<f64> {
        self.width
    }

    fn content_to_present(&mut self, _host: &HostContext) -> Option<C> {
        Some((self.factory)())
    }

    fn host_context(&self) -> HostContext {
        self.host
    }
}
