//! Overlay stack and document scroll lock.
//!
//! Modals and drawers lock document scrolling while they are open. Overlays
//! nest, so the lock is reference counted: the first overlay records the
//! document's prior scroll-lock value and applies the lock, and only closing
//! the last open overlay restores that exact prior value. Overlays may close
//! in any order.
//!
//! [`OverlayStack`] also answers which overlay is on top, so that only the
//! topmost surface reacts to Escape and traps Tab.
//!
//! # Usage
//!
//! ```
//! use signal_ui_engine::widget::{OverlayStack, ScrollHost};
//!
//! #[derive(Default)]
//! struct Body { overflow: Option<String> }
//!
//! impl ScrollHost for Body {
//!     fn scroll_lock(&self) -> Option<String> { self.overflow.clone() }
//!     fn set_scroll_lock(&mut self, value: Option<&str>) { self.overflow = value.map(Into::into); }
//! }
//!
//! let mut body = Body::default();
//! let mut overlays = OverlayStack::new();
//!
//! let outer = overlays.push(&mut body);
//! let inner = overlays.push(&mut body);
//! overlays.pop(inner, &mut body);
//! assert_eq!(body.overflow.as_deref(), Some("hidden"));
//! overlays.pop(outer, &mut body);
//! assert_eq!(body.overflow, None);
//! ```

use std::fmt;

use parking_lot::Mutex;

use super::focus::{FocusHost, FocusScope, TabOutcome};
use crate::logging::targets;

/// Value written to the document scroll-lock slot while any overlay is open.
pub const SCROLL_LOCK_VALUE: &str = "hidden";

/// Document-side scroll-lock slot (`document.body.style.overflow`).
pub trait ScrollHost {
    /// Current value; `None` when unset.
    fn scroll_lock(&self) -> Option<String>;

    /// Writes the value; `None` removes it.
    fn set_scroll_lock(&mut self, value: Option<&str>);
}

/// Handle for one open overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayToken(u64);

impl OverlayToken {
    /// Raw token id.
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OverlayToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlay#{}", self.0)
    }
}

/// Reference-counted scroll lock plus z-order of open overlays.
#[derive(Debug)]
pub struct OverlayStack {
    open: Vec<u64>,
    next_id: u64,
    /// Scroll-lock value captured by the first push.
    saved: Option<Option<String>>,
}

impl Default for OverlayStack {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_OVERLAYS: Mutex<OverlayStack> = parking_lot::const_mutex(OverlayStack::new());

/// The process-wide overlay stack shared by every surface of a document.
pub fn global_overlays() -> &'static Mutex<OverlayStack> {
    &GLOBAL_OVERLAYS
}

impl OverlayStack {
    /// Creates an empty stack.
    pub const fn new() -> Self {
        Self {
            open: Vec::new(),
            next_id: 1,
            saved: None,
        }
    }

    /// Registers an overlay as open and on top. Locks scrolling on the first
    /// push.
    pub fn push<S: ScrollHost + ?Sized>(&mut self, host: &mut S) -> OverlayToken {
        if self.open.is_empty() {
            let prior = host.scroll_lock();
            tracing::debug!(target: targets::OVERLAY, ?prior, "scroll lock applied");
            self.saved = Some(prior);
            host.set_scroll_lock(Some(SCROLL_LOCK_VALUE));
        }

        let id = self.next_id;
        self.next_id += 1;
        self.open.push(id);
        tracing::debug!(target: targets::OVERLAY, id, depth = self.open.len(), "overlay pushed");
        OverlayToken(id)
    }

    /// Closes an overlay. Restores the prior scroll lock when the last one
    /// closes.
    ///
    /// Returns false if the token was already popped.
    pub fn pop<S: ScrollHost + ?Sized>(&mut self, token: OverlayToken, host: &mut S) -> bool {
        let id = token.0;
        let Some(index) = self.open.iter().position(|&open| open == id) else {
            tracing::warn!(target: targets::OVERLAY, id, "overlay popped twice");
            return false;
        };
        self.open.remove(index);
        tracing::debug!(target: targets::OVERLAY, id, depth = self.open.len(), "overlay popped");

        if self.open.is_empty() {
            let prior = self.saved.take().flatten();
            host.set_scroll_lock(prior.as_deref());
            tracing::debug!(target: targets::OVERLAY, ?prior, "scroll lock restored");
        }
        true
    }

    /// Whether `token` is the most recently opened overlay still open.
    pub fn is_topmost(&self, token: &OverlayToken) -> bool {
        self.open.last() == Some(&token.0)
    }

    /// Whether `token` is still open.
    pub fn is_open(&self, token: &OverlayToken) -> bool {
        self.open.contains(&token.0)
    }

    /// Number of open overlays.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Whether scrolling is currently locked.
    pub fn is_locked(&self) -> bool {
        !self.open.is_empty()
    }
}

/// A focus trap tied to an overlay slot.
///
/// Activating a guard pushes an overlay (locking scroll) and traps focus;
/// deactivating it releases the focus trap and pops the overlay.
#[derive(Debug)]
pub struct FocusGuard<E> {
    scope: FocusScope<E>,
    token: Option<OverlayToken>,
}

impl<E: Clone + PartialEq + fmt::Debug> FocusGuard<E> {
    /// Creates an inactive guard for the subtree at `root`.
    pub fn new(root: E) -> Self {
        Self {
            scope: FocusScope::new(root),
            token: None,
        }
    }

    /// Whether the guard is active.
    pub fn is_active(&self) -> bool {
        self.token.is_some()
    }

    /// The focus scope.
    pub fn scope(&self) -> &FocusScope<E> {
        &self.scope
    }

    /// Whether this guard's overlay is on top of `overlays`.
    pub fn is_topmost(&self, overlays: &OverlayStack) -> bool {
        self.token
            .as_ref()
            .is_some_and(|token| overlays.is_topmost(token))
    }

    /// Locks scrolling and traps focus. No-op if already active.
    pub fn activate<H>(&mut self, host: &mut H, overlays: &mut OverlayStack)
    where
        H: FocusHost<Element = E> + ScrollHost + ?Sized,
    {
        if self.is_active() {
            return;
        }
        self.token = Some(overlays.push(host));
        self.scope.activate(host);
    }

    /// Cycles focus; only the topmost guard traps Tab.
    pub fn handle_tab<H>(&mut self, host: &mut H, overlays: &OverlayStack, shift: bool) -> TabOutcome
    where
        H: FocusHost<Element = E> + ?Sized,
    {
        if !self.is_topmost(overlays) {
            return TabOutcome::Inactive;
        }
        self.scope.handle_tab(host, shift)
    }

    /// Pulls escaped focus back into the scope.
    pub fn handle_focus_in<H>(&mut self, host: &mut H, overlays: &OverlayStack, target: &E) -> bool
    where
        H: FocusHost<Element = E> + ?Sized,
    {
        self.is_topmost(overlays) && self.scope.handle_focus_in(host, target)
    }

    /// Restores focus and releases the overlay. No-op if inactive.
    pub fn deactivate<H>(&mut self, host: &mut H, overlays: &mut OverlayStack)
    where
        H: FocusHost<Element = E> + ScrollHost + ?Sized,
    {
        let Some(token) = self.token.take() else {
            return;
        };
        self.scope.deactivate(host);
        overlays.pop(token, host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Body {
        overflow: Option<String>,
        writes: usize,
    }

    impl ScrollHost for Body {
        fn scroll_lock(&self) -> Option<String> {
            self.overflow.clone()
        }

        fn set_scroll_lock(&mut self, value: Option<&str>) {
            self.writes += 1;
            self.overflow = value.map(str::to_string);
        }
    }

    #[test]
    fn test_nested_overlays_unlock_after_last_pop() {
        let mut body = Body::default();
        let mut stack = OverlayStack::new();

        let outer = stack.push(&mut body);
        let inner = stack.push(&mut body);
        assert_eq!(body.writes, 1);

        assert!(stack.pop(inner, &mut body));
        assert_eq!(body.overflow.as_deref(), Some(SCROLL_LOCK_VALUE));

        assert!(stack.pop(outer, &mut body));
        assert_eq!(body.overflow, None);
    }

    #[test]
    fn test_prior_value_restored_exactly() {
        let mut body = Body {
            overflow: Some("scroll".into()),
            writes: 0,
        };
        let mut stack = OverlayStack::new();

        let token = stack.push(&mut body);
        assert_eq!(body.overflow.as_deref(), Some("hidden"));
        stack.pop(token, &mut body);
        assert_eq!(body.overflow.as_deref(), Some("scroll"));
    }

    #[test]
    fn test_out_of_order_pops() {
        let mut body = Body::default();
        let mut stack = OverlayStack::new();

        let first = stack.push(&mut body);
        let second = stack.push(&mut body);
        assert!(stack.is_topmost(&second));

        assert!(stack.pop(first, &mut body));
        assert!(stack.is_topmost(&second));
        assert!(stack.is_locked());

        assert!(stack.pop(second, &mut body));
        assert!(!stack.is_locked());
    }

    #[test]
    fn test_double_pop_is_noop() {
        let mut body = Body::default();
        let mut stack = OverlayStack::new();

        let token = stack.push(&mut body);
        assert!(stack.pop(token, &mut body));
        assert!(!stack.pop(token, &mut body));
        assert_eq!(body.writes, 2);
        assert!(!stack.is_open(&token));
    }

    #[test]
    fn test_global_overlays_is_shared() {
        let a = global_overlays() as *const _;
        let b = global_overlays() as *const _;
        assert_eq!(a, b);
    }
}
