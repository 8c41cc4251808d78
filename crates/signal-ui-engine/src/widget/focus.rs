//! Focus scopes and focus trapping.
//!
//! A [`FocusScope`] confines keyboard focus to a subtree (a modal dialog or a
//! drawer) while it is active:
//!
//! - **Activation** remembers the element that had focus and moves focus to
//!   the first focusable element of the scope, or to the scope root when the
//!   scope has none.
//! - **Tab / Shift+Tab** cycle through the scope's focusable elements in
//!   document order, wrapping at both ends.
//! - **Focus entering from outside** is pulled back to the first element.
//! - **Deactivation** returns focus to the remembered element if it is still
//!   attached to the document.
//!
//! The engine never touches the DOM itself. Everything it needs goes through
//! the [`FocusHost`] trait, which a rendering adapter implements over its
//! document handle. Adapters that see element attributes rather than a
//! ready-made tab order can build [`FocusHost::focusables_within`] by
//! filtering a subtree with [`is_focusable`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::logging::targets;

/// Document-side focus operations.
pub trait FocusHost {
    /// Handle to an element, e.g. a node reference or a stable id.
    type Element: Clone + PartialEq + fmt::Debug;

    /// The element that currently has focus, if any.
    fn active_element(&self) -> Option<Self::Element>;

    /// Focusable, non-disabled elements inside `root`, in document order.
    fn focusables_within(&self, root: &Self::Element) -> Vec<Self::Element>;

    /// Moves focus to `element`.
    fn focus(&mut self, element: &Self::Element);

    /// Whether `element` is still part of the document.
    fn is_attached(&self, element: &Self::Element) -> bool;

    /// Whether `element` is `root` or one of its descendants.
    fn contains(&self, root: &Self::Element, element: &Self::Element) -> bool;
}

/// The attributes that decide whether an element can take focus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementTraits {
    /// Lowercase tag name.
    pub tag: String,
    /// Whether the element has an `href` attribute.
    #[serde(default)]
    pub has_href: bool,
    /// Parsed `tabindex` attribute.
    #[serde(default)]
    pub tab_index: Option<i32>,
    /// Whether the element is disabled.
    #[serde(default)]
    pub disabled: bool,
}

impl ElementTraits {
    /// Traits for a plain element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }
}

/// Classifies an element against the interactive-element set used by focus
/// traps: `button`, `[href]`, `input`, `select`, `textarea` and
/// `[tabindex]` other than `-1`, excluding disabled elements.
pub fn is_focusable(element: &ElementTraits) -> bool {
    if element.disabled {
        return false;
    }
    let interactive_tag = matches!(
        element.tag.to_ascii_lowercase().as_str(),
        "button" | "input" | "select" | "textarea"
    );
    interactive_tag || element.has_href || matches!(element.tab_index, Some(index) if index != -1)
}

/// What a Tab key press did inside a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabOutcome {
    /// Focus moved to the neighbouring element.
    Moved,
    /// Focus wrapped from one end of the scope to the other.
    Wrapped,
    /// The scope has nothing focusable; focus stays on the root.
    Contained,
    /// The scope is not active; the key was not handled.
    Inactive,
}

impl TabOutcome {
    /// Whether the adapter should suppress the browser's default Tab handling.
    pub fn is_handled(self) -> bool {
        !matches!(self, Self::Inactive)
    }
}

/// A focus trap over one subtree.
#[derive(Debug, Clone)]
pub struct FocusScope<E> {
    root: E,
    restore_to: Option<E>,
    active: bool,
}

impl<E: Clone + PartialEq + fmt::Debug> FocusScope<E> {
    /// Creates an inactive scope rooted at `root`.
    pub fn new(root: E) -> Self {
        Self {
            root,
            restore_to: None,
            active: false,
        }
    }

    /// The scope root.
    pub fn root(&self) -> &E {
        &self.root
    }

    /// The element focus returns to on deactivation.
    pub fn restore_target(&self) -> Option<&E> {
        self.restore_to.as_ref()
    }

    /// Whether the trap is active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Activates the trap.
    pub fn activate<H>(&mut self, host: &mut H)
    where
        H: FocusHost<Element = E> + ?Sized,
    {
        if self.active {
            return;
        }
        self.restore_to = host.active_element();
        self.active = true;

        let target = host
            .focusables_within(&self.root)
            .into_iter()
            .next()
            .unwrap_or_else(|| self.root.clone());
        host.focus(&target);
        tracing::debug!(target: targets::FOCUS, root = ?self.root, focused = ?target, "focus scope activated");
    }

    /// Handles Tab (`shift == false`) or Shift+Tab inside the scope.
    pub fn handle_tab<H>(&mut self, host: &mut H, shift: bool) -> TabOutcome
    where
        H: FocusHost<Element = E> + ?Sized,
    {
        if !self.active {
            return TabOutcome::Inactive;
        }

        let focusables = host.focusables_within(&self.root);
        let (Some(first), Some(last)) = (focusables.first(), focusables.last()) else {
            host.focus(&self.root);
            return TabOutcome::Contained;
        };

        let current = host
            .active_element()
            .and_then(|active| focusables.iter().position(|el| *el == active));

        let (target, outcome) = match (current, shift) {
            // Focus is on the root or escaped: enter at the matching end.
            (None, false) => (first, TabOutcome::Moved),
            (None, true) => (last, TabOutcome::Moved),
            (Some(index), false) if index + 1 == focusables.len() => (first, TabOutcome::Wrapped),
            (Some(0), true) => (last, TabOutcome::Wrapped),
            (Some(index), false) => (&focusables[index + 1], TabOutcome::Moved),
            (Some(index), true) => (&focusables[index - 1], TabOutcome::Moved),
        };

        let target = target.clone();
        host.focus(&target);
        tracing::trace!(target: targets::FOCUS, focused = ?target, ?outcome, "tab in scope");
        outcome
    }

    /// Pulls focus back into the scope when `target` lies outside it.
    ///
    /// Returns true if focus was moved.
    pub fn handle_focus_in<H>(&mut self, host: &mut H, target: &E) -> bool
    where
        H: FocusHost<Element = E> + ?Sized,
    {
        if !self.active || host.contains(&self.root, target) {
            return false;
        }
        let first = host
            .focusables_within(&self.root)
            .into_iter()
            .next()
            .unwrap_or_else(|| self.root.clone());
        host.focus(&first);
        tracing::debug!(target: targets::FOCUS, escaped = ?target, "focus pulled back into scope");
        true
    }

    /// Deactivates the trap and restores the remembered focus.
    pub fn deactivate<H>(&mut self, host: &mut H)
    where
        H: FocusHost<Element = E> + ?Sized,
    {
        if !self.active {
            return;
        }
        self.active = false;

        match self.restore_to.take() {
            Some(element) if host.is_attached(&element) => {
                host.focus(&element);
                tracing::debug!(target: targets::FOCUS, restored = ?element, "focus scope deactivated");
            }
            Some(element) => {
                tracing::debug!(target: targets::FOCUS, detached = ?element, "restore target detached, skipping");
            }
            None => {}
        }
    }
}
