//! Modal dialog controller.
//!
//! [`Modal`] combines the pieces an overlay dialog needs:
//!
//! - a [`FocusGuard`] that traps focus and holds a slot in the
//!   [`OverlayStack`] (which locks document scroll)
//! - a [`GestureEngine`] for the draggable header and the resize handle
//! - the close policy (Escape, backdrop click, close button)
//!
//! Only the topmost open modal reacts to Escape and Tab, so nested dialogs
//! close one at a time.
//!
//! # Example
//!
//! ```
//! use signal_ui_engine::prelude::*;
//!
//! /// A dialog with two buttons and a trigger outside it.
//! struct Document {
//!     active: Option<&'static str>,
//!     overflow: Option<String>,
//! }
//!
//! impl FocusHost for Document {
//!     type Element = &'static str;
//!
//!     fn active_element(&self) -> Option<&'static str> { self.active }
//!     fn focusables_within(&self, root: &&'static str) -> Vec<&'static str> {
//!         if *root == "dialog" { vec!["cancel", "ok"] } else { Vec::new() }
//!     }
//!     fn focus(&mut self, element: &&'static str) { self.active = Some(*element); }
//!     fn is_attached(&self, _element: &&'static str) -> bool { true }
//!     fn contains(&self, root: &&'static str, element: &&'static str) -> bool {
//!         root == element || self.focusables_within(root).contains(element)
//!     }
//! }
//!
//! impl ScrollHost for Document {
//!     fn scroll_lock(&self) -> Option<String> { self.overflow.clone() }
//!     fn set_scroll_lock(&mut self, value: Option<&str>) { self.overflow = value.map(Into::into); }
//! }
//!
//! let mut document = Document { active: Some("trigger"), overflow: None };
//! let mut overlays = OverlayStack::new();
//! let mut modal = Modal::new(ModalConfig::default(), "dialog");
//!
//! modal.open(&mut document, &mut overlays);
//! assert_eq!(document.active, Some("cancel"));
//! assert_eq!(document.overflow.as_deref(), Some("hidden"));
//!
//! let update = modal.handle_key(&KeyEvent::new("Escape"), &mut document, &mut overlays);
//! assert_eq!(update.events, vec![EngineEvent::Close, EngineEvent::OpenChange { open: false }]);
//! assert_eq!(document.active, Some("trigger"));
//! assert_eq!(document.overflow, None);
//! ```

use std::fmt;

use super::focus::FocusHost;
use super::gesture::{GestureEngine, SurfaceConfig, SurfaceGeometry};
use super::input::{keys, KeyEvent, PointerSample};
use super::overlay::{FocusGuard, OverlayStack, ScrollHost};
use crate::events::{EngineEvent, Update};
use crate::logging::targets;

/// Modal behavior flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModalConfig {
    /// A click on the backdrop closes the modal.
    pub close_on_backdrop: bool,
    /// Escape closes the modal.
    pub close_on_esc: bool,
    /// Geometry and gesture settings.
    pub surface: SurfaceConfig,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            close_on_backdrop: true,
            close_on_esc: true,
            surface: SurfaceConfig::default(),
        }
    }
}

/// Controller for one modal dialog whose root element is `E`.
#[derive(Debug)]
pub struct Modal<E> {
    close_on_backdrop: bool,
    close_on_esc: bool,
    guard: FocusGuard<E>,
    surface: GestureEngine,
    open: bool,
}

impl<E: Clone + PartialEq + fmt::Debug> Modal<E> {
    /// Creates a closed modal rooted at `root`.
    pub fn new(config: ModalConfig, root: E) -> Self {
        Self {
            close_on_backdrop: config.close_on_backdrop,
            close_on_esc: config.close_on_esc,
            guard: FocusGuard::new(root),
            surface: GestureEngine::new(config.surface),
            open: false,
        }
    }

    /// Whether the modal is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Current geometry.
    pub fn geometry(&self) -> SurfaceGeometry {
        self.surface.geometry()
    }

    /// The gesture engine.
    pub fn surface(&self) -> &GestureEngine {
        &self.surface
    }

    /// Whether this modal is the topmost open overlay.
    pub fn is_topmost(&self, overlays: &OverlayStack) -> bool {
        self.open && self.guard.is_topmost(overlays)
    }

    // =========================================================================
    // Open / Close
    // =========================================================================

    /// Opens the modal: resets its position, locks scrolling and traps focus.
    pub fn open<H>(&mut self, host: &mut H, overlays: &mut OverlayStack) -> Update
    where
        H: FocusHost<Element = E> + ScrollHost + ?Sized,
    {
        if self.open || self.surface.is_detached() {
            return Update::none();
        }
        self.open = true;
        self.surface.reset_position();
        self.guard.activate(host, overlays);
        tracing::debug!(target: targets::MODAL, root = ?self.guard.scope().root(), "modal opened");

        Update::none().emit(EngineEvent::OpenChange { open: true })
    }

    /// Closes the modal, emitting `close` then `openChange`.
    pub fn request_close<H>(&mut self, host: &mut H, overlays: &mut OverlayStack) -> Update
    where
        H: FocusHost<Element = E> + ScrollHost + ?Sized,
    {
        if !self.open {
            return Update::none();
        }
        self.open = false;
        self.surface.cancel();
        self.guard.deactivate(host, overlays);
        tracing::debug!(target: targets::MODAL, "modal closed");

        Update::none()
            .emit(EngineEvent::Close)
            .emit(EngineEvent::OpenChange { open: false })
    }

    /// Backdrop click.
    pub fn backdrop_click<H>(&mut self, host: &mut H, overlays: &mut OverlayStack) -> Update
    where
        H: FocusHost<Element = E> + ScrollHost + ?Sized,
    {
        if !self.close_on_backdrop {
            return Update::none();
        }
        self.request_close(host, overlays)
    }

    /// The confirm button was pressed.
    pub fn confirm(&mut self) -> Update {
        if !self.open {
            return Update::none();
        }
        Update::none().emit(EngineEvent::Confirm)
    }

    /// Document-level key press.
    pub fn handle_key<H>(&mut self, event: &KeyEvent, host: &mut H, overlays: &mut OverlayStack) -> Update
    where
        H: FocusHost<Element = E> + ScrollHost + ?Sized,
    {
        if !self.is_topmost(overlays) {
            return Update::none();
        }

        if event.is(keys::ESCAPE) {
            if !self.close_on_esc {
                return Update::none();
            }
            return self.request_close(host, overlays).handled();
        }

        if event.is(keys::TAB) {
            let outcome = self.guard.handle_tab(host, overlays, event.modifiers.shift);
            return Update {
                handled: outcome.is_handled(),
                ..Update::none()
            };
        }

        Update::none()
    }

    /// Focus landed on `target`; pulls it back if it escaped the dialog.
    pub fn handle_focus_in<H>(&mut self, host: &mut H, overlays: &OverlayStack, target: &E) -> bool
    where
        H: FocusHost<Element = E> + ?Sized,
    {
        self.open && self.guard.handle_focus_in(host, overlays, target)
    }

    /// Tears the modal down on unmount. Releases the overlay slot if open and
    /// makes every later pointer event a no-op.
    pub fn detach<H>(&mut self, host: &mut H, overlays: &mut OverlayStack)
    where
        H: FocusHost<Element = E> + ScrollHost + ?Sized,
    {
        self.surface.detach();
        if self.open {
            self.open = false;
            self.guard.deactivate(host, overlays);
        }
    }

    // =========================================================================
    // Surface
    // =========================================================================

    /// Enters or leaves fullscreen. Entering cancels any gesture.
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.surface.set_fullscreen(fullscreen);
    }

    /// Moves the dialog back to its default position.
    pub fn reset_position(&mut self) {
        self.surface.reset_position();
    }

    /// Pointer-down on the header.
    pub fn header_pointer_down(&mut self, sample: PointerSample, on_interactive: bool) -> Update {
        if self.open && self.surface.begin_drag(sample, on_interactive) {
            return Update::consumed();
        }
        Update::none()
    }

    /// Pointer-down on the resize handle.
    pub fn resize_pointer_down(&mut self, sample: PointerSample) -> Update {
        if self.open && self.surface.begin_resize(sample) {
            return Update::consumed();
        }
        Update::none()
    }

    /// Window-level pointer move.
    pub fn pointer_move(&mut self, sample: PointerSample) -> Update {
        match self.surface.pointer_move(sample) {
            Some(_) => Update::consumed(),
            None => Update::none(),
        }
    }

    /// Window-level pointer up.
    pub fn pointer_up(&mut self, sample: PointerSample) -> Update {
        match self.surface.pointer_up(sample) {
            Some(geometry) => Update::consumed().emit(EngineEvent::GeometryChange { geometry }),
            None => Update::none(),
        }
    }
}
