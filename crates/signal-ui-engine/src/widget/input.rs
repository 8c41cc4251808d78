//! Input types forwarded by rendering adapters.
//!
//! These are minimal, framework-free mirrors of DOM keyboard and pointer
//! events. Adapters translate `KeyboardEvent` / `PointerEvent` into these
//! before calling a controller.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// DOM `KeyboardEvent.key` names the controllers react to.
pub mod keys {
    pub const ARROW_DOWN: &str = "ArrowDown";
    pub const ARROW_UP: &str = "ArrowUp";
    pub const ENTER: &str = "Enter";
    pub const ESCAPE: &str = "Escape";
    pub const TAB: &str = "Tab";
}

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta key is held (Cmd on macOS, Windows key elsewhere).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        control: true,
        ..Self::NONE
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    /// Meta modifier only.
    pub const META: Self = Self {
        meta: true,
        ..Self::NONE
    };

    /// Check if no modifiers are pressed.
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.control && !self.alt && !self.meta
    }
}

/// A key-down event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// The DOM `key` value, e.g. `"k"`, `"Enter"`, `"ArrowDown"`.
    pub key: String,
    /// Modifier state at the time of the event.
    #[serde(default)]
    pub modifiers: KeyboardModifiers,
}

impl KeyEvent {
    /// Creates an event without modifiers.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// Sets the modifiers.
    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Returns true if the key equals `name`, ignoring case.
    pub fn is(&self, name: &str) -> bool {
        self.key.eq_ignore_ascii_case(name)
    }
}

/// A 2D point in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A 2D size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns true if both dimensions are finite and non-negative.
    pub fn is_valid(&self) -> bool {
        [self.width, self.height]
            .iter()
            .all(|value| value.is_finite() && *value >= 0.0)
    }

    /// Grows the size by a pointer delta.
    pub fn grown_by(self, delta: Point) -> Size {
        Size::new(self.width + delta.x, self.height + delta.y)
    }
}

/// One pointer event sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerSample {
    /// DOM `pointerId`.
    pub pointer_id: u32,
    /// Client coordinates.
    pub position: Point,
}

impl PointerSample {
    /// Creates a sample.
    pub const fn new(pointer_id: u32, x: f64, y: f64) -> Self {
        Self {
            pointer_id,
            position: Point::new(x, y),
        }
    }
}
