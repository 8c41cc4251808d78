//! Keyboard shortcut matching.
//!
//! A shortcut descriptor is a `+`-joined list of modifier names and at most
//! one key name, e.g. `"meta+k"`, `"Ctrl + Shift + P"` or `"alt"`. Parsing is
//! case-insensitive and ignores whitespace. Recognized modifier names:
//!
//! | Modifier | Names                        |
//! |----------|------------------------------|
//! | Meta     | `meta`, `cmd`, `command`     |
//! | Control  | `ctrl`, `control`            |
//! | Alt      | `alt`, `option`              |
//! | Shift    | `shift`                      |
//!
//! Matching is exact on modifiers: `"ctrl+k"` does not match Ctrl+Shift+K.
//! A descriptor without a key token matches on modifiers alone.
//!
//! # Example
//!
//! ```
//! use signal_ui_engine::widget::{matches, KeyEvent, KeyboardModifiers};
//!
//! let event = KeyEvent::new("K").with_modifiers(KeyboardModifiers::META);
//! assert!(matches(&event, "cmd+k"));
//! assert!(!matches(&event, "ctrl+k"));
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::input::{KeyEvent, KeyboardModifiers};
use crate::logging::targets;

/// Errors from parsing a shortcut descriptor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShortcutParseError {
    /// The descriptor has no tokens.
    #[error("empty shortcut descriptor")]
    Empty,
    /// The descriptor names more than one non-modifier key.
    #[error("shortcut names more than one key: '{first}' and '{second}'")]
    MultipleKeys { first: String, second: String },
}

/// A parsed shortcut descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    /// Exact modifier set that must be held.
    pub modifiers: KeyboardModifiers,
    /// Lowercased key name, if the descriptor names one.
    pub key: Option<String>,
}

impl KeyCombo {
    /// Tests a key event against this combo.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if event.modifiers != self.modifiers {
            return false;
        }
        match &self.key {
            Some(key) => event.key.to_lowercase() == *key,
            None => true,
        }
    }
}

impl FromStr for KeyCombo {
    type Err = ShortcutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let compact = compact.to_lowercase();

        let mut modifiers = KeyboardModifiers::NONE;
        let mut key: Option<String> = None;
        let mut tokens = 0usize;

        for part in compact.split('+').filter(|part| !part.is_empty()) {
            tokens += 1;
            match part {
                "meta" | "cmd" | "command" => modifiers.meta = true,
                "ctrl" | "control" => modifiers.control = true,
                "alt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                _ => {
                    if let Some(first) = key.take() {
                        return Err(ShortcutParseError::MultipleKeys {
                            first,
                            second: part.to_string(),
                        });
                    }
                    key = Some(part.to_string());
                }
            }
        }

        if tokens == 0 {
            return Err(ShortcutParseError::Empty);
        }
        Ok(KeyCombo { modifiers, key })
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<&str> = Vec::new();
        if self.modifiers.meta {
            parts.push("meta");
        }
        if self.modifiers.control {
            parts.push("ctrl");
        }
        if self.modifiers.alt {
            parts.push("alt");
        }
        if self.modifiers.shift {
            parts.push("shift");
        }
        if let Some(key) = &self.key {
            parts.push(key);
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// Tests an event against a descriptor string.
///
/// Unparsable descriptors never match.
pub fn matches(event: &KeyEvent, descriptor: &str) -> bool {
    match descriptor.parse::<KeyCombo>() {
        Ok(combo) => combo.matches(event),
        Err(err) => {
            tracing::debug!(target: targets::SHORTCUT, descriptor, %err, "descriptor never matches");
            false
        }
    }
}

/// A set of shortcuts bound to actions.
///
/// Every binding whose combo matches fires; [`ShortcutMap::dispatch`] returns
/// the matching actions in registration order.
#[derive(Debug, Clone, Default)]
pub struct ShortcutMap<A> {
    bindings: Vec<(KeyCombo, A)>,
}

impl<A> ShortcutMap<A> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Binds a descriptor to an action.
    pub fn register(&mut self, descriptor: &str, action: A) -> Result<(), ShortcutParseError> {
        let combo = descriptor.parse::<KeyCombo>()?;
        tracing::trace!(target: targets::SHORTCUT, %combo, "shortcut registered");
        self.bindings.push((combo, action));
        Ok(())
    }

    /// Returns every action bound to a combo matching the event.
    pub fn dispatch(&self, event: &KeyEvent) -> Vec<&A> {
        self.bindings
            .iter()
            .filter(|(combo, _)| combo.matches(event))
            .map(|(_, action)| action)
            .collect()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
