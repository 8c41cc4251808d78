//! Error types for the widget engine.
//!
//! Runtime input never produces an error: out-of-range pages, stray pointer
//! events and focus restoration to detached elements all degrade to no-ops.
//! The types here cover construction-time validation, descriptor parsing and
//! the one runtime condition an embedding application may want to surface,
//! selection overflow.

use thiserror::Error;

use crate::model::selection::SelectionRejected;
use crate::widget::shortcut::ShortcutParseError;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while configuring or driving the engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A minimum size exceeds the matching maximum size.
    #[error("invalid size bounds: min {min_width}x{min_height} exceeds max {max_width}x{max_height}")]
    InvalidBounds {
        min_width: f64,
        min_height: f64,
        max_width: f64,
        max_height: f64,
    },

    /// A surface size is negative or not finite.
    #[error("invalid size {width}x{height}: dimensions must be finite and non-negative")]
    InvalidSize { width: f64, height: f64 },

    /// A surface position is not finite.
    #[error("invalid position ({x}, {y}): coordinates must be finite")]
    InvalidPosition { x: f64, y: f64 },

    /// A page size of zero was requested.
    #[error("page size must be greater than zero")]
    InvalidPageSize,

    /// `maxSelected` was set to zero.
    #[error("maxSelected must be at least 1")]
    InvalidMaxSelected,

    /// A key-combo descriptor could not be parsed.
    #[error("invalid shortcut: {0}")]
    ShortcutParse(#[from] ShortcutParseError),

    /// A selection mutation would have violated the selection limits.
    #[error(transparent)]
    SelectionRejected(#[from] SelectionRejected),

    /// Widget options could not be deserialized.
    #[error("invalid widget options: {0}")]
    Config(String),
}

impl EngineError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<toml::de::Error> for EngineError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
