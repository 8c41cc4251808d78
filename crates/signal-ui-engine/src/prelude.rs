//! Prelude module for the widget engine.
//!
//! ```ignore
//! use signal_ui_engine::prelude::*;
//! ```
//!
//! This provides access to:
//! - Controllers (`Combobox`, `DataTable`, `Modal`)
//! - Data model (`Item`, `Column`, `ListQuery`, `SelectionStore`)
//! - Input types (`KeyEvent`, `PointerSample`)
//! - Outputs (`EngineEvent`, `Effect`, `Update`)

// ============================================================================
// Errors and Outputs
// ============================================================================

pub use crate::error::{EngineError, Result};
pub use crate::events::{ComboValue, Effect, EngineEvent, FrameToken, Update};

// ============================================================================
// Data Model
// ============================================================================

pub use crate::model::{
    CellValue, Column, FilterSet, Item, ListQuery, PageSpec, QueryResult, SelectionMode,
    SelectionStore, SortDirection, SortSpec,
};

// ============================================================================
// Input
// ============================================================================

pub use crate::widget::input::{KeyEvent, KeyboardModifiers, Point, PointerSample, Size};
pub use crate::widget::shortcut::{matches, ShortcutMap};

// ============================================================================
// Controllers
// ============================================================================

pub use crate::config::WidgetOptions;
pub use crate::widget::combobox::{ComboOption, Combobox, ComboboxConfig};
pub use crate::widget::focus::FocusHost;
pub use crate::widget::gesture::{GestureEngine, SurfaceConfig, SurfaceGeometry};
pub use crate::widget::modal::{Modal, ModalConfig};
pub use crate::widget::overlay::{global_overlays, OverlayStack, ScrollHost};
pub use crate::widget::table::{DataTable, HeaderCheckbox, TableConfig};
