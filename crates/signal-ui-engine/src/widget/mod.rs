//! Widget controllers and the input primitives they consume.
//!
//! Leaf components:
//!
//! - [`shortcut`]: key-combo descriptors and matching
//! - [`gesture`]: drag/resize geometry of movable surfaces
//! - [`focus`] and [`overlay`]: focus trapping and the document scroll lock
//!
//! Controllers composed from the leaves and the [`model`](crate::model):
//!
//! - [`Combobox`]: searchable single/multi select
//! - [`DataTable`]: sortable, filterable, paginated table
//! - [`Modal`]: dialog with close policy, focus trap and movable surface

pub mod combobox;
pub mod focus;
pub mod gesture;
pub mod input;
pub mod modal;
pub mod overlay;
pub mod shortcut;
pub mod table;

pub use combobox::{ComboOption, Combobox, ComboboxConfig, ComboboxState, OptionGroup};
pub use focus::{is_focusable, ElementTraits, FocusHost, FocusScope, TabOutcome};
pub use gesture::{ActiveGesture, GestureEngine, SizeBounds, SurfaceConfig, SurfaceGeometry};
pub use input::{keys, KeyEvent, KeyboardModifiers, Point, PointerSample, Size};
pub use modal::{Modal, ModalConfig};
pub use overlay::{
    global_overlays, FocusGuard, OverlayStack, OverlayToken, ScrollHost, SCROLL_LOCK_VALUE,
};
pub use shortcut::{matches, KeyCombo, ShortcutMap, ShortcutParseError};
pub use table::{ColumnMove, DataTable, HeaderCheckbox, TableConfig};
