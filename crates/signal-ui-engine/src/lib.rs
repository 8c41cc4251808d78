//! Signal UI widget engine.
//!
//! A headless state engine for interactive widgets. The engine holds the
//! non-visual state of a combobox, a data table and a modal dialog and
//! turns raw input (key presses, pointer samples, clicks) into state changes.
//! It never renders and never touches a document directly: a rendering
//! adapter forwards events in, paints the state it reads back, and applies
//! the returned [`Update`](events::Update).
//!
//! Every mutating operation returns an `Update` carrying:
//!
//! - the [`EngineEvent`](events::EngineEvent)s to dispatch, in order
//! - [`Effect`](events::Effect)s the adapter performs (focus moves)
//! - whether the input event was consumed
//!
//! # Example
//!
//! ```
//! use signal_ui_engine::prelude::*;
//!
//! let mut combo = Combobox::new(
//!     ComboboxConfig { mode: SelectionMode::Multi, max_selected: Some(2), ..Default::default() },
//!     vec![
//!         ComboOption::new("a", "Alpha"),
//!         ComboOption::new("b", "Beta"),
//!         ComboOption::new("c", "Gamma"),
//!     ],
//! )
//! .unwrap();
//!
//! combo.open();
//! combo.select("a");
//! combo.select("b");
//! assert!(combo.select("c").is_empty());
//! assert_eq!(combo.selected_values(), vec!["a".to_string(), "b".to_string()]);
//! ```
//!
//! # Logging
//!
//! The engine logs through `tracing` under the targets in
//! [`logging::targets`]. No subscriber is installed by the library.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod model;
pub mod prelude;
pub mod widget;

pub use config::WidgetOptions;
pub use error::{EngineError, Result};
pub use events::{Effect, EngineEvent, Update};
