//! Events and effects produced by controllers.
//!
//! Every mutating controller operation returns an [`Update`]. The rendering
//! adapter dispatches its [`EngineEvent`]s to listeners, applies its
//! [`Effect`]s (focus moves) and calls `preventDefault` on the originating DOM
//! event when [`Update::handled`] is set.
//!
//! Events serialize with a camelCase `type` tag and camelCase payload keys,
//! the shape adapters forward to custom-event listeners:
//!
//! ```
//! use signal_ui_engine::events::EngineEvent;
//!
//! let json = serde_json::to_string(&EngineEvent::PageChange { page_index: 1, page_size: 10 }).unwrap();
//! assert_eq!(json, r#"{"type":"pageChange","pageIndex":1,"pageSize":10}"#);
//! ```

use serde::Serialize;

use crate::model::{FilterSet, SortSpec};
use crate::widget::gesture::SurfaceGeometry;

/// Value payload of a combobox `valueChange` event.
///
/// Single mode reports the selected value or `null`; multi mode reports the
/// selected values in option order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ComboValue {
    /// Single mode value.
    Single(Option<String>),
    /// Multi mode values.
    Multi(Vec<String>),
}

/// An event emitted towards the embedding application.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EngineEvent {
    /// The combobox value changed.
    ValueChange { value: ComboValue },
    /// A popup or surface opened or closed.
    OpenChange { open: bool },
    /// The combobox search text changed.
    QueryChange { query: String },
    /// Table row selection changed; keys are in row order.
    SelectionChanged { keys: Vec<String> },
    /// The table sort changed.
    SortChange { sort: Option<SortSpec> },
    /// The table filters changed.
    FilterChange { filters: FilterSet },
    /// The table page or page size changed.
    #[serde(rename_all = "camelCase")]
    PageChange { page_index: usize, page_size: usize },
    /// Table rows were reordered; carries every row id in the new order.
    Reorder { rows: Vec<String> },
    /// The combobox selection was cleared by the user.
    Clear,
    /// A modal was asked to close.
    Close,
    /// A modal's primary action was confirmed.
    Confirm,
    /// Table columns were reordered.
    ColumnOrderChange { order: Vec<String> },
    /// A table column was shown or hidden.
    ColumnVisibilityChange { key: String, visible: bool },
    /// A surface gesture committed a new geometry.
    GeometryChange { geometry: SurfaceGeometry },
}

/// Identifies one scheduled next-frame action.
///
/// Tokens are issued by the controller that scheduled the action, which can
/// later report whether the token is still live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FrameToken(pub(crate) u64);

impl FrameToken {
    /// Raw token value.
    pub fn id(self) -> u64 {
        self.0
    }
}

/// A side effect the rendering adapter must apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Effect {
    /// Focus the search input on the next paint frame, if the token is still
    /// live at that point.
    FocusSearchInput { frame: FrameToken },
    /// Return focus to the element that opened the popup.
    RestoreTriggerFocus,
}

/// Result of a controller operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    /// Events to dispatch, in order.
    pub events: Vec<EngineEvent>,
    /// Effects to apply, in order.
    pub effects: Vec<Effect>,
    /// Whether the input event was consumed.
    pub handled: bool,
}

impl Update {
    /// An update that did nothing and consumed nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// An update that consumed the input but produced no output.
    pub fn consumed() -> Self {
        Self {
            handled: true,
            ..Self::default()
        }
    }

    /// Appends an event.
    pub fn emit(mut self, event: EngineEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Appends an effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Marks the input event as consumed.
    pub fn handled(mut self) -> Self {
        self.handled = true;
        self
    }

    /// Appends another update's output.
    pub fn merge(mut self, other: Update) -> Self {
        self.events.extend(other.events);
        self.effects.extend(other.effects);
        self.handled |= other.handled;
        self
    }

    /// Returns true if there are no events and no effects.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.effects.is_empty()
    }
}
