//! Combobox controller.
//!
//! [`Combobox`] drives a searchable, optionally multi-select dropdown. It owns
//! the open/closed state, the search query, the highlighted row and the
//! selection; the rendering adapter forwards trigger clicks, key presses,
//! input changes and outside clicks, and paints whatever the accessors report.
//!
//! # States
//!
//! ```text
//! Closed --open()/ArrowDown/ArrowUp/Enter--> Open { query: "", highlighted: first enabled }
//! Open --ArrowDown/ArrowUp--> Open (highlight clamped to the filtered rows)
//! Open --set_query(q)--> Open { query: q, highlighted: 0 }
//! Open --Escape/click outside--> Closed (focus returns to the trigger)
//! ```
//!
//! Selecting in single mode always closes. In multi mode the popup stays open
//! unless `close_on_select` is set, and selections past `max_selected` are
//! dropped without changing anything.
//!
//! Opening a searchable combobox schedules [`Effect::FocusSearchInput`] for the
//! next paint frame. The effect carries a [`FrameToken`]; the adapter must
//! check [`Combobox::is_frame_live`] when the frame fires, since the popup may
//! have closed in between.
//!
//! # Example
//!
//! ```
//! use signal_ui_engine::prelude::*;
//!
//! let mut combo = Combobox::new(
//!     ComboboxConfig::default(),
//!     vec![ComboOption::new("rs", "Rust"), ComboOption::new("go", "Go")],
//! )
//! .unwrap();
//!
//! combo.open();
//! combo.set_query("ru");
//! let update = combo.handle_key(&KeyEvent::new("Enter"));
//!
//! assert!(update.handled);
//! assert_eq!(combo.selected_values(), vec!["rs".to_string()]);
//! assert!(!combo.is_open());
//! ```

use serde::{Deserialize, Serialize};

use super::input::{keys, KeyEvent};
use crate::error::{EngineError, Result};
use crate::events::{ComboValue, Effect, EngineEvent, FrameToken, Update};
use crate::logging::targets;
use crate::model::{contains_ignore_case, SelectionMode, SelectionOutcome, SelectionStore};

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboOption {
    /// Value reported in `valueChange`.
    pub value: String,
    /// Text shown to the user and matched by search.
    pub label: String,
    /// Disabled options cannot be selected.
    #[serde(default)]
    pub disabled: bool,
    /// Optional group heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl ComboOption {
    /// Creates an enabled, ungrouped option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
            group: None,
        }
    }

    /// Sets the disabled flag.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Sets the group heading.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// Filtered options sharing a group heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionGroup<'a> {
    /// Heading, `None` for ungrouped options.
    pub group: Option<&'a str>,
    /// Options in list order.
    pub options: Vec<&'a ComboOption>,
}

/// Combobox behavior flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboboxConfig {
    /// Single or multi selection.
    pub mode: SelectionMode,
    /// Typing filters the options.
    pub searchable: bool,
    /// Enter on an unmatched query creates an option.
    pub creatable: bool,
    /// A clear button is offered while something is selected.
    pub clearable: bool,
    /// The combobox cannot be opened.
    pub disabled: bool,
    /// Upper bound for multi selection.
    pub max_selected: Option<usize>,
    /// Close after a selection; defaults to true in single mode and false in
    /// multi mode.
    pub close_on_select: Option<bool>,
}

impl Default for ComboboxConfig {
    fn default() -> Self {
        Self {
            mode: SelectionMode::Single,
            searchable: true,
            creatable: false,
            clearable: false,
            disabled: false,
            max_selected: None,
            close_on_select: None,
        }
    }
}

impl ComboboxConfig {
    /// Whether a selection closes the popup.
    pub fn closes_on_select(&self) -> bool {
        match self.mode {
            SelectionMode::Single => true,
            SelectionMode::Multi => self.close_on_select.unwrap_or(false),
        }
    }
}

/// Open/closed state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ComboboxState {
    /// Popup hidden; the query is empty.
    #[default]
    Closed,
    /// Popup shown.
    Open {
        /// Current search text.
        query: String,
        /// Index into the filtered options.
        highlighted: Option<usize>,
    },
}

/// State machine for one combobox instance.
#[derive(Debug, Clone)]
pub struct Combobox {
    config: ComboboxConfig,
    options: Vec<ComboOption>,
    selection: SelectionStore,
    state: ComboboxState,
    pending_frame: Option<FrameToken>,
    next_frame: u64,
}

impl Combobox {
    /// Creates a closed combobox with nothing selected.
    pub fn new(config: ComboboxConfig, options: Vec<ComboOption>) -> Result<Self> {
        if config.max_selected == Some(0) {
            return Err(EngineError::InvalidMaxSelected);
        }
        let mut selection = SelectionStore::new(config.mode, config.max_selected);
        selection.set_item_order(options.iter().map(|option| option.value.clone()));
        Ok(Self {
            config,
            options,
            selection,
            state: ComboboxState::Closed,
            pending_frame: None,
            next_frame: 0,
        })
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// The configuration.
    pub fn config(&self) -> &ComboboxConfig {
        &self.config
    }

    /// Enables or disables the combobox. Disabling closes an open popup.
    pub fn set_disabled(&mut self, disabled: bool) -> Update {
        self.config.disabled = disabled;
        if disabled && self.is_open() {
            return self.close();
        }
        Update::none()
    }

    /// All options in list order.
    pub fn options(&self) -> &[ComboOption] {
        &self.options
    }

    /// Replaces the options. The selection is kept; the highlight is clamped.
    pub fn set_options(&mut self, options: Vec<ComboOption>) {
        self.options = options;
        self.selection
            .set_item_order(self.options.iter().map(|option| option.value.clone()));
        let len = self.filtered_options().len();
        if let ComboboxState::Open { highlighted, .. } = &mut self.state {
            *highlighted = match *highlighted {
                _ if len == 0 => None,
                Some(index) => Some(index.min(len - 1)),
                None => None,
            };
        }
    }

    /// Sets the selection without emitting events, e.g. from a controlled
    /// `value` property.
    pub fn set_value<I, S>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection.set(values)?;
        Ok(())
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Current state.
    pub fn state(&self) -> &ComboboxState {
        &self.state
    }

    /// Whether the popup is open.
    pub fn is_open(&self) -> bool {
        matches!(self.state, ComboboxState::Open { .. })
    }

    /// Current query; empty while closed.
    pub fn query(&self) -> &str {
        match &self.state {
            ComboboxState::Open { query, .. } => query,
            ComboboxState::Closed => "",
        }
    }

    /// Index of the highlighted row within [`filtered_options`](Self::filtered_options).
    pub fn highlighted(&self) -> Option<usize> {
        match self.state {
            ComboboxState::Open { highlighted, .. } => highlighted,
            ComboboxState::Closed => None,
        }
    }

    /// The highlighted option.
    pub fn highlighted_option(&self) -> Option<&ComboOption> {
        self.highlighted()
            .and_then(|index| self.filtered_options().get(index).copied())
    }

    /// Options whose label contains the query, ignoring case.
    pub fn filtered_options(&self) -> Vec<&ComboOption> {
        let query = self.query();
        self.options
            .iter()
            .filter(|option| contains_ignore_case(&option.label, query))
            .collect()
    }

    /// Filtered options grouped by heading, in order of first appearance.
    pub fn grouped_options(&self) -> Vec<OptionGroup<'_>> {
        let mut groups: Vec<OptionGroup<'_>> = Vec::new();
        for option in self.filtered_options() {
            let group = option.group.as_deref();
            match groups.iter_mut().find(|existing| existing.group == group) {
                Some(existing) => existing.options.push(option),
                None => groups.push(OptionGroup {
                    group,
                    options: vec![option],
                }),
            }
        }
        groups
    }

    /// Selected values in option order.
    pub fn selected_values(&self) -> Vec<String> {
        self.selection.selected()
    }

    /// Whether `value` is selected.
    pub fn is_selected(&self, value: &str) -> bool {
        self.selection.is_selected(value)
    }

    /// Labels of the selected options, for the trigger text.
    pub fn selected_labels(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|option| self.selection.is_selected(&option.value))
            .map(|option| option.label.as_str())
            .collect()
    }

    /// The current value as reported in `valueChange`.
    pub fn value(&self) -> ComboValue {
        let values = self.selection.selected();
        match self.config.mode {
            SelectionMode::Single => ComboValue::Single(values.into_iter().next()),
            SelectionMode::Multi => ComboValue::Multi(values),
        }
    }

    /// Whether the clear button should be offered.
    pub fn can_clear(&self) -> bool {
        self.config.clearable && !self.selection.is_empty()
    }

    /// Whether Enter would create a new option from the query.
    pub fn can_create(&self) -> bool {
        let query = self.query();
        self.config.creatable
            && !query.is_empty()
            && !self.options.iter().any(|option| option.label == query)
    }

    /// Whether a scheduled next-frame focus should still run.
    pub fn is_frame_live(&self, token: FrameToken) -> bool {
        self.is_open() && self.pending_frame == Some(token)
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Opens the popup.
    pub fn open(&mut self) -> Update {
        if self.config.disabled || self.is_open() {
            return Update::none();
        }

        let highlighted = self.options.iter().position(|option| !option.disabled);
        self.state = ComboboxState::Open {
            query: String::new(),
            highlighted,
        };
        tracing::debug!(target: targets::COMBOBOX, ?highlighted, "combobox opened");

        let mut update = Update::none().emit(EngineEvent::OpenChange { open: true });
        if self.config.searchable {
            self.next_frame += 1;
            let frame = FrameToken(self.next_frame);
            self.pending_frame = Some(frame);
            update = update.with_effect(Effect::FocusSearchInput { frame });
        }
        update
    }

    /// Closes the popup and returns focus to the trigger.
    pub fn close(&mut self) -> Update {
        if !self.is_open() {
            return Update::none();
        }
        self.state = ComboboxState::Closed;
        self.pending_frame = None;
        tracing::debug!(target: targets::COMBOBOX, "combobox closed");

        Update::none()
            .emit(EngineEvent::OpenChange { open: false })
            .with_effect(Effect::RestoreTriggerFocus)
    }

    /// Trigger click: opens when closed, closes when open.
    pub fn toggle(&mut self) -> Update {
        if self.is_open() {
            self.close()
        } else {
            self.open()
        }
    }

    /// A pointer-down landed outside the combobox.
    pub fn click_outside(&mut self) -> Update {
        self.close()
    }

    /// The search input changed.
    pub fn set_query(&mut self, text: impl Into<String>) -> Update {
        if !self.config.searchable {
            return Update::none();
        }
        let text = text.into();
        let ComboboxState::Open { query, .. } = &mut self.state else {
            return Update::none();
        };
        if *query == text {
            return Update::none();
        }
        *query = text.clone();

        let highlighted = (!self.filtered_options().is_empty()).then_some(0);
        if let ComboboxState::Open { highlighted: slot, .. } = &mut self.state {
            *slot = highlighted;
        }
        tracing::trace!(target: targets::COMBOBOX, query = %text, "query changed");
        Update::none().emit(EngineEvent::QueryChange { query: text })
    }

    /// Handles a key press on the trigger or the search input.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Update {
        if self.config.disabled {
            return Update::none();
        }

        if event.is(keys::ARROW_DOWN) || event.is(keys::ARROW_UP) {
            if !self.is_open() {
                return self.open().handled();
            }
            self.move_highlight(event.is(keys::ARROW_DOWN));
            return Update::consumed();
        }

        if event.is(keys::ENTER) {
            if !self.is_open() {
                return self.open().handled();
            }
            return self.commit_highlighted().handled();
        }

        if event.is(keys::ESCAPE) && self.is_open() {
            return self.close().handled();
        }

        Update::none()
    }

    /// Selects the option with `value`.
    ///
    /// Disabled and unknown options are ignored.
    pub fn select(&mut self, value: &str) -> Update {
        let Some(option) = self.options.iter().find(|option| option.value == value) else {
            return Update::none();
        };
        if option.disabled {
            tracing::trace!(target: targets::COMBOBOX, value, "disabled option ignored");
            return Update::none();
        }
        let value = option.value.clone();
        self.apply_selection(&value)
    }

    /// Empties the selection and the query. Does not close the popup.
    pub fn clear(&mut self) -> Update {
        self.selection.clear();
        let mut update = Update::none()
            .emit(EngineEvent::ValueChange { value: self.value() })
            .emit(EngineEvent::Clear);

        let first_enabled = self.options.iter().position(|option| !option.disabled);
        if let ComboboxState::Open { query, highlighted } = &mut self.state {
            if !query.is_empty() {
                query.clear();
                *highlighted = first_enabled;
                update = update.emit(EngineEvent::QueryChange {
                    query: String::new(),
                });
            }
        }
        tracing::debug!(target: targets::COMBOBOX, "selection cleared");
        update
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    fn move_highlight(&mut self, down: bool) {
        let len = self.filtered_options().len();
        let ComboboxState::Open { highlighted, .. } = &mut self.state else {
            return;
        };
        if len == 0 {
            *highlighted = None;
            return;
        }
        let next = match (*highlighted, down) {
            (None, _) => 0,
            (Some(index), true) => (index + 1).min(len - 1),
            (Some(index), false) => index.saturating_sub(1),
        };
        *highlighted = Some(next);
    }

    fn commit_highlighted(&mut self) -> Update {
        if let Some(option) = self.highlighted_option() {
            let value = option.value.clone();
            return self.select(&value);
        }
        if self.can_create() {
            return self.create_from_query();
        }
        Update::none()
    }

    fn create_from_query(&mut self) -> Update {
        let query = self.query().to_string();
        tracing::debug!(target: targets::COMBOBOX, value = %query, "option created");
        self.options.push(ComboOption::new(query.clone(), query.clone()));
        self.selection
            .set_item_order(self.options.iter().map(|option| option.value.clone()));

        let outcome = match self.config.mode {
            SelectionMode::Single => self.selection.set([query]),
            SelectionMode::Multi => self.selection.toggle(&query),
        };
        let update = match outcome {
            Ok(SelectionOutcome::Changed(_)) => Update::none().emit(EngineEvent::ValueChange {
                value: self.value(),
            }),
            Ok(SelectionOutcome::Unchanged) | Err(_) => Update::none(),
        };
        update.merge(self.close())
    }

    fn apply_selection(&mut self, value: &str) -> Update {
        let outcome = match self.config.mode {
            SelectionMode::Single => self.selection.set([value]),
            SelectionMode::Multi => self.selection.toggle(value),
        };

        let update = match outcome {
            Ok(SelectionOutcome::Changed(_)) => Update::none().emit(EngineEvent::ValueChange {
                value: self.value(),
            }),
            Ok(SelectionOutcome::Unchanged) => Update::none(),
            // Overflow keeps the previous selection and the popup state.
            Err(_) => return Update::none(),
        };

        if self.config.closes_on_select() {
            update.merge(self.close())
        } else {
            update
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::input::KeyboardModifiers;

    fn fruit() -> Vec<ComboOption> {
        vec![
            ComboOption::new("apple", "Apple").with_group("Pome"),
            ComboOption::new("banana", "Banana").with_disabled(true),
            ComboOption::new("cherry", "Cherry").with_group("Stone"),
            ComboOption::new("pear", "Pear").with_group("Pome"),
        ]
    }

    fn single() -> Combobox {
        Combobox::new(ComboboxConfig::default(), fruit()).unwrap()
    }

    fn multi(max: Option<usize>) -> Combobox {
        let config = ComboboxConfig {
            mode: SelectionMode::Multi,
            max_selected: max,
            ..ComboboxConfig::default()
        };
        Combobox::new(config, fruit()).unwrap()
    }

    fn key(name: &str) -> KeyEvent {
        KeyEvent::new(name)
    }

    #[test]
    fn test_zero_max_selected_rejected() {
        let config = ComboboxConfig {
            max_selected: Some(0),
            ..ComboboxConfig::default()
        };
        assert_eq!(
            Combobox::new(config, fruit()).unwrap_err(),
            EngineError::InvalidMaxSelected
        );
    }

    #[test]
    fn test_open_emits_and_schedules_focus() {
        let mut combo = single();
        let update = combo.open();

        assert_eq!(update.events, vec![EngineEvent::OpenChange { open: true }]);
        let frame = match update.effects.as_slice() {
            [Effect::FocusSearchInput { frame }] => *frame,
            other => panic!("expected a focus effect, got {other:?}"),
        };
        assert!(combo.is_frame_live(frame));
        assert_eq!(combo.highlighted(), Some(0));
    }

    #[test]
    fn test_open_highlights_first_enabled() {
        let options = vec![
            ComboOption::new("a", "A").with_disabled(true),
            ComboOption::new("b", "B"),
        ];
        let mut combo = Combobox::new(ComboboxConfig::default(), options).unwrap();
        combo.open();
        assert_eq!(combo.highlighted(), Some(1));
    }

    #[test]
    fn test_frame_token_dies_on_close() {
        let mut combo = single();
        let frame = match combo.open().effects.first() {
            Some(Effect::FocusSearchInput { frame }) => *frame,
            other => panic!("expected a focus effect, got {other:?}"),
        };
        combo.close();
        assert!(!combo.is_frame_live(frame));

        combo.open();
        assert!(!combo.is_frame_live(frame));
    }

    #[test]
    fn test_not_searchable_schedules_no_focus() {
        let config = ComboboxConfig {
            searchable: false,
            ..ComboboxConfig::default()
        };
        let mut combo = Combobox::new(config, fruit()).unwrap();
        assert!(combo.open().effects.is_empty());
        assert!(combo.set_query("app").is_empty());
    }

    #[test]
    fn test_arrow_keys_open_then_clamp() {
        let mut combo = single();
        let update = combo.handle_key(&key("ArrowDown"));
        assert!(update.handled && combo.is_open());
        assert_eq!(combo.highlighted(), Some(0));

        for _ in 0..10 {
            combo.handle_key(&key("ArrowDown"));
        }
        assert_eq!(combo.highlighted(), Some(3));

        for _ in 0..10 {
            combo.handle_key(&key("ArrowUp"));
        }
        assert_eq!(combo.highlighted(), Some(0));
    }

    #[test]
    fn test_query_filters_and_resets_highlight() {
        let mut combo = single();
        combo.open();
        combo.handle_key(&key("ArrowDown"));

        let update = combo.set_query("ER");
        assert_eq!(
            update.events,
            vec![EngineEvent::QueryChange { query: "ER".into() }]
        );
        let labels: Vec<&str> = combo.filtered_options().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Cherry"]);
        assert_eq!(combo.highlighted(), Some(0));

        combo.set_query("zzz");
        assert_eq!(combo.highlighted(), None);
    }

    #[test]
    fn test_single_select_closes_and_clears_query() {
        let mut combo = single();
        combo.open();
        combo.set_query("pe");
        let update = combo.handle_key(&key("Enter"));

        assert_eq!(
            update.events,
            vec![
                EngineEvent::ValueChange {
                    value: ComboValue::Single(Some("pear".into()))
                },
                EngineEvent::OpenChange { open: false },
            ]
        );
        assert_eq!(update.effects, vec![Effect::RestoreTriggerFocus]);
        assert_eq!(combo.query(), "");
        assert_eq!(combo.selected_labels(), vec!["Pear"]);
    }

    #[test]
    fn test_disabled_option_is_noop() {
        let mut combo = single();
        combo.open();
        assert!(combo.select("banana").is_empty());
        assert!(combo.is_open());
        assert!(combo.selected_values().is_empty());
    }

    #[test]
    fn test_multi_stays_open_and_toggles() {
        let mut combo = multi(None);
        combo.open();
        combo.select("pear");
        combo.select("apple");
        assert!(combo.is_open());
        assert_eq!(combo.value(), ComboValue::Multi(vec!["apple".into(), "pear".into()]));

        combo.select("pear");
        assert_eq!(combo.selected_values(), vec!["apple".to_string()]);
    }

    #[test]
    fn test_multi_close_on_select() {
        let config = ComboboxConfig {
            mode: SelectionMode::Multi,
            close_on_select: Some(true),
            ..ComboboxConfig::default()
        };
        let mut combo = Combobox::new(config, fruit()).unwrap();
        combo.open();
        combo.select("apple");
        assert!(!combo.is_open());
    }

    #[test]
    fn test_multi_overflow_is_silent() {
        let mut combo = multi(Some(1));
        combo.open();
        combo.select("apple");

        let update = combo.select("cherry");
        assert!(update.is_empty());
        assert_eq!(combo.selected_values(), vec!["apple".to_string()]);
    }

    #[test]
    fn test_escape_closes_and_restores_focus() {
        let mut combo = single();
        combo.open();
        combo.set_query("a");

        let update = combo.handle_key(&key("Escape"));
        assert!(update.handled);
        assert_eq!(update.effects, vec![Effect::RestoreTriggerFocus]);
        assert_eq!(combo.state(), &ComboboxState::Closed);
        assert!(!combo.handle_key(&key("Escape")).handled);
    }

    #[test]
    fn test_click_outside_closes() {
        let mut combo = single();
        combo.open();
        let update = combo.click_outside();
        assert_eq!(update.events, vec![EngineEvent::OpenChange { open: false }]);
        assert!(combo.click_outside().is_empty());
    }

    #[test]
    fn test_enter_creates_option() {
        let config = ComboboxConfig {
            creatable: true,
            ..ComboboxConfig::default()
        };
        let mut combo = Combobox::new(config, fruit()).unwrap();
        combo.open();
        combo.set_query("Durian");
        assert!(combo.can_create());

        combo.handle_key(&key("Enter"));
        assert_eq!(combo.selected_values(), vec!["Durian".to_string()]);
        assert_eq!(combo.options().len(), 5);
        assert!(!combo.is_open());
    }

    #[test]
    fn test_existing_label_is_not_creatable() {
        let config = ComboboxConfig {
            creatable: true,
            ..ComboboxConfig::default()
        };
        let mut combo = Combobox::new(config, fruit()).unwrap();
        combo.open();
        combo.set_query("Pear");
        assert!(!combo.can_create());
    }

    #[test]
    fn test_clear_keeps_popup_open() {
        let mut combo = multi(None);
        combo.open();
        combo.select("apple");
        combo.set_query("ch");

        let update = combo.clear();
        assert_eq!(
            update.events,
            vec![
                EngineEvent::ValueChange {
                    value: ComboValue::Multi(vec![])
                },
                EngineEvent::Clear,
                EngineEvent::QueryChange { query: String::new() },
            ]
        );
        assert!(combo.is_open());
        assert_eq!(combo.query(), "");
    }

    #[test]
    fn test_grouped_options_first_appearance_order() {
        let mut combo = single();
        combo.open();
        let groups = combo.grouped_options();

        let headings: Vec<Option<&str>> = groups.iter().map(|g| g.group).collect();
        assert_eq!(headings, vec![Some("Pome"), None, Some("Stone")]);
        assert_eq!(groups[0].options.len(), 2);
    }

    #[test]
    fn test_disabled_combobox_does_not_open() {
        let config = ComboboxConfig {
            disabled: true,
            ..ComboboxConfig::default()
        };
        let mut combo = Combobox::new(config, fruit()).unwrap();
        assert!(combo.toggle().is_empty());
        assert!(!combo.handle_key(&key("ArrowDown")).handled);
    }

    #[test]
    fn test_modified_enter_still_selects() {
        let mut combo = single();
        combo.open();
        combo.handle_key(&KeyEvent::new("Enter").with_modifiers(KeyboardModifiers::SHIFT));
        assert_eq!(combo.selected_values(), vec!["apple".to_string()]);
    }
}
