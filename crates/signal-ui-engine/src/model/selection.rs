//! Selection store for combobox options and table rows.
//!
//! This module provides [`SelectionStore`], which tracks the selected item ids
//! of a single widget instance.
//!
//! # Example
//!
//! ```
//! use signal_ui_engine::model::{SelectionMode, SelectionOutcome, SelectionStore};
//!
//! let mut selection = SelectionStore::new(SelectionMode::Multi, Some(2));
//! selection.set_item_order(["a", "b", "c"]);
//!
//! selection.toggle("c").unwrap();
//! let outcome = selection.toggle("a").unwrap();
//! assert_eq!(outcome, SelectionOutcome::Changed(vec!["a".into(), "c".into()]));
//!
//! // A third selection would exceed max_selected and is rejected.
//! assert!(selection.toggle("b").is_err());
//! assert_eq!(selection.len(), 2);
//! ```
//!
//! # Ordering
//!
//! Every successful mutation reports the resulting ids in *item order*, the
//! order registered with [`SelectionStore::set_item_order`], not in the order
//! they were selected. Ids that are not part of the registered order (for
//! example options created from free text) follow, in the order they were
//! added.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::targets;

/// Selection behavior mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// At most one id can be selected (default).
    #[default]
    Single,
    /// Any number of ids up to `max_selected`.
    Multi,
}

/// A selection mutation was refused because it would break the limits.
///
/// The store is left exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("selection of {attempted} items exceeds the limit of {limit}")]
pub struct SelectionRejected {
    /// Size the selection would have had.
    pub attempted: usize,
    /// The limit in force (1 in single mode).
    pub limit: usize,
}

/// Result of a successful selection operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The selection changed; carries the resulting ids in item order.
    Changed(Vec<String>),
    /// The call was valid but did not change anything.
    Unchanged,
}

impl SelectionOutcome {
    /// Returns true if the selection changed.
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed(_))
    }

    /// Returns the resulting ids for a change.
    pub fn keys(&self) -> Option<&[String]> {
        match self {
            Self::Changed(keys) => Some(keys),
            Self::Unchanged => None,
        }
    }
}

/// Manages the selected ids of one widget instance.
///
/// Invariants held after every call:
/// - `len() <= max_selected()` when a limit is set
/// - `len() <= 1` in [`SelectionMode::Single`]
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    /// Current selection mode.
    mode: SelectionMode,

    /// Upper bound for multi mode.
    max_selected: Option<usize>,

    /// Set of selected ids for O(1) lookup.
    selected_ids: HashSet<String>,

    /// Selected ids in insertion order.
    insertion: Vec<String>,

    /// Position of each known id in item order.
    item_order: HashMap<String, usize>,
}

impl SelectionStore {
    /// Creates an empty store.
    ///
    /// A `max_selected` of zero is treated as "no limit"; configuration
    /// validation rejects it before it gets here.
    pub fn new(mode: SelectionMode, max_selected: Option<usize>) -> Self {
        Self {
            mode,
            max_selected: max_selected.filter(|&max| max > 0),
            ..Self::default()
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Gets the selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Gets the configured limit.
    pub fn max_selected(&self) -> Option<usize> {
        self.max_selected
    }

    /// Registers the item order used to report selections.
    ///
    /// Call this whenever the underlying item collection changes. Existing
    /// selections are kept, even for ids no longer present.
    pub fn set_item_order<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.item_order = ids
            .into_iter()
            .enumerate()
            .map(|(pos, id)| (id.into(), pos))
            .collect();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Checks if an id is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_ids.contains(id)
    }

    /// Returns the number of selected ids.
    pub fn len(&self) -> usize {
        self.selected_ids.len()
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected_ids.is_empty()
    }

    /// Returns the selected ids in item order.
    pub fn selected(&self) -> Vec<String> {
        let mut keys = self.insertion.clone();
        // Stable: unknown ids keep their insertion order behind known ones.
        keys.sort_by_key(|id| self.item_order.get(id).copied().unwrap_or(usize::MAX));
        keys
    }

    fn limit(&self) -> Option<usize> {
        match self.mode {
            SelectionMode::Single => Some(1),
            SelectionMode::Multi => self.max_selected,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Toggles an id.
    ///
    /// In single mode this replaces the whole selection with `{id}`, or empties
    /// it if `id` was already selected. In multi mode membership flips; adding
    /// past `max_selected` is rejected.
    pub fn toggle(&mut self, id: &str) -> Result<SelectionOutcome, SelectionRejected> {
        if self.is_selected(id) {
            self.remove(id);
            return Ok(self.changed());
        }

        match self.mode {
            SelectionMode::Single => {
                self.replace(vec![id.to_string()]);
            }
            SelectionMode::Multi => {
                self.check_limit(self.len() + 1)?;
                self.add(id.to_string());
            }
        }
        Ok(self.changed())
    }

    /// Adds every id to the selection.
    ///
    /// The call is all-or-nothing: if the union would exceed the limit the
    /// selection is left untouched.
    pub fn select_all<I, S>(&mut self, ids: I) -> Result<SelectionOutcome, SelectionRejected>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut additions: Vec<String> = Vec::new();
        for id in ids {
            let id = id.into();
            if !self.is_selected(&id) && !additions.contains(&id) {
                additions.push(id);
            }
        }

        if additions.is_empty() {
            return Ok(SelectionOutcome::Unchanged);
        }

        self.check_limit(self.len() + additions.len())?;
        for id in additions {
            self.add(id);
        }
        Ok(self.changed())
    }

    /// Replaces the selection with the given ids.
    pub fn set<I, S>(&mut self, ids: I) -> Result<SelectionOutcome, SelectionRejected>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut next: Vec<String> = Vec::new();
        for id in ids {
            let id = id.into();
            if !next.contains(&id) {
                next.push(id);
            }
        }

        self.check_limit(next.len())?;

        let same = next.len() == self.len() && next.iter().all(|id| self.is_selected(id));
        if same {
            return Ok(SelectionOutcome::Unchanged);
        }

        self.replace(next);
        Ok(self.changed())
    }

    /// Clears the selection.
    pub fn clear(&mut self) -> SelectionOutcome {
        if self.is_empty() {
            return SelectionOutcome::Unchanged;
        }
        self.selected_ids.clear();
        self.insertion.clear();
        self.changed()
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    fn check_limit(&self, attempted: usize) -> Result<(), SelectionRejected> {
        match self.limit() {
            Some(limit) if attempted > limit => {
                tracing::debug!(
                    target: targets::SELECTION,
                    attempted,
                    limit,
                    "selection rejected"
                );
                Err(SelectionRejected { attempted, limit })
            }
            _ => Ok(()),
        }
    }

    fn add(&mut self, id: String) {
        if self.selected_ids.insert(id.clone()) {
            self.insertion.push(id);
        }
    }

    fn remove(&mut self, id: &str) {
        if self.selected_ids.remove(id) {
            self.insertion.retain(|existing| existing != id);
        }
    }

    fn replace(&mut self, ids: Vec<String>) {
        self.selected_ids.clear();
        self.insertion.clear();
        for id in ids {
            self.add(id);
        }
    }

    fn changed(&self) -> SelectionOutcome {
        let keys = self.selected();
        tracing::debug!(target: targets::SELECTION, ?keys, "selection changed");
        SelectionOutcome::Changed(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ordered(mode: SelectionMode, max: Option<usize>) -> SelectionStore {
        let mut store = SelectionStore::new(mode, max);
        store.set_item_order(["a", "b", "c", "d"]);
        store
    }

    #[test]
    fn test_selection_store_creation() {
        let store = SelectionStore::new(SelectionMode::default(), None);
        assert_eq!(store.mode(), SelectionMode::Single);
        assert!(store.is_empty());
    }

    #[test]
    fn test_single_toggle_replaces() {
        let mut store = ordered(SelectionMode::Single, None);

        store.toggle("a").unwrap();
        let outcome = store.toggle("b").unwrap();

        assert_eq!(outcome, SelectionOutcome::Changed(vec!["b".into()]));
        assert!(!store.is_selected("a"));
    }

    #[test]
    fn test_single_toggle_selected_empties() {
        let mut store = ordered(SelectionMode::Single, None);

        store.toggle("a").unwrap();
        let outcome = store.toggle("a").unwrap();

        assert_eq!(outcome, SelectionOutcome::Changed(vec![]));
        assert!(store.is_empty());
    }

    #[test]
    fn test_single_set_more_than_one_rejected() {
        let mut store = ordered(SelectionMode::Single, None);

        let err = store.set(["a", "b"]).unwrap_err();
        assert_eq!(err, SelectionRejected { attempted: 2, limit: 1 });
        assert!(store.is_empty());
    }

    #[test]
    fn test_multi_toggle_flips_membership() {
        let mut store = ordered(SelectionMode::Multi, None);

        store.toggle("a").unwrap();
        store.toggle("b").unwrap();
        assert_eq!(store.len(), 2);

        store.toggle("a").unwrap();
        assert_eq!(store.selected(), vec!["b".to_string()]);
    }

    #[test]
    fn test_multi_overflow_rejected_state_unchanged() {
        let mut store = ordered(SelectionMode::Multi, Some(1));

        store.toggle("a").unwrap();
        let err = store.toggle("b").unwrap_err();

        assert_eq!(err.limit, 1);
        assert_eq!(store.selected(), vec!["a".to_string()]);
    }

    #[test]
    fn test_keys_reported_in_item_order() {
        let mut store = ordered(SelectionMode::Multi, None);

        store.toggle("d").unwrap();
        store.toggle("b").unwrap();
        let outcome = store.toggle("a").unwrap();

        assert_eq!(
            outcome.keys(),
            Some(&["a".to_string(), "b".to_string(), "d".to_string()][..])
        );
    }

    #[test]
    fn test_unknown_ids_follow_known_ids() {
        let mut store = ordered(SelectionMode::Multi, None);

        store.toggle("zeta").unwrap();
        store.toggle("c").unwrap();
        store.toggle("alpha").unwrap();

        assert_eq!(store.selected(), vec!["c", "zeta", "alpha"]);
    }

    #[test]
    fn test_select_all_is_all_or_nothing() {
        let mut store = ordered(SelectionMode::Multi, Some(3));
        store.toggle("a").unwrap();

        assert!(store.select_all(["b", "c", "d"]).is_err());
        assert_eq!(store.selected(), vec!["a".to_string()]);

        let outcome = store.select_all(["b", "c"]).unwrap();
        assert_eq!(outcome.keys().map(<[String]>::len), Some(3));
    }

    #[test]
    fn test_select_all_nothing_new_is_unchanged() {
        let mut store = ordered(SelectionMode::Multi, None);
        store.set(["a", "b"]).unwrap();
        assert_eq!(store.select_all(["b", "a"]).unwrap(), SelectionOutcome::Unchanged);
    }

    #[test]
    fn test_set_same_ids_is_unchanged() {
        let mut store = ordered(SelectionMode::Multi, None);
        store.set(["b", "a"]).unwrap();
        assert_eq!(store.set(["a", "b"]).unwrap(), SelectionOutcome::Unchanged);
    }

    #[test]
    fn test_set_over_limit_rejected() {
        let mut store = ordered(SelectionMode::Multi, Some(2));
        store.set(["a"]).unwrap();

        assert!(store.set(["a", "b", "c"]).is_err());
        assert_eq!(store.selected(), vec!["a".to_string()]);
    }

    #[test]
    fn test_clear() {
        let mut store = ordered(SelectionMode::Multi, None);
        assert_eq!(store.clear(), SelectionOutcome::Unchanged);

        store.set(["a", "c"]).unwrap();
        assert_eq!(store.clear(), SelectionOutcome::Changed(vec![]));
        assert!(store.is_empty());
    }

    #[test]
    fn test_zero_limit_means_unbounded() {
        let mut store = ordered(SelectionMode::Multi, Some(0));
        assert_eq!(store.max_selected(), None);
        store.set(["a", "b", "c"]).unwrap();
        assert_eq!(store.len(), 3);
    }
}
