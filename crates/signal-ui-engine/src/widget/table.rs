//! Data table controller.
//!
//! [`DataTable`] owns the rows, columns and view state of a sortable,
//! filterable, paginated table with optional row selection and row/column
//! reordering. Every change re-runs the [`ListQuery`] pipeline from scratch
//! through [`DataTable::view`].
//!
//! # Example
//!
//! ```
//! use signal_ui_engine::prelude::*;
//!
//! let columns = vec![Column::new("name"), Column::new("age")];
//! let rows = vec![
//!     Item::new("1").with_field("name", "Ada").with_field("age", 36),
//!     Item::new("2").with_field("name", "Linus").with_field("age", 54),
//!     Item::new("3").with_field("name", "Grace").with_field("age", 85),
//! ];
//! let mut table = DataTable::new(TableConfig::default(), columns, rows).unwrap();
//!
//! table.toggle_sort("age");
//! table.toggle_sort("age");
//! assert_eq!(table.view().ids(), vec!["3", "2", "1"]);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::events::{EngineEvent, Update};
use crate::logging::targets;
use crate::model::{
    Column, FilterSet, Item, ListQuery, PageSpec, QueryResult, SelectionMode, SelectionOutcome,
    SelectionStore, SortDirection, SortSpec,
};

/// Direction for [`DataTable::move_column`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnMove {
    /// Towards the first column.
    Left,
    /// Towards the last column.
    Right,
}

/// State of the "select all" header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderCheckbox {
    /// No visible row is selected.
    Unchecked,
    /// Some but not all visible rows are selected.
    Indeterminate,
    /// Every visible row is selected.
    Checked,
}

/// Data table behavior flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// A search box filters rows.
    pub searchable: bool,
    /// Per-column filters apply.
    pub filterable: bool,
    /// Rows can be selected.
    pub selectable: bool,
    /// Column headers sort on click.
    pub sortable: bool,
    /// Rows can be reordered.
    pub reorderable: bool,
    /// Page size; `None` shows every row.
    pub page_size: Option<usize>,
    /// Upper bound for row selection.
    pub max_selected: Option<usize>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            searchable: false,
            filterable: false,
            selectable: false,
            sortable: true,
            reorderable: false,
            page_size: None,
            max_selected: None,
        }
    }
}

/// Controller for one data table.
#[derive(Debug, Clone)]
pub struct DataTable {
    config: TableConfig,
    columns: Vec<Column>,
    rows: Vec<Item>,
    query: ListQuery,
    selection: SelectionStore,
}

impl DataTable {
    /// Creates a table showing the first page in row order.
    pub fn new(config: TableConfig, columns: Vec<Column>, rows: Vec<Item>) -> Result<Self> {
        if config.max_selected == Some(0) {
            return Err(EngineError::InvalidMaxSelected);
        }
        let page = config.page_size.map(PageSpec::first).transpose()?;

        let mut selection = SelectionStore::new(SelectionMode::Multi, config.max_selected);
        selection.set_item_order(rows.iter().map(|row| row.id.clone()));

        Ok(Self {
            config,
            columns,
            rows,
            query: ListQuery {
                page,
                ..ListQuery::default()
            },
            selection,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// All columns in display order, hidden ones included.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Visible columns in display order.
    pub fn visible_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|column| column.visible).collect()
    }

    /// All rows in their current order, unfiltered.
    pub fn rows(&self) -> &[Item] {
        &self.rows
    }

    /// Current search text.
    pub fn search(&self) -> &str {
        &self.query.search
    }

    /// Current filters.
    pub fn filters(&self) -> &FilterSet {
        &self.query.filters
    }

    /// Current sort.
    pub fn sort(&self) -> Option<&SortSpec> {
        self.query.sort.as_ref()
    }

    /// Current page window.
    pub fn page(&self) -> Option<PageSpec> {
        self.query.page
    }

    /// Selected row ids in row order.
    pub fn selected_keys(&self) -> Vec<String> {
        self.selection.selected()
    }

    /// Whether a row is selected.
    pub fn is_row_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    /// Runs the pipeline over the current rows.
    pub fn view(&self) -> QueryResult {
        self.effective_query().run(&self.rows, &self.columns)
    }

    fn effective_query(&self) -> ListQuery {
        let mut query = self.query.clone();
        if !self.config.searchable {
            query.search.clear();
        }
        if !self.config.filterable {
            query.filters = FilterSet::new();
        }
        query
    }

    // =========================================================================
    // Data
    // =========================================================================

    /// Replaces the rows. Selection of ids that disappear is kept.
    pub fn set_rows(&mut self, rows: Vec<Item>) {
        self.rows = rows;
        self.selection
            .set_item_order(self.rows.iter().map(|row| row.id.clone()));
        tracing::debug!(target: targets::TABLE, rows = self.rows.len(), "rows replaced");
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Header click: none → asc → desc → none. Another column starts at asc.
    pub fn toggle_sort(&mut self, key: &str) -> Update {
        if !self.config.sortable {
            return Update::none();
        }
        let Some(column) = self.columns.iter().find(|column| column.key == key) else {
            return Update::none();
        };
        if !column.sortable {
            return Update::none();
        }

        let next = match &self.query.sort {
            Some(current) if current.key == key => match current.direction {
                SortDirection::Asc => Some(SortSpec::desc(key)),
                SortDirection::Desc => None,
            },
            _ => Some(SortSpec::asc(key)),
        };
        self.set_sort(next)
    }

    /// Sets the sort directly.
    pub fn set_sort(&mut self, sort: Option<SortSpec>) -> Update {
        if self.query.sort == sort {
            return Update::none();
        }
        tracing::debug!(target: targets::TABLE, ?sort, "sort changed");
        self.query.sort = sort.clone();
        Update::none().emit(EngineEvent::SortChange { sort })
    }

    /// Direction of the sort on `key`, if it is the sorted column.
    pub fn sort_direction(&self, key: &str) -> Option<SortDirection> {
        self.query
            .sort
            .as_ref()
            .filter(|sort| sort.key == key)
            .map(|sort| sort.direction)
    }

    // =========================================================================
    // Search and Filters
    // =========================================================================

    /// Sets the search text. Returns to the first page.
    pub fn set_search(&mut self, search: impl Into<String>) -> Update {
        let search = search.into();
        if !self.config.searchable || self.query.search == search {
            return Update::none();
        }
        self.query.search = search.clone();
        Update::none()
            .emit(EngineEvent::QueryChange { query: search })
            .merge(self.rewind())
    }

    /// Sets one column filter; an empty value removes it. Returns to the
    /// first page.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) -> Update {
        if !self.config.filterable || !self.query.filters.set(key, value) {
            return Update::none();
        }
        Update::none()
            .emit(EngineEvent::FilterChange {
                filters: self.query.filters.clone(),
            })
            .merge(self.rewind())
    }

    /// Removes every filter.
    pub fn clear_filters(&mut self) -> Update {
        if !self.query.filters.clear() {
            return Update::none();
        }
        Update::none()
            .emit(EngineEvent::FilterChange {
                filters: FilterSet::new(),
            })
            .merge(self.rewind())
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Moves to the next page if there is one.
    pub fn next_page(&mut self) -> Update {
        match self.query.page {
            Some(page) if self.view().has_next => self.go_to(page.with_index(page.page_index() + 1)),
            _ => Update::none(),
        }
    }

    /// Moves to the previous page if there is one.
    pub fn previous_page(&mut self) -> Update {
        match self.query.page {
            Some(page) if page.page_index() > 0 => self.go_to(page.with_index(page.page_index() - 1)),
            _ => Update::none(),
        }
    }

    /// Jumps to a page. Out-of-range indexes are accepted and show no rows.
    pub fn set_page_index(&mut self, page_index: usize) -> Update {
        match self.query.page {
            Some(page) if page.page_index() != page_index => self.go_to(page.with_index(page_index)),
            _ => Update::none(),
        }
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<Update> {
        let page = PageSpec::first(page_size)?;
        if self.query.page == Some(page) {
            return Ok(Update::none());
        }
        self.config.page_size = Some(page_size);
        Ok(self.go_to(page))
    }

    fn go_to(&mut self, page: PageSpec) -> Update {
        self.query.page = Some(page);
        tracing::debug!(target: targets::TABLE, page_index = page.page_index(), "page changed");
        Update::none().emit(EngineEvent::PageChange {
            page_index: page.page_index(),
            page_size: page.page_size(),
        })
    }

    fn rewind(&mut self) -> Update {
        match self.query.page {
            Some(page) if page.page_index() > 0 => self.go_to(page.with_index(0)),
            _ => Update::none(),
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Toggles one row.
    pub fn toggle_row(&mut self, id: &str) -> Update {
        if !self.config.selectable {
            return Update::none();
        }
        match self.selection.toggle(id) {
            Ok(outcome) => Self::selection_update(outcome),
            Err(rejected) => {
                tracing::debug!(target: targets::TABLE, %rejected, "row selection rejected");
                Update::none()
            }
        }
    }

    /// Header checkbox click: clears when every visible row is selected,
    /// otherwise replaces the selection with exactly the visible rows.
    pub fn toggle_all_rows(&mut self) -> Update {
        if !self.config.selectable {
            return Update::none();
        }
        let outcome = match self.header_checkbox() {
            HeaderCheckbox::Checked => Ok(self.selection.clear()),
            _ => {
                let visible: Vec<String> = self.view().rows.into_iter().map(|row| row.id).collect();
                self.selection.set(visible)
            }
        };
        match outcome {
            Ok(outcome) => Self::selection_update(outcome),
            Err(rejected) => {
                tracing::debug!(target: targets::TABLE, %rejected, "select all rejected");
                Update::none()
            }
        }
    }

    /// State of the header checkbox for the visible rows.
    pub fn header_checkbox(&self) -> HeaderCheckbox {
        let view = self.view();
        let selected = view
            .rows
            .iter()
            .filter(|row| self.selection.is_selected(&row.id))
            .count();
        match selected {
            0 => HeaderCheckbox::Unchecked,
            n if n == view.rows.len() => HeaderCheckbox::Checked,
            _ => HeaderCheckbox::Indeterminate,
        }
    }

    fn selection_update(outcome: SelectionOutcome) -> Update {
        match outcome {
            SelectionOutcome::Changed(keys) => {
                Update::none().emit(EngineEvent::SelectionChanged { keys })
            }
            SelectionOutcome::Unchanged => Update::none(),
        }
    }

    // =========================================================================
    // Reordering
    // =========================================================================

    /// Moves a row to `to` in the underlying row order.
    pub fn move_row(&mut self, id: &str, to: usize) -> Update {
        if !self.config.reorderable {
            return Update::none();
        }
        let Some(from) = self.rows.iter().position(|row| row.id == id) else {
            return Update::none();
        };
        let to = to.min(self.rows.len() - 1);
        if from == to {
            return Update::none();
        }

        let row = self.rows.remove(from);
        self.rows.insert(to, row);
        self.selection
            .set_item_order(self.rows.iter().map(|row| row.id.clone()));
        tracing::debug!(target: targets::TABLE, id, from, to, "row moved");

        Update::none().emit(EngineEvent::Reorder {
            rows: self.rows.iter().map(|row| row.id.clone()).collect(),
        })
    }

    /// Moves a row one position up.
    pub fn move_row_up(&mut self, id: &str) -> Update {
        match self.rows.iter().position(|row| row.id == id) {
            Some(index) if index > 0 => self.move_row(id, index - 1),
            _ => Update::none(),
        }
    }

    /// Moves a row one position down.
    pub fn move_row_down(&mut self, id: &str) -> Update {
        match self.rows.iter().position(|row| row.id == id) {
            Some(index) => self.move_row(id, index + 1),
            None => Update::none(),
        }
    }

    // =========================================================================
    // Columns
    // =========================================================================

    /// Swaps a column with its neighbour.
    pub fn move_column(&mut self, key: &str, direction: ColumnMove) -> Update {
        let Some(index) = self.columns.iter().position(|column| column.key == key) else {
            return Update::none();
        };
        let target = match direction {
            ColumnMove::Left if index > 0 => index - 1,
            ColumnMove::Right if index + 1 < self.columns.len() => index + 1,
            _ => return Update::none(),
        };
        self.columns.swap(index, target);

        Update::none().emit(EngineEvent::ColumnOrderChange {
            order: self.columns.iter().map(|column| column.key.clone()).collect(),
        })
    }

    /// Shows or hides a column.
    pub fn set_column_visible(&mut self, key: &str, visible: bool) -> Update {
        let Some(column) = self.columns.iter_mut().find(|column| column.key == key) else {
            return Update::none();
        };
        if column.visible == visible {
            return Update::none();
        }
        column.visible = visible;
        Update::none().emit(EngineEvent::ColumnVisibilityChange {
            key: key.to_string(),
            visible,
        })
    }
}
