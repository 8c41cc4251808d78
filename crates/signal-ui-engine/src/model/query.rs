//! List query pipeline: search, filter, sort and paginate.
//!
//! A [`ListQuery`] is a plain description of what the user asked for. Running
//! it against a slice of items is a pure function with a fixed stage order:
//!
//! 1. **search** - case-insensitive substring match on the text of every
//!    filterable column, OR-ed across columns
//! 2. **filter** - exact text equality per filtered column, AND-ed
//! 3. **sort** - single key, stable, nulls last in both directions
//! 4. **paginate** - a half-open window over the sorted rows
//!
//! Nothing is cached between runs; the result always reflects the current
//! inputs.
//!
//! # Example
//!
//! ```
//! use signal_ui_engine::model::{Column, Item, ListQuery};
//!
//! let items = vec![
//!     Item::new("a").with_field("name", "Ada"),
//!     Item::new("b").with_field("name", "Grace"),
//! ];
//! let columns = vec![Column::new("name")];
//!
//! let result = ListQuery::new().with_search("grace").run(&items, &columns);
//! assert_eq!(result.ids(), vec!["b"]);
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::item::{Column, Item};
use crate::error::{EngineError, Result};
use crate::logging::targets;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// The active sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    /// Column key to sort by.
    pub key: String,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Ascending sort on `key`.
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on `key`.
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Compares two items under this spec. Nulls go last in either direction.
    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        let (a, b) = (a.value(&self.key), b.value(&self.key));
        match (a.is_null(), b.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ord = a.natural_cmp(b);
                match self.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            }
        }
    }
}

/// Per-column filter values.
///
/// Setting an empty value removes the constraint for that column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    values: BTreeMap<String, String>,
}

impl FilterSet {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter value for a column. Returns true if anything changed.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        let value = value.into();
        if value.is_empty() {
            return self.values.remove(&key).is_some();
        }
        self.values.insert(key, value.clone()).as_deref() != Some(value.as_str())
    }

    /// Gets the filter value for a column.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Removes every constraint. Returns true if anything was removed.
    pub fn clear(&mut self) -> bool {
        let had_values = !self.values.is_empty();
        self.values.clear();
        had_values
    }

    /// Returns true if no column is constrained.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(key, value)` constraints.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns true if the item satisfies every constraint.
    pub fn matches(&self, item: &Item) -> bool {
        self.values
            .iter()
            .all(|(key, value)| item.value(key).to_string() == *value)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filters = FilterSet::new();
        for (k, v) in iter {
            filters.set(k, v);
        }
        filters
    }
}

/// A page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPageSpec")]
pub struct PageSpec {
    page_index: usize,
    page_size: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPageSpec {
    #[serde(default)]
    page_index: usize,
    page_size: usize,
}

impl TryFrom<RawPageSpec> for PageSpec {
    type Error = EngineError;

    fn try_from(raw: RawPageSpec) -> Result<Self> {
        Self::new(raw.page_index, raw.page_size)
    }
}

impl PageSpec {
    /// Creates a page spec. A zero page size is rejected.
    pub fn new(page_index: usize, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(EngineError::InvalidPageSize);
        }
        Ok(Self {
            page_index,
            page_size,
        })
    }

    /// The first page of the given size.
    pub fn first(page_size: usize) -> Result<Self> {
        Self::new(0, page_size)
    }

    /// Zero-based page index.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Rows per page, always greater than zero.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the same size at another index.
    pub fn with_index(self, page_index: usize) -> Self {
        Self { page_index, ..self }
    }

    /// `ceil(total / page_size)`.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// Offset of the first row on this page.
    pub fn start(&self) -> usize {
        self.page_index.saturating_mul(self.page_size)
    }

    /// Offset one past the last row on this page, before clamping to the total.
    pub fn end(&self) -> usize {
        self.start().saturating_add(self.page_size)
    }
}

/// Case-insensitive substring test.
///
/// An empty needle always matches.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Returns true if the item passes the search stage.
///
/// Only filterable columns are searched. An empty query matches everything.
pub fn matches_search(item: &Item, columns: &[Column], query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    columns
        .iter()
        .filter(|column| column.filterable)
        .any(|column| {
            item.value(&column.key)
                .to_string()
                .to_lowercase()
                .contains(&needle)
        })
}

/// A complete query over a list of items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Free-text search.
    #[serde(default)]
    pub search: String,
    /// Per-column filters.
    #[serde(default)]
    pub filters: FilterSet,
    /// Active sort, if any.
    #[serde(default)]
    pub sort: Option<SortSpec>,
    /// Page window. `None` returns every row.
    #[serde(default)]
    pub page: Option<PageSpec>,
}

impl ListQuery {
    /// Creates an empty query that returns every row in input order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search text.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Adds a column filter.
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.set(key, value);
        self
    }

    /// Sets the sort.
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Sets the page window.
    pub fn with_page(mut self, page: PageSpec) -> Self {
        self.page = Some(page);
        self
    }

    /// Runs search and filter only, keeping input order.
    pub fn filtered<'a>(&self, items: &'a [Item], columns: &[Column]) -> Vec<&'a Item> {
        items
            .iter()
            .filter(|item| matches_search(item, columns, &self.search))
            .filter(|item| self.filters.matches(item))
            .collect()
    }

    /// Runs search, filter and sort, without paging.
    pub fn sorted<'a>(&self, items: &'a [Item], columns: &[Column]) -> Vec<&'a Item> {
        let mut rows = self.filtered(items, columns);
        if let Some(sort) = &self.sort {
            // sort_by is stable
            rows.sort_by(|a, b| sort.compare(a, b));
        }
        rows
    }

    /// Runs the whole pipeline.
    pub fn run(&self, items: &[Item], columns: &[Column]) -> QueryResult {
        let rows = self.sorted(items, columns);
        let total = rows.len();

        let result = match self.page {
            Some(page) => {
                let start = page.start().min(total);
                let end = page.end().min(total);
                QueryResult {
                    rows: rows[start..end].iter().map(|item| (*item).clone()).collect(),
                    total,
                    page_index: page.page_index(),
                    page_count: page.page_count(total),
                    has_previous: page.page_index() > 0,
                    has_next: page.end() < total,
                }
            }
            None => QueryResult {
                rows: rows.into_iter().cloned().collect(),
                total,
                page_index: 0,
                page_count: usize::from(total > 0),
                has_previous: false,
                has_next: false,
            },
        };

        tracing::trace!(
            target: targets::QUERY,
            input = items.len(),
            total,
            shown = result.rows.len(),
            "query run"
        );
        result
    }
}

/// Output of [`ListQuery::run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// Rows of the current page.
    pub rows: Vec<Item>,
    /// Row count after search and filter, before paging.
    pub total: usize,
    /// Current page index.
    pub page_index: usize,
    /// Number of pages.
    pub page_count: usize,
    /// Whether a previous page exists.
    pub has_previous: bool,
    /// Whether the current page ends before the last row.
    pub has_next: bool,
}

impl QueryResult {
    /// Ids of the rows on the current page.
    pub fn ids(&self) -> Vec<&str> {
        self.rows.iter().map(|item| item.id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    fn people() -> Vec<Item> {
        vec![
            Item::new("1").with_field("name", "Linus").with_field("age", 54),
            Item::new("2").with_field("name", "Ada").with_field("age", 36),
            Item::new("3").with_field("name", "Grace").with_field("age", CellValue::Null),
            Item::new("4").with_field("name", "Alan").with_field("age", 41),
            Item::new("5").with_field("name", "Barbara").with_field("age", 36),
        ]
    }

    fn columns() -> Vec<Column> {
        vec![Column::new("name"), Column::new("age")]
    }

    #[test]
    fn test_empty_query_returns_input_order() {
        let result = ListQuery::new().run(&people(), &columns());
        assert_eq!(result.ids(), vec!["1", "2", "3", "4", "5"]);
        assert_eq!(result.total, 5);
        assert_eq!(result.page_count, 1);
    }

    #[test]
    fn test_search_case_insensitive() {
        let items = vec![
            Item::new("a").with_field("name", "Ada"),
            Item::new("b").with_field("name", "Grace"),
        ];
        let result = ListQuery::new()
            .with_search("grace")
            .run(&items, &[Column::new("name")]);
        assert_eq!(result.ids(), vec!["b"]);
    }

    #[test]
    fn test_search_ors_columns_and_skips_unfilterable() {
        let cols = vec![Column::new("name"), Column::new("age").with_filterable(false)];
        let result = ListQuery::new().with_search("36").run(&people(), &cols);
        assert!(result.rows.is_empty());

        let result = ListQuery::new().with_search("36").run(&people(), &columns());
        assert_eq!(result.ids(), vec!["2", "5"]);
    }

    #[test]
    fn test_filters_are_anded() {
        let query = ListQuery::new()
            .with_filter("age", "36")
            .with_filter("name", "Ada");
        assert_eq!(query.run(&people(), &columns()).ids(), vec!["2"]);
    }

    #[test]
    fn test_empty_filter_value_is_no_constraint() {
        let mut filters = FilterSet::new();
        assert!(filters.set("age", "36"));
        assert!(!filters.set("age", "36"));
        assert!(filters.set("age", ""));
        assert!(filters.is_empty());
    }

    #[test]
    fn test_sort_numeric_nulls_last_both_directions() {
        let asc = ListQuery::new().with_sort(SortSpec::asc("age"));
        assert_eq!(asc.run(&people(), &columns()).ids(), vec!["2", "5", "4", "1", "3"]);

        let desc = ListQuery::new().with_sort(SortSpec::desc("age"));
        assert_eq!(desc.run(&people(), &columns()).ids(), vec!["1", "4", "2", "5", "3"]);
    }

    #[test]
    fn test_sort_is_stable() {
        // "2" and "5" tie on age and keep their input order in both directions.
        let desc = ListQuery::new().with_sort(SortSpec::desc("age"));
        let ids = desc.run(&people(), &columns()).ids().join(",");
        assert!(ids.contains("2,5"));
    }

    #[test]
    fn test_query_is_idempotent() {
        let query = ListQuery::new()
            .with_search("a")
            .with_sort(SortSpec::asc("name"))
            .with_page(PageSpec::new(0, 2).unwrap());
        let items = people();
        assert_eq!(query.run(&items, &columns()), query.run(&items, &columns()));
    }

    #[test]
    fn test_last_partial_page() {
        let query = ListQuery::new().with_page(PageSpec::new(2, 2).unwrap());
        let result = query.run(&people(), &columns());

        assert_eq!(result.ids(), vec!["5"]);
        assert_eq!(result.page_count, 3);
        assert!(result.has_previous);
        assert!(!result.has_next);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let query = ListQuery::new().with_page(PageSpec::new(9, 2).unwrap());
        let result = query.run(&people(), &columns());
        assert!(result.rows.is_empty());
        assert_eq!(result.total, 5);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert_eq!(PageSpec::new(0, 0), Err(EngineError::InvalidPageSize));
    }

    #[test]
    fn test_zero_page_size_rejected_in_json() {
        assert!(serde_json::from_str::<PageSpec>(r#"{"pageSize":0}"#).is_err());
    }

    #[test]
    fn test_query_from_json() {
        let query: ListQuery = serde_json::from_str(
            r#"{"search":"a","filters":{"age":"36"},"sort":{"key":"name","direction":"desc"}}"#,
        )
        .unwrap();
        assert_eq!(query.sort, Some(SortSpec::desc("name")));
        assert_eq!(query.filters.get("age"), Some("36"));
        assert!(query.page.is_none());
    }
}
