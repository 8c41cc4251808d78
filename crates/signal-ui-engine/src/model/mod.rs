//! Data model for the widget engine.
//!
//! This module contains the framework-free data structures the controllers
//! operate on:
//!
//! - [`CellValue`]: a tagged value stored in an item field
//! - [`Item`] and [`Column`]: rows/options and the keys that address them
//! - [`SelectionStore`]: single/multi selection with a size limit
//! - [`ListQuery`]: the search → filter → sort → paginate pipeline

pub mod item;
pub mod query;
pub mod selection;
pub mod value;

pub use item::{Column, Fields, Item};
pub use query::{
    contains_ignore_case, matches_search, FilterSet, ListQuery, PageSpec, QueryResult,
    SortDirection, SortSpec,
};
pub use selection::{SelectionMode, SelectionOutcome, SelectionRejected, SelectionStore};
pub use value::CellValue;
