//! Items and columns.
//!
//! An [`Item`] is an opaque record identified by a stable string id. The
//! engine only ever looks at its [`Fields`] through column keys; content
//! equality is irrelevant, identity is the id.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::value::CellValue;

/// Insertion-ordered mapping from column key to cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fields {
    entries: Vec<(String, CellValue)>,
}

impl Fields {
    /// Creates an empty field mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the value for a column key.
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Sets the value for a column key, keeping the position of an existing key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct FieldsVisitor;

impl<'de> Visitor<'de> for FieldsVisitor {
    type Value = Fields;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of column keys to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Fields, A::Error> {
        let mut fields = Fields::new();
        while let Some((key, value)) = access.next_entry::<String, CellValue>()? {
            fields.insert(key, value);
        }
        Ok(fields)
    }
}

impl<'de> Deserialize<'de> for Fields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FieldsVisitor)
    }
}

/// A row of a table or an option of a combobox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Stable identifier.
    pub id: String,
    /// Column values.
    #[serde(default)]
    pub fields: Fields,
    /// Disabled items cannot be selected.
    #[serde(default)]
    pub disabled: bool,
    /// Optional group tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl Item {
    /// Creates an item with no fields.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Fields::new(),
            disabled: false,
            group: None,
        }
    }

    /// Adds a field value.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.fields.insert(key, value);
        self
    }

    /// Sets the disabled flag.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Sets the group tag.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Gets the value of a column, `Null` when the column is absent.
    pub fn value(&self, key: &str) -> &CellValue {
        static NULL: CellValue = CellValue::Null;
        self.fields.get(key).unwrap_or(&NULL)
    }
}

/// A column definition. Columns are keys into an item's fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Field key.
    pub key: String,
    /// Whether the column can be sorted.
    #[serde(default = "default_true")]
    pub sortable: bool,
    /// Whether the column participates in search and filtering.
    #[serde(default = "default_true")]
    pub filterable: bool,
    /// Whether the column is shown.
    #[serde(default = "default_true")]
    pub visible: bool,
}

fn default_true() -> bool {
    true
}

impl Column {
    /// Creates a sortable, filterable, visible column.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            sortable: true,
            filterable: true,
            visible: true,
        }
    }

    /// Sets whether the column is sortable.
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Sets whether the column is searchable/filterable.
    pub fn with_filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }
}
