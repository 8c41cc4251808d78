//! Tagged cell values.
//!
//! Rows coming from a rendering layer are arbitrary key/value maps. The
//! engine narrows every cell to a [`CellValue`] so that search, filtering and
//! sorting have well-defined semantics without reflection.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// No value. Sorts last in both directions.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// Text value.
    Text(String),
}

impl CellValue {
    /// Returns true for [`CellValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the text payload, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric payload, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    // Rank used when two values of different kinds meet in a sort.
    fn kind_rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Number(_) => 1,
            Self::Text(_) => 2,
            Self::Null => 3,
        }
    }

    /// Natural ordering for non-null values.
    ///
    /// Numbers compare numerically, text lexicographically and booleans with
    /// `false < true`. Values of different kinds order by kind so the result
    /// is still a total order. Null handling is left to the caller because
    /// nulls sort last regardless of direction.
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_integral_numbers_without_fraction() {
        assert_eq!(CellValue::from(42).to_string(), "42");
        assert_eq!(CellValue::from(2.5).to_string(), "2.5");
        assert_eq!(CellValue::from(-3.0).to_string(), "-3");
    }

    #[test]
    fn test_display_other_kinds() {
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::from(true).to_string(), "true");
        assert_eq!(CellValue::from("Ada").to_string(), "Ada");
    }

    #[test]
    fn test_natural_cmp_numbers_are_numeric() {
        // "10" < "9" lexicographically, but not numerically
        assert_eq!(
            CellValue::from(10).natural_cmp(&CellValue::from(9)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_natural_cmp_mixed_kinds() {
        assert_eq!(
            CellValue::from(true).natural_cmp(&CellValue::from(1)),
            Ordering::Less
        );
        assert_eq!(
            CellValue::from("a").natural_cmp(&CellValue::from(1)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_option_conversion() {
        assert!(CellValue::from(None::<&str>).is_null());
        assert_eq!(CellValue::from(Some("x")).as_str(), Some("x"));
    }

    #[test]
    fn test_untagged_json() {
        let values: Vec<CellValue> = serde_json::from_str(r#"[null, true, 3, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                CellValue::Null,
                CellValue::Bool(true),
                CellValue::Number(3.0),
                CellValue::Text("x".into())
            ]
        );
    }
}
