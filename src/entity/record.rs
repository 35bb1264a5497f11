//! Field-level access to entity records.
//!
//! The list view never knows concrete entity types. It reads attributes by
//! name through the [`Record`] trait and compares them as [`FieldValue`]s.

use std::cmp::Ordering;
use std::fmt;

/// Value of a named record attribute.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Missing,
}

impl FieldValue {
    /// Returns a text value, mapping empty strings to `Missing`.
    ///
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            FieldValue::Missing
        } else {
            FieldValue::Text(value)
        }
    }

    /// Returns an optional text value.
    ///
    pub fn optional(value: Option<&str>) -> Self {
        match value {
            Some(value) => FieldValue::text(value),
            None => FieldValue::Missing,
        }
    }

    /// Returns a comma-joined list value.
    ///
    pub fn list(values: &[String]) -> Self {
        FieldValue::text(values.join(", "))
    }

    /// Returns whether the lowercase string form contains the given
    /// lowercase needle. Missing values never match.
    ///
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        match self {
            FieldValue::Missing => false,
            other => other.to_string().to_lowercase().contains(needle),
        }
    }

    /// Compares two values for sorting. Missing sorts lowest and text
    /// compares case-insensitively.
    ///
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Missing, FieldValue::Missing) => Ordering::Equal,
            (FieldValue::Missing, _) => Ordering::Less,
            (_, FieldValue::Missing) => Ordering::Greater,
            (FieldValue::Flag(a), FieldValue::Flag(b)) => a.cmp(b),
            (a, b) => a.to_string().to_lowercase().cmp(&b.to_string().to_lowercase()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(value) => write!(f, "{}", value),
            FieldValue::Flag(value) => write!(f, "{}", value),
            FieldValue::Missing => Ok(()),
        }
    }
}

/// A client-side entity instance addressed by identity and named fields.
///
pub trait Record: Clone {
    /// Returns the identity of the record.
    ///
    fn id(&self) -> &str;

    /// Returns the value of the named field or `Missing` for unknown names.
    ///
    fn field(&self, name: &str) -> FieldValue;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sorts_lowest() {
        let missing = FieldValue::Missing;
        let text = FieldValue::text("a");
        assert_eq!(missing.compare(&text), Ordering::Less);
        assert_eq!(text.compare(&missing), Ordering::Greater);
        assert_eq!(missing.compare(&FieldValue::Missing), Ordering::Equal);
    }

    #[test]
    fn test_text_compares_case_insensitively() {
        let upper = FieldValue::text("Texas");
        let lower = FieldValue::text("texas");
        assert_eq!(upper.compare(&lower), Ordering::Equal);
        assert_eq!(
            FieldValue::text("alabama").compare(&FieldValue::text("Texas")),
            Ordering::Less
        );
    }

    #[test]
    fn test_empty_text_is_missing() {
        assert_eq!(FieldValue::text(""), FieldValue::Missing);
        assert_eq!(FieldValue::optional(None), FieldValue::Missing);
        assert_eq!(FieldValue::list(&[]), FieldValue::Missing);
    }

    #[test]
    fn test_contains_lowercase() {
        let value = FieldValue::text("New Delhi");
        assert!(value.contains_lowercase("delhi"));
        assert!(!value.contains_lowercase("mumbai"));
        assert!(!FieldValue::Missing.contains_lowercase(""));
        assert!(FieldValue::Flag(true).contains_lowercase("tru"));
    }
}
