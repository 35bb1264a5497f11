//! Decoding helpers for gateway records.
//!
//! Gateway payloads name the same attribute differently across endpoints
//! (`countryName` here, `name` there, numeric or string identifiers). Each
//! lookup takes a list of candidate keys and uses the first present one.

use super::Status;
use serde_json::{Map, Value};

/// Failure to map a gateway record into a view model.
///
#[derive(Debug, thiserror::Error)]
#[error("Invalid {entity} record: {message}")]
pub struct WireError {
    pub entity: &'static str,
    pub message: String,
}

/// Borrowed view over one JSON object from the gateway.
///
pub struct WireObject<'a> {
    entity: &'static str,
    map: &'a Map<String, Value>,
}

impl<'a> WireObject<'a> {
    /// Wraps a JSON value, failing unless it is an object.
    ///
    pub fn new(entity: &'static str, value: &'a Value) -> Result<Self, WireError> {
        match value.as_object() {
            Some(map) => Ok(WireObject { entity, map }),
            None => Err(WireError {
                entity,
                message: format!("expected an object, found {}", value),
            }),
        }
    }

    fn first(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .filter_map(|key| self.map.get(*key))
            .find(|value| !value.is_null())
    }

    /// Returns the identifier, accepting strings and numbers.
    ///
    pub fn id(&self, keys: &[&str]) -> Result<String, WireError> {
        match self.first(keys) {
            Some(Value::String(id)) if !id.is_empty() => Ok(id.to_owned()),
            Some(Value::Number(id)) => Ok(id.to_string()),
            _ => Err(WireError {
                entity: self.entity,
                message: format!("missing identifier (looked for {})", keys.join(", ")),
            }),
        }
    }

    /// Returns a text attribute or an empty string when absent.
    ///
    pub fn text(&self, keys: &[&str]) -> String {
        self.optional_text(keys).unwrap_or_default()
    }

    /// Returns a text attribute when present.
    ///
    pub fn optional_text(&self, keys: &[&str]) -> Option<String> {
        match self.first(keys)? {
            Value::String(text) => Some(text.to_owned()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }

    /// Returns the status, treating an absent status as active.
    ///
    pub fn status(&self, keys: &[&str]) -> Result<Status, WireError> {
        match self.first(keys) {
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| WireError {
                entity: self.entity,
                message: e.to_string(),
            }),
            None => Ok(Status::Active),
        }
    }

    /// Returns a list attribute. Accepts arrays of strings, arrays of
    /// objects carrying one of `name_keys`, and comma-separated strings.
    ///
    pub fn list(&self, keys: &[&str], name_keys: &[&str]) -> Vec<String> {
        match self.first(keys) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text.to_owned()),
                    Value::Object(object) => name_keys
                        .iter()
                        .filter_map(|key| object.get(*key))
                        .find_map(|value| value.as_str().map(str::to_owned)),
                    _ => None,
                })
                .collect(),
            Some(Value::String(text)) => split_list(text),
            _ => vec![],
        }
    }
}

/// Splits a comma-separated list, dropping blank entries.
///
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Formats an audit timestamp for display, passing unparseable input through.
///
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = chrono::DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(parsed) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_owned()
}
