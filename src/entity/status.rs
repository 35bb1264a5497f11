//! Active/inactive status and its wire encodings.
//!
//! The gateway is inconsistent: some contracts carry a JSON boolean, others
//! a `"True"`/`"False"` string. Decoding accepts both; encoding goes through
//! [`Status::encode`] with the encoding declared by each entity.

use fake::{Dummy, Faker};
use rand::Rng;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Record status as shown in the console.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Active,
    Inactive,
}

/// How a wire contract represents a status.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusEncoding {
    Boolean,
    TitleCaseString,
}

impl Status {
    /// Returns the status for a boolean flag.
    ///
    pub fn from_flag(active: bool) -> Self {
        if active {
            Status::Active
        } else {
            Status::Inactive
        }
    }

    /// Parses a textual status. Accepts `true`/`false` in any case and the
    /// display labels.
    ///
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "true" | "active" | "1" => Some(Status::Active),
            "false" | "inactive" | "0" => Some(Status::Inactive),
            _ => None,
        }
    }

    pub fn is_active(self) -> bool {
        self == Status::Active
    }

    pub fn toggled(self) -> Self {
        Status::from_flag(!self.is_active())
    }

    /// Returns the display label.
    ///
    pub fn label(self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Inactive => "Inactive",
        }
    }

    /// Serializes for the given wire contract.
    ///
    pub fn encode(self, encoding: StatusEncoding) -> Value {
        match encoding {
            StatusEncoding::Boolean => Value::Bool(self.is_active()),
            StatusEncoding::TitleCaseString => {
                Value::String(if self.is_active() { "True" } else { "False" }.to_string())
            }
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StatusVisitor;

        impl<'de> Visitor<'de> for StatusVisitor {
            type Value = Status;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a boolean or a \"True\"/\"False\" string")
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<Status, E> {
                Ok(Status::from_flag(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Status, E> {
                Ok(Status::from_flag(value != 0))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Status, E> {
                Ok(Status::from_flag(value != 0))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Status, E> {
                Status::parse(value).ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Status, E> {
                Ok(Status::Inactive)
            }
        }

        deserializer.deserialize_any(StatusVisitor)
    }
}

impl Dummy<Faker> for Status {
    fn dummy_with_rng<R: Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        Status::from_flag(rng.gen_bool(0.5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_boolean_true_renders_active() {
        let status: Status = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(status.to_string(), "Active");
    }

    #[test]
    fn test_false_renders_inactive() {
        let status: Status = serde_json::from_value(json!(false)).unwrap();
        assert_eq!(status.to_string(), "Inactive");
        let status: Status = serde_json::from_value(json!("False")).unwrap();
        assert_eq!(status.to_string(), "Inactive");
    }

    #[test]
    fn test_string_true_any_case() {
        for raw in ["True", "true", "TRUE", "Active"] {
            let status: Status = serde_json::from_value(json!(raw)).unwrap();
            assert_eq!(status, Status::Active);
        }
    }

    #[test]
    fn test_null_is_inactive() {
        let status: Status = serde_json::from_value(Value::Null).unwrap();
        assert_eq!(status, Status::Inactive);
    }

    #[test]
    fn test_unknown_string_is_rejected() {
        assert!(serde_json::from_value::<Status>(json!("maybe")).is_err());
    }

    #[test]
    fn test_encode_per_contract() {
        assert_eq!(Status::Active.encode(StatusEncoding::Boolean), json!(true));
        assert_eq!(Status::Inactive.encode(StatusEncoding::Boolean), json!(false));
        assert_eq!(
            Status::Active.encode(StatusEncoding::TitleCaseString),
            json!("True")
        );
        assert_eq!(
            Status::Inactive.encode(StatusEncoding::TitleCaseString),
            json!("False")
        );
    }

    #[test]
    fn test_toggled() {
        assert_eq!(Status::Active.toggled(), Status::Inactive);
        assert_eq!(Status::Inactive.toggled(), Status::Active);
    }
}
