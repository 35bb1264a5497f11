//! Entity schemas for the reference data managed by the console.
//!
//! Each entity type is configuration over the generic list view and screen:
//! - table columns and searchable fields
//! - form fields, validation and the unique field for duplicate checks
//! - mapping from gateway field names to view-model fields
//! - request payload construction, including the status encoding

mod city;
mod country;
mod module;
mod permission;
mod record;
mod role;
mod state_province;
mod status;
mod user;
pub mod validation;
pub mod wire;

pub use city::City;
pub use country::Country;
pub use module::Module;
pub use permission::Permission;
pub use record::{FieldValue, Record};
pub use role::Role;
pub use state_province::StateProvince;
pub use status::{Status, StatusEncoding};
pub use user::User;
pub use validation::ValidationErrors;
pub use wire::{WireError, WireObject};

use serde_json::Value;
use std::collections::BTreeMap;

/// Specifying the different entity types.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    User,
    Role,
    Permission,
    Module,
    Country,
    State,
    City,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::User,
        EntityKind::Role,
        EntityKind::Permission,
        EntityKind::Module,
        EntityKind::Country,
        EntityKind::State,
        EntityKind::City,
    ];

    /// Returns the singular display name.
    ///
    pub fn singular(self) -> &'static str {
        match self {
            EntityKind::User => "User",
            EntityKind::Role => "Role",
            EntityKind::Permission => "Permission",
            EntityKind::Module => "Module",
            EntityKind::Country => "Country",
            EntityKind::State => "State",
            EntityKind::City => "City",
        }
    }

    /// Returns the plural display name.
    ///
    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::User => "Users",
            EntityKind::Role => "Roles",
            EntityKind::Permission => "Permissions",
            EntityKind::Module => "Modules",
            EntityKind::Country => "Countries",
            EntityKind::State => "States",
            EntityKind::City => "Cities",
        }
    }
}

/// Whether a save creates a new record or replaces an existing one.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveMode {
    Create,
    Update,
}

/// Table column bound to a record field.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    pub field: &'static str,
    pub title: &'static str,
    pub width: u16,
}

/// Specifying how a form field is edited.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Toggle,
    List,
}

/// Form field definition.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FormField {
    pub const fn text(key: &'static str, label: &'static str, required: bool) -> Self {
        FormField {
            key,
            label,
            kind: FieldKind::Text,
            required,
        }
    }

    pub const fn list(key: &'static str, label: &'static str) -> Self {
        FormField {
            key,
            label,
            kind: FieldKind::List,
            required: false,
        }
    }

    pub const fn status() -> Self {
        FormField {
            key: "status",
            label: "Status",
            kind: FieldKind::Toggle,
            required: false,
        }
    }
}

/// Raw form input keyed by form field.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        FormValues::default()
    }

    /// Sets a value and returns self for chaining.
    ///
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_owned(), value.into());
    }

    /// Returns the raw value or an empty string.
    ///
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    /// Returns the trimmed value.
    ///
    pub fn trimmed(&self, key: &str) -> String {
        self.get(key).trim().to_owned()
    }

    /// Returns the trimmed value or `None` when blank.
    ///
    pub fn optional(&self, key: &str) -> Option<String> {
        let value = self.trimmed(key);
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Returns a comma-separated value as a list.
    ///
    pub fn list(&self, key: &str) -> Vec<String> {
        wire::split_list(self.get(key))
    }

    /// Returns a toggle value; blank means active.
    ///
    pub fn status(&self, key: &str) -> Status {
        Status::parse(self.get(key)).unwrap_or_default()
    }
}

/// A reference-data entity managed through a generic screen.
///
pub trait Entity: Record + Send + Sync + 'static {
    const KIND: EntityKind;
    const STATUS_ENCODING: StatusEncoding;

    fn columns() -> &'static [Column];

    fn searchable_fields() -> &'static [&'static str];

    fn form_fields() -> &'static [FormField];

    /// Returns the field whose value must be unique within the collection.
    ///
    fn unique_field() -> &'static str;

    /// Maps one gateway record into the view model.
    ///
    fn from_wire(value: &Value) -> Result<Self, WireError>
    where
        Self: Sized;

    /// Builds the request payload for a save.
    ///
    fn to_wire(&self, mode: SaveMode) -> Value;

    /// Returns the current values for an edit form.
    ///
    fn to_form(&self) -> FormValues;

    /// Validates form input and builds a record.
    ///
    fn from_form(id: Option<&str>, values: &FormValues) -> Result<Self, ValidationErrors>
    where
        Self: Sized;

    fn created_at(&self) -> Option<&str>;

    fn updated_at(&self) -> Option<&str>;

    /// Returns the value of the unique field for messages.
    ///
    fn unique_value(&self) -> String {
        self.field(Self::unique_field()).to_string()
    }

    /// Returns label/value pairs for the detail view.
    ///
    fn details(&self) -> Vec<(&'static str, String)> {
        let mut details = vec![("ID", self.id().to_owned())];
        details.extend(
            Self::columns()
                .iter()
                .map(|column| (column.title, self.field(column.field).to_string())),
        );
        if let Some(created_at) = self.created_at() {
            details.push(("Created", wire::format_timestamp(created_at)));
        }
        if let Some(updated_at) = self.updated_at() {
            details.push(("Updated", wire::format_timestamp(updated_at)));
        }
        details
    }
}

/// Inserts the identity into an update payload.
///
pub(crate) fn with_identity(mut payload: Value, key: &str, id: &str, mode: SaveMode) -> Value {
    if mode == SaveMode::Update {
        if let Value::Object(map) = &mut payload {
            let id_value = id
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(id.to_owned()));
            map.insert(key.to_owned(), id_value);
        }
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_names() {
        assert_eq!(EntityKind::State.singular(), "State");
        assert_eq!(EntityKind::City.plural(), "Cities");
        assert_eq!(EntityKind::ALL.len(), 7);
    }

    #[test]
    fn test_form_values() {
        let values = FormValues::new()
            .with("name", "  Texas ")
            .with("roles", "admin, employee")
            .with("status", "Inactive");
        assert_eq!(values.trimmed("name"), "Texas");
        assert_eq!(values.optional("missing"), None);
        assert_eq!(values.list("roles"), vec!["admin", "employee"]);
        assert_eq!(values.status("status"), Status::Inactive);
        assert_eq!(values.status("missing"), Status::Active);
    }

    #[test]
    fn test_with_identity_only_on_update() {
        let payload = with_identity(json!({ "a": 1 }), "id", "12", SaveMode::Update);
        assert_eq!(payload, json!({ "a": 1, "id": 12 }));
        let payload = with_identity(json!({ "a": 1 }), "id", "x-1", SaveMode::Update);
        assert_eq!(payload, json!({ "a": 1, "id": "x-1" }));
        let payload = with_identity(json!({ "a": 1 }), "id", "12", SaveMode::Create);
        assert_eq!(payload, json!({ "a": 1 }));
    }
}
