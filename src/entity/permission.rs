use super::*;
use fake::Dummy;
use serde_json::json;

/// Defines permission data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct Permission {
    pub id: String,
    pub name: String,
    pub key: String,
    pub module: String,
    pub description: String,
    pub status: Status,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

const COLUMNS: &[Column] = &[
    Column { field: "name", title: "Permission", width: 22 },
    Column { field: "key", title: "Key", width: 20 },
    Column { field: "module", title: "Module", width: 16 },
    Column { field: "description", title: "Description", width: 30 },
    Column { field: "status", title: "Status", width: 10 },
];

const FORM: &[FormField] = &[
    FormField::text("name", "Permission Name", true),
    FormField::text("key", "Permission Key", true),
    FormField::text("module", "Module", true),
    FormField::text("description", "Description", false),
    FormField::status(),
];

impl Record for Permission {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "name" => FieldValue::text(&self.name),
            "key" => FieldValue::text(&self.key),
            "module" => FieldValue::text(&self.module),
            "description" => FieldValue::text(&self.description),
            "status" => FieldValue::text(self.status.label()),
            "createdAt" => FieldValue::optional(self.created_at.as_deref()),
            "updatedAt" => FieldValue::optional(self.updated_at.as_deref()),
            _ => FieldValue::Missing,
        }
    }
}

impl Entity for Permission {
    const KIND: EntityKind = EntityKind::Permission;
    const STATUS_ENCODING: StatusEncoding = StatusEncoding::Boolean;

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["name", "key", "module", "description"]
    }

    fn form_fields() -> &'static [FormField] {
        FORM
    }

    fn unique_field() -> &'static str {
        "key"
    }

    fn from_wire(value: &Value) -> Result<Self, WireError> {
        let wire = WireObject::new("permission", value)?;
        Ok(Permission {
            id: wire.id(&["permissionId", "id"])?,
            name: wire.text(&["permissionName", "name"]),
            key: wire.text(&["permissionKey", "key"]),
            module: wire.text(&["moduleName", "module"]),
            description: wire.text(&["description"]),
            status: wire.status(&["isActive", "status"])?,
            created_at: wire.optional_text(&["createdAt"]),
            updated_at: wire.optional_text(&["updatedAt"]),
        })
    }

    fn to_wire(&self, mode: SaveMode) -> Value {
        let payload = json!({
            "permissionName": self.name,
            "permissionKey": self.key,
            "moduleName": self.module,
            "description": self.description,
            "isActive": self.status.encode(Self::STATUS_ENCODING),
        });
        with_identity(payload, "permissionId", &self.id, mode)
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("name", &self.name)
            .with("key", &self.key)
            .with("module", &self.module)
            .with("description", &self.description)
            .with("status", self.status.label())
    }

    fn from_form(id: Option<&str>, values: &FormValues) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", "Permission name", values.get("name"));
        errors.require("key", "Permission key", values.get("key"));
        if values.get("key").trim().contains(char::is_whitespace) {
            errors.add("key", "Permission key cannot contain spaces");
        }
        errors.require("module", "Module", values.get("module"));
        errors.into_result(Permission {
            id: id.unwrap_or_default().to_owned(),
            name: values.trimmed("name"),
            key: values.trimmed("key").to_lowercase(),
            module: values.trimmed("module"),
            description: values.trimmed("description"),
            status: values.status("status"),
            created_at: None,
            updated_at: None,
        })
    }

    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    fn updated_at(&self) -> Option<&str> {
        self.updated_at.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_unique_field() {
        let permission = Permission::from_wire(&json!({
            "permissionId": 2,
            "permissionName": "Delete records",
            "permissionKey": "delete",
            "moduleName": "Users",
            "isActive": true
        }))
        .unwrap();
        assert_eq!(permission.unique_value(), "delete");
    }

    #[test]
    fn test_key_without_spaces() {
        let errors = Permission::from_form(
            None,
            &FormValues::new()
                .with("name", "Delete")
                .with("key", "delete all")
                .with("module", "Users"),
        )
        .unwrap_err();
        assert_eq!(
            errors.get("key"),
            Some("Permission key cannot contain spaces")
        );
    }
}
