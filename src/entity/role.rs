use super::*;
use fake::Dummy;
use serde_json::json;

/// Defines role data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: String,
    pub permissions: Vec<String>,
    pub status: Status,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

const COLUMNS: &[Column] = &[
    Column { field: "name", title: "Role", width: 20 },
    Column { field: "description", title: "Description", width: 30 },
    Column { field: "permissions", title: "Permissions", width: 30 },
    Column { field: "status", title: "Status", width: 10 },
];

const FORM: &[FormField] = &[
    FormField::text("name", "Role Name", true),
    FormField::text("description", "Description", false),
    FormField::list("permissions", "Permissions (comma separated)"),
    FormField::status(),
];

impl Record for Role {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "name" => FieldValue::text(&self.name),
            "description" => FieldValue::text(&self.description),
            "permissions" => FieldValue::list(&self.permissions),
            "status" => FieldValue::text(self.status.label()),
            "createdAt" => FieldValue::optional(self.created_at.as_deref()),
            "updatedAt" => FieldValue::optional(self.updated_at.as_deref()),
            _ => FieldValue::Missing,
        }
    }
}

impl Entity for Role {
    const KIND: EntityKind = EntityKind::Role;
    const STATUS_ENCODING: StatusEncoding = StatusEncoding::Boolean;

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["name", "description", "permissions"]
    }

    fn form_fields() -> &'static [FormField] {
        FORM
    }

    fn unique_field() -> &'static str {
        "name"
    }

    fn from_wire(value: &Value) -> Result<Self, WireError> {
        let wire = WireObject::new("role", value)?;
        Ok(Role {
            id: wire.id(&["roleId", "id"])?,
            name: wire.text(&["roleName", "name"]),
            description: wire.text(&["description", "roleDescription"]),
            permissions: wire.list(
                &["permissions", "permissionKeys"],
                &["permissionKey", "permissionName", "name"],
            ),
            status: wire.status(&["isActive", "status"])?,
            created_at: wire.optional_text(&["createdAt"]),
            updated_at: wire.optional_text(&["updatedAt"]),
        })
    }

    fn to_wire(&self, mode: SaveMode) -> Value {
        let payload = json!({
            "roleName": self.name,
            "description": self.description,
            "permissions": self.permissions,
            "isActive": self.status.encode(Self::STATUS_ENCODING),
        });
        with_identity(payload, "roleId", &self.id, mode)
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("name", &self.name)
            .with("description", &self.description)
            .with("permissions", self.permissions.join(", "))
            .with("status", self.status.label())
    }

    fn from_form(id: Option<&str>, values: &FormValues) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", "Role name", values.get("name"));
        errors.into_result(Role {
            id: id.unwrap_or_default().to_owned(),
            name: values.trimmed("name"),
            description: values.trimmed("description"),
            permissions: values.list("permissions"),
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
