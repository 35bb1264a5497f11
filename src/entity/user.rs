use super::*;
use fake::Dummy;
use serde_json::json;

/// Defines console user data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub roles: Vec<String>,
    pub status: Status,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

const COLUMNS: &[Column] = &[
    Column { field: "username", title: "Username", width: 16 },
    Column { field: "fullName", title: "Name", width: 22 },
    Column { field: "email", title: "Email", width: 28 },
    Column { field: "roles", title: "Roles", width: 20 },
    Column { field: "status", title: "Status", width: 10 },
];

const FORM: &[FormField] = &[
    FormField::text("username", "Username", true),
    FormField::text("fullName", "Full Name", true),
    FormField::text("email", "Email", true),
    FormField::list("roles", "Roles (comma separated)"),
    FormField::status(),
];

impl Record for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "username" => FieldValue::text(&self.username),
            "fullName" => FieldValue::text(&self.full_name),
            "email" => FieldValue::text(&self.email),
            "roles" => FieldValue::list(&self.roles),
            "status" => FieldValue::text(self.status.label()),
            "createdAt" => FieldValue::optional(self.created_at.as_deref()),
            "updatedAt" => FieldValue::optional(self.updated_at.as_deref()),
            _ => FieldValue::Missing,
        }
    }
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;
    const STATUS_ENCODING: StatusEncoding = StatusEncoding::Boolean;

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["username", "fullName", "email", "roles"]
    }

    fn form_fields() -> &'static [FormField] {
        FORM
    }

    fn unique_field() -> &'static str {
        "username"
    }

    fn from_wire(value: &Value) -> Result<Self, WireError> {
        let wire = WireObject::new("user", value)?;
        Ok(User {
            id: wire.id(&["userId", "id"])?,
            username: wire.text(&["userName", "username"]),
            full_name: wire.text(&["fullName", "name"]),
            email: wire.text(&["email", "emailAddress"]),
            roles: wire.list(&["roles", "roleNames"], &["roleKey", "roleName", "name"]),
            status: wire.status(&["isActive", "status"])?,
            created_at: wire.optional_text(&["createdAt"]),
            updated_at: wire.optional_text(&["updatedAt"]),
        })
    }

    fn to_wire(&self, mode: SaveMode) -> Value {
        let payload = json!({
            "userName": self.username,
            "fullName": self.full_name,
            "email": self.email,
            "roles": self.roles,
            "isActive": self.status.encode(Self::STATUS_ENCODING),
        });
        with_identity(payload, "userId", &self.id, mode)
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("username", &self.username)
            .with("fullName", &self.full_name)
            .with("email", &self.email)
            .with("roles", self.roles.join(", "))
            .with("status", self.status.label())
    }

    fn from_form(id: Option<&str>, values: &FormValues) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("username", "Username", values.get("username"));
        errors.require("fullName", "Full name", values.get("fullName"));
        errors.require("email", "Email", values.get("email"));
        errors.email("email", values.get("email"));
        errors.into_result(User {
            id: id.unwrap_or_default().to_owned(),
            username: values.trimmed("username"),
            full_name: values.trimmed("fullName"),
            email: values.trimmed("email").to_lowercase(),
            roles: values.list("roles"),
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
    fn test_invalid_email_blocks_submission() {
        let errors = User::from_form(
            None,
            &FormValues::new()
                .with("username", "ada")
                .with("fullName", "Ada Lovelace")
                .with("email", "ada@"),
        )
        .unwrap_err();
        assert_eq!(errors.get("email"), Some("Enter a valid email address"));
    }

    #[test]
    fn test_from_wire_with_role_objects() {
        let user = User::from_wire(&json!({
            "userId": 42,
            "userName": "ada",
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "roles": [{ "roleKey": "admin" }],
            "isActive": "False"
        }))
        .unwrap();
        assert_eq!(user.id, "42");
        assert_eq!(user.roles, vec!["admin"]);
        assert_eq!(user.status.label(), "Inactive");
    }

    #[test]
    fn test_to_wire_update_carries_identity() {
        let user = User::from_form(
            Some("42"),
            &FormValues::new()
                .with("username", "ada")
                .with("fullName", "Ada Lovelace")
                .with("email", "Ada@Example.com")
                .with("roles", "admin"),
        )
        .unwrap();
        assert_eq!(
            user.to_wire(SaveMode::Update),
            json!({
                "userId": 42,
                "userName": "ada",
                "fullName": "Ada Lovelace",
                "email": "ada@example.com",
                "roles": ["admin"],
                "isActive": true,
            })
        );
    }
}
