use super::*;
use fake::Dummy;
use serde_json::json;

/// Defines country data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct Country {
    pub id: String,
    pub name: String,
    pub code: String,
    pub status: Status,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

const COLUMNS: &[Column] = &[
    Column { field: "name", title: "Country", width: 30 },
    Column { field: "code", title: "Code", width: 8 },
    Column { field: "status", title: "Status", width: 10 },
];

const FORM: &[FormField] = &[
    FormField::text("name", "Country Name", true),
    FormField::text("code", "Country Code", true),
    FormField::status(),
];

impl Record for Country {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "name" => FieldValue::text(&self.name),
            "code" => FieldValue::text(&self.code),
            "status" => FieldValue::text(self.status.label()),
            "createdAt" => FieldValue::optional(self.created_at.as_deref()),
            "updatedAt" => FieldValue::optional(self.updated_at.as_deref()),
            _ => FieldValue::Missing,
        }
    }
}

impl Entity for Country {
    const KIND: EntityKind = EntityKind::Country;
    const STATUS_ENCODING: StatusEncoding = StatusEncoding::TitleCaseString;

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["name", "code"]
    }

    fn form_fields() -> &'static [FormField] {
        FORM
    }

    fn unique_field() -> &'static str {
        "name"
    }

    fn from_wire(value: &Value) -> Result<Self, WireError> {
        let wire = WireObject::new("country", value)?;
        Ok(Country {
            id: wire.id(&["countryId", "id"])?,
            name: wire.text(&["countryName", "name"]),
            code: wire.text(&["countryCode", "code"]),
            status: wire.status(&["status", "isActive"])?,
            created_at: wire.optional_text(&["createdAt"]),
            updated_at: wire.optional_text(&["updatedAt"]),
        })
    }

    fn to_wire(&self, mode: SaveMode) -> Value {
        let payload = json!({
            "countryName": self.name,
            "countryCode": self.code.to_uppercase(),
            "status": self.status.encode(Self::STATUS_ENCODING),
        });
        with_identity(payload, "countryId", &self.id, mode)
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("name", &self.name)
            .with("code", &self.code)
            .with("status", self.status.label())
    }

    fn from_form(id: Option<&str>, values: &FormValues) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", "Country name", values.get("name"));
        errors.require("code", "Country code", values.get("code"));
        errors.code("code", values.get("code"));
        errors.into_result(Country {
            id: id.unwrap_or_default().to_owned(),
            name: values.trimmed("name"),
            code: values.trimmed("code").to_uppercase(),
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
