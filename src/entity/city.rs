use super::*;
use fake::Dummy;
use serde_json::json;

/// Defines city data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct City {
    pub id: String,
    pub name: String,
    pub postal_code: String,
    pub state: String,
    pub country: String,
    pub status: Status,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

const COLUMNS: &[Column] = &[
    Column { field: "name", title: "City", width: 22 },
    Column { field: "postalCode", title: "Postal Code", width: 12 },
    Column { field: "state", title: "State", width: 20 },
    Column { field: "country", title: "Country", width: 20 },
    Column { field: "status", title: "Status", width: 10 },
];

const FORM: &[FormField] = &[
    FormField::text("name", "City Name", true),
    FormField::text("postalCode", "Postal Code", true),
    FormField::text("state", "State", true),
    FormField::text("country", "Country", true),
    FormField::status(),
];

impl Record for City {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "name" => FieldValue::text(&self.name),
            "postalCode" => FieldValue::text(&self.postal_code),
            "state" => FieldValue::text(&self.state),
            "country" => FieldValue::text(&self.country),
            "status" => FieldValue::text(self.status.label()),
            "createdAt" => FieldValue::optional(self.created_at.as_deref()),
            "updatedAt" => FieldValue::optional(self.updated_at.as_deref()),
            _ => FieldValue::Missing,
        }
    }
}

impl Entity for City {
    const KIND: EntityKind = EntityKind::City;
    const STATUS_ENCODING: StatusEncoding = StatusEncoding::TitleCaseString;

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["name", "postalCode", "state", "country"]
    }

    fn form_fields() -> &'static [FormField] {
        FORM
    }

    fn unique_field() -> &'static str {
        "name"
    }

    fn from_wire(value: &Value) -> Result<Self, WireError> {
        let wire = WireObject::new("city", value)?;
        Ok(City {
            id: wire.id(&["cityId", "id"])?,
            name: wire.text(&["cityName", "name"]),
            postal_code: wire.text(&["postalCode", "pinCode", "zipCode"]),
            state: wire.text(&["stateName", "state"]),
            country: wire.text(&["countryName", "country"]),
            status: wire.status(&["status", "isActive"])?,
            created_at: wire.optional_text(&["createdAt"]),
            updated_at: wire.optional_text(&["updatedAt"]),
        })
    }

    fn to_wire(&self, mode: SaveMode) -> Value {
        let payload = json!({
            "cityName": self.name,
            "postalCode": self.postal_code,
            "stateName": self.state,
            "countryName": self.country,
            "status": self.status.encode(Self::STATUS_ENCODING),
        });
        with_identity(payload, "cityId", &self.id, mode)
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("name", &self.name)
            .with("postalCode", &self.postal_code)
            .with("state", &self.state)
            .with("country", &self.country)
            .with("status", self.status.label())
    }

    fn from_form(id: Option<&str>, values: &FormValues) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", "City name", values.get("name"));
        errors.require("postalCode", "Postal code", values.get("postalCode"));
        errors.postal_code("postalCode", values.get("postalCode"));
        errors.require("state", "State", values.get("state"));
        errors.require("country", "Country", values.get("country"));
        errors.into_result(City {
            id: id.unwrap_or_default().to_owned(),
            name: values.trimmed("name"),
            postal_code: values.trimmed("postalCode"),
            state: values.trimmed("state"),
            country: values.trimmed("country"),
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
