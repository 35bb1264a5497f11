use super::*;
use fake::Dummy;
use serde_json::json;

/// Defines state (first-level subdivision) data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct StateProvince {
    pub id: String,
    pub name: String,
    pub code: String,
    pub country: String,
    pub status: Status,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

const COLUMNS: &[Column] = &[
    Column { field: "name", title: "State", width: 26 },
    Column { field: "code", title: "Code", width: 8 },
    Column { field: "country", title: "Country", width: 22 },
    Column { field: "status", title: "Status", width: 10 },
];

const FORM: &[FormField] = &[
    FormField::text("name", "State Name", true),
    FormField::text("code", "State Code", true),
    FormField::text("country", "Country", true),
    FormField::status(),
];

impl Record for StateProvince {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "name" => FieldValue::text(&self.name),
            "code" => FieldValue::text(&self.code),
            "country" => FieldValue::text(&self.country),
            "status" => FieldValue::text(self.status.label()),
            "createdAt" => FieldValue::optional(self.created_at.as_deref()),
            "updatedAt" => FieldValue::optional(self.updated_at.as_deref()),
            _ => FieldValue::Missing,
        }
    }
}

impl Entity for StateProvince {
    const KIND: EntityKind = EntityKind::State;
    const STATUS_ENCODING: StatusEncoding = StatusEncoding::TitleCaseString;

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["name", "code", "country"]
    }

    fn form_fields() -> &'static [FormField] {
        FORM
    }

    fn unique_field() -> &'static str {
        "name"
    }

    fn from_wire(value: &Value) -> Result<Self, WireError> {
        let wire = WireObject::new("state", value)?;
        Ok(StateProvince {
            id: wire.id(&["stateId", "id"])?,
            name: wire.text(&["stateName", "name"]),
            code: wire.text(&["stateCode", "code"]),
            country: wire.text(&["countryName", "country"]),
            status: wire.status(&["status", "isActive"])?,
            created_at: wire.optional_text(&["createdAt"]),
            updated_at: wire.optional_text(&["updatedAt"]),
        })
    }

    fn to_wire(&self, mode: SaveMode) -> Value {
        let payload = json!({
            "stateName": self.name,
            "stateCode": self.code.to_uppercase(),
            "countryName": self.country,
            "status": self.status.encode(Self::STATUS_ENCODING),
        });
        with_identity(payload, "stateId", &self.id, mode)
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("name", &self.name)
            .with("code", &self.code)
            .with("country", &self.country)
            .with("status", self.status.label())
    }

    fn from_form(id: Option<&str>, values: &FormValues) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", "State name", values.get("name"));
        errors.require("code", "State code", values.get("code"));
        errors.code("code", values.get("code"));
        errors.require("country", "Country", values.get("country"));
        errors.into_result(StateProvince {
            id: id.unwrap_or_default().to_owned(),
            name: values.trimmed("name"),
            code: values.trimmed("code").to_uppercase(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_wire() {
        let state = StateProvince::from_wire(&json!({
            "stateId": "tx",
            "stateName": "Texas",
            "stateCode": "TX",
            "countryName": "United States",
            "status": false
        }))
        .unwrap();
        assert_eq!(state.name, "Texas");
        assert_eq!(state.country, "United States");
        assert_eq!(state.status, Status::Inactive);
        assert_eq!(state.unique_value(), "Texas");
    }

    #[test]
    fn test_to_wire_create() {
        let state = StateProvince::from_form(
            None,
            &FormValues::new()
                .with("name", "Texas")
                .with("code", "tx")
                .with("country", "United States"),
        )
        .unwrap();
        assert_eq!(
            state.to_wire(SaveMode::Create),
            json!({
                "stateName": "Texas",
                "stateCode": "TX",
                "countryName": "United States",
                "status": "True",
            })
        );
    }

    #[test]
    fn test_requires_country() {
        let errors = StateProvince::from_form(
            None,
            &FormValues::new().with("name", "Texas").with("code", "TX"),
        )
        .unwrap_err();
        assert_eq!(errors.get("country"), Some("Country is required"));
    }
}
