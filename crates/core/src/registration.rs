//! Event registration documents.

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::{DocumentId, DomainError, DomainResult};

/// Submitted registration form.
///
/// Every field is optional and free text; nothing is required and no uniqueness is
/// enforced. Fields outside this set are dropped on deserialization. Numbers and
/// booleans in a known field are stored as their text form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationFields {
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub reg_number: Option<String>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl RegistrationFields {
    /// Parse a raw request body.
    ///
    /// An empty (or whitespace-only) body is an empty registration. Anything else must
    /// be a JSON object whose known fields are scalars or null.
    pub fn from_json_body(body: &[u8]) -> DomainResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| DomainError::validation(format!("malformed JSON body: {e}")))?;
        if !value.is_object() {
            return Err(DomainError::validation("registration body must be a JSON object"));
        }

        serde_json::from_value(value)
            .map_err(|e| DomainError::validation(format!("invalid registration field: {e}")))
    }
}

/// Free-text field that also takes a number or boolean.
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Bool(bool),
        Int(i64),
        UInt(u64),
        Float(f64),
    }

    let value = Option::<Scalar>::deserialize(deserializer).map_err(|_: D::Error| {
        <D::Error as de::Error>::custom("expected a string, number or boolean")
    })?;
    Ok(value.map(|v| match v {
        Scalar::Text(s) => s,
        Scalar::Bool(b) => b.to_string(),
        Scalar::Int(n) => n.to_string(),
        Scalar::UInt(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
    }))
}

/// A stored registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub id: DocumentId,
    pub fields: RegistrationFields,
}

impl Registration {
    pub fn new(id: DocumentId, fields: RegistrationFields) -> Self {
        Self { id, fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_an_empty_registration() {
        assert_eq!(
            RegistrationFields::from_json_body(b"").unwrap(),
            RegistrationFields::default()
        );
        assert_eq!(
            RegistrationFields::from_json_body(b"  \n").unwrap(),
            RegistrationFields::default()
        );
    }

    #[test]
    fn known_fields_are_read_in_camel_case() {
        let body = br#"{"firstName":"Ada","regNumber":"R-42","email":null,"extra":7}"#;
        let fields = RegistrationFields::from_json_body(body).unwrap();

        assert_eq!(fields.first_name.as_deref(), Some("Ada"));
        assert_eq!(fields.reg_number.as_deref(), Some("R-42"));
        assert_eq!(fields.email, None);
        assert_eq!(fields.last_name, None);
    }

    #[test]
    fn rejects_non_object_bodies() {
        for body in [&b"[]"[..], b"\"name\"", b"42", b"{not json"] {
            let err = RegistrationFields::from_json_body(body).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[test]
    fn scalar_field_values_are_kept_as_text() {
        let body = br#"{"mobile": 9876543210, "regNumber": -7, "gender": true, "email": 1.5}"#;
        let fields = RegistrationFields::from_json_body(body).unwrap();

        assert_eq!(fields.mobile.as_deref(), Some("9876543210"));
        assert_eq!(fields.reg_number.as_deref(), Some("-7"));
        assert_eq!(fields.gender.as_deref(), Some("true"));
        assert_eq!(fields.email.as_deref(), Some("1.5"));
    }

    #[test]
    fn rejects_structured_field_values() {
        for body in [&br#"{"mobile": {"n": 1}}"#[..], br#"{"email": ["a@b.c"]}"#] {
            let err = RegistrationFields::from_json_body(body).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let fields = RegistrationFields {
            last_name: Some("Lovelace".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json, serde_json::json!({ "lastName": "Lovelace" }));
    }
}
