//! Contact message schema shared by the browser client and the API server.
//!
//! # Invariants
//! - `name` is non-blank.
//! - `email` is an address of the shape `local@domain.tld`.
//! - `message` holds at least [`MIN_MESSAGE_LEN`] characters.
//! - A stored [`ContactMessage`] is never mutated after creation.

use std::fmt;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const MIN_MESSAGE_LEN: usize = 10;

// Local part may not start with a dot and may not contain ".."; those two
// rules are checked separately since `regex` has no lookaround.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z0-9_'+\-.]*[a-z0-9_+\-]@([a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$")
        .expect("valid email regex")
});

/// Payload submitted by the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A persisted contact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    pub fn from_insert(id: u64, input: InsertContactMessage, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            email: input.email,
            message: input.message,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 3] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Message,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Message => "message",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation failure. `field` is `None` when the payload as a
/// whole has the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Option<ContactField>,
    pub message: String,
}

impl FieldError {
    fn on(field: ContactField, message: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            message: message.into(),
        }
    }
}

/// All validation failures for one payload, in field order.
///
/// Renders as `Validation error: <msg> at "<field>"; <msg> at "<field>"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// A failure that concerns the payload as a whole, e.g. unparseable JSON.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field: None,
                message: message.into(),
            }],
        }
    }

    pub fn for_field(&self, field: ContactField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == Some(field))
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validation error: ")?;
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            match err.field {
                Some(field) => write!(f, "{} at \"{}\"", err.message, field)?,
                None => f.write_str(&err.message)?,
            }
        }
        Ok(())
    }
}

impl InsertContactMessage {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let errors: Vec<FieldError> = ContactField::ALL
            .into_iter()
            .filter_map(|field| self.check(field).map(|msg| FieldError::on(field, msg)))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors })
        }
    }

    /// Returns the error message for one field, if it is invalid.
    pub fn check(&self, field: ContactField) -> Option<&'static str> {
        match field {
            ContactField::Name if self.name.trim().is_empty() => Some("Name is required"),
            ContactField::Email if !is_valid_email(&self.email) => {
                Some("Please enter a valid email address")
            }
            ContactField::Message if self.message.chars().count() < MIN_MESSAGE_LEN => {
                Some("Message must be at least 10 characters")
            }
            _ => None,
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    let Some((local, _)) = email.split_once('@') else {
        return false;
    };
    !local.starts_with('.') && !local.contains("..") && EMAIL_RE.is_match(email)
}

/// Parses an untyped JSON body into a validated submission.
///
/// Missing and mistyped fields are reported alongside content failures so
/// the caller gets every problem in one response.
pub fn parse_contact_payload(value: &Value) -> Result<InsertContactMessage, ValidationErrors> {
    let Some(object) = value.as_object() else {
        return Err(ValidationErrors::malformed(format!(
            "Expected object, received {}",
            json_type_name(value)
        )));
    };

    let mut errors = Vec::new();
    let name = string_field(object, ContactField::Name, &mut errors);
    let email = string_field(object, ContactField::Email, &mut errors);
    let message = string_field(object, ContactField::Message, &mut errors);

    let input = InsertContactMessage {
        name: name.unwrap_or_default(),
        email: email.unwrap_or_default(),
        message: message.unwrap_or_default(),
    };

    // Content checks only apply to fields that arrived as strings.
    let typed: Vec<ContactField> = errors.iter().filter_map(|e: &FieldError| e.field).collect();
    for field in ContactField::ALL {
        if typed.contains(&field) {
            continue;
        }
        if let Some(msg) = input.check(field) {
            errors.push(FieldError::on(field, msg));
        }
    }

    if errors.is_empty() {
        Ok(input)
    } else {
        errors.sort_by_key(|e| e.field.map(|f| f as u8));
        Err(ValidationErrors { errors })
    }
}

fn string_field(
    object: &Map<String, Value>,
    field: ContactField,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match object.get(field.as_str()) {
        Some(Value::String(s)) => Some(s.clone()),
        None | Some(Value::Null) => {
            errors.push(FieldError::on(field, "Required"));
            None
        }
        Some(other) => {
            errors.push(FieldError::on(
                field,
                format!("Expected string, received {}", json_type_name(other)),
            ));
            None
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> InsertContactMessage {
        InsertContactMessage::new("Ada", "ada@example.com", "Hello there, nice site!")
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_short_message_rejected() {
        let mut input = valid();
        input.message = "too short".to_string();
        let err = input.validate().unwrap_err();
        assert_eq!(
            err.for_field(ContactField::Message),
            Some("Message must be at least 10 characters")
        );
        assert_eq!(err.errors.len(), 1);
    }

    #[test]
    fn test_message_of_exactly_ten_chars_accepted() {
        let mut input = valid();
        input.message = "0123456789".to_string();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_message_length_counts_chars_not_bytes() {
        let mut input = valid();
        input.message = "ééééééééé".to_string(); // 9 chars, 18 bytes
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut input = valid();
        input.name = "   ".to_string();
        assert_eq!(
            input.validate().unwrap_err().for_field(ContactField::Name),
            Some("Name is required")
        );
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.co.uk"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email(".ada@example.com"));
        assert!(!is_valid_email("ada..lovelace@example.com"));
        assert!(!is_valid_email("ada.@example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@-example.com"));
    }

    #[test]
    fn test_display_lists_every_failure() {
        let input = InsertContactMessage::new("", "not-an-email", "short");
        let err = input.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Name is required at \"name\"; \
             Please enter a valid email address at \"email\"; \
             Message must be at least 10 characters at \"message\""
        );
    }

    #[test]
    fn test_parse_payload_ok() {
        let parsed = parse_contact_payload(&json!({
            "name": "Ada",
            "email": "ada@example.com",
            "message": "Hello there, nice site!",
            "extra": true
        }))
        .unwrap();
        assert_eq!(parsed, valid());
    }

    #[test]
    fn test_parse_payload_missing_and_mistyped_fields() {
        let err = parse_contact_payload(&json!({
            "email": 42,
            "message": "Hello there, nice site!"
        }))
        .unwrap_err();
        assert_eq!(err.for_field(ContactField::Name), Some("Required"));
        assert_eq!(
            err.for_field(ContactField::Email),
            Some("Expected string, received number")
        );
        assert_eq!(err.for_field(ContactField::Message), None);
    }

    #[test]
    fn test_parse_payload_not_an_object() {
        let err = parse_contact_payload(&json!("hello")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Expected object, received string"
        );
    }

    #[test]
    fn test_contact_message_serializes_camel_case() {
        let created_at = Utc::now();
        let msg = ContactMessage::from_insert(7, valid(), created_at);
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["id"], 7);
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
    }
}
