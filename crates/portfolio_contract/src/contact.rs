//! Contact submission payloads and the JSON response envelope.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Success message returned for accepted submissions, whether persisted or demo-logged.
pub const MSG_CONTACT_SENT: &str = "Thank you for your message! I'll get back to you soon.";
/// Top-level message for a submission rejected by field rules.
pub const MSG_VALIDATION_FAILED: &str = "Validation failed";
/// Message for a request body that is not a JSON object.
pub const MSG_INVALID_BODY: &str = "Invalid request body";
/// Message returned when the backing store rejects an insert.
pub const MSG_STORE_FAILURE: &str = "Failed to send message. Please try again later.";
/// Message returned by the rate limiter.
pub const MSG_RATE_LIMITED: &str = "Too many requests from this IP, please try again later.";
/// Message for requests that match no route.
pub const MSG_ROUTE_NOT_FOUND: &str = "Route not found";
/// Message for requests from an origin outside the allow-list.
pub const MSG_NOT_ALLOWED_BY_CORS: &str = "Not allowed by CORS";
/// Message for failures the server could not attribute to a caller or the store.
pub const MSG_INTERNAL_ERROR: &str = "Internal server error";

/// A contact-form submission as sent by the browser.
///
/// Missing or `null` fields deserialize as empty strings and scalars as their text, so they
/// surface as field errors instead of a body-level rejection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSubmission {
    /// Sender display name.
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    /// Sender reply address.
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    /// Message subject line.
    #[serde(deserialize_with = "lenient_string")]
    pub subject: String,
    /// Message body.
    #[serde(deserialize_with = "lenient_string")]
    pub message: String,
}

/// Strings pass through, numbers and booleans become their text, anything else is empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

impl ContactSubmission {
    /// Builds a submission from borrowed field values.
    pub fn new(name: &str, email: &str, subject: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        }
    }

    /// Returns the raw value for `field`.
    pub fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    /// Returns a mutable handle to the value for `field`.
    pub fn value_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        }
    }
}

/// Fields of a [`ContactSubmission`], in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    /// `name`
    Name,
    /// `email`
    Email,
    /// `subject`
    Subject,
    /// `message`
    Message,
}

impl ContactField {
    /// All fields in validation and display order.
    pub const ALL: [ContactField; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// Returns the JSON key for this field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    /// Returns the form label for this field.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Subject => "Subject",
            Self::Message => "Message",
        }
    }
}

/// A single rule violation for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Offending field.
    pub field: ContactField,
    /// Human-readable rule description.
    pub message: String,
}

impl FieldError {
    /// Builds a field error.
    pub fn new(field: ContactField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// `{ success, message, errors? }` envelope used by every contact endpoint response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    /// Whether the request was accepted.
    pub success: bool,
    /// Caller-facing message.
    pub message: String,
    /// Field errors, present only for validation failures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ApiEnvelope {
    /// Successful envelope.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Failure envelope without field detail.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Failure envelope carrying per-field errors.
    pub fn validation_failed(errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            message: MSG_VALIDATION_FAILED.to_string(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_fields_deserialize_as_empty_strings() {
        let parsed: ContactSubmission =
            serde_json::from_value(json!({ "name": "Al" })).expect("parse partial body");
        assert_eq!(parsed.name, "Al");
        assert_eq!(parsed.email, "");
        assert_eq!(parsed.message, "");
    }

    #[test]
    fn null_and_scalar_fields_become_text() {
        let parsed: ContactSubmission = serde_json::from_value(json!({
            "name": null,
            "email": ["a@b.com"],
            "subject": 12345,
            "message": true
        }))
        .expect("parse loose body");
        assert_eq!(parsed, ContactSubmission::new("", "", "12345", "true"));
    }

    #[test]
    fn success_envelope_omits_errors_key() {
        let value = serde_json::to_value(ApiEnvelope::ok(MSG_CONTACT_SENT)).expect("serialize");
        assert_eq!(
            value,
            json!({ "success": true, "message": MSG_CONTACT_SENT })
        );
    }

    #[test]
    fn validation_envelope_lists_fields_by_json_key() {
        let envelope = ApiEnvelope::validation_failed(vec![FieldError::new(
            ContactField::Name,
            "Name must be between 2 and 100 characters",
        )]);
        let value = serde_json::to_value(envelope).expect("serialize");
        assert_eq!(value["message"], "Validation failed");
        assert_eq!(value["errors"][0]["field"], "name");
    }
}
