//! Declarative contact field rules.
//!
//! Values are trimmed before checking and lengths count Unicode scalar values, not bytes.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::contact::{ContactField, ContactSubmission, FieldError};

const MAX_EMAIL_LEN: usize = 254;
const MAX_EMAIL_LOCAL_LEN: usize = 64;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~.-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern compiles")
});

/// Check applied to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCheck {
    /// Inclusive character-count bounds.
    Length {
        /// Minimum characters.
        min: usize,
        /// Maximum characters.
        max: usize,
    },
    /// Syntactically valid email address.
    Email,
}

impl RuleCheck {
    /// Returns whether a trimmed `value` satisfies the check.
    pub fn accepts(self, value: &str) -> bool {
        match self {
            Self::Length { min, max } => {
                let len = value.chars().count();
                (min..=max).contains(&len)
            }
            Self::Email => is_valid_email(value),
        }
    }
}

/// One entry in [`CONTACT_FIELD_RULES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Field the rule applies to.
    pub field: ContactField,
    /// Check to run.
    pub check: RuleCheck,
    /// Error message reported on failure.
    pub message: &'static str,
}

/// Contact form rules, one per field, in reporting order.
pub const CONTACT_FIELD_RULES: [FieldRule; 4] = [
    FieldRule {
        field: ContactField::Name,
        check: RuleCheck::Length { min: 2, max: 100 },
        message: "Name must be between 2 and 100 characters",
    },
    FieldRule {
        field: ContactField::Email,
        check: RuleCheck::Email,
        message: "Please provide a valid email address",
    },
    FieldRule {
        field: ContactField::Subject,
        check: RuleCheck::Length { min: 5, max: 200 },
        message: "Subject must be between 5 and 200 characters",
    },
    FieldRule {
        field: ContactField::Message,
        check: RuleCheck::Length { min: 10, max: 2000 },
        message: "Message must be between 10 and 2000 characters",
    },
];

/// Returns whether `value` is an acceptable reply address.
pub fn is_valid_email(value: &str) -> bool {
    if value.len() > MAX_EMAIL_LEN || !EMAIL_PATTERN.is_match(value) {
        return false;
    }
    let Some((local, _domain)) = value.rsplit_once('@') else {
        return false;
    };
    local.len() <= MAX_EMAIL_LOCAL_LEN
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
}

/// Trims and lowercases an email address.
pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Checks a single field value; used by the form for inline feedback.
pub fn validate_field(field: ContactField, value: &str) -> Option<FieldError> {
    CONTACT_FIELD_RULES
        .iter()
        .filter(|rule| rule.field == field)
        .find(|rule| !rule.check.accepts(value.trim()))
        .map(|rule| FieldError::new(field, rule.message))
}

/// Runs every rule against `submission`.
///
/// Returns the normalized submission (trimmed, email lowercased) when all rules pass, or every
/// violation otherwise. There is no partial result.
pub fn validate_submission(
    submission: &ContactSubmission,
) -> Result<ContactSubmission, Vec<FieldError>> {
    let errors: Vec<FieldError> = ContactField::ALL
        .iter()
        .filter_map(|field| validate_field(*field, submission.value(*field)))
        .collect();

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ContactSubmission {
        name: submission.name.trim().to_string(),
        email: normalize_email(&submission.email),
        subject: submission.subject.trim().to_string(),
        message: submission.message.trim().to_string(),
    })
}
