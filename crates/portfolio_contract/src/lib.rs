//! Wire types and field rules shared by the portfolio desktop and the contact backend.
//!
//! The browser contact app and `contact_server` both validate submissions with
//! [`validate_submission`], so a draft rejected in the UI is rejected by the server for the same
//! reason and with the same message.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod contact;
pub mod health;
pub mod validation;

pub use contact::{
    ApiEnvelope, ContactField, ContactSubmission, FieldError, MSG_CONTACT_SENT, MSG_INTERNAL_ERROR,
    MSG_INVALID_BODY, MSG_NOT_ALLOWED_BY_CORS, MSG_RATE_LIMITED, MSG_ROUTE_NOT_FOUND,
    MSG_STORE_FAILURE, MSG_VALIDATION_FAILED,
};
pub use health::{HealthResponse, StoreStatus, HEALTH_STATUS_OK};
pub use validation::{
    is_valid_email, normalize_email, validate_field, validate_submission, FieldRule, RuleCheck,
    CONTACT_FIELD_RULES,
};
