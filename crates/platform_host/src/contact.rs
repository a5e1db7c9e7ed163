//! Contact backend client contract.
//!
//! UI code only ever sees [`HealthCheck`] and [`SubmitOutcome`]; transport failures and odd
//! server responses are folded into those shapes by the normalizers below, so no raw network
//! error reaches a component.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use portfolio_contract::{
    validate_submission, ApiEnvelope, ContactSubmission, FieldError, HealthResponse, StoreStatus,
    MSG_CONTACT_SENT, MSG_RATE_LIMITED,
};

/// Message shown when the request never produced an HTTP response.
pub const MSG_NETWORK_ERROR: &str = "Network error. Please check your connection and try again.";
/// Message shown when the health endpoint is unreachable.
pub const MSG_SERVER_OFFLINE: &str = "Server is offline";

/// Object-safe boxed future returned by [`ContactService`] methods.
pub type ContactServiceFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Normalized `GET /health` result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCheck {
    /// Whether the backend answered with a healthy payload.
    pub online: bool,
    /// Backend status token, or `"offline"`.
    pub status: String,
    /// Short human-readable summary.
    pub message: String,
    /// Reported store mode, when known.
    pub store: Option<StoreStatus>,
}

impl HealthCheck {
    /// Health result for an unreachable backend.
    pub fn offline() -> Self {
        Self {
            online: false,
            status: "offline".to_string(),
            message: MSG_SERVER_OFFLINE.to_string(),
            store: None,
        }
    }
}

/// Normalized `POST /api/contact` result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Whether the submission was accepted.
    pub success: bool,
    /// Message to show the visitor.
    pub message: String,
    /// Field errors reported by the server, if any.
    pub errors: Vec<FieldError>,
}

impl SubmitOutcome {
    /// Outcome for a request that failed before an HTTP response arrived.
    pub fn network_error() -> Self {
        Self {
            success: false,
            message: MSG_NETWORK_ERROR.to_string(),
            errors: Vec::new(),
        }
    }
}

/// Client for the contact backend.
pub trait ContactService {
    /// Queries backend health.
    fn check_health<'a>(&'a self) -> ContactServiceFuture<'a, HealthCheck>;

    /// Sends a submission.
    fn submit_contact<'a>(
        &'a self,
        submission: &'a ContactSubmission,
    ) -> ContactServiceFuture<'a, SubmitOutcome>;
}

/// Maps an HTTP status and body from `POST /api/contact` to a [`SubmitOutcome`].
pub fn normalize_submit_response(status: u16, body: &str) -> SubmitOutcome {
    let is_success_status = (200..300).contains(&status);
    match serde_json::from_str::<ApiEnvelope>(body) {
        Ok(envelope) => SubmitOutcome {
            success: envelope.success && is_success_status,
            message: envelope.message,
            errors: envelope.errors,
        },
        Err(_) if status == 429 => SubmitOutcome {
            success: false,
            message: MSG_RATE_LIMITED.to_string(),
            errors: Vec::new(),
        },
        Err(_) => SubmitOutcome {
            success: false,
            message: format!("Unexpected response from server (status {status})"),
            errors: Vec::new(),
        },
    }
}

/// Maps an HTTP status and body from `GET /health` to a [`HealthCheck`].
pub fn normalize_health_response(status: u16, body: &str) -> HealthCheck {
    if !(200..300).contains(&status) {
        return HealthCheck {
            online: false,
            status: "error".to_string(),
            message: format!("Server responded with status {status}"),
            store: None,
        };
    }

    match serde_json::from_str::<HealthResponse>(body) {
        Ok(health) => {
            let message = match health.supabase {
                StoreStatus::Connected => "Server is online",
                StoreStatus::NotConfigured => "Server is online (demo mode)",
            };
            HealthCheck {
                online: true,
                status: health.status,
                message: message.to_string(),
                store: Some(health.supabase),
            }
        }
        Err(_) => HealthCheck {
            online: false,
            status: "error".to_string(),
            message: "Server returned an unreadable health payload".to_string(),
            store: None,
        },
    }
}

/// In-memory contact backend that validates like the real server and records accepted
/// submissions.
#[derive(Debug, Clone)]
pub struct MemoryContactService {
    online: bool,
    accepted: Rc<RefCell<Vec<ContactSubmission>>>,
}

impl Default for MemoryContactService {
    fn default() -> Self {
        Self {
            online: true,
            accepted: Rc::default(),
        }
    }
}

impl MemoryContactService {
    /// Backend that fails every call as a network error.
    pub fn offline() -> Self {
        Self {
            online: false,
            accepted: Rc::default(),
        }
    }

    /// Submissions accepted so far, normalized.
    pub fn accepted(&self) -> Vec<ContactSubmission> {
        self.accepted.borrow().clone()
    }
}

impl ContactService for MemoryContactService {
    fn check_health<'a>(&'a self) -> ContactServiceFuture<'a, HealthCheck> {
        Box::pin(async move {
            if !self.online {
                return HealthCheck::offline();
            }
            HealthCheck {
                online: true,
                status: "OK".to_string(),
                message: "Server is online (demo mode)".to_string(),
                store: Some(StoreStatus::NotConfigured),
            }
        })
    }

    fn submit_contact<'a>(
        &'a self,
        submission: &'a ContactSubmission,
    ) -> ContactServiceFuture<'a, SubmitOutcome> {
        Box::pin(async move {
            if !self.online {
                return SubmitOutcome::network_error();
            }
            match validate_submission(submission) {
                Ok(accepted) => {
                    self.accepted.borrow_mut().push(accepted);
                    SubmitOutcome {
                        success: true,
                        message: MSG_CONTACT_SENT.to_string(),
                        errors: Vec::new(),
                    }
                }
                Err(errors) => SubmitOutcome {
                    success: false,
                    message: portfolio_contract::MSG_VALIDATION_FAILED.to_string(),
                    errors,
                },
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use portfolio_contract::ContactField;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn success_envelope_maps_to_success_outcome() {
        let body = r#"{"success":true,"message":"Thanks"}"#;
        let outcome = normalize_submit_response(200, body);
        assert!(outcome.success);
        assert_eq!(outcome.message, "Thanks");
    }

    #[test]
    fn validation_envelope_keeps_field_errors() {
        let body = r#"{"success":false,"message":"Validation failed","errors":[{"field":"name","message":"Name must be between 2 and 100 characters"}]}"#;
        let outcome = normalize_submit_response(400, body);
        assert!(!outcome.success);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].field, ContactField::Name);
    }

    #[test]
    fn non_json_bodies_become_generic_failures() {
        let outcome = normalize_submit_response(502, "<html>Bad gateway</html>");
        assert!(!outcome.success);
        assert!(outcome.message.contains("502"));

        let limited = normalize_submit_response(429, "Too many requests");
        assert_eq!(limited.message, MSG_RATE_LIMITED);
    }

    #[test]
    fn success_flag_requires_a_success_status() {
        let outcome = normalize_submit_response(500, r#"{"success":true,"message":"odd"}"#);
        assert!(!outcome.success);
    }

    #[test]
    fn health_payload_reports_demo_mode() {
        let body = r#"{"status":"OK","timestamp":"2026-01-01T00:00:00Z","supabase":"not configured"}"#;
        let health = normalize_health_response(200, body);
        assert!(health.online);
        assert_eq!(health.store, Some(StoreStatus::NotConfigured));
        assert!(!normalize_health_response(503, body).online);
    }

    #[test]
    fn memory_service_validates_before_recording() {
        let service = MemoryContactService::default();
        let bad = ContactSubmission::new("A", "a@b.com", "Hello there", "This is a test message.");
        let outcome = block_on(service.submit_contact(&bad));
        assert!(!outcome.success);
        assert!(service.accepted().is_empty());

        let good =
            ContactSubmission::new("Al", "a@b.com", "Hello there", "This is a test message.");
        assert!(block_on(service.submit_contact(&good)).success);
        assert_eq!(service.accepted(), vec![good]);
    }

    #[test]
    fn offline_service_reports_network_error() {
        let service = MemoryContactService::offline();
        let outcome = block_on(service.submit_contact(&ContactSubmission::default()));
        assert_eq!(outcome, SubmitOutcome::network_error());
        assert!(!block_on(service.check_health()).online);
    }
}
