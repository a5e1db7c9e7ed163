//! Contact form state machine, independent of the view layer.

use platform_host::{ContactService, SubmitOutcome};
use portfolio_contract::{
    validate_field, validate_submission, ContactField, ContactSubmission, FieldError,
    MSG_VALIDATION_FAILED,
};

/// Lifecycle of the most recent submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    /// Nothing sent yet, or the draft was edited since the last result.
    #[default]
    Idle,
    /// A request is in flight; further submits are ignored.
    Submitting,
    /// The backend accepted the submission.
    Sent(String),
    /// Validation or the backend rejected the submission.
    Failed(String),
}

/// Draft, status, and inline field errors for the contact window.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactFormState {
    /// Values as typed by the visitor.
    pub draft: ContactSubmission,
    /// Result of the last submit attempt.
    pub status: SubmitStatus,
    /// Errors shown next to their fields.
    pub field_errors: Vec<FieldError>,
}

impl ContactFormState {
    /// Whether a request is currently in flight.
    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    /// Replaces one draft field and clears that field's stale error.
    pub fn set_field(&mut self, field: ContactField, value: String) {
        *self.draft.value_mut(field) = value;
        self.field_errors.retain(|e| e.field != field);
        if !self.is_submitting() {
            self.status = SubmitStatus::Idle;
        }
    }

    /// Re-checks one field when it loses focus.
    pub fn touch_field(&mut self, field: ContactField) {
        self.field_errors.retain(|e| e.field != field);
        if let Some(error) = validate_field(field, self.draft.value(field)) {
            self.field_errors.push(error);
            self.field_errors
                .sort_by_key(|e| ContactField::ALL.iter().position(|f| *f == e.field));
        }
    }

    /// First error message for `field`, if any.
    pub fn error_for(&self, field: ContactField) -> Option<&str> {
        self.field_errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Validates the draft and moves to [`SubmitStatus::Submitting`].
    ///
    /// Returns the normalized submission to send, or `None` when a request is already in flight
    /// or the draft is invalid. An invalid draft never reaches the network.
    pub fn prepare_submit(&mut self) -> Option<ContactSubmission> {
        if self.is_submitting() {
            return None;
        }
        match validate_submission(&self.draft) {
            Ok(submission) => {
                self.field_errors.clear();
                self.status = SubmitStatus::Submitting;
                Some(submission)
            }
            Err(errors) => {
                self.field_errors = errors;
                self.status = SubmitStatus::Failed(MSG_VALIDATION_FAILED.to_string());
                None
            }
        }
    }

    /// Applies a backend result: success clears the draft, failure keeps it for a retry.
    pub fn apply_outcome(&mut self, outcome: SubmitOutcome) {
        if outcome.success {
            self.draft = ContactSubmission::default();
            self.field_errors.clear();
            self.status = SubmitStatus::Sent(outcome.message);
        } else {
            self.field_errors = outcome.errors;
            self.status = SubmitStatus::Failed(outcome.message);
        }
    }
}

/// Runs one full submit cycle against `service`.
///
/// Returns `false` when nothing was sent.
pub async fn submit_form(service: &dyn ContactService, form: &mut ContactFormState) -> bool {
    let Some(submission) = form.prepare_submit() else {
        return false;
    };
    let outcome = service.submit_contact(&submission).await;
    form.apply_outcome(outcome);
    true
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::{MemoryContactService, MSG_NETWORK_ERROR};
    use portfolio_contract::MSG_CONTACT_SENT;
    use pretty_assertions::assert_eq;

    use super::*;

    fn filled() -> ContactFormState {
        ContactFormState {
            draft: ContactSubmission::new(
                " Ada Lovelace ",
                "Ada@Example.com",
                "Collaboration",
                "Would love to work on an engine together.",
            ),
            ..ContactFormState::default()
        }
    }

    #[test]
    fn valid_draft_is_sent_normalized_and_then_cleared() {
        let service = MemoryContactService::default();
        let mut form = filled();

        assert!(block_on(submit_form(&service, &mut form)));

        assert_eq!(form.status, SubmitStatus::Sent(MSG_CONTACT_SENT.to_string()));
        assert_eq!(form.draft, ContactSubmission::default());
        let accepted = service.accepted();
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].name, "Ada Lovelace");
        assert_eq!(accepted[0].email, "ada@example.com");
    }

    #[test]
    fn invalid_draft_never_reaches_the_service() {
        let service = MemoryContactService::default();
        let mut form = filled();
        form.set_field(ContactField::Name, "A".to_string());

        assert!(!block_on(submit_form(&service, &mut form)));

        assert!(service.accepted().is_empty());
        assert_eq!(
            form.error_for(ContactField::Name),
            Some("Name must be between 2 and 100 characters")
        );
        assert_eq!(
            form.status,
            SubmitStatus::Failed(MSG_VALIDATION_FAILED.to_string())
        );
    }

    #[test]
    fn network_failure_keeps_the_draft() {
        let service = MemoryContactService::offline();
        let mut form = filled();
        let draft = form.draft.clone();

        block_on(submit_form(&service, &mut form));

        assert_eq!(form.draft, draft);
        assert_eq!(form.status, SubmitStatus::Failed(MSG_NETWORK_ERROR.to_string()));
    }

    #[test]
    fn submits_are_ignored_while_in_flight() {
        let mut form = filled();
        assert!(form.prepare_submit().is_some());
        assert!(form.is_submitting());
        assert_eq!(form.prepare_submit(), None);

        form.set_field(ContactField::Subject, "Another subject".to_string());
        assert!(form.is_submitting());
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let mut form = ContactFormState::default();
        assert_eq!(form.prepare_submit(), None);
        assert_eq!(form.field_errors.len(), 4);

        form.set_field(ContactField::Email, "someone@example.com".to_string());

        assert_eq!(form.error_for(ContactField::Email), None);
        assert!(form.error_for(ContactField::Message).is_some());
        assert_eq!(form.status, SubmitStatus::Idle);
    }

    #[test]
    fn touching_a_field_revalidates_in_field_order() {
        let mut form = ContactFormState::default();
        form.touch_field(ContactField::Message);
        form.touch_field(ContactField::Name);

        let fields: Vec<_> = form.field_errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![ContactField::Name, ContactField::Message]);
    }

    #[test]
    fn server_field_errors_are_shown_inline() {
        let mut form = filled();
        form.prepare_submit();
        form.apply_outcome(SubmitOutcome {
            success: false,
            message: MSG_VALIDATION_FAILED.to_string(),
            errors: vec![FieldError::new(
                ContactField::Email,
                "Please provide a valid email address",
            )],
        });

        assert_eq!(
            form.error_for(ContactField::Email),
            Some("Please provide a valid email address")
        );
        assert!(!form.is_submitting());
    }
}
