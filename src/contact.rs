//! Contact form: field validation and submission to `/api/contact`.

use std::sync::LazyLock;

use regex::Regex;

use crate::api::{Backend, ContactRequest};
use crate::error::{ApiError, ContactError};

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const SENT_MESSAGE: &str =
    "Thank you! Your message has been sent successfully. We'll get back to you soon.";
pub const REJECTED_MESSAGE: &str =
    "Failed to send message. Please try again or contact us directly.";
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "An error occurred. Please try again later or contact us directly.";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// What the form shows after a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Invalid(&'static str),
    Failed(&'static str),
}

impl SubmitOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Sent => SENT_MESSAGE,
            Self::Invalid(msg) | Self::Failed(msg) => *msg,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

impl ContactForm {
    /// Every field must be non-blank and the e-mail must look like one.
    pub fn validate(&self) -> Result<ContactRequest, ContactError> {
        let fields = [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(ContactError::MissingField(*field));
        }

        let email = self.email.trim();
        if !EMAIL_RE.is_match(email) {
            return Err(ContactError::InvalidEmail(email.to_string()));
        }

        Ok(ContactRequest {
            name: self.name.trim().to_string(),
            email: email.to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        })
    }

    /// Validate and submit. The form is cleared only on success.
    pub async fn submit(&mut self, backend: &dyn Backend) -> SubmitOutcome {
        let request = match self.validate() {
            Ok(request) => request,
            Err(ContactError::InvalidEmail(_)) => return SubmitOutcome::Invalid(INVALID_EMAIL_MESSAGE),
            Err(_) => return SubmitOutcome::Invalid(MISSING_FIELDS_MESSAGE),
        };

        match backend.submit_contact(&request).await {
            Ok(()) => {
                tracing::info!("Contact message sent");
                *self = Self::default();
                SubmitOutcome::Sent
            }
            Err(e @ ApiError::Status { .. }) => {
                tracing::warn!(error = %e, "Contact submission rejected");
                SubmitOutcome::Failed(REJECTED_MESSAGE)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Contact submission failed");
                SubmitOutcome::Failed(TRANSPORT_FAILURE_MESSAGE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::api::{ChatRequest, DiscoverRequest, RawPlace};
    use crate::model::Location;

    struct ContactBackend {
        status: Option<u16>,
        received: Mutex<Vec<ContactRequest>>,
    }

    impl ContactBackend {
        fn new(status: Option<u16>) -> Self {
            Self {
                status,
                received: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Backend for ContactBackend {
        async fn chat(&self, _request: &ChatRequest) -> Result<String, ApiError> {
            unimplemented!("not used in contact tests")
        }
        async fn discover(&self, _request: &DiscoverRequest) -> Result<Vec<RawPlace>, ApiError> {
            unimplemented!("not used in contact tests")
        }
        async fn reverse_geocode(&self, _lat: f64, _lng: f64) -> Result<Location, ApiError> {
            unimplemented!("not used in contact tests")
        }
        async fn submit_contact(&self, request: &ContactRequest) -> Result<(), ApiError> {
            self.received.lock().unwrap().push(request.clone());
            match self.status {
                None => Ok(()),
                Some(0) => Err(ApiError::RequestFailed {
                    endpoint: "/api/contact".into(),
                    reason: "connection refused".into(),
                }),
                Some(status) => Err(ApiError::Status {
                    endpoint: "/api/contact".into(),
                    status,
                }),
            }
        }
    }

    fn filled() -> ContactForm {
        ContactForm {
            name: "Sam".to_string(),
            email: "sam@example.org".to_string(),
            subject: "Hello".to_string(),
            message: "Thanks for the help.".to_string(),
        }
    }

    #[test]
    fn blank_field_is_reported() {
        let form = ContactForm {
            subject: "  ".to_string(),
            ..filled()
        };
        assert!(matches!(
            form.validate(),
            Err(ContactError::MissingField("subject"))
        ));
    }

    #[test]
    fn malformed_email_is_reported() {
        let form = ContactForm {
            email: "sam at example".to_string(),
            ..filled()
        };
        assert!(matches!(form.validate(), Err(ContactError::InvalidEmail(_))));
    }

    #[tokio::test]
    async fn invalid_form_never_submits() {
        let backend = ContactBackend::new(None);
        let mut form = ContactForm::default();
        let outcome = form.submit(&backend).await;
        assert_eq!(outcome, SubmitOutcome::Invalid(MISSING_FIELDS_MESSAGE));
        assert!(backend.received.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn success_clears_form() {
        let backend = ContactBackend::new(None);
        let mut form = filled();
        let outcome = form.submit(&backend).await;
        assert!(outcome.is_success());
        assert_eq!(outcome.message(), SENT_MESSAGE);
        assert_eq!(form, ContactForm::default());
        assert_eq!(backend.received.lock().unwrap()[0].name, "Sam");
    }

    #[tokio::test]
    async fn rejection_keeps_form() {
        let backend = ContactBackend::new(Some(500));
        let mut form = filled();
        let outcome = form.submit(&backend).await;
        assert_eq!(outcome, SubmitOutcome::Failed(REJECTED_MESSAGE));
        assert_eq!(form, filled());
    }

    #[tokio::test]
    async fn transport_failure_message() {
        let backend = ContactBackend::new(Some(0));
        let mut form = filled();
        let outcome = form.submit(&backend).await;
        assert_eq!(outcome.message(), TRANSPORT_FAILURE_MESSAGE);
    }
}
