use portfolio_shared::{ContactField, ContactMessage, InsertContactMessage, ValidationErrors};
use tracing::warn;

use super::ContactApi;
use crate::error::ClientError;
use crate::toast::{Toast, Toaster};

pub const SUBMIT_LABEL: &str = "Send Message";
pub const SUBMITTING_LABEL: &str = "Sending...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed or a submission was already pending; nothing sent.
    Blocked,
    Sent(ContactMessage),
    Failed,
}

/// State of the contact form.
///
/// A submission runs in two halves so callers can render the pending state
/// between them: [`ContactForm::begin_submit`] validates and locks the form,
/// [`ContactForm::finish_submit`] applies the result. [`ContactForm::submit`]
/// runs both around one API call.
#[derive(Debug, Default)]
pub struct ContactForm {
    values: InsertContactMessage,
    errors: Option<ValidationErrors>,
    submitting: bool,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &InsertContactMessage {
        &self.values
    }

    pub fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.values.name,
            ContactField::Email => &self.values.email,
            ContactField::Message => &self.values.message,
        }
    }

    /// Edits are ignored while a submission is pending. After a failed
    /// validation the edited field is re-checked so its error clears as soon
    /// as it becomes valid.
    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        if self.submitting {
            return;
        }
        let value = value.into();
        match field {
            ContactField::Name => self.values.name = value,
            ContactField::Email => self.values.email = value,
            ContactField::Message => self.values.message = value,
        }
        if self.errors.is_some() {
            self.errors = self.values.validate().err();
        }
    }

    pub fn error(&self, field: ContactField) -> Option<&str> {
        self.errors.as_ref().and_then(|e| e.for_field(field))
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_disabled(&self) -> bool {
        self.submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    pub fn reset(&mut self) {
        self.values = InsertContactMessage::default();
        self.errors = None;
    }

    /// Validates and marks the form pending. Returns the payload to send, or
    /// `None` when the input is invalid or a submission is in flight.
    pub fn begin_submit(&mut self) -> Option<InsertContactMessage> {
        if self.submitting {
            return None;
        }
        if let Err(errors) = self.values.validate() {
            self.errors = Some(errors);
            return None;
        }
        self.errors = None;
        self.submitting = true;
        Some(self.values.clone())
    }

    /// Applies the result of a submission started with `begin_submit`.
    pub fn finish_submit(
        &mut self,
        result: Result<ContactMessage, ClientError>,
        toaster: &mut Toaster,
    ) -> SubmitOutcome {
        self.submitting = false;
        match result {
            Ok(message) => {
                toaster.show(Toast::success(
                    "Message sent",
                    "Thank you for your message! I'll get back to you soon.",
                ));
                self.reset();
                SubmitOutcome::Sent(message)
            }
            Err(e) => {
                warn!("Contact submission failed: {e}");
                toaster.show(Toast::error(
                    "Error",
                    "Failed to send message. Please try again later.",
                ));
                SubmitOutcome::Failed
            }
        }
    }

    pub async fn submit(&mut self, api: &dyn ContactApi, toaster: &mut Toaster) -> SubmitOutcome {
        let Some(payload) = self.begin_submit() else {
            return SubmitOutcome::Blocked;
        };
        let result = api.submit(&payload).await;
        self.finish_submit(result, toaster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::contact::{LocalContactApi, MemoryStorage};
    use crate::toast::ToastVariant;

    #[derive(Default)]
    struct CountingApi {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl ContactApi for CountingApi {
        async fn submit(
            &self,
            input: &InsertContactMessage,
        ) -> Result<ContactMessage, ClientError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) as u64;
            if self.fail {
                return Err(ClientError::Server {
                    status: 500,
                    message: "An unexpected error occurred".to_string(),
                });
            }
            Ok(ContactMessage::from_insert(
                n + 1,
                input.clone(),
                chrono::Utc::now(),
            ))
        }
    }

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.set(ContactField::Name, "Ada");
        form.set(ContactField::Email, "ada@example.com");
        form.set(ContactField::Message, "I'd like to talk about an API project");
        form
    }

    #[tokio::test]
    async fn test_short_message_blocks_network_call() {
        let api = CountingApi::default();
        let mut toaster = Toaster::new();
        let mut form = filled();
        form.set(ContactField::Message, "Hi there");

        assert_eq!(form.submit(&api, &mut toaster).await, SubmitOutcome::Blocked);
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            form.error(ContactField::Message),
            Some("Message must be at least 10 characters")
        );
        assert!(toaster.latest().is_none());
    }

    #[tokio::test]
    async fn test_invalid_email_blocks_network_call() {
        let api = CountingApi::default();
        let mut toaster = Toaster::new();
        let mut form = filled();
        form.set(ContactField::Email, "not-an-email");

        assert_eq!(form.submit(&api, &mut toaster).await, SubmitOutcome::Blocked);
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            form.error(ContactField::Email),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn test_error_clears_once_field_is_fixed() {
        let mut form = filled();
        form.set(ContactField::Message, "short");
        assert!(form.begin_submit().is_none());
        assert!(form.error(ContactField::Message).is_some());

        form.set(ContactField::Message, "now this is long enough");
        assert!(form.error(ContactField::Message).is_none());
    }

    #[tokio::test]
    async fn test_success_resets_and_toasts() {
        let api = CountingApi::default();
        let mut toaster = Toaster::new();
        let mut form = filled();

        let outcome = form.submit(&api, &mut toaster).await;
        assert!(matches!(outcome, SubmitOutcome::Sent(ref m) if m.name == "Ada"));
        assert_eq!(form.values(), &InsertContactMessage::default());
        assert!(!form.is_submitting());

        let toast = toaster.latest().unwrap();
        assert_eq!(toast.title, "Message sent");
        assert_eq!(toast.variant, ToastVariant::Default);
    }

    #[tokio::test]
    async fn test_failure_keeps_values_for_retry() {
        let api = CountingApi {
            fail: true,
            ..Default::default()
        };
        let mut toaster = Toaster::new();
        let mut form = filled();

        assert_eq!(form.submit(&api, &mut toaster).await, SubmitOutcome::Failed);
        assert_eq!(form.value(ContactField::Name), "Ada");
        assert!(!form.is_disabled());

        let toast = toaster.latest().unwrap();
        assert_eq!(toast.title, "Error");
        assert_eq!(toast.variant, ToastVariant::Destructive);

        // Retry is a manual resubmit.
        assert_eq!(form.submit(&api, &mut toaster).await, SubmitOutcome::Failed);
        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_pending_state_disables_form() {
        let mut form = filled();
        let payload = form.begin_submit().unwrap();
        assert_eq!(payload.name, "Ada");
        assert!(form.is_disabled());
        assert_eq!(form.submit_label(), "Sending...");

        // A second submit and edits are ignored while pending.
        assert!(form.begin_submit().is_none());
        form.set(ContactField::Name, "Grace");
        assert_eq!(form.value(ContactField::Name), "Ada");

        let mut toaster = Toaster::new();
        form.finish_submit(
            Err(ClientError::Storage("offline".to_string())),
            &mut toaster,
        );
        assert_eq!(form.submit_label(), "Send Message");
    }

    #[tokio::test]
    async fn test_static_variant_end_to_end() {
        let storage = Arc::new(MemoryStorage::new());
        let api = LocalContactApi::new(storage);
        let mut toaster = Toaster::new();

        let mut form = filled();
        let first = form.submit(&api, &mut toaster).await;
        let mut form = filled();
        form.set(ContactField::Name, "Grace");
        let second = form.submit(&api, &mut toaster).await;

        let (SubmitOutcome::Sent(a), SubmitOutcome::Sent(b)) = (first, second) else {
            panic!("both submissions should succeed");
        };
        let stored = api.messages().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].id, a.id);
        assert_eq!(stored[1].id, b.id);
        assert_ne!(a.id, b.id);
        assert_eq!(stored[1].name, "Grace");
    }
}
