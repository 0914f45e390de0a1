use std::sync::Arc;

use super::{ContactSubmission, MailTransport, OutgoingMail};
use crate::i18n::{Language, UiStrings};

/// Result of relaying one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    /// `reason` is for the server log only; users get a generic message.
    Failed { reason: String },
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered)
    }
}

/// Relays contact submissions to the site owner, one attempt each.
#[derive(Clone)]
pub struct ContactNotifier {
    transport: Arc<dyn MailTransport>,
    sender: String,
    recipient: String,
}

impl ContactNotifier {
    pub fn new(transport: Arc<dyn MailTransport>, sender: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            transport,
            sender: sender.into(),
            recipient: recipient.into(),
        }
    }

    pub fn compose(&self, submission: &ContactSubmission, language: Language) -> OutgoingMail {
        let strings = UiStrings::for_language(language);
        OutgoingMail {
            from: self.sender.clone(),
            to: self.recipient.clone(),
            reply_to: Some((submission.name.clone(), submission.email.clone())),
            subject: strings.mail_subject.replace("{name}", &submission.name),
            body: format!(
                "{}: {}\n{}: {}\n\n{}\n",
                strings.form_name,
                submission.name,
                strings.form_email,
                submission.email,
                submission.message
            ),
        }
    }

    pub async fn notify(&self, submission: &ContactSubmission, language: Language) -> DeliveryOutcome {
        let mail = self.compose(submission, language);

        match self.transport.send(mail).await {
            Ok(()) => {
                tracing::info!(language = %language, "Contact message relayed");
                DeliveryOutcome::Delivered
            }
            Err(e) => {
                tracing::error!(language = %language, error = %e, "Failed to relay contact message");
                DeliveryOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
