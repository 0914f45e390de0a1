//! Contact Notifier
//!
//! Validates the contact form and relays it through a [`MailTransport`].
//! The submission only lives for the duration of the request.

pub mod mailer;
pub mod notifier;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::i18n::UiStrings;

pub use mailer::{
    MailError, MailSecurity, MailTransport, OutgoingMail, SmtpMailer, SmtpSettings, UnconfiguredMailer,
};
pub use notifier::{ContactNotifier, DeliveryOutcome};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_MESSAGE_LEN: usize = 5000;

lazy_static! {
    /// Syntactic check only: local part, `@`, dotted domain of valid labels.
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$"
    )
    .unwrap();
}

pub fn is_valid_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LEN && EMAIL_REGEX.is_match(email)
}

/// Raw form body as posted by the browser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// A validated submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Localized per-field errors; `None` means the field is fine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }
}

impl ContactForm {
    /// Check every field, reporting all problems at once.
    pub fn validate(&self, strings: &UiStrings) -> Result<ContactSubmission, FormErrors> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        let errors = FormErrors {
            name: if name.is_empty() {
                Some(strings.error_name_required)
            } else if name.chars().count() > MAX_NAME_LEN {
                Some(strings.error_name_too_long)
            } else {
                None
            },
            email: (!is_valid_email(email)).then_some(strings.error_email_invalid),
            message: if message.is_empty() {
                Some(strings.error_message_required)
            } else if message.chars().count() > MAX_MESSAGE_LEN {
                Some(strings.error_message_too_long)
            } else {
                None
            },
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ContactSubmission {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{ENGLISH_STRINGS, SPANISH_STRINGS};

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co.uk"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email("user@-bad.com"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email(&format!("{}@example.com", "a".repeat(250))));
    }

    #[test]
    fn test_validate_trims_fields() {
        let submission = form("  Ada  ", " ada@example.com ", "\nHello\n")
            .validate(&ENGLISH_STRINGS)
            .unwrap();
        assert_eq!(submission.name, "Ada");
        assert_eq!(submission.email, "ada@example.com");
        assert_eq!(submission.message, "Hello");
    }

    #[test]
    fn test_validate_reports_every_field() {
        let errors = form(" ", "nope", "").validate(&ENGLISH_STRINGS).unwrap_err();
        assert_eq!(errors.name, Some(ENGLISH_STRINGS.error_name_required));
        assert_eq!(errors.email, Some(ENGLISH_STRINGS.error_email_invalid));
        assert_eq!(errors.message, Some(ENGLISH_STRINGS.error_message_required));
    }

    #[test]
    fn test_validate_malformed_email_only() {
        let errors = form("Ada", "ada.example.com", "Hi")
            .validate(&SPANISH_STRINGS)
            .unwrap_err();
        assert_eq!(errors.name, None);
        assert_eq!(errors.email, Some(SPANISH_STRINGS.error_email_invalid));
        assert_eq!(errors.message, None);
    }

    #[test]
    fn test_validate_length_limits() {
        let errors = form(&"n".repeat(MAX_NAME_LEN + 1), "a@b.co", &"m".repeat(MAX_MESSAGE_LEN + 1))
            .validate(&ENGLISH_STRINGS)
            .unwrap_err();
        assert_eq!(errors.name, Some(ENGLISH_STRINGS.error_name_too_long));
        assert_eq!(errors.message, Some(ENGLISH_STRINGS.error_message_too_long));
    }
}
