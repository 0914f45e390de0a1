//! Mail transports.
//!
//! [`MailTransport`] is the seam the notifier talks to; [`SmtpMailer`] is the
//! real implementation on top of lettre.

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid address '{address}': {reason}")]
    Address { address: String, reason: String },

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("mail transport error: {0}")]
    Transport(String),

    #[error("mail server is not configured")]
    NotConfigured,
}

/// How the connection to the mail server is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailSecurity {
    /// TLS from the first byte (usually port 465)
    ImplicitTls,
    /// Plain connection upgraded with STARTTLS (usually port 587)
    StartTls,
    /// No encryption; local relays and test servers only
    Plain,
}

impl MailSecurity {
    /// SSL wins over TLS when both flags are set.
    pub fn from_flags(use_ssl: bool, use_tls: bool) -> Self {
        if use_ssl {
            MailSecurity::ImplicitTls
        } else if use_tls {
            MailSecurity::StartTls
        } else {
            MailSecurity::Plain
        }
    }
}

/// A message ready to hand to a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    /// (display name, address) of the person to answer
    pub reply_to: Option<(String, String)>,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError>;
}

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub security: MailSecurity,
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailError> {
        let builder = match settings.security {
            MailSecurity::ImplicitTls => AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
                .map_err(|e| MailError::Transport(e.to_string()))?,
            MailSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
                    .map_err(|e| MailError::Transport(e.to_string()))?
            }
            MailSecurity::Plain => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host),
        };

        let mut builder = builder.port(settings.port);
        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        tracing::info!(
            host = %settings.host,
            port = settings.port,
            security = ?settings.security,
            "SMTP transport configured"
        );

        Ok(Self {
            transport: builder.build(),
        })
    }
}

fn parse_address(address: &str) -> Result<Address, MailError> {
    address.parse().map_err(|e: lettre::address::AddressError| MailError::Address {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

/// Turn an [`OutgoingMail`] into a lettre message.
pub fn build_message(mail: &OutgoingMail) -> Result<Message, MailError> {
    let mut builder = Message::builder()
        .from(Mailbox::new(None, parse_address(&mail.from)?))
        .to(Mailbox::new(None, parse_address(&mail.to)?))
        .subject(mail.subject.clone())
        .header(ContentType::TEXT_PLAIN);

    if let Some((name, address)) = &mail.reply_to {
        builder = builder.reply_to(Mailbox::new(Some(name.clone()), parse_address(address)?));
    }

    builder
        .body(mail.body.clone())
        .map_err(|e| MailError::Build(e.to_string()))
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        let message = build_message(&mail)?;
        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| MailError::Transport(e.to_string()))
    }
}

/// Stand-in used when no mail server is configured: every send fails.
#[derive(Debug, Default)]
pub struct UnconfiguredMailer;

#[async_trait]
impl MailTransport for UnconfiguredMailer {
    async fn send(&self, _mail: OutgoingMail) -> Result<(), MailError> {
        Err(MailError::NotConfigured)
    }
}
