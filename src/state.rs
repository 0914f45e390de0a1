use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use crate::blog::BlogLoader;
use crate::config::Config;
use crate::contact::{ContactNotifier, MailTransport, SmtpMailer, UnconfiguredMailer};
use crate::content::{ContentStore, ResolvedContent};
use crate::i18n::Language;
use crate::render::{PdfRenderer, WkhtmltopdfRenderer};

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything in here is read-only for the lifetime of the process.
#[derive(Clone)]
pub struct AppState {
    pub site_title: String,
    /// Absolute base URL, used for feed links
    pub site_url: String,
    pub content: Arc<ContentStore>,
    pub blog: Arc<BlogLoader>,
    pub notifier: ContactNotifier,
    /// Whether a real mail server is behind `notifier`
    pub mail_configured: bool,
    pub pdf: Arc<dyn PdfRenderer>,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
}

impl AppState {
    /// State over already-loaded parts, with placeholder site metadata.
    pub fn new(
        content: ContentStore,
        blog: BlogLoader,
        notifier: ContactNotifier,
        pdf: Arc<dyn PdfRenderer>,
    ) -> Self {
        Self {
            site_title: "Portfolio".to_string(),
            site_url: "http://localhost:5000".to_string(),
            content: Arc::new(content),
            blog: Arc::new(blog),
            notifier,
            mail_configured: true,
            pdf,
            static_dir: PathBuf::from("static"),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let content = ContentStore::load(&config.content_dir)
            .with_context(|| format!("loading content from {}", config.content_dir.display()))?;

        // Surface shape errors at startup instead of on the first request.
        for language in Language::ALL {
            ResolvedContent::build(&content, language)
                .with_context(|| format!("resolving {language} content"))?;
        }

        let blog = BlogLoader::new(&config.blog_dir, config.blog_auto_reload)
            .with_context(|| format!("loading posts from {}", config.blog_dir.display()))?;

        let (transport, sender, recipient): (Arc<dyn MailTransport>, String, String) =
            match &config.mail {
                Some(mail) => (
                    Arc::new(SmtpMailer::new(&mail.smtp).context("configuring SMTP transport")?),
                    mail.sender.clone(),
                    mail.recipient.clone(),
                ),
                None => {
                    tracing::warn!("MAIL_SERVER not set; contact form submissions will fail");
                    (Arc::new(UnconfiguredMailer), String::new(), String::new())
                }
            };

        Ok(Self {
            site_title: config.site_title.clone(),
            site_url: config.site_url.clone(),
            content: Arc::new(content),
            blog: Arc::new(blog),
            notifier: ContactNotifier::new(transport, sender, recipient),
            mail_configured: config.mail.is_some(),
            pdf: Arc::new(WkhtmltopdfRenderer::new(config.pdf_renderer_bin.clone())),
            static_dir: config.static_dir.clone(),
        })
    }
}
