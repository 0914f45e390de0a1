use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use crate::contact::{MailSecurity, SmtpSettings};

pub const DEFAULT_SECRET_KEY: &str = "dev-secret-key-change-in-production";

/// Mail relay settings; absent when `MAIL_SERVER` isn't set.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp: SmtpSettings,
    pub sender: String,
    pub recipient: String,
}

/// Application configuration loaded once from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,
    pub environment: String,
    /// Signs the session cookie
    pub secret_key: String,

    // Content
    pub content_dir: PathBuf,
    pub blog_dir: PathBuf,
    pub blog_auto_reload: bool,
    pub static_dir: PathBuf,
    pub site_url: String,
    pub site_title: String,

    // Contact form
    pub mail: Option<MailConfig>,

    // CV export
    pub pdf_renderer_bin: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let secret_key = std::env::var("SECRET_KEY").unwrap_or_default();
        let secret_key = if secret_key.is_empty() || secret_key == DEFAULT_SECRET_KEY {
            if environment == "production" {
                bail!("SECRET_KEY must be set to a unique value in production");
            }
            tracing::warn!("SECRET_KEY not set, using the insecure development key");
            DEFAULT_SECRET_KEY.to_string()
        } else {
            secret_key
        };

        let port = match std::env::var("PORT") {
            Ok(v) => v.parse::<u16>().context("PORT must be a valid port number")?,
            Err(_) => 5000,
        };

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port,
            environment,
            secret_key,

            content_dir: env_path("CONTENT_DIR", "content"),
            blog_dir: env_path("BLOG_DIR", "posts"),
            blog_auto_reload: env_flag("BLOG_AUTO_RELOAD"),
            static_dir: env_path("STATIC_DIR", "static"),
            site_url: std::env::var("SITE_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string())
                .trim_end_matches('/')
                .to_string(),
            site_title: std::env::var("SITE_TITLE").unwrap_or_else(|_| "Portfolio".to_string()),

            mail: mail_from_env()?,

            pdf_renderer_bin: std::env::var("PDF_RENDERER_BIN")
                .unwrap_or_else(|_| "wkhtmltopdf".to_string()),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn mail_from_env() -> Result<Option<MailConfig>> {
    let Ok(host) = std::env::var("MAIL_SERVER") else {
        return Ok(None);
    };

    let security = MailSecurity::from_flags(env_flag("MAIL_USE_SSL"), env_flag("MAIL_USE_TLS"));
    let port = match std::env::var("MAIL_PORT") {
        Ok(v) => v.parse::<u16>().context("MAIL_PORT must be a valid port number")?,
        Err(_) => match security {
            MailSecurity::ImplicitTls => 465,
            MailSecurity::StartTls => 587,
            MailSecurity::Plain => 25,
        },
    };

    let username = std::env::var("MAIL_USERNAME").ok().filter(|v| !v.is_empty());
    let sender = std::env::var("MAIL_DEFAULT_SENDER")
        .ok()
        .or_else(|| username.clone())
        .context("MAIL_DEFAULT_SENDER (or MAIL_USERNAME) not set")?;
    let recipient = std::env::var("MAIL_RECIPIENT").unwrap_or_else(|_| sender.clone());

    Ok(Some(MailConfig {
        smtp: SmtpSettings {
            host,
            port,
            username,
            password: std::env::var("MAIL_PASSWORD").ok().filter(|v| !v.is_empty()),
            security,
        },
        sender,
        recipient,
    }))
}

fn env_path(key: &str, default: &str) -> PathBuf {
    std::env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

/// `true`, `1`, `yes` and `on` (any case) count as set.
fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" 1 "));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_env_path_default() {
        assert_eq!(
            env_path("PORTFOLIO_SITE_TEST_UNSET_PATH", "content"),
            PathBuf::from("content")
        );
    }
}
