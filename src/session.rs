//! Per-request context: the active language and one-shot flash messages.
//!
//! Both live in the server-side session, keyed by a signed cookie. Language
//! routes receive a [`PageContext`] resolved from the `{lang}` path segment
//! instead of touching the session directly.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tower_sessions::Session;

use crate::error::AppError;
use crate::i18n::{Language, UiStrings};

pub const LANGUAGE_KEY: &str = "lang";
pub const FLASHES_KEY: &str = "_flashes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            FlashKind::Success => "flash flash-success",
            FlashKind::Error => "flash flash-error",
        }
    }
}

/// A status message shown once, on the page after a redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

/// The session language, or the default when unset or unreadable.
pub async fn session_language(session: &Session) -> Language {
    match session.get::<Language>(LANGUAGE_KEY).await {
        Ok(Some(language)) => language,
        Ok(None) => Language::DEFAULT,
        Err(e) => {
            tracing::warn!("Failed to read session language: {}", e);
            Language::DEFAULT
        }
    }
}

pub async fn set_session_language(session: &Session, language: Language) -> Result<(), AppError> {
    if session.get::<Language>(LANGUAGE_KEY).await.ok().flatten() == Some(language) {
        return Ok(());
    }
    session
        .insert(LANGUAGE_KEY, language)
        .await
        .map_err(|e| AppError::Session(e.to_string()))
}

pub async fn push_flash(session: &Session, flash: Flash) -> Result<(), AppError> {
    let mut flashes: Vec<Flash> = session
        .get(FLASHES_KEY)
        .await
        .map_err(|e| AppError::Session(e.to_string()))?
        .unwrap_or_default();
    flashes.push(flash);
    session
        .insert(FLASHES_KEY, flashes)
        .await
        .map_err(|e| AppError::Session(e.to_string()))
}

/// Remove and return pending flashes.
pub async fn take_flashes(session: &Session) -> Vec<Flash> {
    match session.remove::<Vec<Flash>>(FLASHES_KEY).await {
        Ok(flashes) => flashes.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Failed to read flash messages: {}", e);
            Vec::new()
        }
    }
}

/// Extracted from language-qualified routes (`/{lang}/...`).
///
/// Rejects unsupported languages with a 404 and records the visited language
/// in the session.
pub struct PageContext {
    pub language: Language,
    session: Session,
}

impl PageContext {
    pub fn strings(&self) -> &'static UiStrings {
        UiStrings::for_language(self.language)
    }

    pub async fn flash(&self, kind: FlashKind, message: impl Into<String>) -> Result<(), AppError> {
        push_flash(
            &self.session,
            Flash {
                kind,
                message: message.into(),
            },
        )
        .await
    }

    /// Tag an error so its page is rendered in this request's language.
    pub fn localize(&self, err: impl Into<AppError>) -> AppError {
        err.into().localized(self.language)
    }

    pub async fn take_flashes(&self) -> Vec<Flash> {
        take_flashes(&self.session).await
    }
}

impl<S> FromRequestParts<S> for PageContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound {
                language: Language::DEFAULT,
            })?;

        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Session(msg.to_string()))?;

        let code = params.get("lang").map(String::as_str).unwrap_or_default();
        let Some(language) = Language::from_code(code) else {
            return Err(AppError::UnsupportedLanguage {
                code: code.to_string(),
                language: session_language(&session).await,
            });
        };

        set_session_language(&session, language).await?;

        Ok(Self { language, session })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_language_defaults_to_english() {
        assert_eq!(session_language(&session()).await, Language::En);
    }

    #[tokio::test]
    async fn test_language_round_trip() {
        let session = session();
        set_session_language(&session, Language::Es).await.unwrap();
        assert_eq!(session_language(&session).await, Language::Es);
    }

    #[tokio::test]
    async fn test_flashes_are_one_shot() {
        let session = session();
        push_flash(
            &session,
            Flash {
                kind: FlashKind::Success,
                message: "sent".to_string(),
            },
        )
        .await
        .unwrap();

        let first = take_flashes(&session).await;
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].message, "sent");
        assert!(take_flashes(&session).await.is_empty());
    }
}
