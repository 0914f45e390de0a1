use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::blog::BlogError;
use crate::content::ContentError;
use crate::i18n::Language;
use crate::render::{self, PdfError};

/// Application-level error type.
/// Implements `IntoResponse` so handlers can return `Result<T, AppError>`.
/// Every variant is scoped to the request that produced it.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound { language: Language },

    /// `language` is the one to answer in (the session's).
    #[error("Unsupported language: {code}")]
    UnsupportedLanguage { code: String, language: Language },

    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Blog error: {0}")]
    Blog(BlogError),

    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),

    /// A server error raised while serving a page in `language`.
    #[error("{source}")]
    InLanguage {
        language: Language,
        source: Box<AppError>,
    },
}

impl AppError {
    pub fn not_found(language: Language) -> Self {
        AppError::NotFound { language }
    }

    /// Missing posts become a localized 404; anything else is a server error.
    pub fn blog(err: BlogError, language: Language) -> Self {
        match err {
            BlogError::NotFound(path) => {
                tracing::debug!("Blog post not found: {}", path);
                AppError::NotFound { language }
            }
            other => AppError::Blog(other).localized(language),
        }
    }

    /// Tag a server error with the language its error page should use.
    /// Errors that already carry a language are returned unchanged.
    pub fn localized(self, language: Language) -> Self {
        match self {
            AppError::NotFound { .. }
            | AppError::UnsupportedLanguage { .. }
            | AppError::InLanguage { .. } => self,
            other => AppError::InLanguage {
                language,
                source: Box::new(other),
            },
        }
    }

    fn status_and_page(&self, language: Language) -> (StatusCode, maud::Markup) {
        match self {
            AppError::NotFound { language } => {
                (StatusCode::NOT_FOUND, render::pages::not_found(*language))
            }
            AppError::UnsupportedLanguage { code, language } => {
                tracing::debug!("Unsupported language segment: {}", code);
                (StatusCode::NOT_FOUND, render::pages::not_found(*language))
            }
            AppError::InLanguage { language, source } => source.status_and_page(*language),
            AppError::Content(e) => {
                tracing::error!("Content error: {e}");
                server_error(language)
            }
            AppError::Blog(e) => {
                tracing::error!("Blog error: {e}");
                server_error(language)
            }
            AppError::Pdf(e) => {
                tracing::error!("PDF error: {e}");
                server_error(language)
            }
            AppError::Session(msg) => {
                tracing::error!("Session error: {msg}");
                server_error(language)
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                server_error(language)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, page) = self.status_and_page(Language::DEFAULT);
        (status, Html(page.into_string())).into_response()
    }
}

fn server_error(language: Language) -> (StatusCode, maud::Markup) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        render::pages::server_error(language),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::SPANISH_STRINGS;

    #[test]
    fn test_not_found_status() {
        let res = AppError::not_found(Language::Es).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unsupported_language_is_not_found() {
        let res = AppError::UnsupportedLanguage {
            code: "fr".to_string(),
            language: Language::Es,
        }
        .into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_blog_not_found_maps_to_404() {
        let err = AppError::blog(BlogError::NotFound("en/x".to_string()), Language::En);
        assert!(matches!(err, AppError::NotFound { language: Language::En }));
    }

    #[test]
    fn test_internal_errors_are_500() {
        let res = AppError::Session("store unavailable".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let res = AppError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    async fn body_string(res: Response) -> String {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_localized_server_error_page() {
        let err = AppError::Pdf(PdfError::Empty).localized(Language::Es);
        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_string(res).await;
        assert!(body.contains(SPANISH_STRINGS.server_error_title));
        assert!(body.contains("<html lang=\"es\">"));
    }

    #[tokio::test]
    async fn test_unsupported_language_answers_in_session_language() {
        let res = AppError::UnsupportedLanguage {
            code: "fr".to_string(),
            language: Language::Es,
        }
        .into_response();
        assert!(body_string(res).await.contains(SPANISH_STRINGS.not_found_title));
    }

    #[test]
    fn test_localized_keeps_existing_language() {
        let err = AppError::not_found(Language::En).localized(Language::Es);
        assert!(matches!(err, AppError::NotFound { language: Language::En }));

        let err = AppError::Session("x".to_string())
            .localized(Language::Es)
            .localized(Language::En);
        assert!(matches!(err, AppError::InLanguage { language: Language::Es, .. }));
    }

    #[test]
    fn test_blog_io_error_is_localized() {
        let err = AppError::blog(
            BlogError::Io {
                path: "posts".into(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "denied"),
            },
            Language::Es,
        );
        assert!(matches!(err, AppError::InLanguage { language: Language::Es, .. }));
    }
}
