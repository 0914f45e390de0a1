/**
 * Asset Routes
 * Syntax highlighting stylesheet and the not-found fallback
 */
use axum::{
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse},
};
use tower_sessions::Session;

use crate::i18n::Language;
use crate::render::pages;
use crate::session::session_language;

const PYGMENTS_CSS: &str = include_str!("../../static/pygments.css");

/// GET /pygments.css - code highlighting theme for rendered posts
pub async fn pygments_css() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        PYGMENTS_CSS,
    )
}

/// Any unmatched path. The page is shown in the path's language when it has
/// one, otherwise in the session language.
pub async fn not_found(uri: Uri, session: Session) -> impl IntoResponse {
    let language = match uri
        .path()
        .trim_start_matches('/')
        .split('/')
        .next()
        .and_then(Language::from_code)
    {
        Some(language) => language,
        None => session_language(&session).await,
    };

    tracing::debug!("No route for {}", uri);
    (
        StatusCode::NOT_FOUND,
        Html(pages::not_found(language).into_string()),
    )
}
