/**
 * Language Routes
 * Root redirect and the explicit language switch
 */
use axum::{
    extract::Path,
    http::{header, HeaderMap},
    response::Redirect,
};
use tower_sessions::Session;

use crate::error::AppError;
use crate::i18n::Language;
use crate::session::{session_language, set_session_language, PageContext};

/// GET / - redirect to the session language (English when unset)
pub async fn root(session: Session) -> Redirect {
    let language = session_language(&session).await;
    Redirect::to(&format!("/{}/", language.code()))
}

/// GET /{lang} - add the trailing slash the index route expects
pub async fn language_root(ctx: PageContext) -> Redirect {
    Redirect::permanent(&format!("/{}/", ctx.language.code()))
}

/// GET /{lang}/blog - add the trailing slash the blog index expects
pub async fn blog_root(ctx: PageContext) -> Redirect {
    Redirect::permanent(&format!("/{}/blog/", ctx.language.code()))
}

/// GET /set_language/{lang}
///
/// Stores the language and sends the visitor to the same page in that
/// language when the referring page is one of ours, or to its index otherwise.
pub async fn set_language(
    Path(code): Path<String>,
    session: Session,
    headers: HeaderMap,
) -> Result<Redirect, AppError> {
    let Some(language) = Language::from_code(&code) else {
        return Err(AppError::UnsupportedLanguage {
            language: session_language(&session).await,
            code,
        });
    };

    set_session_language(&session, language)
        .await
        .map_err(|e| e.localized(language))?;

    let referer = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok());
    Ok(Redirect::to(&equivalent_path(referer, language)))
}

/// Path of the referring page with its language segment swapped for
/// `target`. Only the path of the referer is used, so the redirect always
/// stays on this site.
pub fn equivalent_path(referer: Option<&str>, target: Language) -> String {
    let fallback = format!("/{}/", target.code());

    let Some(referer) = referer else {
        return fallback;
    };

    let path = match referer.find("://") {
        Some(idx) => {
            let after_scheme = &referer[idx + 3..];
            match after_scheme.find('/') {
                Some(slash) => &after_scheme[slash..],
                None => return fallback,
            }
        }
        None => referer,
    };

    if !path.starts_with('/') || path.starts_with("//") {
        return fallback;
    }

    let mut segments = path[1..].splitn(2, '/');
    let first = segments.next().unwrap_or_default();
    let rest = segments.next();

    match (Language::from_code(first), rest) {
        (Some(_), Some(rest)) => format!("/{}/{}", target.code(), rest),
        _ => fallback,
    }
}
