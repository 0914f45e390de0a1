/**
 * Blog Routes
 * Post list and single post pages, per language
 */
use axum::{
    extract::{Path, State},
    response::Html,
};
use regex::Regex;

use crate::error::AppError;
use crate::render::{pages, Chrome};
use crate::session::PageContext;
use crate::state::AppState;

// ============================================================================
// Validation
// ============================================================================

lazy_static::lazy_static! {
    /// Valid slug pattern: lowercase letters, numbers, hyphens and underscores
    static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:[-_][a-z0-9]+)*$").unwrap();
}

fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /{lang}/blog/ - every dated post, newest first
pub async fn list_posts(
    State(state): State<AppState>,
    ctx: PageContext,
) -> Result<Html<String>, AppError> {
    let posts = state
        .blog
        .posts(ctx.language)
        .map_err(|e| AppError::blog(e, ctx.language))?;

    let chrome = Chrome::new(ctx.language, state.site_title.clone(), ctx.take_flashes().await);
    Ok(Html(pages::blog_list(&chrome, &posts).into_string()))
}

/// GET /{lang}/blog/{slug}/ - single post
pub async fn get_post(
    State(state): State<AppState>,
    ctx: PageContext,
    Path((_, slug)): Path<(String, String)>,
) -> Result<Html<String>, AppError> {
    if !is_valid_slug(&slug) {
        return Err(AppError::not_found(ctx.language));
    }

    let post = state
        .blog
        .get(ctx.language, &slug)
        .map_err(|e| AppError::blog(e, ctx.language))?;

    let chrome = Chrome::new(ctx.language, state.site_title.clone(), ctx.take_flashes().await);
    Ok(Html(pages::blog_post(&chrome, &post).into_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slugs() {
        assert!(is_valid_slug("hello-world"));
        assert!(is_valid_slug("post_2024"));
        assert!(is_valid_slug("a1"));
    }

    #[test]
    fn test_invalid_slugs() {
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Hello"));
        assert!(!is_valid_slug("../secret"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("double--dash"));
    }
}
