/**
 * Page Routes
 * Index (with the contact form), legacy section pages and the PDF CV
 */
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use crate::blog::LATEST_POSTS;
use crate::contact::{ContactForm, DeliveryOutcome, FormErrors};
use crate::content::ResolvedContent;
use crate::error::AppError;
use crate::render::{pages, Chrome};
use crate::session::{FlashKind, PageContext};
use crate::state::AppState;

async fn chrome(state: &AppState, ctx: &PageContext) -> Chrome {
    Chrome::new(ctx.language, state.site_title.clone(), ctx.take_flashes().await)
}

async fn render_index(
    state: &AppState,
    ctx: &PageContext,
    form: &ContactForm,
    errors: &FormErrors,
) -> Result<Html<String>, AppError> {
    let content = ResolvedContent::build(&state.content, ctx.language).map_err(|e| ctx.localize(e))?;
    let latest = state
        .blog
        .latest(ctx.language, LATEST_POSTS)
        .map_err(|e| AppError::blog(e, ctx.language))?;
    let chrome = chrome(state, ctx).await;

    Ok(Html(
        pages::index(&chrome, &content, &latest, form, errors).into_string(),
    ))
}

/// GET /{lang}/
pub async fn index(State(state): State<AppState>, ctx: PageContext) -> Result<Html<String>, AppError> {
    render_index(&state, &ctx, &ContactForm::default(), &FormErrors::default()).await
}

/// POST /{lang}/ - contact form submission
///
/// Invalid input re-renders the page with field errors and never reaches the
/// mail transport. Valid input gets exactly one delivery attempt; the outcome
/// picks the flash message shown after the redirect.
pub async fn submit_contact(
    State(state): State<AppState>,
    ctx: PageContext,
    Form(form): Form<ContactForm>,
) -> Result<Response, AppError> {
    let strings = ctx.strings();

    let submission = match form.validate(strings) {
        Ok(submission) => submission,
        Err(errors) => {
            tracing::debug!(language = %ctx.language, "Contact form rejected by validation");
            let page = render_index(&state, &ctx, &form, &errors).await?;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    let (kind, message) = match state.notifier.notify(&submission, ctx.language).await {
        DeliveryOutcome::Delivered => (FlashKind::Success, strings.flash_contact_success),
        // The reason has been logged by the notifier; users only see the generic text.
        DeliveryOutcome::Failed { .. } => (FlashKind::Error, strings.flash_contact_failure),
    };
    ctx.flash(kind, message).await.map_err(|e| ctx.localize(e))?;

    Ok(Redirect::to(&format!("/{}/#contact", ctx.language.code())).into_response())
}

/// GET /{lang}/about
pub async fn about(State(state): State<AppState>, ctx: PageContext) -> Result<Html<String>, AppError> {
    let content = ResolvedContent::build(&state.content, ctx.language).map_err(|e| ctx.localize(e))?;
    let about = content.about.ok_or(AppError::not_found(ctx.language))?;
    let chrome = chrome(&state, &ctx).await;
    Ok(Html(pages::about_page(&chrome, &about).into_string()))
}

/// GET /{lang}/projects
pub async fn projects(State(state): State<AppState>, ctx: PageContext) -> Result<Html<String>, AppError> {
    let content = ResolvedContent::build(&state.content, ctx.language).map_err(|e| ctx.localize(e))?;
    if content.projects.is_empty() {
        return Err(AppError::not_found(ctx.language));
    }
    let chrome = chrome(&state, &ctx).await;
    Ok(Html(pages::projects_page(&chrome, &content.projects).into_string()))
}

/// GET /{lang}/education
pub async fn education(State(state): State<AppState>, ctx: PageContext) -> Result<Html<String>, AppError> {
    let content = ResolvedContent::build(&state.content, ctx.language).map_err(|e| ctx.localize(e))?;
    if content.education.is_empty() {
        return Err(AppError::not_found(ctx.language));
    }
    let chrome = chrome(&state, &ctx).await;
    Ok(Html(pages::education_page(&chrome, &content.education).into_string()))
}

/// GET /{lang}/cv/pdf
pub async fn cv_pdf(State(state): State<AppState>, ctx: PageContext) -> Result<Response, AppError> {
    let content = ResolvedContent::build(&state.content, ctx.language).map_err(|e| ctx.localize(e))?;
    if content.about.is_none() {
        return Err(AppError::not_found(ctx.language));
    }
    let html = pages::cv_document(&content).into_string();
    let pdf = state.pdf.render(&html).await.map_err(|e| ctx.localize(e))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"cv-{}.pdf\"", ctx.language.code()),
            ),
        ],
        pdf,
    )
        .into_response())
}
