/**
 * Health Routes
 * Liveness ping and a detailed report of the loaded site data
 */
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::content::Section;
use crate::i18n::Language;
use crate::state::AppState;

// Track server start time for uptime calculation
lazy_static::lazy_static! {
    static ref SERVER_START: Instant = Instant::now();
}

/// Initialize the server start time
pub fn init_start_time() {
    lazy_static::initialize(&SERVER_START);
}

/// Single check result
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCheck {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceCheck {
    fn healthy(count: Option<usize>) -> Self {
        Self {
            status: "healthy".to_string(),
            count,
            error: None,
        }
    }

    fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            status: "unhealthy".to_string(),
            count: None,
            error: Some(error.into()),
        }
    }
}

/// Detailed health check response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedHealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthChecks {
    pub content: ServiceCheck,
    pub blog: ServiceCheck,
    pub mail: ServiceCheck,
}

/// Simple health response
#[derive(Debug, Serialize, Deserialize)]
pub struct SimpleHealthResponse {
    pub status: String,
}

/// GET /health - Simple health ping
pub async fn health_ping() -> impl IntoResponse {
    Json(SimpleHealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /health/detailed - Counts of loaded content and posts, mail setup
pub async fn health_detailed(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = SERVER_START.elapsed().as_secs();

    let items: usize = Section::ALL
        .iter()
        .map(|section| state.content.items(*section).len())
        .sum();
    let content = ServiceCheck::healthy(Some(items));

    let blog = match state.blog.pages() {
        Ok(pages) => ServiceCheck::healthy(Some(pages.len())),
        Err(e) => ServiceCheck::unhealthy(e.to_string()),
    };

    // Contact submissions fail without a mail server, but pages still render.
    let mail = if state.mail_configured {
        ServiceCheck::healthy(None)
    } else {
        ServiceCheck::unhealthy("MAIL_SERVER not configured")
    };

    let status = if blog.status == "healthy" { "ok" } else { "degraded" };

    let response = DetailedHealthResponse {
        status: status.to_string(),
        timestamp: Utc::now(),
        uptime: Some(uptime),
        checks: HealthChecks {
            content,
            blog,
            mail,
        },
    };

    tracing::debug!(
        languages = Language::ALL.len(),
        items,
        "Health report generated"
    );

    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::blog::{BlogLoader, Page};
    use crate::contact::{ContactNotifier, UnconfiguredMailer};
    use crate::content::ContentStore;
    use crate::render::WkhtmltopdfRenderer;

    fn test_state(mail_configured: bool) -> AppState {
        let blog = BlogLoader::from_pages(vec![
            Page::parse("en/one", "---\ntitle: One\ndate: 2024-01-01\n---\n"),
            Page::parse("es/uno", "---\ntitle: Uno\ndate: 2024-01-01\n---\n"),
        ]);
        let mut state = AppState::new(
            ContentStore::from_items(Vec::new()),
            blog,
            ContactNotifier::new(Arc::new(UnconfiguredMailer), "", ""),
            Arc::new(WkhtmltopdfRenderer::new("wkhtmltopdf")),
        );
        state.mail_configured = mail_configured;
        state
    }

    fn test_router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_ping))
            .route("/health/detailed", get(health_detailed))
            .with_state(state)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(app: Router, uri: &str) -> (StatusCode, T) {
        let req = Request::get(uri).body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value: T = serde_json::from_slice(&body).unwrap();
        (status, value)
    }

    #[test]
    fn test_service_check_skips_empty_fields() {
        let json = serde_json::to_string(&ServiceCheck::healthy(None)).unwrap();
        assert_eq!(json, r#"{"status":"healthy"}"#);
    }

    #[tokio::test]
    async fn test_health_ping_returns_ok() {
        init_start_time();
        let (status, body) = get_json::<SimpleHealthResponse>(test_router(test_state(true)), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
    }

    #[tokio::test]
    async fn test_health_detailed_counts_posts() {
        init_start_time();
        let (status, body) =
            get_json::<DetailedHealthResponse>(test_router(test_state(true)), "/health/detailed").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
        assert!(body.uptime.is_some());
        assert_eq!(body.checks.blog.count, Some(2));
        assert_eq!(body.checks.content.count, Some(0));
        assert_eq!(body.checks.mail.status, "healthy");
    }

    #[tokio::test]
    async fn test_health_detailed_reports_missing_mail() {
        let (_, body) =
            get_json::<DetailedHealthResponse>(test_router(test_state(false)), "/health/detailed").await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.checks.mail.status, "unhealthy");
        assert!(body.checks.mail.error.is_some());
    }
}
