use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tower_http::request_id::{
    MakeRequestUuid, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};

use crate::i18n::Language;

/// Asset and health-check paths are logged at debug so page traffic stays readable.
fn is_quiet_path(path: &str) -> bool {
    path.starts_with("/static/") || path == "/pygments.css" || path.starts_with("/health")
}

/// Language segment of a `/{lang}/...` path, if it names a supported one.
fn path_language(path: &str) -> Option<Language> {
    path.trim_start_matches('/')
        .split('/')
        .next()
        .and_then(Language::from_code)
}

pub async fn log_request(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let req_id: String = request
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let quiet = is_quiet_path(uri.path());
    let language = path_language(uri.path())
        .map(|l| l.code())
        .unwrap_or("-");

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            request_id = %req_id,
            method = %method,
            uri = %uri,
            language,
            status = %status,
            duration_ms = %duration.as_millis(),
            "request completed with error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            request_id = %req_id,
            method = %method,
            uri = %uri,
            language,
            status = %status,
            duration_ms = %duration.as_millis(),
            "request completed with client error"
        );
    } else if quiet {
        tracing::debug!(
            request_id = %req_id,
            uri = %uri,
            status = %status,
            duration_ms = %duration.as_millis(),
            "asset served"
        );
    } else {
        tracing::info!(
            request_id = %req_id,
            method = %method,
            uri = %uri,
            language,
            status = %status,
            duration_ms = %duration.as_millis(),
            "request completed"
        );
    }

    response
}

pub fn request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}
