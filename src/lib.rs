//! Portfolio Site - bilingual portfolio, blog and contact form

pub mod blog;
pub mod config;
pub mod contact;
pub mod content;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod render;
pub mod routes;
pub mod session;
pub mod state;

use anyhow::Context;
use axum::{middleware, routing::get, Router};
use sha2::{Digest, Sha512};
use std::net::SocketAddr;
use std::process::ExitCode;
use tower_http::{
    compression::CompressionLayer, limit::RequestBodyLimitLayer, services::ServeDir,
    trace::TraceLayer,
};
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::state::AppState;

/// Contact messages are capped far below this; it only bounds buffering.
const BODY_LIMIT: usize = 64 * 1024;

/// Derive the 64-byte cookie signing key from the configured secret.
pub fn session_key(secret: &str) -> Key {
    Key::from(Sha512::digest(secret.as_bytes()).as_slice())
}

/// Create and configure the application router.
///
/// `secure_cookies` marks the session cookie `Secure`; it should be set
/// whenever the site is served over HTTPS.
pub fn create_app(state: AppState, secret_key: &str, secure_cookies: bool) -> Router {
    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_signed(session_key(secret_key));

    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(routes::language::root))
        .route("/set_language/{lang}", get(routes::language::set_language))
        .route("/pygments.css", get(routes::assets::pygments_css))
        .route("/health", get(routes::health::health_ping))
        .route("/health/detailed", get(routes::health::health_detailed))
        .route("/{lang}", get(routes::language::language_root))
        .route(
            "/{lang}/",
            get(routes::pages::index).post(routes::pages::submit_contact),
        )
        .route("/{lang}/about", get(routes::pages::about))
        .route("/{lang}/projects", get(routes::pages::projects))
        .route("/{lang}/education", get(routes::pages::education))
        .route("/{lang}/cv/pdf", get(routes::pages::cv_pdf))
        .route("/{lang}/blog", get(routes::language::blog_root))
        .route("/{lang}/blog/", get(routes::blog::list_posts))
        .route("/{lang}/blog/rss.xml", get(routes::rss::rss_feed))
        .route("/{lang}/blog/{slug}", get(routes::blog::get_post))
        .route("/{lang}/blog/{slug}/", get(routes::blog::get_post))
        .nest_service("/static", static_files)
        .fallback(routes::assets::not_found)
        .with_state(state)
        .layer(sessions)
        .layer(logging::middleware::propagate_request_id_layer())
        .layer(middleware::from_fn(logging::middleware::log_request))
        .layer(logging::middleware::request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let state = AppState::from_config(&config)?;
    let app = create_app(state, &config.secret_key, config.is_production());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid HOST/PORT {}:{}", config.host, config.port))?;
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server error")
}

/// Run the server (used by main).
pub async fn run() -> ExitCode {
    dotenvy::dotenv().ok();

    // Held until return so buffered log lines are flushed.
    let _log_guards = logging::init();

    routes::health::init_start_time();

    let result = match Config::from_env() {
        Ok(config) => serve(config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
