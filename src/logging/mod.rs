/*!
 * Logging Module
 * Tracing subscriber setup and request logging middleware
 */
pub mod middleware;

use std::io;
use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

fn default_level(is_production: bool) -> &'static str {
    if is_production {
        "info"
    } else {
        "debug"
    }
}

fn default_directives(level: &str) -> String {
    format!("portfolio_site={level},tower_http=info,tower_sessions=warn,axum=info")
}

/// Errors also go to their own JSON file in every environment.
fn error_layer<S>(writer: NonBlocking) -> impl Layer<S> + Send + Sync + 'static
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    fmt::layer()
        .json()
        .with_writer(writer)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(LevelFilter::ERROR)
}

/// Initialize the logging system.
///
/// The returned guards flush the non-blocking writers when dropped and must
/// be held until the server exits.
pub fn init() -> Vec<WorkerGuard> {
    let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
    let is_production = environment == "production";
    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

    std::fs::create_dir_all(&log_dir).ok();

    // All events
    let file_appender = rolling::daily(&log_dir, "site.log");
    let (file_writer, file_guard) = non_blocking(file_appender);

    // Errors only
    let error_appender = rolling::daily(&log_dir, "error.log");
    let (error_writer, error_guard) = non_blocking(error_appender);

    let (console_writer, console_guard) = non_blocking(io::stdout());

    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| default_level(is_production).to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&log_level)));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if is_production {
        let file_layer = fmt::layer()
            .json()
            .with_writer(file_writer)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        let console_layer = fmt::layer()
            .json()
            .with_writer(console_writer)
            .with_target(false);

        subscriber
            .with(file_layer)
            .with(error_layer(error_writer))
            .with(console_layer)
            .init();
    } else {
        let file_layer = fmt::layer()
            .with_writer(file_writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false);

        let console_layer = fmt::layer()
            .with_writer(console_writer)
            .with_target(true)
            .pretty();

        subscriber
            .with(file_layer)
            .with(error_layer(error_writer))
            .with(console_layer)
            .init();
    }

    tracing::info!(
        "Logging initialized for {} environment (level {}, dir {})",
        environment,
        log_level,
        log_dir
    );

    vec![file_guard, error_guard, console_guard]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_by_environment() {
        assert_eq!(default_level(true), "info");
        assert_eq!(default_level(false), "debug");
    }

    #[test]
    fn test_default_directives_parse() {
        let directives = default_directives("warn");
        assert!(directives.starts_with("portfolio_site=warn"));
        assert!(EnvFilter::try_new(&directives).is_ok());
    }
}
