use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use storerate_config::ServerConfig;

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let matched_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let request_id = uuid::Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        method = %method,
        path = %matched_path,
        "Incoming request"
    );

    let response = next.run(req).await;
    let latency = start.elapsed();
    let status = response.status();

    match status.as_u16() {
        400..=499 => {
            warn!(
                request_id = %request_id,
                method = %method,
                path = %matched_path,
                status = %status.as_u16(),
                latency_ms = %latency.as_millis(),
                "Client error"
            );
        }
        500..=599 => {
            error!(
                request_id = %request_id,
                method = %method,
                path = %matched_path,
                status = %status.as_u16(),
                latency_ms = %latency.as_millis(),
                "Server error"
            );
        }
        _ => {
            info!(
                request_id = %request_id,
                method = %method,
                path = %matched_path,
                status = %status.as_u16(),
                latency_ms = %latency.as_millis(),
                "Request completed"
            );
        }
    }

    response
}

/// Console filter directives: `RUST_LOG` wins, then `LOG_LEVEL` for this crate.
fn console_directives(rust_log: Option<&str>, log_level: Option<&str>) -> String {
    if let Some(directives) = rust_log.map(str::trim).filter(|d| !d.is_empty()) {
        return directives.to_string();
    }

    let level = log_level
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or("info")
        .to_lowercase();

    format!(
        "{}={level},storerate_core={level},tower_http=warn,sqlx=warn",
        env!("CARGO_CRATE_NAME")
    )
}

/// Installs the global subscriber: compact console output, an error-only log
/// file, and a JSON file for ingestion. Files rotate daily under `log_dir`.
pub fn init_tracing(config: &ServerConfig) -> anyhow::Result<()> {
    use std::fs;
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::fmt;

    fs::create_dir_all(&config.log_dir)?;

    let rust_log = std::env::var("RUST_LOG").ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    let console_filter =
        EnvFilter::try_new(console_directives(rust_log.as_deref(), log_level.as_deref()))?;

    let console_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter);

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "storerate.log");

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    let json_appender =
        RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "storerate.json");

    let json_layer = fmt::layer()
        .json()
        .with_writer(json_appender)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .try_init()?;

    info!(
        environment = %config.environment.as_str(),
        log_dir = %config.log_dir,
        "Tracing initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_log_takes_precedence() {
        assert_eq!(
            console_directives(Some("debug"), Some("error")),
            "debug".to_string()
        );
    }

    #[test]
    fn test_log_level_applies_to_crate() {
        let directives = console_directives(None, Some("DEBUG"));
        assert!(directives.starts_with("storerate=debug"));
        assert!(directives.contains("tower_http=warn"));
    }

    #[test]
    fn test_defaults_to_info() {
        let directives = console_directives(Some("  "), None);
        assert!(directives.starts_with("storerate=info"));
    }
}
