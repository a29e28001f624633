use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;

use storerate_config::{CorsConfig, JwtConfig, ServerConfig};

/// Shared application state handed to every handler and middleware.
///
/// The pool is built once in `main` and closed there after shutdown.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub server_config: ServerConfig,
    /// Present when metrics are enabled; renders `/metrics`.
    pub metrics_handle: Option<PrometheusHandle>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db)
            .field("cors_config", &self.cors_config)
            .field("server_config", &self.server_config)
            .field("metrics_enabled", &self.metrics_handle.is_some())
            .finish_non_exhaustive()
    }
}
