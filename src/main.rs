use dotenvy::dotenv;
use tracing::{error, info, warn};

use storerate::logging::init_tracing;
use storerate::metrics::init_metrics;
use storerate::router::init_router;
use storerate::state::AppState;
use storerate_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
use storerate_db::{close_db_pool, init_db_pool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let server_config = ServerConfig::from_env();
    init_tracing(&server_config)?;

    let jwt_config = JwtConfig::from_env();
    if jwt_config.uses_default_secret() {
        warn!("JWT_SECRET is not set; using the built-in development secret");
    }

    let database_config = DatabaseConfig::from_env();
    let db = init_db_pool(&database_config).await.map_err(|e| {
        error!(error = %e, "Failed to connect to database");
        e
    })?;
    info!(
        max_connections = %database_config.max_connections,
        "Database pool ready"
    );

    let metrics_handle = if server_config.metrics_enabled {
        Some(init_metrics()?)
    } else {
        None
    };

    let state = AppState {
        db: db.clone(),
        jwt_config,
        cors_config: CorsConfig::from_env(),
        server_config: server_config.clone(),
        metrics_handle,
    };
    let app = init_router(state);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(
        address = %address,
        environment = %server_config.environment.as_str(),
        "Server running"
    );
    info!("Swagger UI available at http://{address}/swagger-ui");
    info!("Scalar UI available at http://{address}/scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    close_db_pool(&db).await;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
