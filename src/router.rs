use std::any::Any;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::{metrics_app, metrics_middleware};
use crate::middleware::errors::expose_error_details;
use crate::middleware::role::{require_normal_user, require_store_owner, require_system_admin};
use crate::modules::admin::init_admin_router;
use crate::modules::auth::init_auth_router;
use crate::modules::health::init_health_router;
use crate::modules::store_owner::init_store_owner_router;
use crate::modules::user::init_user_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Router, middleware};
use storerate_core::AppError;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tracing::error;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest(
                    "/admin",
                    init_admin_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        require_system_admin,
                    )),
                )
                .nest(
                    "/user",
                    init_user_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        require_normal_user,
                    )),
                )
                .nest(
                    "/store-owner",
                    init_store_owner_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        require_store_owner,
                    )),
                )
                .nest("/health", init_health_router()),
        )
        .with_state(state.clone());

    if let Some(handle) = state.metrics_handle.clone() {
        router = router
            .merge(metrics_app(handle))
            .layer(middleware::from_fn(metrics_middleware));
    }

    router = router
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(handle_panic));

    if state.server_config.environment.is_development() {
        router = router.layer(middleware::from_fn(expose_error_details));
    }

    router
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(logging_middleware))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true)
}

async fn route_not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("Route {} not found", uri.path()))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!(panic = %detail, "Handler panicked");
    AppError::internal_error(detail).into_response()
}
