use axum::extract::State;

use storerate_core::ApiResult;
use storerate_core::response::ok;
use storerate_models::HealthResponse;

use crate::middleware::auth::OptionalAuthUser;
use crate::state::AppState;

/// Liveness probe. Reports the caller's role when a valid token is sent.
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check(
    State(state): State<AppState>,
    OptionalAuthUser(user): OptionalAuthUser,
) -> ApiResult<HealthResponse> {
    Ok(ok(
        "Server is running",
        HealthResponse {
            status: "OK".to_string(),
            environment: state.server_config.environment.as_str().to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            role: user.map(|user| user.role),
        },
    ))
}
