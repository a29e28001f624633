use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use storerate_core::response::ok;
use storerate_core::{ApiResponse, ApiResult, AppError};
use storerate_models::{
    AuthResponse, ChangePasswordRequest, LoginRequest, LogoutResponse, ProfileResponse,
    RegisterRequest,
};

use super::service::AuthService;
use crate::docs::ErrorEnvelope;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a new normal user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = AuthResponse),
        (status = 400, description = "Validation failed or malformed JSON", body = ErrorEnvelope),
        (status = 409, description = "Email already registered", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), AppError> {
    let response = AuthService::register(&state.db, dto, &state.jwt_config).await?;
    Ok((
        StatusCode::CREATED,
        ok("User registered successfully", response),
    ))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation failed", body = ErrorEnvelope),
        (status = 401, description = "Invalid email or password", body = ErrorEnvelope)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> ApiResult<AuthResponse> {
    let response = AuthService::login(&state.db, dto, &state.jwt_config).await?;
    Ok(ok("Login successful", response))
}

/// Current user's profile
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    responses(
        (status = 200, description = "Profile retrieved", body = ProfileResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all, fields(user.id = %auth_user.id()))]
pub async fn get_profile(auth_user: AuthUser) -> ApiResult<ProfileResponse> {
    Ok(ok(
        "Profile retrieved successfully",
        ProfileResponse { user: auth_user.0 },
    ))
}

/// Change the current user's password
#[utoipa::path(
    put,
    path = "/api/auth/password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password updated"),
        (status = 400, description = "Validation failed", body = ErrorEnvelope),
        (status = 401, description = "Current password is incorrect or token invalid", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all, fields(user.id = %auth_user.id()))]
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    AuthService::change_password(&state.db, auth_user.id(), dto).await?;
    Ok(Json(ApiResponse::message("Password updated successfully")))
}

/// Log out
///
/// Tokens are stateless; the client discards its copy.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = LogoutResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all, fields(user.id = %auth_user.id()))]
pub async fn logout(auth_user: AuthUser) -> ApiResult<LogoutResponse> {
    Ok(ok(
        "Logged out successfully",
        LogoutResponse {
            message: "Please remove the token from client storage".to_string(),
        },
    ))
}

/// Check that a token is still valid
#[utoipa::path(
    get,
    path = "/api/auth/verify",
    responses(
        (status = 200, description = "Token is valid", body = ProfileResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all, fields(user.id = %auth_user.id()))]
pub async fn verify(auth_user: AuthUser) -> ApiResult<ProfileResponse> {
    Ok(ok("Token is valid", ProfileResponse { user: auth_user.0 }))
}
