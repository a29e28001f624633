use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use tracing::{debug, instrument};

use storerate_auth::{extract_bearer_token, verify_token};
use storerate_core::AppError;
use storerate_models::CurrentUser;

use crate::modules::auth::service::AuthService;
use crate::state::AppState;

/// Extractor for the authenticated caller.
///
/// The first extraction in a request runs the full check (bearer token,
/// signature and expiry, user still exists) and caches the resulting
/// [`CurrentUser`] in the request extensions. Later extractions, e.g. a
/// handler behind a role layer, reuse it.
#[derive(Debug, Clone)]
pub struct AuthUser(pub CurrentUser);

impl AuthUser {
    pub fn id(&self) -> i32 {
        self.0.id
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(AuthUser(user.clone()));
        }

        let user = authenticate(&parts.headers, state).await?;
        parts.extensions.insert(user.clone());

        Ok(AuthUser(user))
    }
}

/// Like [`AuthUser`] but never rejects; any failure yields `None`.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<CurrentUser>);

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthUser(
            AuthUser::from_request_parts(parts, state)
                .await
                .ok()
                .map(|AuthUser(user)| user),
        ))
    }
}

/// Resolves the caller from the `Authorization` header.
#[instrument(skip_all)]
pub async fn authenticate(headers: &HeaderMap, state: &AppState) -> Result<CurrentUser, AppError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = extract_bearer_token(header)
        .ok_or_else(|| AppError::unauthorized("Access token is required"))?;

    let claims = verify_token(token, &state.jwt_config).map_err(|e| {
        debug!(error = %e, "Token rejected");
        AppError::unauthorized(e.to_string())
    })?;

    AuthService::find_current_user(&state.db, claims.user_id)
        .await?
        .ok_or_else(|| {
            debug!(user.id = %claims.user_id, "Token subject no longer exists");
            AppError::unauthorized("User not found")
        })
}
