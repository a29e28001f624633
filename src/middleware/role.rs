//! Role-based authorization middleware.
//!
//! Each route group carries a static allow-list of roles. The layer first
//! authenticates the caller (so a missing or bad token is a 401) and then
//! checks the role (a 403 when it is not allowed).

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use storerate_auth::{UserRole, describe_roles};
use storerate_core::AppError;
use storerate_models::CurrentUser;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Checks an identity against the allowed roles.
pub fn authorize(identity: Option<&CurrentUser>, allowed: &[UserRole]) -> Result<(), AppError> {
    let Some(user) = identity else {
        return Err(AppError::forbidden("Authentication required"));
    };

    if !allowed.contains(&user.role) {
        warn!(user.id = %user.id, user.role = %user.role, "Role not permitted for route");
        return Err(AppError::forbidden(format!(
            "Access denied. Required roles: {}",
            describe_roles(allowed)
        )));
    }

    Ok(())
}

/// Authenticates the request and lets it through only for `allowed_roles`.
///
/// # Usage with axum::middleware::from_fn_with_state
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/reports", get(reports))
///     .route_layer(middleware::from_fn_with_state(state.clone(), |state, req, next| {
///         require_roles(state, req, next, &[UserRole::SystemAdmin, UserRole::StoreOwner])
///     }));
/// ```
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: &'static [UserRole],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthUser(user) = AuthUser::from_request_parts(&mut parts, &state).await?;
    authorize(Some(&user), allowed_roles)?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}

pub async fn require_system_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    require_roles(State(state), req, next, &[UserRole::SystemAdmin])
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

pub async fn require_normal_user(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    require_roles(State(state), req, next, &[UserRole::NormalUser])
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

pub async fn require_store_owner(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    require_roles(State(state), req, next, &[UserRole::StoreOwner])
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn user_with_role(role: UserRole) -> CurrentUser {
        CurrentUser {
            id: 9,
            name: "Role Gate Test Account".to_string(),
            email: "gate@example.com".to_string(),
            role,
            address: None,
        }
    }

    #[test]
    fn test_authorize_allows_listed_role() {
        let user = user_with_role(UserRole::StoreOwner);
        assert!(authorize(Some(&user), &[UserRole::SystemAdmin, UserRole::StoreOwner]).is_ok());
    }

    #[test]
    fn test_authorize_denies_other_role() {
        let user = user_with_role(UserRole::NormalUser);
        let err = authorize(Some(&user), &[UserRole::SystemAdmin]).unwrap_err();

        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.error.to_string(), "Access denied. Required roles: system_admin");
    }

    #[test]
    fn test_authorize_lists_every_allowed_role() {
        let user = user_with_role(UserRole::NormalUser);
        let err = authorize(Some(&user), &[UserRole::SystemAdmin, UserRole::StoreOwner])
            .unwrap_err();

        assert_eq!(
            err.error.to_string(),
            "Access denied. Required roles: system_admin, store_owner"
        );
    }

    #[test]
    fn test_authorize_without_identity() {
        let err = authorize(None, &[UserRole::NormalUser]).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.error.to_string(), "Authentication required");
    }
}
