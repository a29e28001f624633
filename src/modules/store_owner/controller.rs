use axum::extract::State;
use tracing::instrument;

use storerate_core::ApiResult;
use storerate_core::response::ok;
use storerate_models::{OwnerDashboardResponse, OwnerRatingListParams, OwnerRatingsResponse};

use super::service::StoreOwnerService;
use crate::docs::ErrorEnvelope;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ListQuery;

/// The owner's store with its rating aggregate
#[utoipa::path(
    get,
    path = "/api/store-owner/dashboard",
    responses(
        (status = 200, description = "Dashboard data retrieved", body = OwnerDashboardResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 403, description = "Not a store owner", body = ErrorEnvelope),
        (status = 404, description = "No store assigned to this owner", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Store Owner"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.id()))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<OwnerDashboardResponse> {
    let store = StoreOwnerService::dashboard(&state.db, auth_user.id()).await?;
    Ok(ok("Dashboard data retrieved", OwnerDashboardResponse { store }))
}

/// Users who rated the owner's store
#[utoipa::path(
    get,
    path = "/api/store-owner/ratings",
    params(OwnerRatingListParams),
    responses(
        (status = 200, description = "Ratings retrieved", body = OwnerRatingsResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 403, description = "Not a store owner", body = ErrorEnvelope),
        (status = 404, description = "No store assigned to this owner", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Store Owner"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.id()))]
pub async fn get_ratings(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ListQuery(params): ListQuery<OwnerRatingListParams>,
) -> ApiResult<OwnerRatingsResponse> {
    let ratings = StoreOwnerService::list_ratings(&state.db, auth_user.id(), params).await?;
    Ok(ok("Ratings retrieved successfully", OwnerRatingsResponse { ratings }))
}
