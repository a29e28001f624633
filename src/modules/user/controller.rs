use axum::extract::State;
use tracing::instrument;

use storerate_core::ApiResult;
use storerate_core::response::ok;
use storerate_models::{RatingResponse, StoreListParams, SubmitRatingRequest, UserStoresResponse};

use super::service::UserService;
use crate::docs::ErrorEnvelope;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ListQuery, ValidatedJson};

/// Browse stores with aggregates and your own rating
#[utoipa::path(
    get,
    path = "/api/user/stores",
    params(StoreListParams),
    responses(
        (status = 200, description = "Stores retrieved", body = UserStoresResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 403, description = "Not a normal user", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.id()))]
pub async fn get_stores(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ListQuery(params): ListQuery<StoreListParams>,
) -> ApiResult<UserStoresResponse> {
    let stores = UserService::list_stores(&state.db, auth_user.id(), params).await?;
    Ok(ok("Stores retrieved successfully", UserStoresResponse { stores }))
}

/// Submit or update a rating for a store
#[utoipa::path(
    post,
    path = "/api/user/ratings",
    request_body = SubmitRatingRequest,
    responses(
        (status = 200, description = "Rating submitted", body = RatingResponse),
        (status = 400, description = "Validation failed", body = ErrorEnvelope),
        (status = 403, description = "Not a normal user", body = ErrorEnvelope),
        (status = 404, description = "Store not found", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
#[instrument(skip_all, fields(user.id = %auth_user.id()))]
pub async fn submit_rating(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<SubmitRatingRequest>,
) -> ApiResult<RatingResponse> {
    let rating = UserService::submit_rating(&state.db, auth_user.id(), dto).await?;
    Ok(ok("Rating submitted successfully", RatingResponse { rating }))
}
