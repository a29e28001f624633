use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
};
use tracing::instrument;

use storerate_core::response::ok;
use storerate_core::{ApiResponse, ApiResult, AppError};
use storerate_models::{
    AdminStoresResponse, CreateStoreRequest, CreateUserRequest, DashboardStats, StoreListParams,
    StoreResponse, UserDetailResponse, UserListParams, UserResponse, UsersResponse,
};

use super::service::AdminService;
use crate::docs::ErrorEnvelope;
use crate::state::AppState;
use crate::validator::{ListQuery, ValidatedJson};

/// Platform totals
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Dashboard data retrieved", body = DashboardStats),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 403, description = "Not a system administrator", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_dashboard(State(state): State<AppState>) -> ApiResult<DashboardStats> {
    let stats = AdminService::dashboard(&state.db).await?;
    Ok(ok("Dashboard data retrieved", stats))
}

/// Create a user with any role
#[utoipa::path(
    post,
    path = "/api/admin/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Validation failed", body = ErrorEnvelope),
        (status = 403, description = "Not a system administrator", body = ErrorEnvelope),
        (status = 409, description = "Email already registered", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    let user = AdminService::create_user(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        ok("User created successfully", UserResponse { user }),
    ))
}

/// List users with search, role filter and sorting
#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(UserListParams),
    responses(
        (status = 200, description = "Users retrieved", body = UsersResponse),
        (status = 400, description = "Unknown role filter", body = ErrorEnvelope),
        (status = 403, description = "Not a system administrator", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
    ListQuery(params): ListQuery<UserListParams>,
) -> ApiResult<UsersResponse> {
    let users = AdminService::list_users(&state.db, params).await?;
    Ok(ok("Users retrieved successfully", UsersResponse { users }))
}

/// User detail; store owners include their store's rating summary
#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details retrieved", body = UserDetailResponse),
        (status = 403, description = "Not a system administrator", body = ErrorEnvelope),
        (status = 404, description = "User not found", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, id))]
pub async fn get_user_by_id(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<UserDetailResponse> {
    let Path(id) = id.map_err(|_| AppError::bad_request("Invalid user ID"))?;
    let user = AdminService::get_user_detail(&state.db, id).await?;
    Ok(ok("User details retrieved", UserDetailResponse { user }))
}

/// Create a store, optionally assigned to a store owner
#[utoipa::path(
    post,
    path = "/api/admin/stores",
    request_body = CreateStoreRequest,
    responses(
        (status = 201, description = "Store created successfully", body = StoreResponse),
        (status = 400, description = "Validation failed or invalid owner", body = ErrorEnvelope),
        (status = 403, description = "Not a system administrator", body = ErrorEnvelope),
        (status = 409, description = "Email taken or owner already has a store", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip_all)]
pub async fn create_store(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateStoreRequest>,
) -> Result<(StatusCode, Json<ApiResponse<StoreResponse>>), AppError> {
    let store = AdminService::create_store(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        ok("Store created successfully", StoreResponse { store }),
    ))
}

/// List stores with rating aggregates
#[utoipa::path(
    get,
    path = "/api/admin/stores",
    params(StoreListParams),
    responses(
        (status = 200, description = "Stores retrieved", body = AdminStoresResponse),
        (status = 403, description = "Not a system administrator", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_stores(
    State(state): State<AppState>,
    ListQuery(params): ListQuery<StoreListParams>,
) -> ApiResult<AdminStoresResponse> {
    let stores = AdminService::list_stores(&state.db, params).await?;
    Ok(ok("Stores retrieved successfully", AdminStoresResponse { stores }))
}
