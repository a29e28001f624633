use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use storerate_auth::UserRole;
use storerate_core::FieldError;
use storerate_models::{
    AdminStore, AdminStoresResponse, AuthResponse, ChangePasswordRequest, CreateStoreRequest,
    CreateUserRequest, CurrentUser, DashboardStats, HealthResponse, LoginRequest, LogoutResponse,
    OwnedStore, OwnerDashboardResponse, OwnerRating, OwnerRatingsResponse, ProfileResponse,
    Rating, RatingResponse, RegisterRequest, Store, StoreRatingSummary, StoreResponse,
    SubmitRatingRequest, User, UserDetail, UserDetailResponse, UserResponse, UserStore,
    UserStoresResponse, UsersResponse,
};

/// Shape of every failed response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = "Validation failed")]
    pub message: String,
    pub errors: Vec<FieldError>,
    #[schema(example = "2025-01-01T00:00:00Z")]
    pub timestamp: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::get_profile,
        crate::modules::auth::controller::change_password,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::verify,
        crate::modules::admin::controller::get_dashboard,
        crate::modules::admin::controller::create_user,
        crate::modules::admin::controller::get_users,
        crate::modules::admin::controller::get_user_by_id,
        crate::modules::admin::controller::create_store,
        crate::modules::admin::controller::get_stores,
        crate::modules::user::controller::get_stores,
        crate::modules::user::controller::submit_rating,
        crate::modules::store_owner::controller::get_dashboard,
        crate::modules::store_owner::controller::get_ratings,
        crate::modules::health::controller::health_check,
    ),
    components(
        schemas(
            User,
            UserRole,
            CurrentUser,
            UserDetail,
            RegisterRequest,
            LoginRequest,
            ChangePasswordRequest,
            CreateUserRequest,
            AuthResponse,
            ProfileResponse,
            LogoutResponse,
            UserResponse,
            UsersResponse,
            UserDetailResponse,
            Store,
            AdminStore,
            UserStore,
            OwnedStore,
            StoreRatingSummary,
            CreateStoreRequest,
            StoreResponse,
            AdminStoresResponse,
            UserStoresResponse,
            OwnerDashboardResponse,
            Rating,
            OwnerRating,
            SubmitRatingRequest,
            RatingResponse,
            OwnerRatingsResponse,
            DashboardStats,
            HealthResponse,
            FieldError,
            ErrorEnvelope,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and account endpoints"),
        (name = "Admin", description = "System administrator endpoints"),
        (name = "User", description = "Store browsing and rating for normal users"),
        (name = "Store Owner", description = "Rating insight for store owners"),
        (name = "Health", description = "Service health")
    ),
    info(
        title = "Store Rating API",
        version = "0.1.0",
        description = "Role-based store rating platform built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
