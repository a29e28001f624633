//! User entities and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use storerate_auth::UserRole;
use storerate_core::serde::{deserialize_email, deserialize_optional_trimmed, deserialize_trimmed};

use crate::stores::StoreRatingSummary;
use crate::validation::{validate_password_strength, validate_person_name, validate_role};

/// A user as returned by the API. The password hash is never selected into
/// this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row used when checking a password.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserCredentials {
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            address: self.address,
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Identity of the caller, loaded fresh from the database for every
/// authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CurrentUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(
        length(min = 20, max = 60, message = "Name must be between 20 and 60 characters long"),
        custom(function = "validate_person_name")
    )]
    #[schema(example = "Alexandra Catherine Smith")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_email")]
    #[validate(email(message = "Please provide a valid email address"))]
    #[schema(example = "alexandra@example.com")]
    pub email: String,
    #[validate(custom(function = "validate_password_strength"))]
    #[schema(example = "Secret#123")]
    pub password: String,
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(length(max = 400, message = "Address cannot exceed 400 characters"))]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(deserialize_with = "deserialize_email")]
    #[validate(email(message = "Please provide a valid email address"))]
    #[schema(example = "admin@storerating.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[validate(custom(function = "validate_password_strength"))]
    pub new_password: String,
    #[validate(must_match(
        other = "new_password",
        message = "Password confirmation does not match new password"
    ))]
    pub confirm_password: String,
}

/// Admin-created account. Unlike self-registration the role is chosen.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(
        length(min = 20, max = 60, message = "Name must be between 20 and 60 characters long"),
        custom(function = "validate_person_name")
    )]
    pub name: String,
    #[serde(deserialize_with = "deserialize_email")]
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(length(max = 400, message = "Address cannot exceed 400 characters"))]
    pub address: Option<String>,
    #[validate(custom(function = "validate_role"))]
    #[schema(example = "store_owner")]
    pub role: String,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserListParams {
    /// Matches name, email or address
    pub search: Option<String>,
    pub role: Option<String>,
    /// One of name, email, role, created_at
    pub sort_by: Option<String>,
    /// asc or desc
    pub sort_order: Option<String>,
}

/// A user with, for store owners, their store's rating summary.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreRatingSummary>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserDetailResponse {
    pub user: UserDetail,
}
