//! Store entities, aggregated rating views and DTOs.
//!
//! Aggregate rows carry the mean rating as `f64` from SQL and serialize it as
//! a one-decimal string (`"4.5"`, `"0.0"`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use storerate_core::serde::{deserialize_email, deserialize_optional_trimmed, deserialize_trimmed};

use crate::listing::serialize_average;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Store {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub owner_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreRequest {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(
        min = 20,
        max = 60,
        message = "Store name must be between 20 and 60 characters long"
    ))]
    #[schema(example = "Downtown Coffee Roasters")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_email")]
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(length(max = 400, message = "Address cannot exceed 400 characters"))]
    pub address: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1, message = "Owner ID must be a positive integer"))]
    pub owner_id: Option<i32>,
}

/// Store row in the admin list.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AdminStore {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub owner_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_average")]
    #[schema(value_type = String, example = "4.5")]
    pub average_rating: f64,
    pub total_ratings: i64,
}

/// Store row as a normal user browses it, with the caller's own rating.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct UserStore {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    #[serde(serialize_with = "serialize_average")]
    #[schema(value_type = String, example = "4.5")]
    pub average_rating: f64,
    pub total_ratings: i64,
    pub user_rating: Option<i32>,
}

/// An owner's store with its aggregate.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct OwnedStore {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    #[serde(serialize_with = "serialize_average")]
    #[schema(value_type = String, example = "4.5")]
    pub average_rating: f64,
    pub total_ratings: i64,
}

/// Compact aggregate attached to a store owner's user detail.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct StoreRatingSummary {
    pub id: i32,
    pub name: String,
    #[serde(serialize_with = "serialize_average")]
    #[schema(value_type = String, example = "4.5")]
    pub average_rating: f64,
    pub total_ratings: i64,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StoreListParams {
    pub search: Option<String>,
    pub sort_by: Option<String>,
    /// asc or desc
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StoreResponse {
    pub store: Store,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminStoresResponse {
    pub stores: Vec<AdminStore>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserStoresResponse {
    pub stores: Vec<UserStore>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OwnerDashboardResponse {
    pub store: OwnedStore,
}
