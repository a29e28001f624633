use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Rating {
    pub id: i32,
    pub user_id: i32,
    pub store_id: i32,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRatingRequest {
    #[validate(range(min = 1, message = "Store ID must be a positive integer"))]
    pub store_id: i32,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    #[schema(minimum = 1, maximum = 5, example = 4)]
    pub rating: i32,
}

/// A rating received by an owner's store, with the rater's identity.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct OwnerRating {
    pub id: i32,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: i32,
    pub user_name: String,
    pub user_email: String,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct OwnerRatingListParams {
    /// Matches the rater's name or email
    pub search: Option<String>,
    /// One of created_at, updated_at, rating, user_name
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RatingResponse {
    pub rating: Rating,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OwnerRatingsResponse {
    pub ratings: Vec<OwnerRating>,
}
