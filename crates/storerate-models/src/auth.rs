//! Authentication responses and platform statistics.

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use storerate_auth::UserRole;

use crate::users::{CurrentUser, User};

/// Returned by register and login.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// Returned by profile and verify.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub user: CurrentUser,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LogoutResponse {
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_stores: i64,
    pub total_ratings: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub environment: String,
    pub version: String,
    /// Role of the caller when a valid token was sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_stats_keys() {
        let stats = DashboardStats {
            total_users: 3,
            total_stores: 2,
            total_ratings: 5,
        };
        let value = serde_json::to_value(stats).unwrap();
        assert_eq!(value["totalUsers"], 3);
        assert_eq!(value["totalStores"], 2);
        assert_eq!(value["totalRatings"], 5);
    }
}
