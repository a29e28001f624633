//! The closed set of roles an account can hold.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role of a user account.
///
/// Stored in the `user_role` Postgres enum and carried in token claims as
/// `system_admin`, `normal_user` or `store_owner`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Manages users and stores, sees platform statistics.
    SystemAdmin,
    /// Browses stores and submits ratings. Self-registration always yields this role.
    #[default]
    NormalUser,
    /// Sees ratings for the single store they own.
    StoreOwner,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [
        UserRole::SystemAdmin,
        UserRole::NormalUser,
        UserRole::StoreOwner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::SystemAdmin => "system_admin",
            UserRole::NormalUser => "normal_user",
            UserRole::StoreOwner => "store_owner",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Role must be system_admin, normal_user, or store_owner")]
pub struct ParseRoleError;

impl FromStr for UserRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system_admin" => Ok(UserRole::SystemAdmin),
            "normal_user" => Ok(UserRole::NormalUser),
            "store_owner" => Ok(UserRole::StoreOwner),
            _ => Err(ParseRoleError),
        }
    }
}

/// Formats a role list the way access-denied messages print it.
pub fn describe_roles(roles: &[UserRole]) -> String {
    roles
        .iter()
        .map(UserRole::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_str() {
        for role in UserRole::ALL {
            assert_eq!(role.as_str().parse::<UserRole>(), Ok(role));
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("admin".parse::<UserRole>().is_err());
        assert!("SYSTEM_ADMIN".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&UserRole::StoreOwner).unwrap();
        assert_eq!(json, r#""store_owner""#);
        let role: UserRole = serde_json::from_str(r#""system_admin""#).unwrap();
        assert_eq!(role, UserRole::SystemAdmin);
    }

    #[test]
    fn test_default_is_normal_user() {
        assert_eq!(UserRole::default(), UserRole::NormalUser);
    }

    #[test]
    fn test_describe_roles() {
        assert_eq!(
            describe_roles(&[UserRole::SystemAdmin, UserRole::StoreOwner]),
            "system_admin, store_owner"
        );
    }
}
