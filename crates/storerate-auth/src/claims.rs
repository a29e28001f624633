use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::role::UserRole;

/// JWT claims for session tokens.
///
/// `iss` and `aud` are fixed tags checked on every verification. The user
/// record is re-read on each request, so these claims only identify the
/// caller; they are never trusted for authorization on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: i32,
    pub email: String,
    pub role: UserRole,
    pub name: String,
    pub iss: String,
    pub aud: String,
    /// Issued-at (Unix timestamp)
    pub iat: i64,
    /// Expiry (Unix timestamp)
    pub exp: i64,
}
