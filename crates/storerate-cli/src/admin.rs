//! System administrator provisioning. Admin accounts are only created here.

use sqlx::PgPool;
use validator::Validate;

use storerate_auth::UserRole;
use storerate_core::errors::field_errors_from_validation;
use storerate_core::hash_password;
use storerate_models::CreateUserRequest;

/// Validates the input with the same rules the API applies, then inserts the
/// account. Returns the new user id.
pub async fn create_system_admin(
    db: &PgPool,
    name: &str,
    email: &str,
    password: &str,
    address: Option<&str>,
) -> Result<i32, Box<dyn std::error::Error>> {
    let request = admin_request(name, email, password, address);

    if let Err(errors) = request.validate() {
        let details = field_errors_from_validation(&errors)
            .into_iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        return Err(format!("Invalid input: {}", details).into());
    }

    let hashed_password =
        hash_password(&request.password).map_err(|e| format!("Failed to hash password: {}", e))?;

    let user_id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO users (name, email, password, address, role)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(&request.name)
    .bind(&request.email)
    .bind(&hashed_password)
    .bind(&request.address)
    .bind(UserRole::SystemAdmin)
    .fetch_optional(db)
    .await?;

    user_id.ok_or_else(|| "User with this email already exists".into())
}

/// Normalizes prompt input the way request deserialization does.
fn admin_request(
    name: &str,
    email: &str,
    password: &str,
    address: Option<&str>,
) -> CreateUserRequest {
    CreateUserRequest {
        name: name.trim().to_string(),
        email: email.trim().to_lowercase(),
        password: password.to_string(),
        address: address
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string),
        role: UserRole::SystemAdmin.as_str().to_string(),
    }
}
