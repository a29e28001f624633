use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};

use storerate_auth::{UserRole, create_access_token};
use storerate_config::JwtConfig;
use storerate_core::{AppError, hash_password, verify_password};
use storerate_models::{
    AuthResponse, ChangePasswordRequest, CurrentUser, LoginRequest, RegisterRequest, User,
    UserCredentials,
};

use crate::metrics;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
pub const DUPLICATE_EMAIL_MESSAGE: &str = "User with this email already exists";

const USER_COLUMNS: &str = "id, name, email, address, role, created_at, updated_at";

pub struct AuthService;

impl AuthService {
    /// Creates a `normal_user` account and signs it in.
    #[instrument(skip(db, dto, jwt_config), fields(db.operation = "INSERT", db.table = "users"))]
    pub async fn register(
        db: &PgPool,
        dto: RegisterRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        debug!(user.email = %dto.email, "Registering new user");

        if Self::email_exists(db, &dto.email).await? {
            warn!(user.email = %dto.email, "Registration with existing email");
            return Err(AppError::conflict(DUPLICATE_EMAIL_MESSAGE));
        }

        let hashed_password = hash_password(&dto.password)?;

        let user = insert_user(
            db,
            &dto.name,
            &dto.email,
            &hashed_password,
            dto.address.as_deref(),
            UserRole::NormalUser,
        )
        .await?;

        let token = issue_token(&user, jwt_config)?;

        metrics::track_user_registered();
        info!(user.id = %user.id, "User registered successfully");

        Ok(AuthResponse { user, token })
    }

    /// Checks credentials. Unknown email and wrong password fail identically.
    #[instrument(skip(db, dto, jwt_config), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let Some(credentials) = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, name, email, password, address, role, created_at, updated_at
             FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        else {
            debug!("Login attempt for unknown email");
            metrics::track_login_failure("unknown_email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        };

        if !verify_password(&dto.password, &credentials.password)? {
            debug!(user.id = %credentials.id, "Login attempt with wrong password");
            metrics::track_login_failure("wrong_password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        }

        let user = credentials.into_user();
        let token = issue_token(&user, jwt_config)?;

        metrics::track_login_success(user.role.as_str());
        info!(user.id = %user.id, user.role = %user.role, "User logged in");

        Ok(AuthResponse { user, token })
    }

    #[instrument(skip(db, dto), fields(user.id = %user_id, db.operation = "UPDATE", db.table = "users"))]
    pub async fn change_password(
        db: &PgPool,
        user_id: i32,
        dto: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        let current_hash =
            sqlx::query_scalar::<_, String>("SELECT password FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(db)
                .await?
                .ok_or_else(|| AppError::not_found("User not found"))?;

        if !verify_password(&dto.current_password, &current_hash)? {
            debug!("Password change with wrong current password");
            return Err(AppError::unauthorized("Current password is incorrect"));
        }

        let hashed_password = hash_password(&dto.new_password)?;

        sqlx::query("UPDATE users SET password = $1, updated_at = NOW() WHERE id = $2")
            .bind(&hashed_password)
            .bind(user_id)
            .execute(db)
            .await?;

        info!("Password updated");
        Ok(())
    }

    /// Loads the identity attached to authenticated requests.
    pub async fn find_current_user(
        db: &PgPool,
        user_id: i32,
    ) -> Result<Option<CurrentUser>, AppError> {
        let user = sqlx::query_as::<_, CurrentUser>(
            "SELECT id, name, email, role, address FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    pub async fn email_exists(db: &PgPool, email: &str) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(db)
                .await?;
        Ok(exists)
    }
}

/// Inserts a user row. A unique violation on email maps to `Conflict`.
pub async fn insert_user(
    db: &PgPool,
    name: &str,
    email: &str,
    hashed_password: &str,
    address: Option<&str>,
    role: UserRole,
) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (name, email, password, address, role)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {}",
        USER_COLUMNS
    ))
    .bind(name)
    .bind(email)
    .bind(hashed_password)
    .bind(address)
    .bind(role)
    .fetch_one(db)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db_err) = &e
            && db_err.is_unique_violation()
        {
            warn!(user.email = %email, "Email taken between check and insert");
            return AppError::conflict(DUPLICATE_EMAIL_MESSAGE);
        }
        error!(error = %e, "Database error creating user");
        AppError::from(e)
    })
}

fn issue_token(user: &User, jwt_config: &JwtConfig) -> Result<String, AppError> {
    create_access_token(user.id, &user.email, user.role, &user.name, jwt_config)
        .map_err(AppError::internal)
}
