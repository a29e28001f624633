use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};

use storerate_auth::{ParseRoleError, UserRole};
use storerate_core::{AppError, FieldError, hash_password};
use storerate_models::{
    AdminStore, AdminStoreSortField, CreateStoreRequest, CreateUserRequest, DashboardStats,
    SortOrder, Store, StoreListParams, StoreRatingSummary, User, UserDetail, UserListParams,
    UserSortField, order_by_clause, resolve_sort, search_pattern,
};

use crate::metrics;
use crate::modules::auth::service::{AuthService, DUPLICATE_EMAIL_MESSAGE, insert_user};

pub const DUPLICATE_STORE_EMAIL_MESSAGE: &str = "Store with this email already exists";
pub const INVALID_OWNER_MESSAGE: &str = "Invalid store owner ID";
pub const OWNER_HAS_STORE_MESSAGE: &str = "Store owner already has a store";

const STORE_OWNER_UNIQUE_CONSTRAINT: &str = "stores_owner_id_key";

pub struct AdminService;

fn parse_role(raw: &str) -> Result<UserRole, AppError> {
    raw.parse().map_err(|e: ParseRoleError| {
        AppError::validation(vec![FieldError::new("role", e.to_string())])
    })
}

impl AdminService {
    #[instrument(skip(db), fields(db.operation = "SELECT"))]
    pub async fn dashboard(db: &PgPool) -> Result<DashboardStats, AppError> {
        let stats = sqlx::query_as::<_, DashboardStats>(
            "SELECT
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM stores) AS total_stores,
                (SELECT COUNT(*) FROM ratings) AS total_ratings",
        )
        .fetch_one(db)
        .await?;

        debug!(
            total_users = %stats.total_users,
            total_stores = %stats.total_stores,
            total_ratings = %stats.total_ratings,
            "Dashboard statistics computed"
        );

        Ok(stats)
    }

    #[instrument(skip(db, dto), fields(user.role = %dto.role, db.operation = "INSERT", db.table = "users"))]
    pub async fn create_user(db: &PgPool, dto: CreateUserRequest) -> Result<User, AppError> {
        let role = parse_role(&dto.role)?;

        if AuthService::email_exists(db, &dto.email).await? {
            warn!(user.email = %dto.email, "Admin tried to create user with existing email");
            return Err(AppError::conflict(DUPLICATE_EMAIL_MESSAGE));
        }

        let hashed_password = hash_password(&dto.password)?;
        let user = insert_user(
            db,
            &dto.name,
            &dto.email,
            &hashed_password,
            dto.address.as_deref(),
            role,
        )
        .await?;

        metrics::track_user_created(role.as_str());
        info!(user.id = %user.id, user.role = %user.role, "User created by admin");

        Ok(user)
    }

    #[instrument(skip(db, dto), fields(store.owner_id = ?dto.owner_id, db.operation = "INSERT", db.table = "stores"))]
    pub async fn create_store(db: &PgPool, dto: CreateStoreRequest) -> Result<Store, AppError> {
        let email_taken =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM stores WHERE email = $1)")
                .bind(&dto.email)
                .fetch_one(db)
                .await?;
        if email_taken {
            warn!(store.email = %dto.email, "Store email already registered");
            return Err(AppError::conflict(DUPLICATE_STORE_EMAIL_MESSAGE));
        }

        if let Some(owner_id) = dto.owner_id {
            let is_store_owner = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1 AND role = 'store_owner')",
            )
            .bind(owner_id)
            .fetch_one(db)
            .await?;
            if !is_store_owner {
                debug!(store.owner_id = %owner_id, "Owner is missing or not a store owner");
                return Err(AppError::bad_request(INVALID_OWNER_MESSAGE));
            }

            let owns_store = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM stores WHERE owner_id = $1)",
            )
            .bind(owner_id)
            .fetch_one(db)
            .await?;
            if owns_store {
                warn!(store.owner_id = %owner_id, "Owner already has a store");
                return Err(AppError::conflict(OWNER_HAS_STORE_MESSAGE));
            }
        }

        let store = sqlx::query_as::<_, Store>(
            "INSERT INTO stores (name, email, address, owner_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, email, address, owner_id, created_at, updated_at",
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&dto.address)
        .bind(dto.owner_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                if db_err.constraint() == Some(STORE_OWNER_UNIQUE_CONSTRAINT) {
                    return AppError::conflict(OWNER_HAS_STORE_MESSAGE);
                }
                return AppError::conflict(DUPLICATE_STORE_EMAIL_MESSAGE);
            }
            error!(error = %e, "Database error creating store");
            AppError::from(e)
        })?;

        metrics::track_store_created();
        info!(store.id = %store.id, store.name = %store.name, "Store created");

        Ok(store)
    }

    #[instrument(skip(db, params), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn list_users(db: &PgPool, params: UserListParams) -> Result<Vec<User>, AppError> {
        let mut query = String::from(
            "SELECT id, name, email, address, role, created_at, updated_at FROM users WHERE 1=1",
        );
        let mut binds: Vec<String> = Vec::new();

        if let Some(pattern) = search_pattern(params.search.as_deref()) {
            binds.push(pattern);
            let n = binds.len();
            query.push_str(&format!(
                " AND (name ILIKE ${n} OR email ILIKE ${n} OR address ILIKE ${n})"
            ));
        }

        if let Some(role) = params.role.as_deref().filter(|r| !r.is_empty()) {
            let role = parse_role(role)?;
            binds.push(role.as_str().to_string());
            query.push_str(&format!(" AND role = ${}::user_role", binds.len()));
        }

        let ordering = resolve_sort(
            params.sort_by.as_deref(),
            params.sort_order.as_deref(),
            (UserSortField::Name, SortOrder::Asc),
        );
        query.push_str(&order_by_clause(ordering, "id"));

        let mut sql = sqlx::query_as::<_, User>(&query);
        for bind in binds {
            sql = sql.bind(bind);
        }
        let users = sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error listing users");
            AppError::from(e)
        })?;

        debug!(returned = %users.len(), "Users listed");
        Ok(users)
    }

    #[instrument(skip(db), fields(user.id = %user_id, db.operation = "SELECT", db.table = "users"))]
    pub async fn get_user_detail(db: &PgPool, user_id: i32) -> Result<UserDetail, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, address, role, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

        let store = match user.role {
            UserRole::StoreOwner => {
                sqlx::query_as::<_, StoreRatingSummary>(
                    "SELECT s.id, s.name,
                            COALESCE(AVG(r.rating), 0)::FLOAT8 AS average_rating,
                            COUNT(r.id) AS total_ratings
                     FROM stores s
                     LEFT JOIN ratings r ON r.store_id = s.id
                     WHERE s.owner_id = $1
                     GROUP BY s.id",
                )
                .bind(user_id)
                .fetch_optional(db)
                .await?
            }
            UserRole::SystemAdmin | UserRole::NormalUser => None,
        };

        Ok(UserDetail { user, store })
    }

    #[instrument(skip(db, params), fields(db.operation = "SELECT", db.table = "stores"))]
    pub async fn list_stores(
        db: &PgPool,
        params: StoreListParams,
    ) -> Result<Vec<AdminStore>, AppError> {
        let mut query = String::from(
            "SELECT s.id, s.name, s.email, s.address, s.owner_id, s.created_at,
                    COALESCE(AVG(r.rating), 0)::FLOAT8 AS average_rating,
                    COUNT(r.id) AS total_ratings
             FROM stores s
             LEFT JOIN ratings r ON r.store_id = s.id
             WHERE 1=1",
        );
        let mut binds: Vec<String> = Vec::new();

        if let Some(pattern) = search_pattern(params.search.as_deref()) {
            binds.push(pattern);
            let n = binds.len();
            query.push_str(&format!(
                " AND (s.name ILIKE ${n} OR s.email ILIKE ${n} OR s.address ILIKE ${n})"
            ));
        }

        query.push_str(" GROUP BY s.id");

        let ordering = resolve_sort(
            params.sort_by.as_deref(),
            params.sort_order.as_deref(),
            (AdminStoreSortField::Name, SortOrder::Asc),
        );
        query.push_str(&order_by_clause(ordering, "s.id"));

        let mut sql = sqlx::query_as::<_, AdminStore>(&query);
        for bind in binds {
            sql = sql.bind(bind);
        }
        let stores = sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error listing stores");
            AppError::from(e)
        })?;

        debug!(returned = %stores.len(), "Stores listed");
        Ok(stores)
    }
}
