use sqlx::PgPool;
use tracing::{debug, error, info, instrument};

use storerate_core::AppError;
use storerate_models::{
    Rating, SortOrder, StoreListParams, SubmitRatingRequest, UserStore, UserStoreSortField,
    order_by_clause, resolve_sort, search_pattern,
};

use crate::metrics;

pub struct UserService;

impl UserService {
    /// Stores with aggregates and the caller's own rating.
    #[instrument(skip(db, params), fields(user.id = %user_id, db.operation = "SELECT", db.table = "stores"))]
    pub async fn list_stores(
        db: &PgPool,
        user_id: i32,
        params: StoreListParams,
    ) -> Result<Vec<UserStore>, AppError> {
        let mut query = String::from(
            "SELECT s.id, s.name, s.email, s.address,
                    COALESCE(AVG(r.rating), 0)::FLOAT8 AS average_rating,
                    COUNT(r.id) AS total_ratings,
                    ur.rating AS user_rating
             FROM stores s
             LEFT JOIN ratings r ON r.store_id = s.id
             LEFT JOIN ratings ur ON ur.store_id = s.id AND ur.user_id = $1
             WHERE 1=1",
        );

        let pattern = search_pattern(params.search.as_deref());
        if pattern.is_some() {
            query.push_str(" AND (s.name ILIKE $2 OR s.address ILIKE $2)");
        }

        query.push_str(" GROUP BY s.id, ur.rating");

        let ordering = resolve_sort(
            params.sort_by.as_deref(),
            params.sort_order.as_deref(),
            (UserStoreSortField::Name, SortOrder::Asc),
        );
        query.push_str(&order_by_clause(ordering, "s.id"));

        let mut sql = sqlx::query_as::<_, UserStore>(&query).bind(user_id);
        if let Some(pattern) = pattern {
            sql = sql.bind(pattern);
        }
        let stores = sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error listing stores for user");
            AppError::from(e)
        })?;

        debug!(returned = %stores.len(), "Stores listed for user");
        Ok(stores)
    }

    /// Creates the caller's rating for a store, or overwrites the existing one.
    ///
    /// The unique `(user_id, store_id)` constraint makes this a single upsert;
    /// concurrent submissions leave exactly one row.
    #[instrument(skip(db, dto), fields(user.id = %user_id, store.id = %dto.store_id, db.operation = "UPSERT", db.table = "ratings"))]
    pub async fn submit_rating(
        db: &PgPool,
        user_id: i32,
        dto: SubmitRatingRequest,
    ) -> Result<Rating, AppError> {
        let store_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM stores WHERE id = $1)")
                .bind(dto.store_id)
                .fetch_one(db)
                .await?;
        if !store_exists {
            debug!("Rating for unknown store");
            return Err(AppError::not_found("Store not found"));
        }

        let rating = sqlx::query_as::<_, Rating>(
            "INSERT INTO ratings (user_id, store_id, rating)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, store_id)
             DO UPDATE SET rating = EXCLUDED.rating, updated_at = NOW()
             RETURNING id, user_id, store_id, rating, created_at, updated_at",
        )
        .bind(user_id)
        .bind(dto.store_id)
        .bind(dto.rating)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                return AppError::not_found("Store not found");
            }
            error!(error = %e, "Database error submitting rating");
            AppError::from(e)
        })?;

        metrics::track_rating_submitted(rating.rating);
        info!(rating.id = %rating.id, rating.value = %rating.rating, "Rating submitted");

        Ok(rating)
    }
}
