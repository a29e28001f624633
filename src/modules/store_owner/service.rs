use sqlx::PgPool;
use tracing::{debug, error, instrument};

use storerate_core::AppError;
use storerate_models::{
    OwnedStore, OwnerRating, OwnerRatingListParams, OwnerRatingSortField, SortOrder,
    order_by_clause, resolve_sort, search_pattern,
};

pub const NO_STORE_MESSAGE: &str = "No store found for this owner";

pub struct StoreOwnerService;

impl StoreOwnerService {
    #[instrument(skip(db), fields(user.id = %owner_id, db.operation = "SELECT", db.table = "stores"))]
    pub async fn dashboard(db: &PgPool, owner_id: i32) -> Result<OwnedStore, AppError> {
        sqlx::query_as::<_, OwnedStore>(
            "SELECT s.id, s.name, s.email, s.address,
                    COALESCE(AVG(r.rating), 0)::FLOAT8 AS average_rating,
                    COUNT(r.id) AS total_ratings
             FROM stores s
             LEFT JOIN ratings r ON r.store_id = s.id
             WHERE s.owner_id = $1
             GROUP BY s.id",
        )
        .bind(owner_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(NO_STORE_MESSAGE))
    }

    /// Ratings left on the owner's store, joined with the rater.
    #[instrument(skip(db, params), fields(user.id = %owner_id, db.operation = "SELECT", db.table = "ratings"))]
    pub async fn list_ratings(
        db: &PgPool,
        owner_id: i32,
        params: OwnerRatingListParams,
    ) -> Result<Vec<OwnerRating>, AppError> {
        let store_id =
            sqlx::query_scalar::<_, i32>("SELECT id FROM stores WHERE owner_id = $1")
                .bind(owner_id)
                .fetch_optional(db)
                .await?
                .ok_or_else(|| AppError::not_found(NO_STORE_MESSAGE))?;

        let mut query = String::from(
            "SELECT r.id, r.rating, r.created_at, r.updated_at,
                    u.id AS user_id, u.name AS user_name, u.email AS user_email
             FROM ratings r
             INNER JOIN users u ON u.id = r.user_id
             WHERE r.store_id = $1",
        );

        let pattern = search_pattern(params.search.as_deref());
        if pattern.is_some() {
            query.push_str(" AND (u.name ILIKE $2 OR u.email ILIKE $2)");
        }

        let ordering = resolve_sort(
            params.sort_by.as_deref(),
            params.sort_order.as_deref(),
            (OwnerRatingSortField::CreatedAt, SortOrder::Desc),
        );
        query.push_str(&order_by_clause(ordering, "r.id"));

        let mut sql = sqlx::query_as::<_, OwnerRating>(&query).bind(store_id);
        if let Some(pattern) = pattern {
            sql = sql.bind(pattern);
        }
        let ratings = sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error listing store ratings");
            AppError::from(e)
        })?;

        debug!(store.id = %store_id, returned = %ratings.len(), "Store ratings listed");
        Ok(ratings)
    }
}
