//! Schema management and connectivity checks.

use sqlx::PgPool;

use storerate_db::run_migrations;

/// Application tables, in dependency order.
pub const TABLES: [&str; 3] = ["users", "stores", "ratings"];

/// Drops every application table, type and the migration ledger, then
/// re-applies all migrations.
pub async fn reset_database(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;

    for table in TABLES.iter().rev() {
        sqlx::query(&format!("DROP TABLE IF EXISTS {} CASCADE", table))
            .execute(&mut *tx)
            .await?;
    }
    sqlx::query("DROP TABLE IF EXISTS _sqlx_migrations")
        .execute(&mut *tx)
        .await?;
    sqlx::query("DROP TYPE IF EXISTS user_role CASCADE")
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    run_migrations(db).await?;
    Ok(())
}

/// Connectivity and row-count report.
#[derive(Debug)]
pub struct DatabaseReport {
    pub server_version: String,
    /// `None` when the table does not exist yet.
    pub tables: Vec<(&'static str, Option<i64>)>,
}

impl DatabaseReport {
    pub fn is_migrated(&self) -> bool {
        self.tables.iter().all(|(_, count)| count.is_some())
    }
}

pub async fn check_database(db: &PgPool) -> Result<DatabaseReport, Box<dyn std::error::Error>> {
    let server_version = sqlx::query_scalar::<_, String>("SELECT version()")
        .fetch_one(db)
        .await?;

    let mut tables = Vec::with_capacity(TABLES.len());
    for table in TABLES {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = current_schema() AND table_name = $1
            )",
        )
        .bind(table)
        .fetch_one(db)
        .await?;

        let count = if exists {
            Some(
                sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
                    .fetch_one(db)
                    .await?,
            )
        } else {
            None
        };
        tables.push((table, count));
    }

    Ok(DatabaseReport {
        server_version,
        tables,
    })
}
