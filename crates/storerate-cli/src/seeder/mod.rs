//! Fake data for development and load testing.
//!
//! Data generation runs in parallel with rayon, inserts use multi-row
//! statements, and every seeded account shares one cost-4 bcrypt hash of
//! [`SEED_PASSWORD`].

pub mod models;
pub mod ratings;
pub mod stores;
pub mod users;

use sqlx::PgPool;
use std::time::Instant;

use storerate_auth::UserRole;
use storerate_core::password::hash_password_with_cost;

pub use models::{SeedConfig, SeedSummary, StoreSeed, UserSeed};

/// Password shared by every seeded account.
pub const SEED_PASSWORD: &str = "Seeded@123";

const SEED_BCRYPT_COST: u32 = 4;

/// Seeds owners with their stores, normal users, and their ratings.
pub async fn seed_all(
    db: &PgPool,
    config: SeedConfig,
) -> Result<SeedSummary, Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    println!("🌱 Starting database seeding...");
    println!("   - Stores (one owner each): {}", config.stores);
    println!("   - Normal users: {}", config.normal_users);
    println!("   - Ratings per user: up to {}", config.ratings_per_user);

    let password_hash = hash_password_with_cost(SEED_PASSWORD, SEED_BCRYPT_COST)
        .map_err(|e| format!("Failed to hash password: {}", e))?;

    println!("\n👤 Seeding store owners...");
    let owners = users::generate_users(UserRole::StoreOwner, config.stores, &password_hash);
    let owner_ids = users::insert_users_batch(db, &owners).await?;

    println!("🏪 Seeding stores...");
    let stores = stores::generate_stores(&owner_ids);
    let store_ids = stores::insert_stores_batch(db, &stores).await?;

    println!("👥 Seeding normal users...");
    let normal_users =
        users::generate_users(UserRole::NormalUser, config.normal_users, &password_hash);
    let user_ids = users::insert_users_batch(db, &normal_users).await?;

    println!("⭐ Seeding ratings...");
    let ratings = ratings::generate_ratings(&user_ids, &store_ids, config.ratings_per_user);
    let rating_count = ratings::insert_ratings_batch(db, &ratings).await?;

    let summary = SeedSummary {
        owners: owner_ids.len(),
        stores: store_ids.len(),
        normal_users: user_ids.len(),
        ratings: rating_count as usize,
    };

    println!("\n✅ Seeding completed in {:?}", start_time.elapsed());
    println!("   Seeded accounts use the password: {}", SEED_PASSWORD);

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storerate_core::password_strength_violations;

    #[test]
    fn test_seed_password_meets_policy() {
        assert!(password_strength_violations(SEED_PASSWORD).is_empty());
    }

    #[test]
    fn test_seed_config_builder() {
        let config = SeedConfig::new(3)
            .with_normal_users(7)
            .with_ratings_per_user(2);
        assert_eq!(config.stores, 3);
        assert_eq!(config.normal_users, 7);
        assert_eq!(config.ratings_per_user, 2);
    }
}
