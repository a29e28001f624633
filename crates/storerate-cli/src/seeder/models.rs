//! Data models for database seeding configuration.

use storerate_auth::UserRole;

/// Seed data for creating a user.
pub struct UserSeed {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub address: String,
    pub role: UserRole,
}

/// Seed data for creating a store.
pub struct StoreSeed {
    pub name: String,
    pub email: String,
    pub address: String,
    pub owner_id: i32,
}

/// How much fake data to generate.
#[derive(Clone, Debug)]
pub struct SeedConfig {
    /// One owner account and one store per unit
    pub stores: usize,
    pub normal_users: usize,
    /// Upper bound on ratings each normal user leaves; stores are picked at random
    pub ratings_per_user: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            stores: 10,
            normal_users: 50,
            ratings_per_user: 5,
        }
    }
}

impl SeedConfig {
    pub fn new(stores: usize) -> Self {
        Self {
            stores,
            ..Default::default()
        }
    }

    pub fn with_normal_users(mut self, normal_users: usize) -> Self {
        self.normal_users = normal_users;
        self
    }

    pub fn with_ratings_per_user(mut self, ratings_per_user: usize) -> Self {
        self.ratings_per_user = ratings_per_user;
        self
    }
}

/// Counts of rows inserted by a seeding run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub owners: usize,
    pub stores: usize,
    pub normal_users: usize,
    pub ratings: usize,
}
