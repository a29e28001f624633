//! # Store Rating CLI
//!
//! Administrative tooling behind the `storerate-cli` binary:
//!
//! - [`admin`]: system administrator provisioning
//! - [`maintenance`]: migrate, reset and health-check the schema
//! - [`seeder`]: fake owners, stores, users and ratings
//!
//! ## Usage
//!
//! ```ignore
//! use storerate_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(10).with_normal_users(200);
//! seed_all(&pool, config).await?;
//! ```

pub mod admin;
pub mod maintenance;
pub mod seeder;
