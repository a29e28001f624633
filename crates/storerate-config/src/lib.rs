//! # Store Rating Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`cors`]: allowed browser origins
//! - [`server`]: bind address, runtime environment, log directory, metrics toggle
//! - [`database`]: connection URL and pool sizing
//!
//! # Example
//!
//! ```ignore
//! use storerate_config::{DatabaseConfig, JwtConfig, ServerConfig};
//!
//! let server = ServerConfig::from_env();
//! let jwt = JwtConfig::from_env();
//! let database = DatabaseConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use server::{Environment, ServerConfig};
