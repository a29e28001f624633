pub mod admin;
pub mod auth;
pub mod health;
pub mod store_owner;
pub mod user;
