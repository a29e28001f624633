//! Middleware and extractors for authentication and authorization.
//!
//! - [`auth`]: the [`auth::AuthUser`] and [`auth::OptionalAuthUser`] extractors
//! - [`role`]: role allow-list layers for route groups
//! - [`errors`]: development-only exposure of server error messages
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `AuthUser` verifies the token and loads the user from the database
//! 3. Role layers compare the user's role with the route group's allow-list
//! 4. Handlers extract `AuthUser` again and get the cached identity

pub mod auth;
pub mod errors;
pub mod role;
