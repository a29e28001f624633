//! # Store Rating Auth
//!
//! Identity primitives shared by the server and the CLI:
//!
//! - [`role`]: the [`UserRole`] enum and its string forms
//! - [`claims`]: the JWT claim set
//! - [`jwt`]: issuing, verifying and extracting session tokens
//!
//! # Example
//!
//! ```ignore
//! use storerate_auth::{UserRole, create_access_token, verify_token};
//! use storerate_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(1, "admin@example.com", UserRole::SystemAdmin, "Admin", &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.role, UserRole::SystemAdmin);
//! ```

pub mod claims;
pub mod jwt;
pub mod role;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{
    TOKEN_AUDIENCE, TOKEN_ISSUER, TokenError, create_access_token, extract_bearer_token,
    verify_token,
};
pub use role::{ParseRoleError, UserRole, describe_roles};
