//! # Store Rating Core
//!
//! Foundational types shared by every crate in the workspace:
//!
//! - [`errors`]: [`AppError`] and its mapping onto HTTP responses
//! - [`response`]: the uniform `{ success, message, data, errors, timestamp }` envelope
//! - [`password`]: bcrypt hashing and password strength rules
//! - [`serde`]: input normalizing deserializers (trimming, email lowercasing)

pub mod errors;
pub mod password;
pub mod response;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorDetail, FieldError};
pub use password::{hash_password, password_strength_violations, verify_password};
pub use response::{ApiResponse, ApiResult};
