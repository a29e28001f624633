//! Session token issuing and verification.
//!
//! Tokens are HS256 JWTs signed with [`JwtConfig::secret`], tagged with a
//! fixed issuer and audience, and valid for [`JwtConfig::token_expiry`]
//! seconds.
//!
//! # Example
//!
//! ```ignore
//! use storerate_auth::{create_access_token, extract_bearer_token, verify_token};
//!
//! let token = create_access_token(user.id, &user.email, user.role, &user.name, &config)?;
//! let header = format!("Bearer {}", token);
//!
//! let token = extract_bearer_token(Some(&header)).unwrap();
//! let claims = verify_token(token, &config)?;
//! ```

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use storerate_config::JwtConfig;

use crate::claims::Claims;
use crate::role::UserRole;

pub const TOKEN_ISSUER: &str = "store-rating-app";
pub const TOKEN_AUDIENCE: &str = "store-rating-users";

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token")]
    Invalid,
    #[error("Token generation failed: {0}")]
    Encoding(String),
}

/// Issues a signed session token for the given account.
pub fn create_access_token(
    user_id: i32,
    email: &str,
    role: UserRole,
    name: &str,
    jwt_config: &JwtConfig,
) -> Result<String, TokenError> {
    let now = Utc::now().timestamp();

    let claims = Claims {
        user_id,
        email: email.to_string(),
        role,
        name: name.to_string(),
        iss: TOKEN_ISSUER.to_string(),
        aud: TOKEN_AUDIENCE.to_string(),
        iat: now,
        exp: now + jwt_config.token_expiry,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| TokenError::Encoding(e.to_string()))
}

/// Verifies signature, expiry, issuer and audience, returning the claims.
///
/// Expiry is checked without leeway and reported separately from every
/// other failure.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[TOKEN_ISSUER]);
    validation.set_audience(&[TOKEN_AUDIENCE]);
    validation.set_required_spec_claims(&["exp", "iss", "aud"]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })
}

/// Pulls the token out of an `Authorization` header value.
///
/// Only the `Bearer <token>` scheme is recognized; anything else, including a
/// missing header or an empty token, yields `None`.
pub fn extract_bearer_token(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            token_expiry: 604_800,
        }
    }

    fn issue(config: &JwtConfig) -> String {
        create_access_token(
            42,
            "reviewer@example.com",
            UserRole::NormalUser,
            "Regular Reviewer Account",
            config,
        )
        .unwrap()
    }

    #[test]
    fn test_issue_and_verify() {
        let config = get_test_jwt_config();
        let claims = verify_token(&issue(&config), &config).unwrap();

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.email, "reviewer@example.com");
        assert_eq!(claims.role, UserRole::NormalUser);
        assert_eq!(claims.name, "Regular Reviewer Account");
        assert_eq!(claims.iss, TOKEN_ISSUER);
        assert_eq!(claims.aud, TOKEN_AUDIENCE);
        assert_eq!(claims.exp - claims.iat, 604_800);
    }

    #[test]
    fn test_verify_wrong_secret_is_invalid() {
        let config = get_test_jwt_config();
        let token = issue(&config);

        let wrong_config = JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            token_expiry: 604_800,
        };

        assert_eq!(verify_token(&token, &wrong_config), Err(TokenError::Invalid));
    }

    #[test]
    fn test_verify_garbage_is_invalid() {
        let config = get_test_jwt_config();
        assert_eq!(verify_token("not-a-token", &config), Err(TokenError::Invalid));
    }

    #[test]
    fn test_verify_expired_is_distinct() {
        let config = JwtConfig {
            token_expiry: -3_600,
            ..get_test_jwt_config()
        };
        let token = issue(&config);

        let err = verify_token(&token, &config).unwrap_err();
        assert_eq!(err, TokenError::Expired);
        assert_eq!(err.to_string(), "Token has expired");
        assert_ne!(err, TokenError::Invalid);
    }

    #[test]
    fn test_verify_rejects_foreign_audience() {
        let config = get_test_jwt_config();
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: 1,
            email: "x@example.com".to_string(),
            role: UserRole::SystemAdmin,
            name: "Someone Else Entirely".to_string(),
            iss: TOKEN_ISSUER.to_string(),
            aud: "some-other-service".to_string(),
            iat: now,
            exp: now + 600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert_eq!(verify_token(&token, &config), Err(TokenError::Invalid));
    }

    #[test]
    fn test_verify_rejects_foreign_issuer() {
        let config = get_test_jwt_config();
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: 1,
            email: "x@example.com".to_string(),
            role: UserRole::NormalUser,
            name: "Someone Else Entirely".to_string(),
            iss: "another-issuer".to_string(),
            aud: TOKEN_AUDIENCE.to_string(),
            iat: now,
            exp: now + 600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert_eq!(verify_token(&token, &config), Err(TokenError::Invalid));
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token(Some("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token(Some("Basic dXNlcjpwYXNz")), None);
        assert_eq!(extract_bearer_token(Some("bearer abc")), None);
        assert_eq!(extract_bearer_token(Some("Bearer ")), None);
        assert_eq!(extract_bearer_token(Some("abc.def.ghi")), None);
        assert_eq!(extract_bearer_token(None), None);
    }
}
