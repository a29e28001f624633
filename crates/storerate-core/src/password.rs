//! Password hashing and strength rules.
//!
//! Hashing is bcrypt. Strength rules are the ones the registration and
//! password-change forms enforce:
//!
//! - 8 to 16 characters
//! - at least one uppercase letter
//! - at least one special character from [`SPECIAL_CHARACTERS`]

use bcrypt::{hash, verify};

use crate::errors::AppError;

/// Work factor used for every stored password.
pub const BCRYPT_COST: u32 = 12;

pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 16;

pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

pub const RULE_LENGTH: &str = "Password must be between 8 and 16 characters long";
pub const RULE_UPPERCASE: &str = "Password must contain at least one uppercase letter";
pub const RULE_SPECIAL: &str = "Password must contain at least one special character";

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash_password_with_cost(password, BCRYPT_COST)
}

/// Hash with an explicit cost. Seeders and test fixtures use a low cost.
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}

/// Returns every strength rule `password` breaks, in a fixed order.
/// An empty list means the password is acceptable.
pub fn password_strength_violations(password: &str) -> Vec<&'static str> {
    let mut violations = Vec::new();

    let length = password.chars().count();
    if !(PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&length) {
        violations.push(RULE_LENGTH);
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push(RULE_UPPERCASE);
    }

    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        violations.push(RULE_SPECIAL);
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password_with_cost("Secret#123", 4).unwrap();
        assert_ne!(hash, "Secret#123");
        assert!(verify_password("Secret#123", &hash).unwrap());
        assert!(!verify_password("Secret#124", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(verify_password("Secret#123", "not_a_bcrypt_hash").is_err());
    }

    #[test]
    fn test_strong_password_has_no_violations() {
        assert!(password_strength_violations("Passw0rd!").is_empty());
        assert!(password_strength_violations("ABCDEFGH@").is_empty());
    }

    #[test]
    fn test_lowercase_only_password_lists_missing_rules() {
        let violations = password_strength_violations("abcdefgh");
        assert_eq!(violations, vec![RULE_UPPERCASE, RULE_SPECIAL]);
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(password_strength_violations("Ab!"), vec![RULE_LENGTH]);
        assert_eq!(
            password_strength_violations("Abcdefghijklmno!!"),
            vec![RULE_LENGTH]
        );
        assert!(password_strength_violations("Abcdefghijklmn!!").is_empty());
    }

    #[test]
    fn test_empty_password_breaks_every_rule() {
        assert_eq!(password_strength_violations("").len(), 3);
    }
}
