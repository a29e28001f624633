//! Custom field rules plugged into `#[validate(custom(...))]`.

use std::borrow::Cow;
use std::str::FromStr;

use storerate_auth::UserRole;
use storerate_core::password_strength_violations;
use validator::ValidationError;

pub const NAME_CHARACTERS_MESSAGE: &str = "Name can only contain letters and spaces";

/// Rejects a password that breaks any strength rule. The message lists every
/// broken rule, comma separated.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let violations = password_strength_violations(password);
    if violations.is_empty() {
        return Ok(());
    }

    Err(ValidationError::new("password_strength").with_message(Cow::Owned(violations.join(", "))))
}

/// Person names are ASCII letters and spaces only.
pub fn validate_person_name(name: &str) -> Result<(), ValidationError> {
    if name.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
        Ok(())
    } else {
        Err(ValidationError::new("name_characters")
            .with_message(Cow::Borrowed(NAME_CHARACTERS_MESSAGE)))
    }
}

pub fn validate_role(role: &str) -> Result<(), ValidationError> {
    UserRole::from_str(role).map(|_| ()).map_err(|e| {
        let mut error = ValidationError::new("role").with_message(Cow::Owned(e.to_string()));
        error.add_param(Cow::Borrowed("value"), &role);
        error
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use storerate_core::password::{RULE_LENGTH, RULE_SPECIAL, RULE_UPPERCASE};

    #[test]
    fn test_password_missing_upper_and_special() {
        let err = validate_password_strength("abcdefgh").unwrap_err();
        let message = err.message.unwrap().to_string();

        assert!(message.contains(RULE_UPPERCASE));
        assert!(message.contains(RULE_SPECIAL));
        assert!(!message.contains(RULE_LENGTH));
    }

    #[test]
    fn test_password_accepts_strong() {
        assert!(validate_password_strength("Str0ng!Pass").is_ok());
    }

    #[test]
    fn test_person_name() {
        assert!(validate_person_name("Alexandra Catherine Smith").is_ok());
        assert!(validate_person_name("Alexandra C. Smith-Jones").is_err());
        assert!(validate_person_name("Agent 007 Licensed To Rate").is_err());
    }

    #[test]
    fn test_role() {
        assert!(validate_role("store_owner").is_ok());
        let err = validate_role("superuser").unwrap_err();
        assert_eq!(
            err.message.unwrap(),
            "Role must be system_admin, normal_user, or store_owner"
        );
    }
}
