use std::env;

pub const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";

/// Seven days.
pub const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 7 * 24 * 60 * 60;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Lifetime of issued tokens in seconds.
    pub token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            token_expiry: env::var("JWT_EXPIRES_IN")
                .ok()
                .and_then(|s| parse_duration_secs(&s))
                .unwrap_or(DEFAULT_TOKEN_EXPIRY_SECS),
        }
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

/// Parses `"7d"`, `"12h"`, `"30m"`, `"45s"` or a bare number of seconds.
///
/// Zero, negative and overflowing durations are rejected.
pub fn parse_duration_secs(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let (digits, multiplier) = match value.chars().last()? {
        'd' => (&value[..value.len() - 1], 86_400),
        'h' => (&value[..value.len() - 1], 3_600),
        'm' => (&value[..value.len() - 1], 60),
        's' => (&value[..value.len() - 1], 1),
        _ => (value, 1),
    };

    digits
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|n| *n > 0)
        .and_then(|n| n.checked_mul(multiplier))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration_secs("7d"), Some(604_800));
        assert_eq!(parse_duration_secs("12h"), Some(43_200));
        assert_eq!(parse_duration_secs("30m"), Some(1_800));
        assert_eq!(parse_duration_secs("45s"), Some(45));
        assert_eq!(parse_duration_secs("3600"), Some(3_600));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert_eq!(parse_duration_secs(""), None);
        assert_eq!(parse_duration_secs("d"), None);
        assert_eq!(parse_duration_secs("seven days"), None);
    }

    #[test]
    fn test_parse_duration_rejects_non_positive_and_overflow() {
        assert_eq!(parse_duration_secs("-1d"), None);
        assert_eq!(parse_duration_secs("0"), None);
        assert_eq!(parse_duration_secs("0h"), None);
        assert_eq!(parse_duration_secs("999999999999999999d"), None);
    }

    #[test]
    fn test_default_secret_detection() {
        let config = JwtConfig {
            secret: DEFAULT_JWT_SECRET.to_string(),
            token_expiry: DEFAULT_TOKEN_EXPIRY_SECS,
        };
        assert!(config.uses_default_secret());
    }
}
