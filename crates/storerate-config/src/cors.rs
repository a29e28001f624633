use std::env;

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Reads `ALLOWED_ORIGINS` (comma separated), falling back to `FRONTEND_URL`
    /// and finally to the local dev server.
    pub fn from_env() -> Self {
        let raw = env::var("ALLOWED_ORIGINS")
            .or_else(|_| env::var("FRONTEND_URL"))
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        Self::from_list(&raw)
    }

    pub fn from_list(raw: &str) -> Self {
        let allowed_origins = raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_list_trims_and_skips_blanks() {
        let config = CorsConfig::from_list(" http://a.test , ,http://b.test");
        assert_eq!(config.allowed_origins, vec!["http://a.test", "http://b.test"]);
    }
}
