use serde::{Deserialize, Deserializer};

pub fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

/// Trims and lowercases an email address.
pub fn deserialize_email<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_lowercase())
}

/// Trims an optional string; blank values become `None`.
pub fn deserialize_optional_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Form {
        #[serde(deserialize_with = "deserialize_trimmed")]
        name: String,
        #[serde(deserialize_with = "deserialize_email")]
        email: String,
        #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
        address: Option<String>,
    }

    #[test]
    fn test_normalizes_fields() {
        let form: Form = serde_json::from_str(
            r#"{"name":"  Jane Doe ","email":" Jane@Example.COM ","address":"   "}"#,
        )
        .unwrap();
        assert_eq!(form.name, "Jane Doe");
        assert_eq!(form.email, "jane@example.com");
        assert_eq!(form.address, None);
    }

    #[test]
    fn test_missing_optional_field() {
        let form: Form = serde_json::from_str(r#"{"name":"a","email":"b@c.d"}"#).unwrap();
        assert!(form.address.is_none());
    }
}
