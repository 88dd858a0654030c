use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::config::OracleConfig;
use crate::error::{LinguaError, Result};

/// Build the HTTP client shared by every request of one oracle
pub fn build_client(config: &OracleConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(concat!("lingualink/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| LinguaError::Oracle(format!("Failed to create HTTP client: {}", e)))
}

/// Join the endpoint and an API path without doubling slashes
pub fn endpoint_url(endpoint: &str, path: &str) -> String {
    format!("{}/{}", endpoint.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Parse model output into the expected JSON shape.
///
/// Models sometimes wrap the object in prose or a markdown fence, so when the
/// whole text is not valid JSON the outermost `{...}` block is tried as well.
pub fn parse_structured<T: DeserializeOwned>(raw: &str) -> Option<T> {
    let trimmed = raw.trim();
    if let Ok(value) = serde_json::from_str::<T>(trimmed) {
        return Some(value);
    }

    let candidate = extract_json_object(trimmed)?;
    match serde_json::from_str::<T>(candidate) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Model output does not match expected shape: {}", e);
            None
        }
    }
}

fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Shape {
        language: String,
    }

    #[test]
    fn test_parse_plain_json() {
        let parsed: Option<Shape> = parse_structured(r#"{"language":"French"}"#);
        assert_eq!(parsed, Some(Shape { language: "French".to_string() }));
    }

    #[test]
    fn test_parse_fenced_json() {
        let raw = "Sure! Here it is:\n```json\n{\"language\": \"Japanese\"}\n```";
        let parsed: Option<Shape> = parse_structured(raw);
        assert_eq!(parsed.map(|s| s.language), Some("Japanese".to_string()));
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(parse_structured::<Shape>(r#"{"lang":"French"}"#).is_none());
        assert!(parse_structured::<Shape>("French").is_none());
        assert!(parse_structured::<Shape>("} nonsense {").is_none());
    }

    #[test]
    fn test_endpoint_url() {
        assert_eq!(endpoint_url("http://localhost:11434/", "/api/generate"), "http://localhost:11434/api/generate");
        assert_eq!(endpoint_url("http://h", "v1/models"), "http://h/v1/models");
    }
}
