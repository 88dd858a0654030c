use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use crate::config::{OracleBackend, OracleConfig};
use crate::error::{LinguaError, Result};
use super::{Oracle, common::{build_client, endpoint_url}};

#[derive(Debug, Clone, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    format: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Oracle backed by an Ollama server
pub struct OllamaOracle {
    client: Client,
    config: OracleConfig,
}

impl OllamaOracle {
    pub fn new(config: OracleConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(&config)?,
            config,
        })
    }
}

#[async_trait]
impl Oracle for OllamaOracle {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            format: "json",
        };

        let url = endpoint_url(&self.config.endpoint, "api/generate");
        debug!("Sending prompt to Ollama: {}", url);

        let response = self.client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| LinguaError::Oracle(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LinguaError::Oracle(format!(
                "Ollama API error {}: {}", status, error_text
            )));
        }

        let body: GenerateResponse = response.json().await
            .map_err(|e| LinguaError::Oracle(format!("Failed to parse response: {}", e)))?;

        let raw = body.response.trim().to_string();
        debug!("Raw Ollama response: {}", raw);

        if raw.is_empty() {
            return Err(LinguaError::Oracle("Empty response received".to_string()));
        }

        Ok(raw)
    }

    async fn check_availability(&self) -> Result<()> {
        let url = endpoint_url(&self.config.endpoint, "api/show");

        let response = self.client
            .post(&url)
            .json(&json!({ "name": self.config.model }))
            .send()
            .await
            .map_err(|e| LinguaError::Oracle(format!("Failed to connect to Ollama: {}", e)))?;

        if response.status().is_success() {
            info!("Ollama model '{}' is available", self.config.model);
            Ok(())
        } else {
            Err(LinguaError::Oracle(format!(
                "Ollama model '{}' not found. Please pull the model first: ollama pull {}",
                self.config.model, self.config.model
            )))
        }
    }

    fn backend(&self) -> OracleBackend {
        OracleBackend::Ollama
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn oracle_for(server: &MockServer) -> OllamaOracle {
        let config = OracleConfig {
            endpoint: server.uri(),
            model: "llama3.2:3b".to_string(),
            ..OracleConfig::default()
        };
        OllamaOracle::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_generate_returns_model_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(json!({ "model": "llama3.2:3b", "stream": false, "format": "json" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": "  {\"language\":\"French\"}\n",
                "done": true
            })))
            .mount(&server)
            .await;

        let raw = oracle_for(&server).generate("What language?").await.unwrap();
        assert_eq!(raw, "{\"language\":\"French\"}");
    }

    #[tokio::test]
    async fn test_generate_maps_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
            .mount(&server)
            .await;

        let err = oracle_for(&server).generate("prompt").await.unwrap_err();
        assert!(matches!(err, LinguaError::Oracle(ref msg) if msg.contains("500")), "{}", err);
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "   ", "done": true })))
            .mount(&server)
            .await;

        assert!(oracle_for(&server).generate("prompt").await.is_err());
    }

    #[tokio::test]
    async fn test_check_availability() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/show"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = oracle_for(&server).check_availability().await.unwrap_err();
        assert!(err.to_string().contains("ollama pull llama3.2:3b"));
    }
}
