use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{OracleBackend, OracleConfig};
use crate::error::{LinguaError, Result};
use super::{Oracle, common::{build_client, endpoint_url}};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    #[serde(default)]
    content: Option<String>,
}

/// Oracle backed by an OpenAI-compatible chat completions API
pub struct OpenAiOracle {
    client: Client,
    config: OracleConfig,
}

impl OpenAiOracle {
    pub fn new(config: OracleConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(&config)?,
            config,
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.api_key.as_deref() {
            Some(key) if !key.is_empty() => request.bearer_auth(key),
            _ => request,
        }
    }
}

#[async_trait]
impl Oracle for OpenAiOracle {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![Message { role: "user", content: prompt }],
            response_format: ResponseFormat { kind: "json_object" },
        };

        let url = endpoint_url(&self.config.endpoint, "v1/chat/completions");
        debug!("Sending prompt to chat completions: {}", url);

        let response = self
            .authorize(self.client.post(&url))
            .json(&request)
            .send()
            .await
            .map_err(|e| LinguaError::Oracle(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LinguaError::Oracle(format!(
                "Chat completions error {}: {}", status, body
            )));
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| LinguaError::Oracle(format!("Failed to parse response: {}", e)))?;

        let content = result
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(LinguaError::Oracle("Empty response received".to_string()));
        }

        Ok(content)
    }

    async fn check_availability(&self) -> Result<()> {
        let url = endpoint_url(&self.config.endpoint, "v1/models");

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| LinguaError::Oracle(format!("Failed to connect to {}: {}", url, e)))?;

        if response.status().is_success() {
            info!("Chat completions endpoint is reachable, using model '{}'", self.config.model);
            Ok(())
        } else {
            Err(LinguaError::Oracle(format!(
                "Chat completions endpoint returned {} (check oracle.api_key)",
                response.status()
            )))
        }
    }

    fn backend(&self) -> OracleBackend {
        OracleBackend::OpenAi
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn oracle_for(server: &MockServer, api_key: Option<&str>) -> OpenAiOracle {
        let config = OracleConfig {
            backend: OracleBackend::OpenAi,
            endpoint: server.uri(),
            model: "gpt-4o-mini".to_string(),
            api_key: api_key.map(str::to_string),
            ..OracleConfig::default()
        };
        OpenAiOracle::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_generate_sends_bearer_and_reads_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4o-mini",
                "response_format": { "type": "json_object" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "{\"translatedText\":\"Hola mundo\"}" } }
                ]
            })))
            .mount(&server)
            .await;

        let raw = oracle_for(&server, Some("sk-test")).generate("Translate").await.unwrap();
        assert_eq!(raw, "{\"translatedText\":\"Hola mundo\"}");
    }

    #[tokio::test]
    async fn test_generate_without_choices_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let err = oracle_for(&server, None).generate("Translate").await.unwrap_err();
        assert!(matches!(err, LinguaError::Oracle(_)));
    }

    #[tokio::test]
    async fn test_check_availability_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = oracle_for(&server, Some("bad")).check_availability().await.unwrap_err();
        assert!(err.to_string().contains("401"));
    }
}
