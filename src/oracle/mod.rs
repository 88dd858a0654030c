// Language model oracle
//
// Detection and translation both reduce to "send a prompt, get back a JSON
// object". This module hides which model API answers the prompt:
// - Ollama: local `/api/generate`
// - OpenAi: any OpenAI-compatible `/v1/chat/completions`

pub mod common;
pub mod ollama;
pub mod openai;

use async_trait::async_trait;
use std::sync::Arc;

pub use common::*;
use crate::config::{OracleBackend, OracleConfig};
use crate::error::Result;

/// Opaque text-completion service used for detection and translation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Send a prompt that asks for a JSON object and return the raw model output
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Verify the service is reachable and the configured model is usable
    async fn check_availability(&self) -> Result<()>;

    fn backend(&self) -> OracleBackend;
}

/// Factory for creating oracle instances
pub struct OracleFactory;

impl OracleFactory {
    /// Create an oracle for the configured backend
    pub fn create_oracle(config: &OracleConfig) -> Result<Arc<dyn Oracle>> {
        let oracle: Arc<dyn Oracle> = match config.backend {
            OracleBackend::Ollama => Arc::new(ollama::OllamaOracle::new(config.clone())?),
            OracleBackend::OpenAi => Arc::new(openai::OpenAiOracle::new(config.clone())?),
        };
        Ok(oracle)
    }
}
