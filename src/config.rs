use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog;
use crate::error::{LinguaError, Result};

fn default_timeout_secs() -> u64 {
    60
}

fn default_debounce_ms() -> u64 {
    750
}

fn default_target() -> String {
    catalog::DEFAULT_TARGET.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Which model API to talk to
    pub backend: OracleBackend,
    /// Base URL of the model service
    pub endpoint: String,
    /// Model used for both detection and translation
    pub model: String,
    /// Bearer token, `${VAR}` patterns are expanded from the environment
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-request HTTP timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OracleBackend {
    /// Ollama: local `/api/generate` endpoint
    Ollama,
    /// OpenAi: any OpenAI-compatible `/v1/chat/completions` endpoint
    OpenAi,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Quiet period after the last edit before language detection runs
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Target language code selected at startup
    #[serde(default = "default_target")]
    pub default_target: String,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            backend: OracleBackend::Ollama,
            endpoint: "http://localhost:11434".to_string(),
            model: "llama3.2:3b".to_string(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            default_target: default_target(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LinguaError::Config(format!("Failed to read config file: {}", e)))?;

        let mut config: Config = toml::from_str(&content)
            .map_err(|e| LinguaError::Config(format!("Failed to parse config file: {}", e)))?;

        if let Some(ref mut key) = config.oracle.api_key {
            *key = expand_env(key);
        }

        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LinguaError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| LinguaError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Apply `LINGUALINK_*` environment variables on top of the loaded values
    pub fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var("LINGUALINK_ENDPOINT") {
            self.oracle.endpoint = endpoint;
        }
        if let Ok(model) = std::env::var("LINGUALINK_MODEL") {
            self.oracle.model = model;
        }
        if let Ok(key) = std::env::var("LINGUALINK_API_KEY") {
            if !key.trim().is_empty() {
                self.oracle.api_key = Some(key);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.oracle.endpoint.trim().is_empty() {
            return Err(LinguaError::Config("oracle.endpoint must not be empty".to_string()));
        }
        if self.oracle.model.trim().is_empty() {
            return Err(LinguaError::Config("oracle.model must not be empty".to_string()));
        }
        if self.ui.debounce_ms == 0 {
            return Err(LinguaError::Config("ui.debounce_ms must be greater than zero".to_string()));
        }
        if !catalog::is_selectable(&self.ui.default_target) {
            return Err(LinguaError::Config(format!(
                "ui.default_target '{}' is not a known language code",
                self.ui.default_target
            )));
        }
        Ok(())
    }
}

/// Expand ${VAR} patterns in a string.
///
/// Substituted values are not scanned again.
fn expand_env(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }

    result.push_str(rest);
    result
}
