//! Language identification through the oracle.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{LinguaError, Result};
use crate::oracle::{Oracle, parse_structured};

/// Free-form language name as produced by the model, e.g. "French"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub language: String,
}

/// Stateless wrapper asking the oracle which language a text is written in
#[derive(Clone)]
pub struct LanguageDetector {
    oracle: Arc<dyn Oracle>,
}

impl LanguageDetector {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    pub fn build_prompt(text: &str) -> String {
        format!(
            "What language is the following text in? Respond with just the language name. Text: {}\n\n\
             Return ONLY a JSON object of the form {{\"language\":\"<language name>\"}}.",
            text
        )
    }

    /// Detect the language of `text`.
    ///
    /// The returned name is passed through untouched: no mapping to a code and
    /// no check against the catalog.
    pub async fn detect(&self, text: &str) -> Result<DetectionResult> {
        if text.trim().is_empty() {
            return Err(LinguaError::Detection("Cannot detect the language of empty text".to_string()));
        }

        let raw = self.oracle
            .generate(&Self::build_prompt(text))
            .await
            .map_err(|e| {
                warn!("Language detection request failed: {}", e);
                LinguaError::Detection(e.to_string())
            })?;

        let result: DetectionResult = parse_structured(&raw).ok_or_else(|| {
            LinguaError::Detection(format!("Unexpected detection output: {}", raw))
        })?;

        if result.language.trim().is_empty() {
            return Err(LinguaError::Detection("Model returned an empty language name".to_string()));
        }

        debug!("Detected language: {}", result.language);
        Ok(result)
    }
}
