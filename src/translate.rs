//! Text translation through the oracle.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{LinguaError, Result};
use crate::oracle::{Oracle, parse_structured};

/// Validated input for one translation call.
///
/// Fields are private so a request can only exist with all three values
/// non-empty; `text` is stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    text: String,
    source_language: String,
    target_language: String,
}

impl TranslationRequest {
    pub fn new(
        text: impl AsRef<str>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Result<Self> {
        let text = text.as_ref().trim().to_string();
        let source_language = source_language.into();
        let target_language = target_language.into();

        if text.is_empty() {
            return Err(LinguaError::Precondition("Text to translate is empty".to_string()));
        }
        if source_language.trim().is_empty() {
            return Err(LinguaError::Precondition("Source language is empty".to_string()));
        }
        if target_language.trim().is_empty() {
            return Err(LinguaError::Precondition("Target language is empty".to_string()));
        }

        Ok(Self { text, source_language, target_language })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub translated_text: String,
}

/// Stateless wrapper asking the oracle to translate between two named languages
#[derive(Clone)]
pub struct Translator {
    oracle: Arc<dyn Oracle>,
}

impl Translator {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    pub fn build_prompt(request: &TranslationRequest) -> String {
        format!(
            "Translate the following text from {} to {}:\n\n{}\n\n\
             Return ONLY a JSON object of the form {{\"translatedText\":\"<translation>\"}}.",
            request.source_language, request.target_language, request.text
        )
    }

    /// Single best-effort round trip, the translation is returned as the model produced it
    pub async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        debug!(
            "Translating {} chars: {} -> {}",
            request.text.chars().count(),
            request.source_language,
            request.target_language
        );

        let raw = self.oracle
            .generate(&Self::build_prompt(request))
            .await
            .map_err(|e| {
                warn!("Translation request failed: {}", e);
                LinguaError::Translation(e.to_string())
            })?;

        parse_structured::<TranslationResult>(&raw).ok_or_else(|| {
            LinguaError::Translation(format!("Unexpected translation output: {}", raw))
        })
    }
}
