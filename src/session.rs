//! Interaction state owned by the orchestrator.

use serde::Serialize;

/// Where the current interaction stands.
///
/// Replaces a pair of independent busy flags so that combinations such as
/// "translated while detection failed" cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Status {
    #[default]
    Idle,
    Detecting,
    Detected,
    DetectionFailed,
    Translating,
    Translated,
    TranslationFailed,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Detecting => "detecting",
            Self::Detected => "detected",
            Self::DetectionFailed => "detection failed",
            Self::Translating => "translating",
            Self::Translated => "translated",
            Self::TranslationFailed => "translation failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UiState {
    pub input_text: String,
    pub output_text: String,
    /// Name shown to the user, as returned by detection
    pub detected_language_name: String,
    /// Name sent as the source language of a translation
    pub source_language_for_api: String,
    pub target_language_code: String,
    pub status: Status,
    /// Blocking error shown inline until the next attempt or edit
    pub error: Option<String>,
}

impl UiState {
    pub fn new(target_language_code: impl Into<String>) -> Self {
        Self {
            input_text: String::new(),
            output_text: String::new(),
            detected_language_name: String::new(),
            source_language_for_api: String::new(),
            target_language_code: target_language_code.into(),
            status: Status::Idle,
            error: None,
        }
    }

    pub fn is_detecting(&self) -> bool {
        self.status == Status::Detecting
    }

    pub fn is_translating(&self) -> bool {
        self.status == Status::Translating
    }

    pub fn has_input(&self) -> bool {
        !self.input_text.trim().is_empty()
    }

    /// Clear everything derived from the input text; the target selection survives
    pub fn reset_derived(&mut self) {
        self.detected_language_name.clear();
        self.source_language_for_api.clear();
        self.output_text.clear();
        self.error = None;
        self.status = Status::Idle;
    }

    /// Status to fall back to once an in-flight call no longer applies
    pub fn settled_status(&self) -> Status {
        if self.source_language_for_api.is_empty() {
            Status::Idle
        } else {
            Status::Detected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_keeps_target() {
        let mut state = UiState::new("fr");
        state.input_text = "Hello".to_string();
        state.output_text = "Bonjour".to_string();
        state.detected_language_name = "English".to_string();
        state.source_language_for_api = "English".to_string();
        state.error = Some("boom".to_string());
        state.status = Status::Translated;

        state.reset_derived();
        assert_eq!(state.target_language_code, "fr");
        assert_eq!(state.status, Status::Idle);
        assert!(state.output_text.is_empty());
        assert!(state.detected_language_name.is_empty());
        assert!(state.source_language_for_api.is_empty());
        assert!(state.error.is_none());
        assert_eq!(state.input_text, "Hello");
    }

    #[test]
    fn test_busy_flags_follow_status() {
        let mut state = UiState::new("es");
        assert!(!state.is_detecting() && !state.is_translating());
        state.status = Status::Detecting;
        assert!(state.is_detecting() && !state.is_translating());
        state.status = Status::Translating;
        assert!(!state.is_detecting() && state.is_translating());
    }

    #[test]
    fn test_settled_status() {
        let mut state = UiState::new("es");
        assert_eq!(state.settled_status(), Status::Idle);
        state.source_language_for_api = "German".to_string();
        assert_eq!(state.settled_status(), Status::Detected);
    }
}
