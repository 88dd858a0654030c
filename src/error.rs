use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinguaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Oracle error: {0}")]
    Oracle(String),

    #[error("Language detection error: {0}")]
    Detection(String),

    #[error("Translation error: {0}")]
    Translation(String),

    /// Raised before any oracle call is made.
    #[error("{0}")]
    Precondition(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

pub type Result<T> = std::result::Result<T, LinguaError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn read_missing() -> Result<String> {
        let text = std::fs::read_to_string("/nonexistent/lingualink/input.txt")?;
        Ok(text)
    }

    #[test]
    fn test_io_errors_convert_with_question_mark() {
        let err = read_missing().unwrap_err();
        assert!(matches!(err, LinguaError::Io(_)));
        assert!(err.to_string().starts_with("IO error: "));
    }

    #[test]
    fn test_display_messages() {
        let err = LinguaError::Precondition("Please enter some text to translate.".to_string());
        assert_eq!(err.to_string(), "Please enter some text to translate.");

        let err = LinguaError::Oracle("HTTP request failed: timed out".to_string());
        assert_eq!(err.to_string(), "Oracle error: HTTP request failed: timed out");

        let err = LinguaError::Detection("Model returned an empty language name".to_string());
        assert_eq!(err.to_string(), "Language detection error: Model returned an empty language name");
    }
}
