use thiserror::Error;

/// Errors raised while building the engine or handling its inputs.
///
/// Missing fields are never errors: extraction itself is total and reports
/// absence through `Option`.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Pattern compile error: {0}")]
    PatternCompile(#[from] regex::Error),
    #[error("Unknown document type: {0}")]
    UnknownDocumentType(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Input format error: {0}")]
    InputFormat(String),
}

impl From<serde_json::Error> for ExtractionError {
    fn from(err: serde_json::Error) -> Self {
        ExtractionError::InputFormat(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ExtractionError::UnknownDocumentType("PASSPORT".to_string());
        assert_eq!(err.to_string(), "Unknown document type: PASSPORT");

        let err = ExtractionError::Config("bad value".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad value");
    }

    #[test]
    fn test_regex_error_converts() {
        let bad = regex::Regex::new("(unclosed").unwrap_err();
        let err: ExtractionError = bad.into();
        assert!(matches!(err, ExtractionError::PatternCompile(_)));
    }
}
