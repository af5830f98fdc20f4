use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::DocumentType;
use crate::utils::ExtractionError;

/// Default width, in characters, of the window searched after a date label.
pub const DEFAULT_DATE_WINDOW_CHARS: usize = 50;

/// Engine configuration, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Returned for empty input and for text that matches no signal at all.
    pub default_document_type: DocumentType,
    pub date_window_chars: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        ExtractorConfig {
            default_document_type: DocumentType::ResidenceCard,
            date_window_chars: DEFAULT_DATE_WINDOW_CHARS,
        }
    }
}

impl ExtractorConfig {
    /// Load a JSON configuration file. Keys left out keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ExtractionError> {
        let raw = std::fs::read_to_string(&path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ExtractionError> {
        let config: ExtractorConfig = serde_json::from_str(raw)
            .map_err(|e| ExtractionError::Config(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ExtractionError> {
        if self.default_document_type == DocumentType::Unknown {
            return Err(ExtractionError::Config(
                "default_document_type must name a known document layout".to_string(),
            ));
        }
        if self.date_window_chars == 0 {
            return Err(ExtractionError::Config(
                "date_window_chars must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
