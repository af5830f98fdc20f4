use log::{debug, warn};

use crate::models::{DocumentType, ExtractionResult, OcrLine};
use crate::processing::patterns::CommonPatterns;
use crate::processing::{
    era_date, normalize, DocumentClassifier, DrivingLicenseExtractor, NationalIdExtractor, ResidenceCardExtractor,
};
use crate::utils::{ExtractionError, ExtractorConfig};

/// Classifies OCR text from a Japanese identity document and reads its
/// fields.
///
/// All patterns are compiled in `new`; afterwards the extractor is read-only
/// and can be shared between threads.
#[derive(Debug, Clone)]
pub struct DocumentExtractor {
    config: ExtractorConfig,
    classifier: DocumentClassifier,
    common: CommonPatterns,
    residence_card: ResidenceCardExtractor,
    national_id: NationalIdExtractor,
    driving_license: DrivingLicenseExtractor,
}

impl DocumentExtractor {
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractionError> {
        config.validate()?;

        // Module-level patterns compile here rather than on the first request
        normalize::initialize();
        era_date::initialize();

        let window = config.date_window_chars;
        Ok(DocumentExtractor {
            classifier: DocumentClassifier::new(config.default_document_type)?,
            common: CommonPatterns::compile()?,
            residence_card: ResidenceCardExtractor::new(window)?,
            national_id: NationalIdExtractor::new(window)?,
            driving_license: DrivingLicenseExtractor::new(window)?,
            config,
        })
    }

    pub fn with_defaults() -> Result<Self, ExtractionError> {
        Self::new(ExtractorConfig::default())
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn classify(&self, raw_text: &str) -> DocumentType {
        self.classifier.classify(raw_text)
    }

    /// Extract the fields of one document.
    ///
    /// With `document_type` unset the layout is classified first. The result
    /// always carries the full schema of its type; fields that could not be
    /// read are `None`.
    pub fn extract(&self, raw_text: &str, document_type: Option<DocumentType>) -> ExtractionResult {
        if document_type == Some(DocumentType::Unknown) {
            warn!("Extraction requested for an unknown document type; no fields read");
            return ExtractionResult::Unknown;
        }

        let text = normalize::normalize(raw_text);
        if text.is_empty() {
            let document_type = document_type.unwrap_or(self.config.default_document_type);
            debug!("Empty input, returning an empty {} record", document_type);
            return ExtractionResult::empty(document_type);
        }

        let document_type = document_type.unwrap_or_else(|| self.classifier.classify_normalized(&text));
        let result = match document_type {
            DocumentType::ResidenceCard => {
                ExtractionResult::ResidenceCard(self.residence_card.extract(&text, &self.common))
            }
            DocumentType::NationalIdCard => ExtractionResult::NationalIdCard(self.national_id.extract(&text, &self.common)),
            DocumentType::DrivingLicense => {
                ExtractionResult::DrivingLicense(self.driving_license.extract(&text, &self.common))
            }
            DocumentType::Unknown => ExtractionResult::Unknown,
        };

        debug!(
            "Extracted {} with {}/{} fields present",
            document_type,
            result.present_field_count(),
            result.field_names().len()
        );
        result
    }

    /// Extract from OCR output given as separate lines.
    pub fn extract_lines<S: AsRef<str>>(&self, lines: &[S], document_type: Option<DocumentType>) -> ExtractionResult {
        let joined = lines.iter().map(|line| line.as_ref()).collect::<Vec<_>>().join("\n");
        self.extract(&joined, document_type)
    }

    /// Extract from recognized OCR lines. Confidence and geometry are ignored.
    pub fn extract_ocr_lines(&self, lines: &[OcrLine], document_type: Option<DocumentType>) -> ExtractionResult {
        let texts: Vec<&str> = lines.iter().map(|line| line.text.as_str()).collect();
        self.extract_lines(&texts, document_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::sync::Arc;
    use std::thread;

    fn extractor() -> DocumentExtractor {
        DocumentExtractor::with_defaults().unwrap()
    }

    fn json_keys(result: &ExtractionResult) -> Vec<String> {
        match serde_json::to_value(result).unwrap() {
            Value::Object(map) => map.keys().cloned().collect(),
            other => panic!("expected an object, got {}", other),
        }
    }

    #[test]
    fn test_residence_card_scenario() {
        let lines = ["NAME", "JOHN SMITH", "AB12345678CD", "国籍・地域  中国"];
        let result = extractor().extract_lines(&lines, None);
        assert_eq!(result.document_type(), DocumentType::ResidenceCard);
        match result {
            ExtractionResult::ResidenceCard(fields) => {
                assert_eq!(fields.full_name.as_deref(), Some("JOHN SMITH"));
                assert_eq!(fields.card_number.as_deref(), Some("AB12345678CD"));
                assert_eq!(fields.nationality.as_deref(), Some("CHINA"));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_national_id_scenario() {
        match extractor().extract("個人番号 1234 5678 9012", None) {
            ExtractionResult::NationalIdCard(fields) => {
                assert_eq!(fields.my_number.as_deref(), Some("123456789012"));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_driving_license_scenario() {
        match extractor().extract("運転免許証\n種類 普通 大型", None) {
            ExtractionResult::DrivingLicense(fields) => {
                assert_eq!(
                    fields.license_categories,
                    Some(vec!["大型".to_string(), "普通".to_string()])
                );
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_schema_is_complete_for_every_type() {
        let extractor = extractor();
        for document_type in DocumentType::KNOWN {
            let result = extractor.extract("#@! qzx", Some(document_type));
            assert_eq!(result.document_type(), document_type);

            let mut expected: Vec<String> = document_type.field_names().iter().map(|f| f.to_string()).collect();
            expected.push("document_type".to_string());
            expected.sort();
            let mut keys = json_keys(&result);
            keys.sort();
            assert_eq!(keys, expected);
        }
    }

    #[test]
    fn test_empty_input_is_total() {
        let extractor = extractor();
        assert_eq!(
            extractor.extract("", None),
            ExtractionResult::empty(DocumentType::ResidenceCard)
        );
        assert_eq!(
            extractor.extract(" \n\t ", Some(DocumentType::DrivingLicense)),
            ExtractionResult::empty(DocumentType::DrivingLicense)
        );
        assert_eq!(extractor.extract("", None).present_field_count(), 0);
    }

    #[test]
    fn test_garbled_input_uses_configured_default() {
        let result = extractor().extract("#@!~ qzx 0_0 ??", None);
        assert_eq!(result.document_type(), DocumentType::ResidenceCard);

        let config = ExtractorConfig {
            default_document_type: DocumentType::NationalIdCard,
            ..ExtractorConfig::default()
        };
        let extractor = DocumentExtractor::new(config).unwrap();
        assert_eq!(extractor.extract("", None).document_type(), DocumentType::NationalIdCard);
        assert_eq!(
            extractor.extract("#@!~ qzx 0_0 ??", None).document_type(),
            DocumentType::NationalIdCard
        );
    }

    #[test]
    fn test_explicit_unknown_reads_nothing() {
        let result = extractor().extract("在留カード\nAB12345678CD", Some(DocumentType::Unknown));
        assert_eq!(result, ExtractionResult::Unknown);
        assert_eq!(json_keys(&result), vec!["document_type".to_string()]);
    }

    #[test]
    fn test_explicit_type_skips_classification() {
        let result = extractor().extract("AB12345678CD\n運転免許証", Some(DocumentType::DrivingLicense));
        assert_eq!(result.document_type(), DocumentType::DrivingLicense);
    }

    #[test]
    fn test_gender_token_beats_latin_label() {
        match extractor().extract("在留カード\nSEX F\n性別 男", None) {
            ExtractionResult::ResidenceCard(fields) => assert_eq!(fields.gender.as_deref(), Some("MALE")),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_card_number_alone_classifies_residence_card() {
        let extractor = extractor();
        assert_eq!(extractor.classify("XY 00\nＡＢ１２３４５６７８ＣＤ\n普通"), DocumentType::ResidenceCard);
    }

    #[test]
    fn test_ocr_lines_from_json() {
        let raw = r#"[
            {"text": "NAME", "confidence": 0.98},
            {"text": "JOHN SMITH", "confidence": 0.91, "bbox": [[0, 0], [10, 0], [10, 4], [0, 4]]},
            {"text": "AB12345678CD"}
        ]"#;
        let lines: Vec<OcrLine> = serde_json::from_str(raw).unwrap();
        match extractor().extract_ocr_lines(&lines, None) {
            ExtractionResult::ResidenceCard(fields) => {
                assert_eq!(fields.full_name.as_deref(), Some("JOHN SMITH"));
                assert_eq!(fields.card_number.as_deref(), Some("AB12345678CD"));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ExtractorConfig {
            date_window_chars: 0,
            ..ExtractorConfig::default()
        };
        assert!(matches!(DocumentExtractor::new(config), Err(ExtractionError::Config(_))));
    }

    #[test]
    fn test_extractor_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DocumentExtractor>();
    }

    #[test]
    fn test_concurrent_extraction() {
        let extractor = Arc::new(extractor());
        let inputs = [
            ("NAME\nJOHN SMITH\nAB12345678CD", DocumentType::ResidenceCard),
            ("個人番号 1234 5678 9012", DocumentType::NationalIdCard),
            ("運転免許証\n種類 普通 大型", DocumentType::DrivingLicense),
        ];

        let handles: Vec<_> = (0..6)
            .map(|i| {
                let extractor = Arc::clone(&extractor);
                let (text, expected) = inputs[i % inputs.len()];
                thread::spawn(move || {
                    let first = extractor.extract(text, None);
                    let second = extractor.extract(text, None);
                    assert_eq!(first, second);
                    assert_eq!(first.document_type(), expected);
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
