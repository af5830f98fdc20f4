use log::debug;
use regex::Regex;

use crate::models::DocumentType;
use crate::processing::normalize::normalize;
use crate::processing::patterns::CARD_NUMBER;
use crate::utils::ExtractionError;

/// Score added by a keyword co-occurrence.
pub const KEYWORD_WEIGHT: u32 = 2;
/// Score added by a value shape that only one layout prints.
pub const STRUCTURAL_WEIGHT: u32 = 5;

const RESIDENCE_CARD_KEYWORDS: &[&str] = &[
    "在留カード",
    "RESIDENCE CARD",
    "在留資格",
    "在留期間",
    "就労制限",
    "WORK RESTRICTION",
    "国籍・地域",
    "NATIONALITY",
];

const NATIONAL_ID_KEYWORDS: &[&str] = &[
    "個人番号",
    "マイナンバー",
    "INDIVIDUAL NUMBER",
    "個人番号カード",
    "署名用電子証明書",
    "利用者証明用電子証明書",
];

const DRIVING_LICENSE_KEYWORDS: &[&str] = &[
    "運転免許証",
    "免許証番号",
    "免許の条件",
    "公安委員会",
    "普通",
    "中型",
    "大型",
    "二輪",
    "原付",
];

#[derive(Debug, Clone)]
enum Signal {
    Keyword(&'static str),
    Structural(Regex),
}

impl Signal {
    fn weight(&self) -> u32 {
        match self {
            Signal::Keyword(_) => KEYWORD_WEIGHT,
            Signal::Structural(_) => STRUCTURAL_WEIGHT,
        }
    }

    // Latin keywords match case-insensitively; lowering leaves kana and
    // kanji untouched.
    fn matches(&self, text: &str, lowered: &str) -> bool {
        match self {
            Signal::Keyword(keyword) => text.contains(keyword) || lowered.contains(&keyword.to_lowercase()),
            Signal::Structural(pattern) => pattern.is_match(text),
        }
    }
}

/// Per-type scores for one text, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationScore {
    scores: Vec<(DocumentType, u32)>,
}

impl ClassificationScore {
    pub fn get(&self, document_type: DocumentType) -> u32 {
        self.scores
            .iter()
            .find(|(candidate, _)| *candidate == document_type)
            .map(|(_, score)| *score)
            .unwrap_or(0)
    }

    /// Highest-scoring type; ties go to the type declared first. `None` when
    /// nothing scored.
    pub fn best(&self) -> Option<DocumentType> {
        let mut best: Option<(DocumentType, u32)> = None;
        for (document_type, score) in &self.scores {
            if *score > best.map(|(_, top)| top).unwrap_or(0) {
                best = Some((*document_type, *score));
            }
        }
        best.map(|(document_type, _)| document_type)
    }
}

/// Weighted keyword/shape classifier over the known layouts.
#[derive(Debug, Clone)]
pub struct DocumentClassifier {
    signals: Vec<(DocumentType, Vec<Signal>)>,
    default_type: DocumentType,
}

impl DocumentClassifier {
    pub fn new(default_type: DocumentType) -> Result<Self, ExtractionError> {
        let keywords = |list: &[&'static str]| list.iter().map(|kw| Signal::Keyword(*kw)).collect::<Vec<_>>();

        let mut residence = keywords(RESIDENCE_CARD_KEYWORDS);
        residence.push(Signal::Structural(Regex::new(CARD_NUMBER)?));

        Ok(DocumentClassifier {
            signals: vec![
                (DocumentType::ResidenceCard, residence),
                (DocumentType::NationalIdCard, keywords(NATIONAL_ID_KEYWORDS)),
                (DocumentType::DrivingLicense, keywords(DRIVING_LICENSE_KEYWORDS)),
            ],
            default_type,
        })
    }

    pub fn default_type(&self) -> DocumentType {
        self.default_type
    }

    /// Tally every signal against already-normalized text.
    pub fn score(&self, text: &str) -> ClassificationScore {
        let lowered = text.to_lowercase();
        let scores = self
            .signals
            .iter()
            .map(|(document_type, signals)| {
                let score: u32 = signals
                    .iter()
                    .filter(|signal| signal.matches(text, &lowered))
                    .map(Signal::weight)
                    .sum();
                (*document_type, score)
            })
            .collect();
        ClassificationScore { scores }
    }

    /// Best-guess layout for raw OCR text. Empty text, or text that no
    /// signal fires on, gets the configured default.
    pub fn classify(&self, raw_text: &str) -> DocumentType {
        self.classify_normalized(&normalize(raw_text))
    }

    pub(crate) fn classify_normalized(&self, text: &str) -> DocumentType {
        if text.is_empty() {
            return self.default_type;
        }
        let score = self.score(text);
        debug!("Classification scores: {:?}", score.scores);
        score.best().unwrap_or(self.default_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> DocumentClassifier {
        DocumentClassifier::new(DocumentType::ResidenceCard).unwrap()
    }

    #[test]
    fn test_empty_text_returns_default() {
        assert_eq!(classifier().classify(""), DocumentType::ResidenceCard);
        let license_default = DocumentClassifier::new(DocumentType::DrivingLicense).unwrap();
        assert_eq!(license_default.classify("   "), DocumentType::DrivingLicense);
    }

    #[test]
    fn test_garbled_text_returns_default() {
        assert_eq!(classifier().classify("#@!~ qzx 0_0 ??"), DocumentType::ResidenceCard);
        let id_default = DocumentClassifier::new(DocumentType::NationalIdCard).unwrap();
        assert_eq!(id_default.classify("#@!~ qzx 0_0 ??"), DocumentType::NationalIdCard);
    }

    #[test]
    fn test_structural_signal_alone() {
        let classifier = classifier();
        let text = "XY 99\nAB12345678CD\n普通";
        let score = classifier.score(text);
        assert_eq!(score.get(DocumentType::ResidenceCard), STRUCTURAL_WEIGHT);
        assert_eq!(score.get(DocumentType::DrivingLicense), KEYWORD_WEIGHT);
        assert_eq!(classifier.classify(text), DocumentType::ResidenceCard);
    }

    #[test]
    fn test_full_width_card_number() {
        assert_eq!(classifier().classify("ＡＢ１２３４５６７８ＣＤ"), DocumentType::ResidenceCard);
    }

    #[test]
    fn test_latin_keywords_case_insensitive() {
        let score = classifier().score("individual number card");
        assert_eq!(score.get(DocumentType::NationalIdCard), KEYWORD_WEIGHT);
    }

    #[test]
    fn test_national_id() {
        let text = "個人番号カード\n氏名 山田 太郎\n個人番号 1234 5678 9012";
        let score = classifier().score(text);
        // 個人番号 and 個人番号カード both fire
        assert_eq!(score.get(DocumentType::NationalIdCard), 2 * KEYWORD_WEIGHT);
        assert_eq!(classifier().classify(text), DocumentType::NationalIdCard);
    }

    #[test]
    fn test_driving_license() {
        let text = "運転免許証\n氏名 山田 太郎\n種類 普通 大型\n東京都公安委員会";
        assert_eq!(classifier().classify(text), DocumentType::DrivingLicense);
    }

    #[test]
    fn test_tie_goes_to_first_declared() {
        // One keyword each for the national ID card and the license
        let text = "マイナンバー 運転免許証";
        let classifier = DocumentClassifier::new(DocumentType::DrivingLicense).unwrap();
        let score = classifier.score(text);
        assert_eq!(score.get(DocumentType::NationalIdCard), score.get(DocumentType::DrivingLicense));
        assert_eq!(classifier.classify(text), DocumentType::NationalIdCard);
    }
}
