// Residence Card (在留カード) pipeline
use regex::Regex;

use crate::models::lexicon::{
    NATIONALITIES, NATIONALITY_LABELS, NATIVE_NAME_EXCLUSIONS, REGION_LABELS, RESIDENCE_STATUSES, STATUS_LABELS, WORK_RESTRICTIONS,
    WORK_RESTRICTION_FRAGMENTS,
};
use crate::models::ResidenceCardFields;
use crate::processing::extractors::{
    cascade, char_len, collapse_whitespace, contains_any, extract_gender, extract_romaji_name, first_accepted, is_field_label,
    scan_lexicon, scan_tokens, DateRule,
};
use crate::processing::patterns::{compile_all, CommonPatterns, CARD_NUMBER, NATIVE_CHARS};

#[derive(Debug, Clone)]
pub struct ResidenceCardExtractor {
    native_name: Vec<Regex>,
    nationality: Vec<Regex>,
    region: Vec<Regex>,
    status: Vec<Regex>,
    period_of_stay: Vec<Regex>,
    card_number: Regex,
    address: Vec<Regex>,
    date_of_birth: DateRule,
    issue_date: DateRule,
    expiry_date: DateRule,
}

impl ResidenceCardExtractor {
    pub fn new(date_window_chars: usize) -> Result<Self, regex::Error> {
        Ok(ResidenceCardExtractor {
            native_name: compile_all(&[format!(
                r"(?:氏名|名前)[:\s]*([{n}]+(?:[^\S\n][{n}]+)?)",
                n = NATIVE_CHARS
            )])?,
            nationality: compile_all(&[
                r"(?i)国籍[・/\s]*(?:地域)?[:\s]*([^\n\d]+?)(?:\s*(?:生年|DATE|$|\n))",
                r"(?i)NATIONALITY[/\s]*REGION[:\s]*(.+?)(?:\s*(?:生年|DATE|$|\n))",
            ])?,
            region: compile_all(&[r"地域[:\s]*([^\n]+?)(?:\s*(?:生年|$|\n))"])?,
            status: compile_all(&[
                r"(?i)在留資格[:\s]*(.+?)(?:\s*(?:在留期間|PERIOD|$|\n))",
                r"(?i)STATUS[:\s]*(.+?)(?:\s*(?:在留期間|PERIOD|$|\n))",
            ])?,
            period_of_stay: compile_all(&[
                r"(?i)在留期間[:\s]*([0-9]+年[0-9]*月?)",
                r"(?i)PERIOD\s*OF\s*STAY[:\s]*([0-9]+年[0-9]*月?)",
                r"([0-9]+年(?:[0-9]+月)?)\s*(?:まで|間)",
            ])?,
            card_number: Regex::new(CARD_NUMBER)?,
            address: compile_all(&[format!(
                r"(?is)(?:住居地|住所|ADDRESS)[:\s]*(.+?)(?:\s*(?:{}|在留カード番号|RESIDENCE CARD NUMBER|在留|就労|$))",
                CARD_NUMBER
            )])?,
            date_of_birth: DateRule::new(&["生年月日", "DATE OF BIRTH"], date_window_chars)?,
            issue_date: DateRule::new(&["交付年月日", "DATE OF ISSUE"], date_window_chars)?,
            expiry_date: DateRule::new(&["有効期限", "DATE OF EXPIRY", "まで有効"], date_window_chars)?,
        })
    }

    pub fn extract(&self, text: &str, common: &CommonPatterns) -> ResidenceCardFields {
        ResidenceCardFields {
            full_name: extract_romaji_name(text, common),
            full_name_native: self.extract_native_name(text),
            date_of_birth: self.date_of_birth.extract(text, common),
            nationality: self.extract_nationality(text),
            region: self.extract_region(text),
            gender: extract_gender(text, common),
            status_of_residence: self.extract_status(text),
            period_of_stay: first_accepted(&self.period_of_stay, text, |period| !period.is_empty()),
            work_restriction: extract_work_restriction(text),
            card_number: self.card_number.find(text).map(|m| m.as_str().to_string()),
            issue_date: self.issue_date.extract(text, common),
            expiry_date: self.expiry_date.extract(text, common),
            address: self.extract_address(text, common),
        }
    }

    /// The label may end its line, so a missing name would recapture the
    /// next label; such captures are dropped.
    fn extract_native_name(&self, text: &str) -> Option<String> {
        first_accepted(&self.native_name, text, |name| {
            !name.is_empty() && !contains_any(name, NATIVE_NAME_EXCLUSIONS)
        })
    }

    /// Known nationality tokens anywhere in the text win; otherwise the value
    /// after the nationality label, canonicalized if it holds a known token.
    fn extract_nationality(&self, text: &str) -> Option<String> {
        if let Some(canonical) = scan_lexicon(text, NATIONALITIES) {
            return Some(canonical.to_string());
        }
        cascade(&self.nationality, text, |value| {
            if let Some(canonical) = scan_lexicon(value, NATIONALITIES) {
                return Some(canonical.to_string());
            }
            if is_field_label(value, NATIONALITY_LABELS) {
                None
            } else {
                Some(value.to_string())
            }
        })
    }

    /// Region keeps the token as printed rather than the English value.
    fn extract_region(&self, text: &str) -> Option<String> {
        if let Some((token, _)) = NATIONALITIES.iter().find(|(token, _)| text.contains(token)) {
            return Some(token.to_string());
        }
        first_accepted(&self.region, text, |region| !is_field_label(region, REGION_LABELS))
    }

    fn extract_status(&self, text: &str) -> Option<String> {
        if let Some(canonical) = scan_lexicon(text, RESIDENCE_STATUSES) {
            return Some(canonical.to_string());
        }
        first_accepted(&self.status, text, |status| !is_field_label(status, STATUS_LABELS))
    }

    fn extract_address(&self, text: &str, common: &CommonPatterns) -> Option<String> {
        cascade(&self.address, text, |raw| {
            let address = collapse_whitespace(raw, common);
            let address = self.card_number.replace_all(&address, "").trim().to_string();
            if char_len(&address) > 5 {
                Some(address)
            } else {
                None
            }
        })
    }
}

/// Full restriction sentences first, then the sub-phrases they are built
/// from.
fn extract_work_restriction(text: &str) -> Option<String> {
    scan_tokens(text, WORK_RESTRICTIONS)
        .or_else(|| scan_lexicon(text, WORK_RESTRICTION_FRAGMENTS))
        .map(str::to_string)
}
