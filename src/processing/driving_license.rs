// Driving License (運転免許証) pipeline
use regex::Regex;

use crate::models::lexicon::{CONDITION_NON_VALUES, LICENSE_CATEGORIES, LICENSE_CONDITIONS, NATIVE_NAME_EXCLUSIONS};
use crate::models::DrivingLicenseFields;
use crate::processing::extractors::{
    cascade, char_len, collapse_whitespace, contains_any, first_accepted, scan_tokens, DateRule,
};
use crate::processing::patterns::{compile_all, CommonPatterns, KANJI_CHARS, NATIVE_CHARS};

#[derive(Debug, Clone)]
pub struct DrivingLicenseExtractor {
    name: Vec<Regex>,
    license_number: Vec<Regex>,
    bare_license_number: Regex,
    address: Vec<Regex>,
    conditions: Vec<Regex>,
    issuing_authority: Regex,
    date_of_birth: DateRule,
    issue_date: DateRule,
    expiry_date: DateRule,
}

impl DrivingLicenseExtractor {
    pub fn new(date_window_chars: usize) -> Result<Self, regex::Error> {
        Ok(DrivingLicenseExtractor {
            // The name ends at the birth date on the same row, or at the line end
            name: compile_all(&[format!(
                r"氏名[:\s]*([{n}]+?(?:[^\S\n]+[{n}]+?)*?)(?:[^\S\n]*(?:生年|昭和|平成|令和|[0-9])|\s*\n|$)",
                n = NATIVE_CHARS
            )])?,
            license_number: compile_all(&[r"(?:免許証番号|番号)[:\s]*([0-9][0-9\-]+)", r"第\s*([0-9]{12})\s*号"])?,
            bare_license_number: Regex::new(r"\b[0-9]{12}\b|\b[0-9]{2}-[0-9]{2}-[0-9]{6}-[0-9]{2}\b")?,
            address: compile_all(&[r"住所[:\s]*(.+?)(?:\s*(?:氏名|生年|交付|$|\n))"])?,
            conditions: compile_all(&[r"(?:免許の条件等?|条件等?)[:\s]*([^\n]+?)(?:\s*(?:$|\n|種類|交付|備考))"])?,
            issuing_authority: Regex::new(&format!(r"([{}]+公安委員会)", KANJI_CHARS))?,
            date_of_birth: DateRule::new(&["生年月日"], date_window_chars)?,
            issue_date: DateRule::new(&["交付", "交付年月日"], date_window_chars)?,
            expiry_date: DateRule::new(&["有効期限", "まで有効"], date_window_chars)?,
        })
    }

    pub fn extract(&self, text: &str, common: &CommonPatterns) -> DrivingLicenseFields {
        DrivingLicenseFields {
            full_name: first_accepted(&self.name, text, |name| {
                char_len(name) >= 2 && !contains_any(name, NATIVE_NAME_EXCLUSIONS)
            }),
            date_of_birth: self.date_of_birth.extract(text, common),
            address: self.extract_address(text, common),
            license_number: self.extract_license_number(text),
            issue_date: self.issue_date.extract(text, common),
            expiry_date: self.expiry_date.extract(text, common),
            license_categories: extract_categories(text),
            conditions: self.extract_conditions(text),
            issuing_authority: self
                .issuing_authority
                .captures(text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string()),
        }
    }

    fn extract_license_number(&self, text: &str) -> Option<String> {
        first_accepted(&self.license_number, text, |_| true)
            .or_else(|| self.bare_license_number.find(text).map(|m| m.as_str().to_string()))
    }

    fn extract_address(&self, text: &str, common: &CommonPatterns) -> Option<String> {
        cascade(&self.address, text, |raw| {
            let address = collapse_whitespace(raw, common);
            if char_len(&address) > 5 {
                Some(address)
            } else {
                None
            }
        })
    }

    fn extract_conditions(&self, text: &str) -> Option<String> {
        if let Some(condition) = scan_tokens(text, LICENSE_CONDITIONS) {
            return Some(condition.to_string());
        }
        first_accepted(&self.conditions, text, |condition| {
            !condition.is_empty() && !CONDITION_NON_VALUES.contains(&condition)
        })
    }
}

/// Every category printed anywhere on the license, in vocabulary order.
fn extract_categories(text: &str) -> Option<Vec<String>> {
    let categories: Vec<String> = LICENSE_CATEGORIES
        .iter()
        .filter(|category| text.contains(*category))
        .map(|category| category.to_string())
        .collect();

    if categories.is_empty() {
        None
    } else {
        Some(categories)
    }
}
