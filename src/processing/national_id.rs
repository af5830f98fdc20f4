// National ID (マイナンバーカード) pipeline
use regex::Regex;

use crate::models::lexicon::NATIVE_NAME_EXCLUSIONS;
use crate::models::NationalIdFields;
use crate::processing::extractors::{
    cascade, char_len, collapse_whitespace, contains_any, extract_gender, extract_romaji_name, first_accepted,
    DateRule,
};
use crate::processing::patterns::{compile_all, CommonPatterns, KANJI_CHARS, NATIVE_CHARS};

#[derive(Debug, Clone)]
pub struct NationalIdExtractor {
    native_name: Vec<Regex>,
    /// Labelled number first, then the grouped `1234 5678 9012` form.
    my_number: Vec<Regex>,
    bare_my_number: Regex,
    address: Vec<Regex>,
    date_of_birth: DateRule,
    issue_date: DateRule,
    expiry_date: DateRule,
    digital_cert_expiry: DateRule,
}

impl NationalIdExtractor {
    pub fn new(date_window_chars: usize) -> Result<Self, regex::Error> {
        Ok(NationalIdExtractor {
            native_name: compile_all(&[
                format!(r"氏名[:\s]*([{n}]+[^\S\n]+[{n}]+)", n = NATIVE_CHARS),
                // Family name in kanji, given name in kanji or hiragana, alone on a line
                format!(
                    r"(?m)^([{k}]{{1,4}}[^\S\n]+[{k}\x{{3040}}-\x{{309f}}]+)\s*\n",
                    k = KANJI_CHARS
                ),
            ])?,
            my_number: compile_all(&[
                r"(?:個人番号|マイナンバー)[:\s]*([0-9]{12})",
                r"(?:個人番号|マイナンバー)[:\s]*([0-9]{4}\s*[0-9]{4}\s*[0-9]{4})",
            ])?,
            bare_my_number: Regex::new(r"\b[0-9]{12}\b")?,
            address: compile_all(&[
                r"(?s)住所[:\s]*(.+?)(?:\s*(?:生年|氏名|有効|個人番号|性別|$))".to_string(),
                format!(r"([{k}]+[都道府県][{k}0-9\-]+)", k = KANJI_CHARS),
            ])?,
            date_of_birth: DateRule::new(&["生年月日"], date_window_chars)?,
            issue_date: DateRule::new(&["発行"], date_window_chars)?,
            expiry_date: DateRule::new(&["有効期限", "まで有効"], date_window_chars)?,
            digital_cert_expiry: DateRule::new(&["署名用電子証明書", "電子証明書の有効期限"], date_window_chars)?,
        })
    }

    pub fn extract(&self, text: &str, common: &CommonPatterns) -> NationalIdFields {
        NationalIdFields {
            full_name: self.extract_native_name(text),
            full_name_romaji: extract_romaji_name(text, common),
            date_of_birth: self.date_of_birth.extract(text, common),
            gender: extract_gender(text, common),
            address: self.extract_address(text, common),
            my_number: self.extract_my_number(text, common),
            issue_date: self.issue_date.extract(text, common),
            expiry_date: self.expiry_date.extract(text, common),
            digital_cert_expiry: self.digital_cert_expiry.extract(text, common),
        }
    }

    fn extract_native_name(&self, text: &str) -> Option<String> {
        first_accepted(&self.native_name, text, |name| {
            char_len(name) >= 2 && !contains_any(name, NATIVE_NAME_EXCLUSIONS)
        })
    }

    /// The labelled number wins over any other twelve-digit run on the card.
    /// OCR spacing inside the number is dropped.
    fn extract_my_number(&self, text: &str, common: &CommonPatterns) -> Option<String> {
        cascade(&self.my_number, text, |digits| {
            Some(common.whitespace_runs.replace_all(digits, "").into_owned())
        })
        .or_else(|| self.bare_my_number.find(text).map(|m| m.as_str().to_string()))
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
}
