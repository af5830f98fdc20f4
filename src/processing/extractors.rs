// Field extractors shared by the document pipelines
use regex::{escape, Regex};

use crate::models::lexicon::{GENDER_TOKENS, GENDER_VALUES, ROMAJI_NAME_EXCLUSIONS};
use crate::processing::era_date::{find_date, has_date_marker};
use crate::processing::patterns::CommonPatterns;

/// Run `patterns` in priority order and return the first capture that
/// `resolve` turns into a value. Only the first match of each pattern is
/// considered; a rejected capture moves on to the next pattern.
pub fn cascade<F>(patterns: &[Regex], text: &str, resolve: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    for pattern in patterns {
        if let Some(captures) = pattern.captures(text) {
            if let Some(matched) = captures.get(1) {
                if let Some(value) = resolve(matched.as_str().trim()) {
                    return Some(value);
                }
            }
        }
    }
    None
}

/// `cascade` with a plain accept filter; accepted captures are returned as
/// captured.
pub fn first_accepted<F>(patterns: &[Regex], text: &str, accept: F) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    cascade(patterns, text, |value| {
        if accept(value) {
            Some(value.to_string())
        } else {
            None
        }
    })
}

/// Canonical value of the first lexicon entry present anywhere in `text`.
pub fn scan_lexicon<'a>(text: &str, table: &[(&str, &'a str)]) -> Option<&'a str> {
    table
        .iter()
        .find(|(token, _)| text.contains(token))
        .map(|(_, canonical)| *canonical)
}

/// First token of `tokens` present anywhere in `text`.
pub fn scan_tokens<'a>(text: &str, tokens: &[&'a str]) -> Option<&'a str> {
    tokens.iter().find(|token| text.contains(*token)).copied()
}

/// Whether a captured value is nothing but field labels, e.g.
/// `NATIONALITY/REGION` recaptured from the next OCR line.
pub fn is_field_label(value: &str, labels: &[&str]) -> bool {
    let mut words = value
        .split(|c: char| c.is_whitespace() || c == '/' || c == '・' || c == ':')
        .filter(|word| !word.is_empty())
        .peekable();

    if words.peek().is_none() {
        return true;
    }
    words.all(|word| {
        let upper = word.to_uppercase();
        labels.iter().any(|label| *label == upper)
    })
}

pub fn contains_any(value: &str, fragments: &[&str]) -> bool {
    fragments.iter().any(|fragment| value.contains(fragment))
}

pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

pub fn collapse_whitespace(value: &str, patterns: &CommonPatterns) -> String {
    patterns.whitespace_runs.replace_all(value, " ").trim().to_string()
}

/// Gender, canonicalized to `MALE` / `FEMALE`.
///
/// A native-script gender token anywhere in the text wins over any labelled
/// Latin value.
pub fn extract_gender(text: &str, patterns: &CommonPatterns) -> Option<String> {
    if let Some(canonical) = scan_lexicon(text, GENDER_TOKENS) {
        return Some(canonical.to_string());
    }
    cascade(&patterns.gender, text, |raw| {
        let upper = raw.to_uppercase();
        let canonical = GENDER_VALUES
            .iter()
            .find(|(token, _)| *token == upper)
            .map(|(_, canonical)| canonical.to_string());
        Some(canonical.unwrap_or_else(|| raw.to_string()))
    })
}

/// Romanized (all capitals) name.
pub fn extract_romaji_name(text: &str, patterns: &CommonPatterns) -> Option<String> {
    first_accepted(&patterns.romaji_name, text, |name| {
        char_len(name) > 3 && !contains_any(name, ROMAJI_NAME_EXCLUSIONS)
    })
}

/// A date field located by its labels.
///
/// Each label is tried in order against the rest of its line. A label with
/// nothing usable after it falls through to the next label; when none yields
/// a value, a fixed-width window starting at each label is searched for a
/// date literal.
#[derive(Debug, Clone)]
pub struct DateRule {
    labels: Vec<(String, Regex)>,
    window_chars: usize,
}

impl DateRule {
    pub fn new(labels: &[&str], window_chars: usize) -> Result<Self, regex::Error> {
        let labels = labels
            .iter()
            .map(|label| {
                let pattern = Regex::new(&format!(r"{}[\s:]*([^\n]+)", escape(label)))?;
                Ok((label.to_string(), pattern))
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(DateRule { labels, window_chars })
    }

    pub fn extract(&self, text: &str, patterns: &CommonPatterns) -> Option<String> {
        for (_, pattern) in &self.labels {
            let Some(rest) = pattern.captures(text).and_then(|c| c.get(1)) else {
                continue;
            };
            let window = value_window(rest.as_str(), &patterns.date_value_end).trim();
            if let Some(date) = find_date(window) {
                return Some(date.to_string());
            }
            if has_date_marker(window) {
                return Some(window.to_string());
            }
        }

        for (label, _) in &self.labels {
            if let Some(index) = text.find(label.as_str()) {
                let area = take_chars(&text[index..], self.window_chars);
                if let Some(date) = find_date(area) {
                    return Some(date.to_string());
                }
            }
        }
        None
    }
}

/// Shortest non-empty prefix of `rest` that is followed by `end`.
fn value_window<'a>(rest: &'a str, end: &Regex) -> &'a str {
    for (index, _) in rest.char_indices().skip(1) {
        if end.is_match(&rest[index..]) {
            return &rest[..index];
        }
    }
    rest
}

fn take_chars(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> CommonPatterns {
        CommonPatterns::compile().unwrap()
    }

    #[test]
    fn test_cascade_falls_through_rejected_capture() {
        let patterns = vec![
            Regex::new(r"NAME\n(\w+)").unwrap(),
            Regex::new(r"NAME (\w+)").unwrap(),
        ];
        let text = "NAME\nNATIONALITY\nNAME ALICE";
        let value = first_accepted(&patterns, text, |v| v != "NATIONALITY");
        assert_eq!(value, Some("ALICE".to_string()));
    }

    #[test]
    fn test_cascade_none_when_nothing_matches() {
        let patterns = vec![Regex::new(r"NAME (\w+)").unwrap()];
        assert_eq!(first_accepted(&patterns, "nothing here", |_| true), None);
    }

    #[test]
    fn test_is_field_label() {
        let labels = ["NATIONALITY", "REGION", "国籍", "地域"];
        assert!(is_field_label("NATIONALITY", &labels));
        assert!(is_field_label("Nationality/Region", &labels));
        assert!(is_field_label("国籍・地域", &labels));
        assert!(is_field_label("", &labels));
        assert!(!is_field_label("NEPAL", &labels));
        assert!(!is_field_label("REGION NEPAL", &labels));
    }

    #[test]
    fn test_scan_lexicon_uses_table_order() {
        let table = [("インドネシア", "INDONESIA"), ("インド", "INDIA")];
        assert_eq!(scan_lexicon("国籍 インドネシア", &table), Some("INDONESIA"));
        assert_eq!(scan_lexicon("国籍 インド", &table), Some("INDIA"));
        assert_eq!(scan_lexicon("国籍", &table), None);
    }

    #[test]
    fn test_gender_lexicon_precedence() {
        let patterns = patterns();
        assert_eq!(extract_gender("SEX F\n性別 男", &patterns), Some("MALE".to_string()));
        assert_eq!(extract_gender("xx女性yy", &patterns), Some("FEMALE".to_string()));
    }

    #[test]
    fn test_gender_latin_label() {
        let patterns = patterns();
        assert_eq!(extract_gender("SEX: M", &patterns), Some("MALE".to_string()));
        assert_eq!(extract_gender("Gender female", &patterns), Some("FEMALE".to_string()));
        assert_eq!(extract_gender("MARRIED", &patterns), None);
    }

    #[test]
    fn test_romaji_name_label_on_own_line() {
        let patterns = patterns();
        let text = "NAME\nJOHN SMITH\nAB12345678CD";
        assert_eq!(extract_romaji_name(text, &patterns), Some("JOHN SMITH".to_string()));
    }

    #[test]
    fn test_romaji_name_same_line() {
        let patterns = patterns();
        let text = "NAME NGUYEN VAN AN\n国籍・地域 ベトナム";
        assert_eq!(extract_romaji_name(text, &patterns), Some("NGUYEN VAN AN".to_string()));
    }

    #[test]
    fn test_romaji_name_rejects_labels() {
        let patterns = patterns();
        assert_eq!(extract_romaji_name("RESIDENCE CARD", &patterns), None);
        assert_eq!(extract_romaji_name("NAME\nDATE OF BIRTH", &patterns), None);
    }

    #[test]
    fn test_romaji_name_standalone_line() {
        let patterns = patterns();
        assert_eq!(
            extract_romaji_name("在留カード\nMARIA SANTOS\n1990年1月1日", &patterns),
            Some("MARIA SANTOS".to_string())
        );
    }

    #[test]
    fn test_date_rule_same_line() {
        let patterns = patterns();
        let rule = DateRule::new(&["生年月日", "DATE OF BIRTH"], 50).unwrap();
        let text = "生年月日 1990年05月12日 性別 男";
        assert_eq!(rule.extract(text, &patterns), Some("1990年05月12日".to_string()));
    }

    #[test]
    fn test_date_rule_value_on_next_line() {
        let patterns = patterns();
        let rule = DateRule::new(&["生年月日"], 50).unwrap();
        let text = "生年月日\n昭和60年1月2日";
        assert_eq!(rule.extract(text, &patterns), Some("昭和60年1月2日".to_string()));
    }

    #[test]
    fn test_date_rule_stops_before_trailing_words() {
        let patterns = patterns();
        let rule = DateRule::new(&["有効期限", "まで有効"], 50).unwrap();
        let text = "有効期限 2029年12月31日まで有効";
        assert_eq!(rule.extract(text, &patterns), Some("2029年12月31日".to_string()));
    }

    #[test]
    fn test_date_rule_partial_date_returned_raw() {
        let patterns = patterns();
        let rule = DateRule::new(&["交付年月日"], 50).unwrap();
        assert_eq!(rule.extract("交付年月日 2020年3月", &patterns), Some("2020年3月".to_string()));
    }

    #[test]
    fn test_date_rule_window_fallback() {
        let patterns = patterns();
        let rule = DateRule::new(&["交付"], 50).unwrap();
        let text = "交付 第一種 令和5年6月7日";
        assert_eq!(rule.extract(text, &patterns), Some("令和5年6月7日".to_string()));

        let narrow = DateRule::new(&["交付"], 8).unwrap();
        assert_eq!(narrow.extract(text, &patterns), None);
    }

    #[test]
    fn test_date_rule_absent() {
        let patterns = patterns();
        let rule = DateRule::new(&["生年月日"], 50).unwrap();
        assert_eq!(rule.extract("NAME JOHN", &patterns), None);
    }

    #[test]
    fn test_take_chars_counts_characters() {
        assert_eq!(take_chars("生年月日", 2), "生年");
        assert_eq!(take_chars("ab", 5), "ab");
    }
}
