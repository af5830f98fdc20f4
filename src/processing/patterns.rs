use regex::Regex;

/// Kanji, hiragana and katakana.
pub const NATIVE_CHARS: &str = r"\x{4e00}-\x{9faf}\x{3040}-\x{309f}\x{30a0}-\x{30ff}";

/// Kanji only.
pub const KANJI_CHARS: &str = r"\x{4e00}-\x{9faf}";

/// Residence card number: two letters, eight digits, two letters.
pub const CARD_NUMBER: &str = r"[A-Z]{2}[0-9]{8}[A-Z]{2}";

/// Compile an ordered pattern list, failing on the first bad source.
pub fn compile_all<S: AsRef<str>>(sources: &[S]) -> Result<Vec<Regex>, regex::Error> {
    sources.iter().map(|source| Regex::new(source.as_ref())).collect()
}

/// Patterns shared by more than one document pipeline.
#[derive(Debug, Clone)]
pub struct CommonPatterns {
    /// Romanized name, most specific layout first.
    pub romaji_name: Vec<Regex>,
    /// Latin gender value after a gender label.
    pub gender: Vec<Regex>,
    /// Where a labelled date value ends: end of line or two letters.
    pub date_value_end: Regex,
    pub whitespace_runs: Regex,
}

impl CommonPatterns {
    pub fn compile() -> Result<Self, regex::Error> {
        Ok(CommonPatterns {
            romaji_name: compile_all(&[
                // Label on its own line, name on the next
                r"(?m)NAME\s*\n\s*([A-Z][A-Z\s\-.]+?)(?:\s*\n|$)",
                // Label followed by the name on the same line
                r"(?m)(?:NAME|氏名)[:\s]*([A-Z][A-Z\s\-.]+?)(?:\s*\n|国籍|$)",
                // A line that is nothing but capitals
                r"(?m)^([A-Z][A-Z \-.]{4,})$",
            ])?,
            gender: compile_all(&[r"(?i)(?:性別|SEX|GENDER)[\s:.]*(MALE|FEMALE|M|F)\b"])?,
            date_value_end: Regex::new(&format!(r"^\s*(?:$|[a-zA-Z{}]{{2}})", KANJI_CHARS))?,
            whitespace_runs: Regex::new(r"\s+")?,
        })
    }
}
