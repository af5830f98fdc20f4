use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    // Whitespace around a line break, including blank lines
    static ref LINE_BREAK_RUNS: Regex = Regex::new(r"\s*\n\s*").unwrap();
    static ref HORIZONTAL_RUNS: Regex = Regex::new(r"[^\S\n]+").unwrap();
}

/// Canonicalize raw OCR text before any pattern matching.
///
/// NFKC folds full-width Latin letters and digits (`ＡＢ１２`) to ASCII so
/// ASCII-anchored patterns match, and compatibility forms to their canonical
/// ones. Line endings become `\n`, runs of line breaks collapse to one,
/// horizontal whitespace collapses to a single space and the result is
/// trimmed. Idempotent.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let folded: String = raw.nfkc().collect();
    let folded = folded.replace("\r\n", "\n").replace('\r', "\n");

    let collapsed = LINE_BREAK_RUNS.replace_all(&folded, "\n");
    let collapsed = HORIZONTAL_RUNS.replace_all(&collapsed, " ");

    collapsed.trim().to_string()
}

/// Join OCR lines with newlines and normalize the result.
pub fn normalize_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let joined = lines.iter().map(|line| line.as_ref()).collect::<Vec<_>>().join("\n");
    normalize(&joined)
}

pub(crate) fn initialize() {
    lazy_static::initialize(&LINE_BREAK_RUNS);
    lazy_static::initialize(&HORIZONTAL_RUNS);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t  "), "");
    }

    #[test]
    fn test_full_width_folding() {
        assert_eq!(normalize("ＡＢ１２３４５６７８ＣＤ"), "AB12345678CD");
        assert_eq!(normalize("ＡＴ限定"), "AT限定");
        assert_eq!(normalize("大型車（８ｔ）に限る"), "大型車(8t)に限る");
    }

    #[test]
    fn test_ideographic_space_collapses() {
        assert_eq!(normalize("山田\u{3000}\u{3000}太郎"), "山田 太郎");
    }

    #[test]
    fn test_whitespace_collapsing() {
        assert_eq!(normalize("  国籍・地域  \t中国  "), "国籍・地域 中国");
        assert_eq!(normalize("NAME\n\n\nJOHN SMITH"), "NAME\nJOHN SMITH");
        assert_eq!(normalize("NAME  \r\n  \r\n  JOHN"), "NAME\nJOHN");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "ＮＡＭＥ\n\n ＪＯＨＮ　ＳＭＩＴＨ \r\n",
            "氏名\t山田　太郎\n\n生年月日 昭和６０年１月２日",
            "a\t\u{00B4} b",
            "\u{2028}x\u{0085}y \n \n z",
            "ｶﾀｶﾅ ﾊﾝｶｸ",
        ];
        for sample in samples.iter() {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_halfwidth_katakana_folds() {
        assert_eq!(normalize("ﾍﾞﾄﾅﾑ"), "ベトナム");
    }

    #[test]
    fn test_normalize_lines() {
        let lines = ["NAME ", " JOHN SMITH", "", "AB12345678CD"];
        assert_eq!(normalize_lines(&lines), "NAME\nJOHN SMITH\nAB12345678CD");
    }
}
