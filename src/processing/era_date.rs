// Surface-form recognition of printed dates. Values are returned exactly as
// printed; era years are never converted to Gregorian years.

use lazy_static::lazy_static;
use regex::Regex;

/// Calendar a recognized date is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Calendar {
    Gregorian,
    Reiwa,
    Heisei,
    Showa,
}

/// A date literal found in text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateMatch<'a> {
    pub calendar: Calendar,
    pub text: &'a str,
}

lazy_static! {
    // One alternative per calendar, tried in a single pass
    static ref ERA_DATE_PATTERN: Regex = Regex::new(concat!(
        r"([0-9]{4}年[0-9]{1,2}月[0-9]{1,2}日)",
        r"|(令和[0-9]{1,2}年[0-9]{1,2}月[0-9]{1,2}日)",
        r"|(平成[0-9]{1,2}年[0-9]{1,2}月[0-9]{1,2}日)",
        r"|(昭和[0-9]{1,2}年[0-9]{1,2}月[0-9]{1,2}日)",
    ))
    .unwrap();

    static ref DATE_MARKERS: Regex = Regex::new(r"[0-9]+年|[0-9]+月|[0-9]+日|令和|平成|昭和").unwrap();
}

const CALENDARS: [Calendar; 4] = [
    Calendar::Gregorian,
    Calendar::Reiwa,
    Calendar::Heisei,
    Calendar::Showa,
];

/// First date literal in `text`, with the calendar it is written in.
pub fn find_era_date(text: &str) -> Option<DateMatch<'_>> {
    let captures = ERA_DATE_PATTERN.captures(text)?;
    CALENDARS.iter().enumerate().find_map(|(index, calendar)| {
        captures.get(index + 1).map(|matched| DateMatch {
            calendar: *calendar,
            text: matched.as_str(),
        })
    })
}

/// First date literal in `text`, unmodified.
pub fn find_date(text: &str) -> Option<&str> {
    find_era_date(text).map(|date| date.text)
}

/// Whether `text` carries any year/month/day or era marker at all.
pub fn has_date_marker(text: &str) -> bool {
    DATE_MARKERS.is_match(text)
}

/// Force compilation of this module's patterns.
pub(crate) fn initialize() {
    lazy_static::initialize(&ERA_DATE_PATTERN);
    lazy_static::initialize(&DATE_MARKERS);
}
