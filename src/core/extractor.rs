//! Temporal expression extraction.
//!
//! Scans a classified sentence for date-bearing spans. Absolute patterns
//! cover ISO dates, day-first numeric dates, and written month-name
//! forms; a bare month plus year resolves to the first of that month.
//! Relative patterns cover "<quantity> <unit> <direction>" plus the
//! "the next/following/previous <unit>" idioms. The first absolute
//! expression in a sentence takes priority over any relative one. A
//! sentence with no expression at all is passed through as unresolved,
//! which the resolver treats as co-occurring with the anchor.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{
    Condition, Direction, OffsetUnit, RelativeOffset, TemporalExpression,
};

const MONTH_PATTERN: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";

static DATE_ISO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").unwrap());

// Day-first per the fixed day-month-year convention
static DATE_NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").unwrap());

static DATE_WRITTEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b({MONTH_PATTERN})\s+(\d{{1,2}})(?:st|nd|rd|th)?,?\s+(\d{{4}})\b"
    ))
    .unwrap()
});

static DATE_WRITTEN_EU: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(\d{{1,2}})(?:st|nd|rd|th)?\s+({MONTH_PATTERN}),?\s+(\d{{4}})\b"
    ))
    .unwrap()
});

// Imprecise: month and year only; resolves to the 1st of the month
static DATE_MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b({MONTH_PATTERN}),?\s+(\d{{4}})\b")).unwrap()
});

static RELATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(a|an|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|\d+)\s+(day|week|month|year)s?\s+(later|after|earlier|before|ago)\b",
    )
    .unwrap()
});

static RELATIVE_IDIOM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bthe\s+(next|following|previous)\s+(morning|day|week|month|year)\b")
        .unwrap()
});

/// Result of scanning one sentence
#[derive(Debug, Clone)]
pub struct Extraction {
    pub expression: TemporalExpression,

    /// Set when a span looked like an explicit date but did not parse
    pub condition: Option<Condition>,
}

/// Extract the governing temporal expression of a sentence.
///
/// Priority: earliest absolute span, then earliest relative span, then
/// the unresolved fallback.
pub fn extract(text: &str) -> Extraction {
    if let Some((span, parsed)) = find_first_absolute(text) {
        return match parsed {
            Some(date) => Extraction {
                expression: TemporalExpression::absolute(span, date),
                condition: None,
            },
            // Malformed explicit date: discard the expression and fall
            // back to anchor-relative zero offset
            None => Extraction {
                expression: TemporalExpression::unresolved(),
                condition: Some(Condition::DateParseError {
                    span: text[span.0..span.1].to_string(),
                }),
            },
        };
    }

    if let Some((span, offset)) = find_first_relative(text) {
        return Extraction {
            expression: TemporalExpression::relative(span, offset),
            condition: None,
        };
    }

    Extraction {
        expression: TemporalExpression::unresolved(),
        condition: None,
    }
}

/// Earliest absolute date span in the sentence, with its parse result.
/// `None` as the parse result means the span matched a date pattern but
/// names an impossible date.
fn find_first_absolute(text: &str) -> Option<((usize, usize), Option<NaiveDate>)> {
    let mut best: Option<((usize, usize), Option<NaiveDate>)> = None;

    for m in DATE_ISO.captures_iter(text) {
        let whole = m.get(0).unwrap();
        consider(&mut best, whole.start(), whole.end(), ymd(&m[1], &m[2], &m[3]));
    }

    for m in DATE_NUMERIC.captures_iter(text) {
        let whole = m.get(0).unwrap();
        consider(&mut best, whole.start(), whole.end(), ymd(&m[3], &m[2], &m[1]));
    }

    for m in DATE_WRITTEN.captures_iter(text) {
        let whole = m.get(0).unwrap();
        consider(&mut best, whole.start(), whole.end(), month_dy(&m[1], &m[2], &m[3]));
    }

    for m in DATE_WRITTEN_EU.captures_iter(text) {
        let whole = m.get(0).unwrap();
        consider(&mut best, whole.start(), whole.end(), month_dy(&m[2], &m[1], &m[3]));
    }

    for m in DATE_MONTH_YEAR.captures_iter(text) {
        let whole = m.get(0).unwrap();
        // Skip if a more specific written form already covers this span
        if let Some(((bs, be), _)) = best {
            if whole.start() >= bs && whole.start() < be {
                continue;
            }
        }
        consider(&mut best, whole.start(), whole.end(), month_dy(&m[1], "1", &m[2]));
    }

    best
}

/// Keep whichever candidate span starts earliest in the sentence
fn consider(
    best: &mut Option<((usize, usize), Option<NaiveDate>)>,
    start: usize,
    end: usize,
    date: Option<NaiveDate>,
) {
    let replace = match best {
        Some(((bs, _), _)) => start < *bs,
        None => true,
    };
    if replace {
        *best = Some(((start, end), date));
    }
}

/// Earliest relative offset span in the sentence
fn find_first_relative(text: &str) -> Option<((usize, usize), RelativeOffset)> {
    let mut best: Option<((usize, usize), RelativeOffset)> = None;

    if let Some(m) = RELATIVE.captures(text) {
        let whole = m.get(0).unwrap();
        let magnitude = parse_quantity(&m[1])?;
        let unit = parse_unit(&m[2]);
        let direction = parse_direction(&m[3]);
        best = Some((
            (whole.start(), whole.end()),
            RelativeOffset::new(magnitude, unit, direction),
        ));
    }

    if let Some(m) = RELATIVE_IDIOM.captures(text) {
        let whole = m.get(0).unwrap();
        let earlier = match best {
            Some(((bs, _), _)) => whole.start() < bs,
            None => true,
        };
        if earlier {
            let direction = if m[1].eq_ignore_ascii_case("previous") {
                Direction::Before
            } else {
                Direction::After
            };
            let unit = parse_unit(&m[2]);
            best = Some((
                (whole.start(), whole.end()),
                RelativeOffset::new(1, unit, direction),
            ));
        }
    }

    best
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

fn month_dy(month_name: &str, day: &str, year: &str) -> Option<NaiveDate> {
    let month = month_number(month_name)?;
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, day.parse().ok()?)
}

fn month_number(name: &str) -> Option<u32> {
    let months = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    months
        .iter()
        .position(|m| name.eq_ignore_ascii_case(m))
        .map(|i| i as u32 + 1)
}

fn parse_quantity(word: &str) -> Option<u32> {
    if let Ok(n) = word.parse::<u32>() {
        return Some(n);
    }
    let words = [
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
        "twelve",
    ];
    if word.eq_ignore_ascii_case("a") || word.eq_ignore_ascii_case("an") {
        return Some(1);
    }
    words
        .iter()
        .position(|w| word.eq_ignore_ascii_case(w))
        .map(|i| i as u32 + 1)
}

fn parse_unit(word: &str) -> OffsetUnit {
    // "morning" counts as a day offset ("the next morning")
    match word.to_lowercase().as_str() {
        "week" => OffsetUnit::Week,
        "month" => OffsetUnit::Month,
        "year" => OffsetUnit::Year,
        _ => OffsetUnit::Day,
    }
}

fn parse_direction(word: &str) -> Direction {
    match word.to_lowercase().as_str() {
        "earlier" | "before" | "ago" => Direction::Before,
        _ => Direction::After,
    }
}
