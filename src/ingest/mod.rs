//! Document segmentation.
//!
//! Splits a passage into sentences before classification. The splitter is
//! rule-based: a sentence ends at `.`, `!`, or `?` (plus any trailing
//! closing quotes or brackets) followed by whitespace, except after a
//! known abbreviation or inside a number.

use crate::domain::RawSentence;

/// Abbreviations that do not terminate a sentence. The word "no" is
/// deliberately absent: it ends real sentences far more often than it
/// abbreviates "number".
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "approx",
];

/// Split a passage into indexed sentences.
///
/// Whitespace-only fragments are dropped; indices are assigned in
/// document order after dropping.
pub fn split_sentences(text: &str) -> Vec<RawSentence> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];

        if matches!(c, '.' | '!' | '?') {
            // Decimal number guard: digit on both sides of a period
            if c == '.' && is_intra_number(&chars, i) {
                i += 1;
                continue;
            }

            // Abbreviation guard
            if c == '.' && ends_with_abbreviation(&text[start..pos]) {
                i += 1;
                continue;
            }

            // Consume runs of terminators and closing quotes/brackets
            let mut end = i + 1;
            while end < chars.len() && matches!(chars[end].1, '.' | '!' | '?' | '"' | '\'' | ')' | ']') {
                end += 1;
            }

            // Sentence boundary requires following whitespace or EOF
            if end >= chars.len() || chars[end].1.is_whitespace() {
                let end_pos = if end < chars.len() {
                    chars[end].0
                } else {
                    text.len()
                };
                push_sentence(&mut sentences, &text[start..end_pos]);
                // Skip whitespace to the next sentence start
                while end < chars.len() && chars[end].1.is_whitespace() {
                    end += 1;
                }
                start = if end < chars.len() { chars[end].0 } else { text.len() };
                i = end;
                continue;
            }
        }

        // Paragraph breaks also terminate a sentence
        if c == '\n' {
            push_sentence(&mut sentences, &text[start..pos]);
            let mut end = i + 1;
            while end < chars.len() && chars[end].1.is_whitespace() {
                end += 1;
            }
            start = if end < chars.len() { chars[end].0 } else { text.len() };
            i = end;
            continue;
        }

        i += 1;
    }

    // Trailing fragment without a terminator
    push_sentence(&mut sentences, &text[start..]);

    sentences
}

fn push_sentence(sentences: &mut Vec<RawSentence>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        sentences.push(RawSentence::new(sentences.len(), trimmed));
    }
}

/// True when the period at `chars[i]` sits between two digits
fn is_intra_number(chars: &[(usize, char)], i: usize) -> bool {
    i > 0
        && i + 1 < chars.len()
        && chars[i - 1].1.is_ascii_digit()
        && chars[i + 1].1.is_ascii_digit()
}

/// True when the text before a period ends in a known abbreviation
fn ends_with_abbreviation(before: &str) -> bool {
    let last_word = before
        .rsplit(|c: char| c.is_whitespace())
        .next()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric());

    ABBREVIATIONS
        .iter()
        .any(|abbr| last_word.eq_ignore_ascii_case(abbr))
}
