//! Linguistic tagger collaborator.
//!
//! The engine does not own a part-of-speech or tense model; it consumes
//! token-level annotations from whatever tagger is injected. The built-in
//! `LexiconTagger` is a dependency-free approximation good enough for
//! plain narrative prose: irregular-verb and suffix rules for tense, a
//! modal list for forward-looking auxiliaries, and month/year spotting
//! for date entities.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

use crate::domain::{RawSentence, Tense, TokenAnnotation, TokenKind};

/// Capability interface for the linguistic collaborator.
///
/// Concrete tagging models are injected, not hard-wired, so alternate
/// taggers can be substituted without touching downstream logic.
pub trait LinguisticTagger: Send + Sync {
    /// Human-readable tagger name
    fn name(&self) -> &str;

    /// Annotate every token of a sentence, in order
    fn annotate(&self, sentence: &RawSentence) -> Vec<TokenAnnotation>;
}

/// Modal auxiliaries; `will` and `shall` additionally mark future tense
static MODALS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["will", "shall", "would", "should", "may", "might", "can", "could", "must"]
        .into_iter()
        .collect()
});

static FUTURE_MODALS: &[&str] = &["will", "shall"];

/// Forms of "to be"; treated as auxiliaries so that the participle in
/// "was held" carries the event
static BE_FORMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["am", "is", "are", "was", "were", "be", "been", "being"]
        .into_iter()
        .collect()
});

/// Irregular past forms mapped to their lemmas
static IRREGULAR_PAST: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("began", "begin"),
        ("broke", "break"),
        ("brought", "bring"),
        ("built", "build"),
        ("bought", "buy"),
        ("came", "come"),
        ("did", "do"),
        ("fell", "fall"),
        ("found", "find"),
        ("gave", "give"),
        ("got", "get"),
        ("had", "have"),
        ("held", "hold"),
        ("kept", "keep"),
        ("knew", "know"),
        ("led", "lead"),
        ("left", "leave"),
        ("lost", "lose"),
        ("made", "make"),
        ("met", "meet"),
        ("paid", "pay"),
        ("ran", "run"),
        ("rose", "rise"),
        ("said", "say"),
        ("saw", "see"),
        ("sent", "send"),
        ("sold", "sell"),
        ("spoke", "speak"),
        ("stood", "stand"),
        ("took", "take"),
        ("told", "tell"),
        ("thought", "think"),
        ("went", "go"),
        ("won", "win"),
        ("wrote", "write"),
    ]
    .into_iter()
    .collect()
});

/// Common verb stems, used to recognize present-tense and -ing forms
static VERB_STEMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "announce", "arrest", "arrive", "begin", "close", "commence", "deliver", "depart", "end",
        "finish", "go", "happen", "hold", "launch", "leave", "meet", "occur", "open", "release",
        "report", "resign", "return", "schedule", "sign", "start", "take", "travel", "visit",
        // intention and goal verbs from the classification lexicon
        "predict", "indicate", "forecast", "target", "plan", "aim", "intend", "expect", "hope",
        "propose", "commit", "promise", "signal", "project", "decide", "consider", "believe",
    ]
    .into_iter()
    .collect()
});

static MONTHS: &[&str] = &[
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

/// Rule-based tagger backed by static lexicons.
///
/// Marks the first full verb of the sentence as the main-clause
/// predicate, an approximation of dependency-root selection.
pub struct LexiconTagger;

impl LexiconTagger {
    pub fn new() -> Self {
        Self
    }

    fn tag_token(&self, word: &str) -> (String, TokenKind) {
        let lower: String = word
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        if lower.is_empty() {
            return (lower, TokenKind::Other);
        }

        if MODALS.contains(lower.as_str()) {
            let future = FUTURE_MODALS.contains(&lower.as_str());
            return (lower, TokenKind::Aux { modal: true, future });
        }

        if BE_FORMS.contains(lower.as_str()) {
            return ("be".to_string(), TokenKind::Aux { modal: false, future: false });
        }

        if MONTHS.contains(&lower.as_str()) || is_four_digit_year(&lower) {
            return (lower, TokenKind::DateEntity);
        }

        if let Some(lemma) = IRREGULAR_PAST.get(lower.as_str()) {
            return (lemma.to_string(), TokenKind::Verb { tense: Tense::Past });
        }

        if let Some(lemma) = strip_suffix_to_stem(&lower, "ed") {
            return (lemma, TokenKind::Verb { tense: Tense::Past });
        }

        if let Some(lemma) = strip_suffix_to_stem(&lower, "ing") {
            return (lemma, TokenKind::Verb { tense: Tense::Present });
        }

        if VERB_STEMS.contains(lower.as_str()) {
            return (lower, TokenKind::Verb { tense: Tense::Present });
        }

        // Third-person singular present
        if let Some(stem) = lower.strip_suffix('s') {
            if VERB_STEMS.contains(stem) {
                return (stem.to_string(), TokenKind::Verb { tense: Tense::Present });
            }
        }

        (lower, TokenKind::Other)
    }
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl LinguisticTagger for LexiconTagger {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn annotate(&self, sentence: &RawSentence) -> Vec<TokenAnnotation> {
        let mut tokens = Vec::new();
        let mut main_assigned = false;

        for word in sentence.text.split_whitespace() {
            let (lemma, kind) = self.tag_token(word);
            let mut token = TokenAnnotation::new(word, lemma, kind);

            if !main_assigned && matches!(kind, TokenKind::Verb { .. }) {
                token = token.main();
                main_assigned = true;
            }

            tokens.push(token);
        }

        tokens
    }
}

fn is_four_digit_year(word: &str) -> bool {
    word.len() == 4 && word.chars().all(|c| c.is_ascii_digit())
}

/// Strip a verbal suffix and recover the stem against the known-verb
/// lexicon, handling final-e restoration ("scheduled" -> "schedule") and
/// consonant doubling ("planned" -> "plan"). Returns None when no known
/// stem matches.
fn strip_suffix_to_stem(word: &str, suffix: &str) -> Option<String> {
    let base = word.strip_suffix(suffix)?;
    if base.len() < 2 {
        return None;
    }

    if VERB_STEMS.contains(base) {
        return Some(base.to_string());
    }

    let with_e = format!("{base}e");
    if VERB_STEMS.contains(with_e.as_str()) {
        return Some(with_e);
    }

    // Doubled final consonant
    let bytes = base.as_bytes();
    if bytes.len() >= 2 && bytes[bytes.len() - 1] == bytes[bytes.len() - 2] {
        let undoubled = &base[..base.len() - 1];
        if VERB_STEMS.contains(undoubled) {
            return Some(undoubled.to_string());
        }
    }

    // Unknown stem: for -ed, still a plausible regular past
    if suffix == "ed" && base.len() >= 3 {
        return Some(base.to_string());
    }

    None
}
