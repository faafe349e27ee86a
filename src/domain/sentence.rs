//! Sentences and their linguistic annotations.
//!
//! A document is segmented into `RawSentence` values, each of which is
//! classified into one of four temporal classes before any date work
//! happens. Non-events are excluded from all downstream stages.

use serde::{Deserialize, Serialize};

/// A single sentence of the input document, with its position.
///
/// Immutable once produced by segmentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSentence {
    /// Zero-based position within the document
    pub index: usize,

    /// The sentence text, trimmed of surrounding whitespace
    pub text: String,
}

impl RawSentence {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// Temporal class assigned to a sentence prior to date resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalClass {
    /// Something that already happened
    PastEvent,

    /// Something happening now ("today", "now")
    CurrentEvent,

    /// A forecast, plan, or prediction
    FutureForecast,

    /// Pure description; no event predicate
    NonEvent,
}

impl TemporalClass {
    /// Whether this class carries an event worth dating
    pub fn is_event(self) -> bool {
        !matches!(self, TemporalClass::NonEvent)
    }
}

/// A sentence together with its temporal class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedSentence {
    pub sentence: RawSentence,
    pub class: TemporalClass,
}

impl ClassifiedSentence {
    pub fn new(sentence: RawSentence, class: TemporalClass) -> Self {
        Self { sentence, class }
    }
}

/// Verb tense as reported by the linguistic tagger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tense {
    Past,
    Present,
    Future,
}

/// Grammatical role of a token, as far as classification cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// A verb carrying tense
    Verb { tense: Tense },

    /// An auxiliary; modal auxiliaries and future auxiliaries are
    /// forward-looking cues
    Aux { modal: bool, future: bool },

    /// A token the tagger already recognized as part of a date entity
    DateEntity,

    /// Anything else
    Other,
}

/// Per-token output of the linguistic tagger.
///
/// The engine does not own the tagging model; it only consumes these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenAnnotation {
    /// Surface form
    pub text: String,

    /// Lemma (lowercased base form)
    pub lemma: String,

    /// Role of this token
    pub kind: TokenKind,

    /// True for the main-clause predicate (the root verb)
    pub is_main: bool,
}

impl TokenAnnotation {
    pub fn new(text: impl Into<String>, lemma: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            kind,
            is_main: false,
        }
    }

    /// Mark this token as the main-clause predicate
    pub fn main(mut self) -> Self {
        self.is_main = true;
        self
    }
}
