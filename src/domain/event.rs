//! Final timeline records and surfaced pipeline conditions.
//!
//! The output contract is an ordered sequence of objects with exactly two
//! fields: `date` (string, `DD-MM-YYYY`) and `event` (string, non-empty).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire format for event dates: zero-padded day-month-year with a
/// four-digit year. No century assumption is made on input.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// A resolved, normalized event. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Calendar date, serialized as `DD-MM-YYYY`
    #[serde(with = "dmy_format")]
    pub date: NaiveDate,

    /// Event description (summarized, or raw sentence on fallback)
    pub event: String,
}

impl Event {
    pub fn new(date: NaiveDate, event: impl Into<String>) -> Self {
        Self {
            date,
            event: event.into(),
        }
    }

    /// The canonical `DD-MM-YYYY` rendering of this event's date
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Serde adapter for the fixed day-month-year convention
mod dmy_format {
    use super::DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        // Four-digit year required; chrono's %Y alone would accept "24"
        if s.len() != 10 {
            return Err(serde::de::Error::custom(format!(
                "expected DD-MM-YYYY, got '{s}'"
            )));
        }
        NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// The final, date-ordered sequence of events for one document.
///
/// Built once per input; ascending by date with ties kept in original
/// sentence order. Not incrementally mutable after assembly.
pub type Timeline = Vec<Event>;

/// Output of one full pipeline run: the timeline plus every non-fatal
/// condition that was recovered along the way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineReport {
    pub timeline: Timeline,

    /// Surfaced warnings, in sentence order
    pub warnings: Vec<PipelineWarning>,
}

impl TimelineReport {
    pub fn new(timeline: Timeline, warnings: Vec<PipelineWarning>) -> Self {
        Self { timeline, warnings }
    }

    /// Render only the timeline, per the output contract
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.timeline)
    }

    /// Pretty-printed variant of [`to_json`](Self::to_json)
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.timeline)
    }
}

/// A recovered condition tied to the sentence that triggered it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineWarning {
    /// Index of the sentence this condition applies to
    pub sentence_index: usize,

    /// What went wrong
    pub condition: Condition,
}

impl PipelineWarning {
    pub fn new(sentence_index: usize, condition: Condition) -> Self {
        Self {
            sentence_index,
            condition,
        }
    }
}

/// Non-fatal pipeline conditions.
///
/// No condition here aborts the document; each degrades a single
/// sentence (omission or fallback) and is surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Condition {
    /// Mixed tense cues with no decisive main-clause verb; the sentence
    /// defaulted to non_event
    #[error("ambiguous temporal class, defaulted to non_event")]
    ClassificationAmbiguous,

    /// A span looked like an explicit date but did not parse; the
    /// sentence fell back to anchor-relative zero offset
    #[error("malformed date span '{span}' discarded")]
    DateParseError { span: String },

    /// A relative expression arrived before any absolute date
    #[error("relative expression with no anchor established")]
    UnresolvedAnchor,

    /// The external summarizer failed or timed out; the raw sentence
    /// text was used as the event description
    #[error("event summary unavailable: {reason}")]
    EventSummaryUnavailable { reason: String },
}
