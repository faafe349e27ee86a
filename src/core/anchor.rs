//! Anchor-based resolution of temporal expressions.
//!
//! The resolver is the one stateful, order-dependent stage of the
//! pipeline: it tracks the most recently resolved absolute date (the
//! anchor) and converts relative expressions into absolute dates against
//! it. Sentences must be fed strictly in original document order. The
//! anchor only advances with processing; it is never rewritten
//! retroactively.

use chrono::{Days, Months, NaiveDate};
use tracing::{debug, warn};

use crate::domain::{
    ClassifiedSentence, Condition, Direction, ExpressionKind, OffsetUnit, PipelineWarning,
    RelativeOffset, TemporalExpression,
};

/// Resolver state: nothing seen yet, or a concrete anchor date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorState {
    /// No absolute date seen yet
    Unanchored,

    /// Holds the current anchor and the sentence index that set it
    Anchored { date: NaiveDate, since: usize },
}

/// A sentence with its resolved absolute date
#[derive(Debug, Clone)]
pub struct DatedSentence {
    pub sentence: ClassifiedSentence,
    pub date: NaiveDate,
}

/// Per-document anchor resolver.
///
/// Owned exclusively for the duration of one document and discarded
/// afterwards; no cross-document state.
pub struct AnchorResolver {
    state: AnchorState,

    /// Sentences whose relative expression arrived before any anchor,
    /// kept in document order with their offsets
    held: Vec<(ClassifiedSentence, RelativeOffset)>,
}

impl AnchorResolver {
    pub fn new() -> Self {
        Self {
            state: AnchorState::Unanchored,
            held: Vec::new(),
        }
    }

    pub fn state(&self) -> AnchorState {
        self.state
    }

    /// Resolve one sentence. Returns every sentence dated by this step:
    /// usually zero or one, plus any previously held sentences when the
    /// first absolute date establishes the anchor.
    pub fn resolve(
        &mut self,
        sentence: ClassifiedSentence,
        expression: &TemporalExpression,
    ) -> Vec<DatedSentence> {
        let offset = match expression.kind {
            ExpressionKind::Absolute(date) => {
                return self.advance_anchor(sentence, date);
            }
            ExpressionKind::Relative(offset) => offset,
            // Documented fallback: co-occurs with the anchor
            ExpressionKind::Unresolved => {
                RelativeOffset::new(0, OffsetUnit::Day, Direction::After)
            }
        };

        match self.state {
            AnchorState::Anchored { date: anchor, .. } => {
                let date = apply_offset(anchor, offset).unwrap_or(anchor);
                vec![DatedSentence { sentence, date }]
            }
            AnchorState::Unanchored => {
                debug!(
                    index = sentence.sentence.index,
                    "relative expression before any anchor, holding sentence"
                );
                self.held.push((sentence, offset));
                Vec::new()
            }
        }
    }

    /// Absolute expression: overwrite the anchor (no offset arithmetic)
    /// and drain any held sentences against the newly established anchor.
    fn advance_anchor(
        &mut self,
        sentence: ClassifiedSentence,
        date: NaiveDate,
    ) -> Vec<DatedSentence> {
        let first_anchor = self.state == AnchorState::Unanchored;
        self.state = AnchorState::Anchored {
            date,
            since: sentence.sentence.index,
        };

        let mut dated = Vec::new();

        if first_anchor {
            for (held, offset) in self.held.drain(..) {
                let resolved = apply_offset(date, offset).unwrap_or(date);
                dated.push(DatedSentence {
                    sentence: held,
                    date: resolved,
                });
            }
        }

        dated.push(DatedSentence { sentence, date });
        dated
    }

    /// Finish the document. Any sentence still held is dropped, with a
    /// surfaced `UnresolvedAnchor` warning per sentence.
    pub fn finish(self) -> Vec<PipelineWarning> {
        self.held
            .into_iter()
            .map(|(sentence, _)| {
                warn!(
                    index = sentence.sentence.index,
                    text = %sentence.sentence.text,
                    "document ended without an anchor, dropping sentence"
                );
                PipelineWarning::new(sentence.sentence.index, Condition::UnresolvedAnchor)
            })
            .collect()
    }
}

impl Default for AnchorResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply a relative offset with calendar arithmetic.
///
/// Month and year offsets clamp the day of month to the target month's
/// length (chrono `Months` semantics), which also covers leap years.
pub fn apply_offset(anchor: NaiveDate, offset: RelativeOffset) -> Option<NaiveDate> {
    let n = offset.magnitude;

    match (offset.unit, offset.direction) {
        (OffsetUnit::Day, Direction::After) => anchor.checked_add_days(Days::new(n as u64)),
        (OffsetUnit::Day, Direction::Before) => anchor.checked_sub_days(Days::new(n as u64)),
        (OffsetUnit::Week, Direction::After) => {
            anchor.checked_add_days(Days::new(n as u64 * 7))
        }
        (OffsetUnit::Week, Direction::Before) => {
            anchor.checked_sub_days(Days::new(n as u64 * 7))
        }
        (OffsetUnit::Month, Direction::After) => anchor.checked_add_months(Months::new(n)),
        (OffsetUnit::Month, Direction::Before) => anchor.checked_sub_months(Months::new(n)),
        (OffsetUnit::Year, Direction::After) => n
            .checked_mul(12)
            .and_then(|months| anchor.checked_add_months(Months::new(months))),
        (OffsetUnit::Year, Direction::Before) => n
            .checked_mul(12)
            .and_then(|months| anchor.checked_sub_months(Months::new(months))),
    }
}

/// Run the full sequential resolution pass over a document's classified
/// event sentences with their expressions, in original order.
///
/// Returns the dated sentences (sorted back into sentence order, since
/// held sentences surface late) and the warnings for dropped ones.
pub fn resolve_document(
    items: Vec<(ClassifiedSentence, TemporalExpression)>,
) -> (Vec<DatedSentence>, Vec<PipelineWarning>) {
    let mut resolver = AnchorResolver::new();
    let mut dated = Vec::with_capacity(items.len());

    for (sentence, expression) in items {
        dated.extend(resolver.resolve(sentence, &expression));
    }

    let warnings = resolver.finish();

    // Held sentences drain after the anchor arrives; restore document
    // order so downstream tie-breaking stays stable
    dated.sort_by_key(|d| d.sentence.sentence.index);

    (dated, warnings)
}
