//! Data structures for the temporal resolution pipeline.

pub mod event;
pub mod expression;
pub mod sentence;

pub use event::{Condition, Event, PipelineWarning, Timeline, TimelineReport};
pub use expression::{Direction, ExpressionKind, OffsetUnit, RelativeOffset, TemporalExpression};
pub use sentence::{
    ClassifiedSentence, RawSentence, TemporalClass, Tense, TokenAnnotation, TokenKind,
};
