//! Temporal expressions found inside sentences.
//!
//! An expression is either absolute (names a calendar date directly) or
//! relative (an offset from the rolling anchor). Sentences without any
//! date-bearing span get an `Unresolved` expression, which the resolver
//! treats as co-occurring with the anchor (direction after, offset zero).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A date-bearing span within a sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalExpression {
    /// Byte offsets of the span within the sentence text
    pub span: (usize, usize),

    /// What the span resolves to
    pub kind: ExpressionKind,
}

impl TemporalExpression {
    pub fn absolute(span: (usize, usize), date: NaiveDate) -> Self {
        Self {
            span,
            kind: ExpressionKind::Absolute(date),
        }
    }

    pub fn relative(span: (usize, usize), offset: RelativeOffset) -> Self {
        Self {
            span,
            kind: ExpressionKind::Relative(offset),
        }
    }

    /// The documented fallback for sentences with no date-bearing span:
    /// defer to the anchor with direction after and offset zero.
    pub fn unresolved() -> Self {
        Self {
            span: (0, 0),
            kind: ExpressionKind::Unresolved,
        }
    }
}

/// Kind of temporal expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionKind {
    /// A concrete calendar date
    Absolute(NaiveDate),

    /// An offset from the anchor
    Relative(RelativeOffset),

    /// No expression found; co-occurs with the anchor
    Unresolved,
}

/// A signed calendar offset: magnitude, unit, and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelativeOffset {
    pub magnitude: u32,
    pub unit: OffsetUnit,
    pub direction: Direction,
}

impl RelativeOffset {
    pub fn new(magnitude: u32, unit: OffsetUnit, direction: Direction) -> Self {
        Self {
            magnitude,
            unit,
            direction,
        }
    }
}

/// Calendar unit of a relative offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetUnit {
    Day,
    Week,
    Month,
    Year,
}

/// Direction of a relative offset with respect to the anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Before,
    After,
}
