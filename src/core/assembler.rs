//! Timeline assembly.
//!
//! A pure function over the accumulated event candidates: stable sort
//! ascending by date (ties keep original sentence order), then drop an
//! adjacent entry only when both its date and text match the previous
//! one. Distinct texts on the same date remain separate entries.

use crate::domain::{Event, Timeline};

/// Assemble the final timeline from dated event candidates.
///
/// Candidates must arrive in original sentence order for the tie-break
/// to hold; the sort itself is stable.
pub fn assemble(candidates: Vec<Event>) -> Timeline {
    let mut events = candidates;
    events.sort_by_key(|e| e.date);
    events.dedup_by(|a, b| a.date == b.date && a.event == b.event);
    events
}
