//! Full Pipeline Integration Tests
//!
//! End-to-end scenarios over the whole engine with a canned summarizer
//! standing in for the external service.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use chronicle::{
    Condition, EngineError, NoopSummarizer, Summarizer, TimelineEngine,
};

/// Summarizer that returns canned descriptions for known sentences and
/// errors for everything else
struct CannedSummarizer {
    answers: HashMap<String, String>,
}

impl CannedSummarizer {
    fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            answers: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl Summarizer for CannedSummarizer {
    fn name(&self) -> &str {
        "canned"
    }

    async fn summarize(
        &self,
        sentence: &str,
        _date: NaiveDate,
        _timeout: Duration,
    ) -> Result<String> {
        self.answers
            .get(sentence)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no canned answer for '{sentence}'"))
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

fn noop_engine() -> TimelineEngine {
    TimelineEngine::new(Arc::new(NoopSummarizer))
}

#[tokio::test]
async fn test_meeting_scenario_matches_contract_exactly() {
    let summarizer = CannedSummarizer::new(&[
        (
            "The meeting was held on March 10, 2024.",
            "The meeting was held.",
        ),
        (
            "A follow-up was scheduled a week later.",
            "A follow-up was scheduled.",
        ),
    ]);
    let engine = TimelineEngine::new(Arc::new(summarizer));

    let report = engine
        .generate(
            "The meeting was held on March 10, 2024. A follow-up was scheduled a week later.",
        )
        .await
        .unwrap();

    assert_eq!(
        report.to_json().unwrap(),
        r#"[{"date":"10-03-2024","event":"The meeting was held."},{"date":"17-03-2024","event":"A follow-up was scheduled."}]"#
    );
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn test_multi_sentence_narrative_resolves_against_anchor() {
    let passage = "The robbery took place on the night of Wednesday, March 15, 2023. \
                   The police began their investigation the next morning. \
                   They released CCTV footage two days later. \
                   A suspect was arrested a week later. \
                   The final verdict was delivered three months later.";

    let report = noop_engine().generate(passage).await.unwrap();

    // Every relative expression resolves against the last absolute date,
    // not against the previous relative resolution
    let dates: Vec<String> = report.timeline.iter().map(|e| e.date_string()).collect();
    assert_eq!(
        dates,
        [
            "15-03-2023",
            "16-03-2023",
            "17-03-2023",
            "22-03-2023",
            "15-06-2023"
        ]
    );
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn test_unanchored_document_omits_events_with_warning() {
    let report = noop_engine()
        .generate("A follow-up was scheduled a week later. Nothing else happened.")
        .await
        .unwrap();

    assert!(report.timeline.is_empty());
    assert_eq!(report.warnings.len(), 2);
    assert!(report
        .warnings
        .iter()
        .all(|w| w.condition == Condition::UnresolvedAnchor));
}

#[tokio::test]
async fn test_all_non_event_document_yields_empty_timeline() {
    let report = noop_engine()
        .generate("The bank is on 5th Avenue. The paintings were beautiful.")
        .await
        .unwrap();

    assert!(report.timeline.is_empty());
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn test_same_date_identical_text_collapses() {
    let report = noop_engine()
        .generate(
            "The meeting was held on March 10, 2024. \
             The meeting was held on March 10, 2024.",
        )
        .await
        .unwrap();

    assert_eq!(report.timeline.len(), 1);
}

#[tokio::test]
async fn test_same_date_distinct_events_both_kept() {
    let report = noop_engine()
        .generate(
            "The meeting was held on March 10, 2024. \
             The minutes were signed the same day on March 10, 2024.",
        )
        .await
        .unwrap();

    assert_eq!(report.timeline.len(), 2);
    assert_eq!(report.timeline[0].date, report.timeline[1].date);
    assert_ne!(report.timeline[0].event, report.timeline[1].event);
}

#[tokio::test]
async fn test_empty_document_is_fatal() {
    let result = noop_engine().generate("   ").await;
    assert!(matches!(result, Err(EngineError::EmptyDocument)));
}

#[tokio::test]
async fn test_malformed_date_falls_back_to_anchor() {
    let report = noop_engine()
        .generate(
            "The project launched on March 10, 2024. \
             The report was dated February 30, 2024.",
        )
        .await
        .unwrap();

    // Malformed span discarded; sentence co-occurs with the anchor
    assert_eq!(report.timeline.len(), 2);
    assert_eq!(report.timeline[1].date_string(), "10-03-2024");
    assert!(report
        .warnings
        .iter()
        .any(|w| matches!(w.condition, Condition::DateParseError { .. })));
}

#[tokio::test]
async fn test_summarizer_failure_falls_back_to_raw_text() {
    // Canned summarizer with no answers fails every call
    let engine = TimelineEngine::new(Arc::new(CannedSummarizer::new(&[])));

    let report = engine
        .generate("The meeting was held on March 10, 2024.")
        .await
        .unwrap();

    assert_eq!(report.timeline.len(), 1);
    assert_eq!(
        report.timeline[0].event,
        "The meeting was held on March 10, 2024."
    );
    assert!(report
        .warnings
        .iter()
        .any(|w| matches!(w.condition, Condition::EventSummaryUnavailable { .. })));
}

#[tokio::test]
async fn test_forecast_sentences_are_dated_events() {
    let report = noop_engine()
        .generate(
            "The merger was announced on March 10, 2024. \
             The companies plan to close the deal two months later.",
        )
        .await
        .unwrap();

    let dates: Vec<String> = report.timeline.iter().map(|e| e.date_string()).collect();
    assert_eq!(dates, ["10-03-2024", "10-05-2024"]);
}
