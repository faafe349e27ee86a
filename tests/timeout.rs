//! Summarizer Timeout Tests
//!
//! One slow or hung summarizer call must never block the rest of the
//! pipeline; the affected event falls back to its raw sentence text.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use chronicle::{Condition, EngineOptions, Summarizer, TimelineEngine};

/// Summarizer that hangs far past any sane deadline
struct HungSummarizer;

#[async_trait]
impl Summarizer for HungSummarizer {
    fn name(&self) -> &str {
        "hung"
    }

    async fn summarize(
        &self,
        _sentence: &str,
        _date: NaiveDate,
        _timeout: Duration,
    ) -> Result<String> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok("never reached".to_string())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

/// Summarizer that hangs only on sentences containing a trigger word
struct SelectivelySlowSummarizer {
    trigger: &'static str,
}

#[async_trait]
impl Summarizer for SelectivelySlowSummarizer {
    fn name(&self) -> &str {
        "selectively-slow"
    }

    async fn summarize(
        &self,
        sentence: &str,
        _date: NaiveDate,
        _timeout: Duration,
    ) -> Result<String> {
        if sentence.contains(self.trigger) {
            tokio::time::sleep(Duration::from_secs(60)).await;
        }
        Ok(format!("SUMMARY: {sentence}"))
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

fn short_timeout() -> EngineOptions {
    EngineOptions {
        summary_timeout: Duration::from_millis(100),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_hung_summarizer_falls_back_within_deadline() {
    let engine = TimelineEngine::new(Arc::new(HungSummarizer)).with_options(short_timeout());

    let start = Instant::now();
    let report = engine
        .generate("The meeting was held on March 10, 2024.")
        .await
        .unwrap();
    let elapsed = start.elapsed();

    assert!(
        elapsed < Duration::from_secs(5),
        "pipeline blocked on a hung summarizer for {elapsed:?}"
    );

    assert_eq!(report.timeline.len(), 1);
    assert_eq!(
        report.timeline[0].event,
        "The meeting was held on March 10, 2024."
    );
    assert!(report.warnings.iter().any(|w| matches!(
        w.condition,
        Condition::EventSummaryUnavailable { ref reason } if reason.contains("timed out")
    )));
}

#[tokio::test]
async fn test_one_slow_call_does_not_block_other_events() {
    let engine = TimelineEngine::new(Arc::new(SelectivelySlowSummarizer { trigger: "audit" }))
        .with_options(short_timeout());

    let start = Instant::now();
    let report = engine
        .generate(
            "The report was released on March 10, 2024. \
             The audit was finished a week later.",
        )
        .await
        .unwrap();
    let elapsed = start.elapsed();

    assert!(elapsed < Duration::from_secs(5));
    assert_eq!(report.timeline.len(), 2);

    // The fast call succeeded, the slow one fell back to raw text
    assert_eq!(
        report.timeline[0].event,
        "SUMMARY: The report was released on March 10, 2024."
    );
    assert_eq!(
        report.timeline[1].event,
        "The audit was finished a week later."
    );

    let fallbacks: Vec<_> = report
        .warnings
        .iter()
        .filter(|w| matches!(w.condition, Condition::EventSummaryUnavailable { .. }))
        .collect();
    assert_eq!(fallbacks.len(), 1);
    assert_eq!(fallbacks[0].sentence_index, 1);
}
