//! End-to-end pipeline for one document.
//!
//! Segmentation, classification, and extraction have no shared state;
//! anchor resolution is a single sequential pass in document order; the
//! summarizer calls for already-dated events run concurrently, each under
//! its own timeout so one slow call never blocks the rest. The engine
//! holds no cross-document state: each call is idempotent.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

use crate::adapters::{LexiconTagger, LinguisticTagger, Summarizer};
use crate::domain::{
    ClassifiedSentence, Condition, Event, PipelineWarning, TimelineReport,
};
use crate::ingest::split_sentences;

use super::anchor::resolve_document;
use super::assembler::assemble;
use super::classifier::{classify_all, Classifier, RuleClassifier};
use super::extractor::extract;

/// Fatal conditions, reserved for structurally invalid input.
///
/// Everything else in the pipeline degrades per-sentence and is surfaced
/// in the report's warnings instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("document is empty")]
    EmptyDocument,

    #[error("document too large: {actual} bytes > {limit} bytes")]
    InputTooLarge { actual: usize, limit: usize },
}

/// Engine tuning knobs
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Per-call timeout for the external summarizer
    pub summary_timeout: Duration,

    /// Maximum accepted document size in bytes
    pub max_input_bytes: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            summary_timeout: Duration::from_secs(30),
            max_input_bytes: 1_048_576, // 1MB
        }
    }
}

/// The temporal resolution and timeline assembly engine
pub struct TimelineEngine {
    classifier: Box<dyn Classifier>,
    tagger: Box<dyn LinguisticTagger>,
    summarizer: Arc<dyn Summarizer>,
    options: EngineOptions,
}

impl TimelineEngine {
    /// Create an engine with the built-in rule classifier and lexicon
    /// tagger around the given summarizer
    pub fn new(summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            classifier: Box::new(RuleClassifier::new()),
            tagger: Box::new(LexiconTagger::new()),
            summarizer,
            options: EngineOptions::default(),
        }
    }

    /// Substitute a different classifier implementation
    pub fn with_classifier(mut self, classifier: Box<dyn Classifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Substitute a different linguistic tagger
    pub fn with_tagger(mut self, tagger: Box<dyn LinguisticTagger>) -> Self {
        self.tagger = tagger;
        self
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Segment and classify a document without resolving dates.
    ///
    /// Used by the inspection CLI; `generate` goes through the same path.
    pub fn classify_document(
        &self,
        text: &str,
    ) -> Result<(Vec<ClassifiedSentence>, Vec<PipelineWarning>), EngineError> {
        self.validate_input(text)?;

        let sentences = split_sentences(text);
        if sentences.is_empty() {
            return Err(EngineError::EmptyDocument);
        }

        let (classified, conditions) =
            classify_all(self.classifier.as_ref(), self.tagger.as_ref(), &sentences);

        let warnings = conditions
            .into_iter()
            .map(|(index, condition)| PipelineWarning::new(index, condition))
            .collect();

        Ok((classified, warnings))
    }

    /// Run the full pipeline over one document and produce its timeline.
    #[instrument(skip(self, text), fields(summarizer = %self.summarizer.name()))]
    pub async fn generate(&self, text: &str) -> Result<TimelineReport, EngineError> {
        let (classified, mut warnings) = self.classify_document(text)?;

        info!(sentences = classified.len(), "document segmented and classified");

        // Extraction: stateless per sentence; non-events are excluded
        // from everything downstream
        let mut items = Vec::new();
        for cs in classified.into_iter().filter(|cs| cs.class.is_event()) {
            let extraction = extract(&cs.sentence.text);
            if let Some(condition) = extraction.condition {
                warn!(index = cs.sentence.index, %condition, "expression discarded");
                warnings.push(PipelineWarning::new(cs.sentence.index, condition));
            }
            items.push((cs, extraction.expression));
        }

        // The one order-dependent stage: a single sequential pass
        let (dated, anchor_warnings) = resolve_document(items);
        warnings.extend(anchor_warnings);

        debug!(events = dated.len(), "anchor resolution complete");

        // Summarize concurrently; fall back to the raw sentence text so a
        // dated event is never silently dropped
        let mut descriptions: Vec<Option<String>> = vec![None; dated.len()];
        let mut set: JoinSet<(usize, anyhow::Result<String>)> = JoinSet::new();

        for (slot, d) in dated.iter().enumerate() {
            let summarizer = Arc::clone(&self.summarizer);
            let sentence = d.sentence.sentence.text.clone();
            let date = d.date;
            let timeout = self.options.summary_timeout;

            set.spawn(async move {
                let result =
                    match tokio::time::timeout(timeout, summarizer.summarize(&sentence, date, timeout))
                        .await
                    {
                        Ok(inner) => inner,
                        Err(_) => Err(anyhow::anyhow!(
                            "summarizer timed out after {timeout:?}"
                        )),
                    };
                (slot, result)
            });
        }

        while let Some(joined) = set.join_next().await {
            let (slot, result) = match joined {
                Ok(pair) => pair,
                Err(e) => {
                    warn!(error = %e, "summarization task panicked");
                    continue;
                }
            };

            match result {
                Ok(summary) => descriptions[slot] = Some(summary),
                Err(e) => {
                    let index = dated[slot].sentence.sentence.index;
                    warn!(index, error = %e, "summary unavailable, using raw sentence");
                    warnings.push(PipelineWarning::new(
                        index,
                        Condition::EventSummaryUnavailable {
                            reason: e.to_string(),
                        },
                    ));
                }
            }
        }

        let candidates: Vec<Event> = dated
            .iter()
            .zip(descriptions)
            .map(|(d, description)| {
                let text =
                    description.unwrap_or_else(|| d.sentence.sentence.text.clone());
                Event::new(d.date, text)
            })
            .collect();

        let timeline = assemble(candidates);

        warnings.sort_by_key(|w| w.sentence_index);

        info!(events = timeline.len(), warnings = warnings.len(), "timeline assembled");

        Ok(TimelineReport::new(timeline, warnings))
    }

    fn validate_input(&self, text: &str) -> Result<(), EngineError> {
        if text.trim().is_empty() {
            return Err(EngineError::EmptyDocument);
        }

        let actual = text.len();
        if actual > self.options.max_input_bytes {
            return Err(EngineError::InputTooLarge {
                actual,
                limit: self.options.max_input_bytes,
            });
        }

        Ok(())
    }
}
