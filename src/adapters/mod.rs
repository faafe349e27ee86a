//! Collaborator interfaces for external systems.
//!
//! The engine consumes two collaborators it does not own: a linguistic
//! tagger producing token-level annotations, and a generative service
//! that rewrites a dated sentence into a short event description.

pub mod llm;
pub mod tagger;

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

pub use llm::{LlmSummarizer, NoopSummarizer, SummarizerConfig};
pub use tagger::{LexiconTagger, LinguisticTagger};

/// Trait for the external event summarization service.
///
/// Synchronous from the pipeline's point of view; the engine additionally
/// enforces a per-call timeout and falls back to the raw sentence text on
/// failure, so no implementation can stall or abort a document.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Human-readable summarizer name
    fn name(&self) -> &str;

    /// Produce a short event description for a classified sentence and
    /// its resolved date
    async fn summarize(
        &self,
        sentence: &str,
        date: NaiveDate,
        timeout: Duration,
    ) -> Result<String>;

    /// Health check (for HTTP implementations)
    async fn health_check(&self) -> Result<()>;
}
