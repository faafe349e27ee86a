//! chronicle - temporal resolution and timeline assembly engine
//!
//! Converts free-form narrative text into a chronologically ordered list
//! of (date, event) pairs. The hard problem is temporal resolution:
//! deciding which sentences describe an event, whether each date
//! reference is explicit or relative, and resolving relative references
//! ("a week later") into absolute dates against the rolling anchor.
//!
//! # Architecture
//!
//! The pipeline runs leaves-first:
//! - sentence segmentation and classification (parallelizable, stateless)
//! - temporal expression extraction (absolute vs relative spans)
//! - anchor resolution (the single sequential, stateful pass)
//! - external event summarization (concurrent, per-call timeout)
//! - timeline assembly (pure: stable sort + same-date dedup)
//!
//! # Modules
//!
//! - `adapters`: external collaborators (linguistic tagger, summarizer)
//! - `core`: pipeline logic (classifier, extractor, anchor, assembler, engine)
//! - `domain`: data structures (sentences, expressions, events, warnings)
//! - `ingest`: sentence segmentation
//! - `cli`: command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Generate a timeline from a passage
//! echo "The meeting was held on March 10, 2024." | chronicle generate --stdin
//!
//! # Inspect per-sentence classification
//! chronicle classify --input passage.txt
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod ingest;

// Re-export main types at crate root for convenience
pub use adapters::{LexiconTagger, LinguisticTagger, LlmSummarizer, NoopSummarizer, Summarizer};
pub use core::{Classifier, EngineError, EngineOptions, RuleClassifier, TimelineEngine};
pub use domain::{
    ClassifiedSentence, Condition, Event, PipelineWarning, RawSentence, TemporalClass, Timeline,
    TimelineReport,
};
pub use ingest::split_sentences;
