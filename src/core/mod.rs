//! Pipeline logic: classification, extraction, anchor resolution,
//! summarization orchestration, and timeline assembly.

pub mod anchor;
pub mod assembler;
pub mod classifier;
pub mod engine;
pub mod extractor;

pub use anchor::{AnchorResolver, AnchorState, DatedSentence};
pub use assembler::assemble;
pub use classifier::{tag_passage, Classifier, RuleClassifier};
pub use engine::{EngineError, EngineOptions, TimelineEngine};
pub use extractor::{extract, Extraction};
