//! Core data types for the acquisition pipeline.

pub mod document;
pub mod source;
pub mod stats;

pub use document::Document;
pub use source::SourceEntry;
pub use stats::{RunStats, RunSummary, SourceOutcome};
