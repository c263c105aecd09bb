//! Accepted documents and their metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::types::source::SourceEntry;

/// A document that survived fetch and quality filtering.
///
/// Created only on a successful fetch that clears the quality
/// threshold; immutable once persisted. The full structure is
/// serialized as the metadata artifact next to the raw and clean
/// text files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique id for this accepted fetch
    pub id: String,

    /// Catalog entry this document was acquired from
    pub source: SourceEntry,

    /// Original fetched markup, unmodified
    pub raw_content: String,

    /// Boilerplate-stripped plain text
    pub clean_text: String,

    /// Whitespace-delimited word count of the clean text
    pub word_count: usize,

    /// Character count of the clean text
    pub char_count: usize,

    /// Heuristic quality score in [0, 1]
    pub quality_score: f64,

    /// Transport and pipeline metadata (status, content type, ...)
    #[serde(default)]
    pub metadata: HashMap<String, String>,

    /// When the raw content was fetched
    pub fetched_at: DateTime<Utc>,

    /// When cleaning and scoring completed
    pub processed_at: DateTime<Utc>,
}

impl Document {
    /// Create a document from pipeline outputs.
    ///
    /// Word and character counts are derived from the clean text so
    /// they always agree with what gets persisted.
    pub fn new(
        source: SourceEntry,
        raw_content: impl Into<String>,
        clean_text: impl Into<String>,
        quality_score: f64,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        let clean_text = clean_text.into();
        let word_count = clean_text.split_whitespace().count();
        let char_count = clean_text.chars().count();

        Self {
            id: Uuid::new_v4().to_string(),
            source,
            raw_content: raw_content.into(),
            clean_text,
            word_count,
            char_count,
            quality_score,
            metadata: HashMap::new(),
            fetched_at,
            processed_at: Utc::now(),
        }
    }

    /// Add a metadata key-value pair.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// First eight characters of the id, used in training file names.
    pub fn id_prefix(&self) -> &str {
        &self.id[..8.min(self.id.len())]
    }

    /// Byte length of the clean text.
    pub fn clean_len(&self) -> usize {
        self.clean_text.len()
    }
}
