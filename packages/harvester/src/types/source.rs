//! Source catalog entries.

use serde::{Deserialize, Serialize};

/// One externally supplied description of a document to acquire.
///
/// Entries come from a closed, ordered catalog and are immutable for
/// the run. Identity is the `url` field; everything else is
/// descriptive metadata carried through into persisted documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEntry {
    /// URL to fetch
    pub url: String,

    /// Top-level corpus partition (e.g., "science")
    pub category: String,

    /// Second-level corpus partition (e.g., "physics")
    pub subcategory: String,

    /// Human-readable title for the source
    pub title: String,

    /// Expected quality tier label (informational only)
    #[serde(default)]
    pub expected_quality: String,

    /// Content language tag (e.g., "en")
    #[serde(default)]
    pub language: String,

    /// Expected content tag (e.g., "article", "reference")
    #[serde(default)]
    pub content_tag: String,

    /// Catalog priority. Carried as metadata; the control loop
    /// processes sources strictly in catalog order.
    #[serde(default)]
    pub priority: u32,
}

impl SourceEntry {
    /// Create a new source entry with minimal fields.
    pub fn new(
        url: impl Into<String>,
        category: impl Into<String>,
        subcategory: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            category: category.into(),
            subcategory: subcategory.into(),
            title: title.into(),
            expected_quality: String::new(),
            language: String::new(),
            content_tag: String::new(),
            priority: 0,
        }
    }

    /// Set the expected quality tier.
    pub fn with_expected_quality(mut self, tier: impl Into<String>) -> Self {
        self.expected_quality = tier.into();
        self
    }

    /// Set the language tag.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the content tag.
    pub fn with_content_tag(mut self, tag: impl Into<String>) -> Self {
        self.content_tag = tag.into();
        self
    }

    /// Set the catalog priority.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }
}
