//! Corpus persistence - partitioned artifacts plus the flat training
//! directory.
//!
//! Every accepted document produces four files: raw markup, clean
//! text, and a full metadata record under the category/subcategory
//! tree, plus a denormalized training file in `processed/`. The
//! training file embeds the source URL, which is what duplicate
//! detection scans for.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::dedup::PROCESSED_DIR;
use crate::error::{HarvestError, PersistError, PersistResult, Result};
use crate::types::{Document, RunSummary};

/// File name of the end-of-run summary record.
pub const SUMMARY_FILE: &str = "harvest_summary.json";

/// Filesystem store rooted at the corpus directory.
#[derive(Debug, Clone)]
pub struct CorpusStore {
    root: PathBuf,
}

impl CorpusStore {
    /// Create a store for the given corpus root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The corpus root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The flat training-file directory scanned for duplicates.
    pub fn processed_dir(&self) -> PathBuf {
        self.root.join(PROCESSED_DIR)
    }

    /// Create the corpus root and processed directory.
    ///
    /// Idempotent. Failure here is the only fatal condition of a
    /// harvest run.
    pub fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(self.processed_dir()).map_err(|source| HarvestError::CorpusRoot {
            path: self.root.display().to_string(),
            source,
        })
    }

    /// Persist one accepted document.
    ///
    /// Writes the raw markup, clean text, and metadata record into
    /// the category/subcategory partition, then the training file
    /// into `processed/`. Directories are created as needed.
    pub fn persist(&self, document: &Document) -> PersistResult<()> {
        let partition = self
            .root
            .join(&document.source.category)
            .join(&document.source.subcategory);
        fs::create_dir_all(&partition).map_err(|source| PersistError::Io {
            path: partition.display().to_string(),
            source,
        })?;

        let raw_path = partition.join(format!("{}_raw.html", document.id));
        write_file(&raw_path, document.raw_content.as_bytes())?;

        let text_path = partition.join(format!("{}_text.txt", document.id));
        write_file(&text_path, document.clean_text.as_bytes())?;

        let metadata = serde_json::to_string_pretty(document).map_err(|source| {
            PersistError::Serialize {
                id: document.id.clone(),
                source,
            }
        })?;
        let metadata_path = partition.join(format!("{}_metadata.json", document.id));
        write_file(&metadata_path, metadata.as_bytes())?;

        let training_path = self.processed_dir().join(training_file_name(document));
        write_file(&training_path, training_record(document).as_bytes())?;

        debug!(
            id = %document.id,
            partition = %partition.display(),
            training = %training_path.display(),
            "Document persisted"
        );

        Ok(())
    }

    /// Recursive byte total of everything under the corpus root.
    ///
    /// A missing root reads as an empty corpus.
    pub fn corpus_size(&self) -> u64 {
        WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| entry.metadata().ok())
            .map(|metadata| metadata.len())
            .sum()
    }

    /// Write the end-of-run summary record at the corpus root.
    pub fn write_summary(&self, summary: &RunSummary) -> PersistResult<()> {
        let json =
            serde_json::to_string_pretty(summary).map_err(|source| PersistError::Serialize {
                id: SUMMARY_FILE.to_string(),
                source,
            })?;
        write_file(&self.root.join(SUMMARY_FILE), json.as_bytes())
    }
}

fn write_file(path: &Path, contents: &[u8]) -> PersistResult<()> {
    fs::write(path, contents).map_err(|source| PersistError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// `<category>_<title with spaces as underscores>_<id8>_training.txt`
fn training_file_name(document: &Document) -> String {
    let title = document.source.title.replace(' ', "_");
    format!(
        "{}_{}_{}_training.txt",
        document.source.category,
        title,
        document.id_prefix()
    )
}

/// Header block plus clean text, ready for training consumption.
fn training_record(document: &Document) -> String {
    format!(
        "Title: {}\nCategory: {}/{}\nURL: {}\nQuality: {:.2}\nWords: {}\nPriority: {}\nFetched: {}\n---\n\n{}\n",
        document.source.title,
        document.source.category,
        document.source.subcategory,
        document.source.url,
        document.quality_score,
        document.word_count,
        document.source.priority,
        document.fetched_at.to_rfc3339(),
        document.clean_text
    )
}
