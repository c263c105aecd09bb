//! Duplicate detection over the persisted training corpus.
//!
//! A source counts as a duplicate when its exact URL string appears
//! in any previously persisted training file. This is a linear scan
//! of the flat corpus directory per check, which is acceptable at
//! catalog scale; a larger deployment would maintain a URL index
//! with the same substring-containment contract.

use std::path::Path;
use tracing::debug;

/// Directory of flat training files under the corpus root.
pub const PROCESSED_DIR: &str = "processed";

/// Report whether a URL was already persisted under `corpus_root`.
///
/// A missing corpus or processed directory means no duplicates.
/// Unreadable individual files are skipped rather than failing the
/// check.
pub fn is_duplicate(corpus_root: &Path, url: &str) -> bool {
    let processed = corpus_root.join(PROCESSED_DIR);
    let Ok(entries) = std::fs::read_dir(&processed) else {
        return false;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                if contents.contains(url) {
                    debug!(url = %url, file = %path.display(), "Duplicate URL found");
                    return true;
                }
            }
            Err(e) => {
                debug!(file = %path.display(), error = %e, "Skipping unreadable corpus file");
            }
        }
    }

    false
}
