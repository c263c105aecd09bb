//! The acquisition control loop.
//!
//! One source is fully resolved before the next begins: budget check,
//! robots gate, duplicate gate, fetch, clean, score, persist. Every
//! per-source failure is isolated; only an unusable corpus root
//! aborts the run.

use tracing::{info, warn};

use crate::config::HarvestConfig;
use crate::dedup;
use crate::error::Result;
use crate::extract;
use crate::fetcher::PageFetcher;
use crate::robots::{RobotsCache, RobotsTxt};
use crate::score;
use crate::store::CorpusStore;
use crate::types::{Document, RunStats, RunSummary, SourceEntry, SourceOutcome};

/// Orchestrates one harvest run over a source catalog.
///
/// Owns the robots cache, the corpus store, and the run statistics;
/// generic over the fetch seam so runs are testable offline.
pub struct Harvester<F: PageFetcher> {
    config: HarvestConfig,
    fetcher: F,
    robots: RobotsCache,
    store: CorpusStore,
}

impl<F: PageFetcher> Harvester<F> {
    /// Create a harvester from a config and a fetcher.
    pub fn new(config: HarvestConfig, fetcher: F) -> Self {
        let robots = RobotsCache::new(config.robots_timeout);
        let store = CorpusStore::new(&config.corpus_root);
        Self {
            config,
            fetcher,
            robots,
            store,
        }
    }

    /// Preload robots rules for an origin (offline runs and tests).
    pub fn seed_robots(&mut self, origin: impl Into<String>, rules: RobotsTxt) {
        self.robots.seed(origin, rules);
    }

    /// The store this run persists into.
    pub fn store(&self) -> &CorpusStore {
        &self.store
    }

    /// Process the catalog in order until it is exhausted or the
    /// size budget is reached.
    pub async fn run(&mut self, catalog: &[SourceEntry]) -> Result<RunSummary> {
        self.store.ensure_root()?;

        let mut stats = RunStats::new();
        info!(
            sources = catalog.len(),
            target_bytes = self.config.target_corpus_bytes,
            corpus = %self.config.corpus_root.display(),
            "Harvest run starting"
        );

        for source in catalog {
            // Budget is re-checked at the top of every iteration so a
            // run over an already-full corpus processes nothing
            let corpus_bytes = self.store.corpus_size();
            if corpus_bytes >= self.config.target_corpus_bytes {
                info!(
                    corpus_bytes,
                    target_bytes = self.config.target_corpus_bytes,
                    "Size budget reached - stopping run"
                );
                break;
            }

            if !self.robots.allowed(&source.url, &self.config.user_agent).await {
                info!(url = %source.url, "Blocked by robots rules");
                stats.record(SourceOutcome::RobotsDenied);
                continue;
            }

            if dedup::is_duplicate(self.store.root(), &source.url) {
                info!(url = %source.url, "Already in corpus - skipping");
                stats.record(SourceOutcome::Duplicate);
                continue;
            }

            match self.acquire(source).await {
                AcquireOutcome::Accepted(document) => stats.record_accepted(&document),
                AcquireOutcome::FetchFailed => stats.record(SourceOutcome::FetchFailed),
                AcquireOutcome::QualityRejected => stats.record(SourceOutcome::QualityRejected),
                AcquireOutcome::PersistFailed => stats.record(SourceOutcome::PersistFailed),
            }

            // The host was contacted, so pace the next request
            // whatever happened after the fetch
            tokio::time::sleep(self.config.request_delay).await;
        }

        let summary = stats.finalize(self.store.corpus_size(), self.config.target_corpus_bytes);
        if let Err(e) = self.store.write_summary(&summary) {
            warn!(error = %e, "Failed to write run summary file");
        }

        info!(
            processed = summary.sources_processed,
            accepted = summary.documents_accepted,
            robots_denied = summary.robots_denied,
            duplicates = summary.duplicates_skipped,
            fetch_failures = summary.fetch_failures,
            quality_rejected = summary.quality_rejected,
            completion = format!("{:.1}%", summary.completion * 100.0),
            "Harvest run complete"
        );

        Ok(summary)
    }

    /// Fetch, clean, score, and persist one source.
    ///
    /// Returns the terminal classification along with the accepted
    /// document when there is one.
    async fn acquire(&self, source: &SourceEntry) -> AcquireOutcome {
        let page = match self.fetcher.fetch(&source.url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(url = %source.url, error = %e, "Fetch failed");
                return AcquireOutcome::FetchFailed;
            }
        };

        let clean_text = extract::clean(&page.body);
        let quality = score::score(&clean_text, source, &self.config.lexicon);

        if quality < self.config.quality_threshold {
            info!(
                url = %source.url,
                quality = format!("{:.2}", quality),
                threshold = self.config.quality_threshold,
                "Below quality threshold - rejected"
            );
            return AcquireOutcome::QualityRejected;
        }

        let mut document = Document::new(
            source.clone(),
            page.body,
            clean_text,
            quality,
            page.fetched_at,
        )
        .with_metadata("http_status", page.status.to_string());
        if let Some(content_type) = page.content_type {
            document = document.with_metadata("content_type", content_type);
        }

        if let Err(e) = self.store.persist(&document) {
            warn!(url = %source.url, error = %e, "Persist failed - document dropped");
            return AcquireOutcome::PersistFailed;
        }

        info!(
            url = %source.url,
            id = %document.id,
            quality = format!("{:.2}", document.quality_score),
            words = document.word_count,
            "Document accepted"
        );
        AcquireOutcome::Accepted(Box::new(document))
    }
}

/// Internal result of the fetch-through-persist stage.
enum AcquireOutcome {
    Accepted(Box<Document>),
    FetchFailed,
    QualityRejected,
    PersistFailed,
}
