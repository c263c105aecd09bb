//! Politeness-First Corpus Harvester
//!
//! Acquires text documents from a closed catalog of remote sources,
//! filters them by heuristic quality, avoids duplicate acquisition,
//! respects per-host robots rules, and persists accepted documents to
//! a size-bounded local corpus for downstream training-data use.
//!
//! # Design Philosophy
//!
//! - Sequential by design: one request in flight, a fixed delay
//!   between requests. Politeness is a feature, not a bottleneck.
//! - Fail-open robots resolution: an unreachable robots.txt never
//!   blocks a host, and the decision is cached per origin.
//! - Per-source failure isolation: a bad source never affects the
//!   next one; only a missing corpus root aborts a run.
//! - Pure scoring: the quality heuristic is a deterministic function
//!   of text, source metadata, and an explicit lexicon.
//!
//! # Usage
//!
//! ```rust,ignore
//! use harvester::{Harvester, HarvestConfig, HttpFetcher, SourceEntry};
//!
//! let config = HarvestConfig::new("./corpus", 500 * 1024 * 1024);
//! let fetcher = HttpFetcher::new(&config.user_agent, config.fetch_timeout);
//! let mut harvester = Harvester::new(config, fetcher);
//!
//! let summary = harvester.run(&catalog).await?;
//! println!("accepted {} documents", summary.documents_accepted);
//! ```
//!
//! # Modules
//!
//! - [`harvest`] - the acquisition control loop
//! - [`robots`] - robots.txt parsing and per-origin caching
//! - [`fetcher`] - the HTTP fetch seam
//! - [`extract`] - markup cleaning with a guaranteed fallback
//! - [`score`] - deterministic heuristic quality scoring
//! - [`dedup`] - URL-recurrence duplicate detection
//! - [`store`] - partitioned corpus persistence
//! - [`testing`] - mock implementations for offline tests

pub mod config;
pub mod dedup;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod harvest;
pub mod robots;
pub mod score;
pub mod store;
pub mod testing;
pub mod types;

// Re-export core types at crate root
pub use config::{HarvestConfig, Lexicon};
pub use error::{FetchError, HarvestError, PersistError};
pub use fetcher::{FetchedPage, HttpFetcher, PageFetcher};
pub use harvest::Harvester;
pub use robots::{RobotsCache, RobotsTxt};
pub use store::CorpusStore;
pub use types::{Document, RunStats, RunSummary, SourceEntry, SourceOutcome};

// Re-export testing utilities
pub use testing::MockFetcher;
