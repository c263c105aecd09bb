//! Configuration for harvest runs.

use std::path::PathBuf;
use std::time::Duration;

/// Tunable parameters for one harvest run.
///
/// Defaults match a polite, conservative deployment: one request at a
/// time, two seconds between requests, and a 0.6 quality bar.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Root directory of the corpus
    pub corpus_root: PathBuf,

    /// Stop the run once the corpus reaches this many bytes
    pub target_corpus_bytes: u64,

    /// Minimum quality score for a document to be persisted
    pub quality_threshold: f64,

    /// Agent identity sent with every request (content and robots)
    pub user_agent: String,

    /// Fixed politeness interval between requests
    pub request_delay: Duration,

    /// Deadline for one content fetch
    pub fetch_timeout: Duration,

    /// Deadline for one robots.txt fetch (shorter than content)
    pub robots_timeout: Duration,

    /// Scoring lexicon
    pub lexicon: Lexicon,
}

impl HarvestConfig {
    /// Create a config for the given corpus root and size budget.
    pub fn new(corpus_root: impl Into<PathBuf>, target_corpus_bytes: u64) -> Self {
        Self {
            corpus_root: corpus_root.into(),
            target_corpus_bytes,
            quality_threshold: 0.6,
            user_agent: "CorpusHarvester/0.1 (research crawler)".to_string(),
            request_delay: Duration::from_secs(2),
            fetch_timeout: Duration::from_secs(60),
            robots_timeout: Duration::from_secs(10),
            lexicon: Lexicon::default(),
        }
    }

    /// Set the quality threshold.
    pub fn with_quality_threshold(mut self, threshold: f64) -> Self {
        self.quality_threshold = threshold;
        self
    }

    /// Set the agent identity string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the politeness interval between requests.
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Set the content-fetch deadline.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set the robots-fetch deadline.
    pub fn with_robots_timeout(mut self, timeout: Duration) -> Self {
        self.robots_timeout = timeout;
        self
    }

    /// Set the scoring lexicon.
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = lexicon;
        self
    }
}

/// Keyword and domain tables driving the quality scorer.
///
/// Passed explicitly so scoring stays a pure function of its inputs
/// rather than reading hidden global lists.
#[derive(Debug, Clone)]
pub struct Lexicon {
    /// Educational keywords, +0.015 each when present, capped at +0.30
    pub educational_keywords: Vec<String>,

    /// Technical terms, +0.02 each when present, capped at +0.20
    pub technical_terms: Vec<String>,

    /// Host suffixes classified as academic (+0.35)
    pub academic_suffixes: Vec<String>,

    /// Hosts classified as high-trust encyclopedic (+0.25)
    pub encyclopedic_hosts: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            educational_keywords: [
                "research",
                "study",
                "analysis",
                "theory",
                "education",
                "university",
                "science",
                "learning",
                "definition",
                "example",
                "introduction",
                "history",
                "method",
                "experiment",
                "evidence",
                "principle",
                "journal",
                "lecture",
                "curriculum",
                "reference",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            technical_terms: [
                "algorithm",
                "function",
                "equation",
                "hypothesis",
                "variable",
                "protocol",
                "dataset",
                "framework",
                "implementation",
                "parameter",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            academic_suffixes: [".edu", ".ac.uk", ".gov"]
                .into_iter()
                .map(String::from)
                .collect(),
            encyclopedic_hosts: ["wikipedia.org", "britannica.com"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Lexicon {
    /// Create a lexicon with the default tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the educational keyword list.
    pub fn with_educational_keywords(
        mut self,
        keywords: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.educational_keywords = keywords.into_iter().map(|k| k.into()).collect();
        self
    }

    /// Replace the technical term list.
    pub fn with_technical_terms(
        mut self,
        terms: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.technical_terms = terms.into_iter().map(|t| t.into()).collect();
        self
    }
}
