//! End-to-end harvest scenarios over a real temporary corpus.

use std::time::Duration;

use harvester::{HarvestConfig, Harvester, MockFetcher, RobotsTxt, SourceEntry};

fn offline_config(root: &std::path::Path) -> HarvestConfig {
    HarvestConfig::new(root, 10_000_000)
        .with_request_delay(Duration::ZERO)
        .with_user_agent("TestBot/1.0")
}

/// A long-form article that clears the 0.6 quality threshold: length
/// tier 0.35 + several educational keywords + technical terms.
fn long_form_article() -> String {
    let paragraph =
        "This research study presents an analysis of wave theory for education, \
         with an introduction to the history of the science at every university. \
         Each learning example gives a definition, a method, and an experiment. \
         The algorithm solves an equation per hypothesis, each variable bound \
         by a protocol. ";
    format!(
        "<html><head><title>Waves</title></head><body>\
         <nav>Home | Research | About</nav>\
         <article><p>{}</p></article>\
         <footer>Copyright notice</footer>\
         </body></html>",
        paragraph.repeat(800)
    )
}

#[tokio::test]
async fn three_source_scenario() {
    let dir = tempfile::tempdir().unwrap();

    let fetcher = MockFetcher::new()
        .with_status("https://gone.example.com/article", 404)
        .with_page("https://open.example.com/waves", long_form_article());

    let mut harvester = Harvester::new(offline_config(dir.path()), fetcher);
    harvester.seed_robots(
        "https://closed.example.com",
        RobotsTxt::parse("User-agent: *\nDisallow: /\n"),
    );
    harvester.seed_robots("https://gone.example.com", RobotsTxt::default());
    harvester.seed_robots("https://open.example.com", RobotsTxt::default());

    let catalog = vec![
        SourceEntry::new(
            "https://closed.example.com/private",
            "science",
            "physics",
            "Closed Source",
        ),
        SourceEntry::new(
            "https://gone.example.com/article",
            "science",
            "physics",
            "Gone Source",
        ),
        SourceEntry::new(
            "https://open.example.com/waves",
            "science",
            "physics",
            "Ocean Waves",
        ),
    ];

    let summary = harvester.run(&catalog).await.unwrap();

    assert_eq!(summary.sources_processed, 3);
    assert_eq!(summary.documents_accepted, 1);
    assert_eq!(summary.robots_denied, 1);
    assert_eq!(summary.fetch_failures, 1);
    assert_eq!(summary.duplicates_skipped, 0);
    assert_eq!(summary.quality_rejected, 0);
    assert!(summary.average_quality >= 0.6);

    // Exactly one training file set landed under processed/
    let processed: Vec<_> = std::fs::read_dir(dir.path().join("processed"))
        .unwrap()
        .flatten()
        .collect();
    assert_eq!(processed.len(), 1);
    let name = processed[0].file_name().to_string_lossy().to_string();
    assert!(name.starts_with("science_Ocean_Waves_"));
    assert!(name.ends_with("_training.txt"));

    // The summary file is written at the corpus root
    assert!(dir.path().join("harvest_summary.json").exists());
}

#[tokio::test]
async fn second_run_skips_persisted_url() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = vec![SourceEntry::new(
        "https://open.example.com/waves",
        "science",
        "physics",
        "Ocean Waves",
    )];

    let fetcher = MockFetcher::new().with_page("https://open.example.com/waves", long_form_article());
    let mut harvester = Harvester::new(offline_config(dir.path()), fetcher);
    harvester.seed_robots("https://open.example.com", RobotsTxt::default());
    let first = harvester.run(&catalog).await.unwrap();
    assert_eq!(first.documents_accepted, 1);

    // A fresh run over the same corpus sees the persisted URL
    let fetcher = MockFetcher::new().with_page("https://open.example.com/waves", long_form_article());
    let mut harvester = Harvester::new(offline_config(dir.path()), fetcher);
    harvester.seed_robots("https://open.example.com", RobotsTxt::default());
    let second = harvester.run(&catalog).await.unwrap();

    assert_eq!(second.documents_accepted, 0);
    assert_eq!(second.duplicates_skipped, 1);

    let processed: Vec<_> = std::fs::read_dir(dir.path().join("processed"))
        .unwrap()
        .flatten()
        .collect();
    assert_eq!(processed.len(), 1);
}

#[tokio::test]
async fn full_corpus_terminates_immediately() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("existing.txt"), vec![b'x'; 4096]).unwrap();

    let config = offline_config(dir.path());
    let config = HarvestConfig {
        target_corpus_bytes: 1024,
        ..config
    };
    let fetcher = MockFetcher::new();
    let mut harvester = Harvester::new(config, fetcher);

    let catalog = vec![
        SourceEntry::new("https://a.example.com/1", "science", "physics", "One"),
        SourceEntry::new("https://b.example.com/2", "science", "physics", "Two"),
    ];
    let summary = harvester.run(&catalog).await.unwrap();

    assert_eq!(summary.sources_processed, 0);
    assert_eq!(summary.completion, 1.0);
}

#[tokio::test]
async fn outcomes_are_mutually_exclusive() {
    let dir = tempfile::tempdir().unwrap();

    let fetcher = MockFetcher::new()
        .with_status("https://gone.example.com/a", 500)
        .with_page(
            "https://thin.example.com/b",
            "<html><body><p>Too short to matter for quality scoring.</p></body></html>",
        )
        .with_page("https://open.example.com/c", long_form_article());

    let mut harvester = Harvester::new(offline_config(dir.path()), fetcher);
    harvester.seed_robots(
        "https://closed.example.com",
        RobotsTxt::parse("User-agent: *\nDisallow: /\n"),
    );
    harvester.seed_robots("https://gone.example.com", RobotsTxt::default());
    harvester.seed_robots("https://thin.example.com", RobotsTxt::default());
    harvester.seed_robots("https://open.example.com", RobotsTxt::default());

    let catalog = vec![
        SourceEntry::new("https://closed.example.com/x", "misc", "m", "Closed"),
        SourceEntry::new("https://gone.example.com/a", "misc", "m", "Gone"),
        SourceEntry::new("https://thin.example.com/b", "misc", "m", "Thin"),
        SourceEntry::new("https://open.example.com/c", "science", "s", "Open"),
    ];
    let summary = harvester.run(&catalog).await.unwrap();

    // Every source got exactly one classification
    let classified = summary.documents_accepted
        + summary.robots_denied
        + summary.duplicates_skipped
        + summary.fetch_failures
        + summary.quality_rejected
        + summary.persist_failures;
    assert_eq!(classified, summary.sources_processed);
    assert_eq!(summary.sources_processed, 4);
    assert_eq!(summary.robots_denied, 1);
    assert_eq!(summary.fetch_failures, 1);
    assert_eq!(summary.quality_rejected, 1);
    assert_eq!(summary.documents_accepted, 1);
}
