//! `harvest` - run the acquisition pipeline over a JSON catalog.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;

use harvester::{HarvestConfig, Harvester, HttpFetcher, RunSummary, SourceEntry};

/// Acquire a quality-filtered text corpus from a source catalog.
#[derive(Debug, Parser)]
#[command(name = "harvest", version, about)]
struct Args {
    /// Path to the JSON catalog of source entries
    #[arg(long)]
    catalog: PathBuf,

    /// Corpus root directory
    #[arg(long, default_value = "./corpus")]
    output: PathBuf,

    /// Stop once the corpus reaches this many megabytes
    #[arg(long, default_value_t = 500)]
    target_mb: u64,

    /// Minimum quality score for a document to be kept
    #[arg(long, default_value_t = 0.6)]
    quality_threshold: f64,

    /// Delay between requests, in milliseconds
    #[arg(long, default_value_t = 2000)]
    delay_ms: u64,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// Agent identity sent with every request
    #[arg(long, default_value = "CorpusHarvester/0.1 (research crawler)")]
    user_agent: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "harvester=info".into()),
        )
        .init();

    let args = Args::parse();

    let catalog = load_catalog(&args.catalog)?;
    println!(
        "{} {} sources from {}",
        "Loaded".bright_green().bold(),
        catalog.len(),
        args.catalog.display()
    );

    let config = HarvestConfig::new(&args.output, args.target_mb * 1024 * 1024)
        .with_quality_threshold(args.quality_threshold)
        .with_user_agent(&args.user_agent)
        .with_request_delay(Duration::from_millis(args.delay_ms))
        .with_fetch_timeout(Duration::from_secs(args.timeout_secs));

    let fetcher = HttpFetcher::new(&config.user_agent, config.fetch_timeout);
    let mut harvester = Harvester::new(config, fetcher);

    let summary = harvester
        .run(&catalog)
        .await
        .context("Harvest run failed")?;

    print_summary(&summary);
    Ok(())
}

fn load_catalog(path: &PathBuf) -> Result<Vec<SourceEntry>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let catalog: Vec<SourceEntry> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse catalog {}", path.display()))?;
    Ok(catalog)
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("{}", "Harvest complete".bright_green().bold());
    println!("  accepted:          {}", summary.documents_accepted);
    println!("  robots denied:     {}", summary.robots_denied);
    println!("  duplicates:        {}", summary.duplicates_skipped);
    println!("  fetch failures:    {}", summary.fetch_failures);
    println!("  quality rejected:  {}", summary.quality_rejected);
    if summary.persist_failures > 0 {
        println!(
            "  {}  {}",
            "persist failures:".bright_red(),
            summary.persist_failures
        );
    }
    println!("  total words:       {}", summary.total_words);
    println!("  average quality:   {:.2}", summary.average_quality);
    println!(
        "  corpus size:       {:.1} MB of {:.1} MB ({:.1}%)",
        summary.corpus_bytes as f64 / (1024.0 * 1024.0),
        summary.target_bytes as f64 / (1024.0 * 1024.0),
        summary.completion * 100.0
    );

    if !summary.per_category.is_empty() {
        println!("  by category:");
        let mut categories: Vec<_> = summary.per_category.iter().collect();
        categories.sort();
        for (category, count) in categories {
            println!("    {:<16} {}", category, count);
        }
    }
}
