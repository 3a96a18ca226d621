//! Linkslate main entry point
//!
//! This is the command-line interface for the linkslate seed-list crawler.

use clap::Parser;
use linkslate::config::{load_config, Config};
use linkslate::crawler::crawl;
use linkslate::output::export_csv;
use linkslate::SlateError;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Linkslate: a seed-list link tabulator
///
/// Linkslate visits a fixed list of seed pages concurrently, extracts each
/// page's title and outbound links, and writes the aggregated result as a
/// CSV table.
#[derive(Parser, Debug)]
#[command(name = "linkslate")]
#[command(version = "1.0.0")]
#[command(about = "A seed-list link tabulator", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load and validate configuration
    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    // The diagnostic log is part of setup: if it cannot be opened the run
    // aborts before any page is visited.
    setup_logging(&config.output.log_path, cli.verbose, cli.quiet)?;

    tracing::info!("Configuration loaded from: {}", cli.config.display());
    handle_crawl(config).await?;

    Ok(())
}

/// Sets up the tracing subscriber: a live stdout layer plus an append-only
/// file layer so every diagnostic line is durably persisted
fn setup_logging(log_path: &str, verbose: u8, quiet: bool) -> Result<(), SlateError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|source| SlateError::LogFile {
            path: log_path.to_string(),
            source,
        })?;

    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linkslate=info,warn"),
            1 => EnvFilter::new("linkslate=debug,info"),
            2 => EnvFilter::new("linkslate=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(())
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Linkslate Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Parallelism: {}", config.crawler.parallelism);
    println!("  Domain delay: {}ms", config.crawler.domain_delay_ms);
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );
    println!("  User agent: {}", config.crawler.user_agent);

    println!("\nSelectors:");
    println!("  Title: {}", config.selectors.title);
    if let Some(title_text) = &config.selectors.title_text {
        println!("  Title text: {}", title_text);
    }
    println!("  Links: {}", config.selectors.links);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    println!("  Log: {}", config.output.log_path);

    println!("\nSeed URLs ({}):", config.seeds.len());
    for seed in &config.seeds {
        println!("  - {}", seed);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl-then-export operation
async fn handle_crawl(config: Config) -> Result<(), SlateError> {
    let csv_path = config.output.csv_path.clone();

    let outcome = crawl(config).await?;

    tracing::info!("Link count: {}", outcome.records.len());
    if outcome.pages_failed > 0 {
        tracing::warn!("{} seed page(s) failed to fetch", outcome.pages_failed);
    }

    // Export failure is fatal, but distinct from setup failure: the crawl
    // completed and the operator should see that in the log.
    match export_csv(&outcome.records, Path::new(&csv_path)) {
        Ok(()) => {
            tracing::info!("Export written to {}", csv_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Failed to write export to {}: {}", csv_path, e);
            Err(SlateError::Export(e))
        }
    }
}
