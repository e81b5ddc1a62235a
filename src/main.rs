//! Sumi-Frontier main entry point
//!
//! This is the command-line interface for the Sumi-Frontier bounded crawler.

use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use sumi_frontier::config::{read_config_with_hash, validate, Config};
use sumi_frontier::crawler::run_crawl;
use sumi_frontier::output::print_summary;
use tracing_subscriber::EnvFilter;

/// Sumi-Frontier: a bounded breadth-first web crawler
///
/// Sumi-Frontier starts from a seed URL, follows links breadth-first and
/// stops once the page budget is spent or no unseen links remain. Every
/// distinct URL is fetched at most once.
#[derive(Parser, Debug)]
#[command(name = "sumi-frontier")]
#[command(version)]
#[command(about = "A bounded breadth-first web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Seed URL (overrides the configured seed)
    #[arg(long, value_name = "URL")]
    seed: Option<String>,

    /// Maximum number of pages to fetch (overrides the configured budget)
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Write a markdown summary to this path when the crawl ends
    #[arg(long, value_name = "PATH")]
    summary: Option<String>,

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
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_effective_config(&cli)?;
    apply_overrides(&mut config, &cli);
    validate(&config).context("Invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let summary = run_crawl(&config).await.context("Crawl failed")?;
    print_summary(&summary);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_frontier=info,warn"),
            1 => EnvFilter::new("sumi_frontier=debug,info"),
            2 => EnvFilter::new("sumi_frontier=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Reads the configuration file, or builds a default one from `--seed`
///
/// Validation happens in `main`, once the command-line overrides are applied.
fn load_effective_config(cli: &Cli) -> anyhow::Result<Config> {
    match (&cli.config, &cli.seed) {
        (Some(path), _) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = read_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded (hash: {})", hash);
            Ok(config)
        }
        (None, Some(seed)) => Ok(Config::for_seed(seed.clone())),
        (None, None) => bail!("Either a CONFIG file or --seed must be given"),
    }
}

/// Applies command-line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(seed) = &cli.seed {
        config.crawler.seed = seed.clone();
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(summary) = &cli.summary {
        config.output.summary_path = Some(summary.clone());
    }
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Sumi-Frontier Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed: {}", config.crawler.seed);
    for seed in &config.crawler.extra_seeds {
        println!("  Extra seed: {}", seed);
    }
    println!("  Max pages: {}", config.crawler.max_pages);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nFetch:");
    println!("  Request timeout: {}s", config.fetch.request_timeout);
    println!("  Connect timeout: {}s", config.fetch.connect_timeout);

    println!("\nOutput:");
    match &config.output.summary_path {
        Some(path) => println!("  Summary: {}", path),
        None => println!("  Summary: (console only)"),
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start crawling with {} seed URLs",
        1 + config.crawler.extra_seeds.len()
    );
}
