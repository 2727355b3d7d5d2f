//! Link-Shelf main entry point
//!
//! This is the command-line interface for the Link-Shelf document mirror.

use anyhow::Context;
use clap::{Parser, Subcommand};
use link_shelf::config::{load_config_with_hash, Config, SourceConfig};
use link_shelf::output::{format_markdown_page, print_cycle_report, write_markdown_page};
use link_shelf::source::build_source;
use link_shelf::Shelf;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Link-Shelf: mirror link lists from a document source
///
/// Link-Shelf lists the documents at a source, fetches them concurrently,
/// extracts `[title](url)` entries and keeps them in an in-memory shelf.
#[derive(Parser, Debug)]
#[command(name = "link-shelf")]
#[command(version)]
#[command(about = "Mirror link lists from a document source", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    /// Validate config and show what would be synchronized without fetching
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one sync cycle and print its outcome per document
    Sync,

    /// Run the startup cycle and print the page (default)
    Show {
        /// Print the page data as JSON instead of markdown
        #[arg(long)]
        json: bool,

        /// Write the page to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Run the startup cycle, then refresh on the configured interval until Ctrl-C
    Watch,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    match cli.command.unwrap_or(Command::Show {
        json: false,
        output: None,
    }) {
        Command::Sync => handle_sync(&config).await,
        Command::Show { json, output } => handle_show(&config, json, output).await,
        Command::Watch => handle_watch(&config).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("link_shelf=info,warn"),
            1 => EnvFilter::new("link_shelf=debug,info"),
            2 => EnvFilter::new("link_shelf=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles --dry-run: prints the validated configuration
fn handle_dry_run(config: &Config) {
    println!("=== Link-Shelf Dry Run ===\n");

    println!("Source:");
    match &config.source {
        SourceConfig::Github(github) => {
            println!("  Kind: github");
            println!("  Repository: {}/{}", github.owner, github.repo);
            println!(
                "  Path: {}",
                if github.path.is_empty() { "/" } else { github.path.as_str() }
            );
            println!("  API base: {}", github.api_base);
            let token_state = match std::env::var(&github.token_env) {
                Ok(_) => "set",
                Err(_) => "not set",
            };
            println!("  Token: ${} ({})", github.token_env, token_state);
        }
        SourceConfig::Local(local) => {
            println!("  Kind: local");
            println!("  Root: {}", local.root);
        }
    }

    println!("\nSync:");
    println!("  Extension: {}", config.sync.extension);
    println!("  Staleness check: {:?}", config.sync.staleness);
    println!("  Refresh interval: {}s", config.sync.refresh_interval_secs);
    println!("  Request timeout: {}s", config.sync.request_timeout_secs);

    println!("\n✓ Configuration is valid");
}

/// Handles `sync`: one cycle, printed per document
async fn handle_sync(config: &Config) -> anyhow::Result<()> {
    let source = build_source(config)?;
    let (_shelf, report) = Shelf::start_with_config(config, source)
        .await
        .context("sync cycle failed")?;

    print_cycle_report(&report);
    Ok(())
}

/// Handles `show`: startup cycle, then the page as markdown or JSON
async fn handle_show(config: &Config, json: bool, output: Option<PathBuf>) -> anyhow::Result<()> {
    let source = build_source(config)?;
    let (shelf, _report) = Shelf::start_with_config(config, source)
        .await
        .context("startup sync failed")?;

    let page = shelf.page_data();

    match (json, output) {
        (true, Some(path)) => {
            std::fs::write(&path, serde_json::to_string_pretty(&page)?)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("✓ Page written to: {}", path.display());
        }
        (true, None) => println!("{}", serde_json::to_string_pretty(&page)?),
        (false, Some(path)) => {
            write_markdown_page(&page, &path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("✓ Page written to: {}", path.display());
        }
        (false, None) => print!("{}", format_markdown_page(&page)),
    }

    Ok(())
}

/// Handles `watch`: startup cycle, then periodic refreshes until Ctrl-C
async fn handle_watch(config: &Config) -> anyhow::Result<()> {
    let source = build_source(config)?;
    let (shelf, report) = Shelf::start_with_config(config, source)
        .await
        .context("startup sync failed")?;

    tracing::info!(
        "Shelf ready with {} documents, refreshing every {}s",
        report.len(),
        config.sync.refresh_interval_secs
    );

    let mut ticker = tokio::time::interval(Duration::from_secs(config.sync.refresh_interval_secs));
    // The first tick completes immediately; the startup cycle already ran.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let response = shelf.refresh().await;
                match response.to_json() {
                    Ok(body) => tracing::info!("Refresh: {}", body),
                    Err(e) => tracing::warn!("Failed to encode refresh response: {}", e),
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("failed to listen for Ctrl-C")?;
                tracing::info!("Interrupted, stopping");
                break;
            }
        }
    }

    Ok(())
}
