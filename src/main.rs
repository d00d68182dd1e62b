//! event-import main entry point
//!
//! Command-line interface for importing a single Meetup, Eventbrite or Lu.ma
//! event page into a reviewable event record.

use clap::{Parser, ValueEnum};
use event_import::config::{load_config_with_hash, Config};
use event_import::output::{render, write_outcome, ImportOutcome, OutputFormat};
use event_import::{classify_url, Importer};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// event-import: pre-fill event details from a public event page
///
/// Fetches the page once, reads its structured data and falls back to
/// platform-specific markup for anything missing. The result is printed as
/// JSON (for the calling workflow) or as a markdown review sheet.
#[derive(Parser, Debug)]
#[command(name = "event-import")]
#[command(version = "1.0.0")]
#[command(about = "Import event details from Meetup, Eventbrite or Lu.ma", long_about = None)]
struct Cli {
    /// Event page URL
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Json)]
    format: FormatArg,

    /// Write the result to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and URL, then exit without fetching
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Json,
    Markdown,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Markdown => OutputFormat::Markdown,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if cli.dry_run {
        return Ok(handle_dry_run(&config, &cli.url));
    }

    handle_import(&config, &cli).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the result.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("event_import=info,warn"),
            1 => EnvFilter::new("event_import=debug,info"),
            2 => EnvFilter::new("event_import=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be fetched
fn handle_dry_run(config: &Config, url: &str) -> ExitCode {
    println!("=== event-import Dry Run ===\n");

    println!("Fetcher Configuration:");
    println!("  Timeout: {}s", config.fetcher.timeout_secs);
    println!("  Max redirects: {}", config.fetcher.max_redirects);
    println!("  User agent: {}", config.fetcher.user_agent);
    println!("  Accept-Language: {}", config.fetcher.accept_language);

    println!("\nExtraction:");
    println!("  Timezone: {:?}", config.extraction.timezone);
    println!(
        "  Description limit: {} chars",
        config.extraction.description_max_chars
    );

    match classify_url(url) {
        Ok(event_url) => {
            println!("\n✓ Configuration is valid");
            println!(
                "✓ Would fetch {} ({})",
                event_url.url,
                event_url.platform.display_name()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("\n✗ {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Handles the import: fetch, extract, render
async fn handle_import(config: &Config, cli: &Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let importer = match Importer::new(config) {
        Ok(importer) => importer,
        Err(e) => {
            tracing::error!("Failed to set up importer: {}", e);
            return Err(e.into());
        }
    };
    let result = importer.import(&cli.url).await;

    if let Err(e) = &result {
        tracing::error!("Import failed: {}", e);
    }

    let outcome = ImportOutcome::from(result);
    let format = OutputFormat::from(cli.format);

    match &cli.output {
        Some(path) => write_outcome(&outcome, format, path)?,
        None => println!("{}", render(&outcome, format)?),
    }

    if outcome.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
