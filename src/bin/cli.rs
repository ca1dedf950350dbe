//! Trendfeed CLI
//!
//! Generates one RSS feed file per selected source.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use trendfeed::{
    error::Result,
    models::{Config, TrendingPeriod},
    pipeline::{self, RunSummary},
    sources::SourceRegistry,
    storage::LocalStorage,
};

/// Trendfeed - RSS feeds from trending web sources
#[derive(Parser, Debug)]
#[command(
    name = "trendfeed",
    version,
    about = "Generate RSS feeds from trending web sources"
)]
struct Cli {
    /// Data source to process: github, infoq, hacknews, or all
    #[arg(short, long, default_value = "github")]
    source: String,

    /// Directory where feed files are written
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Language filter for the GitHub source (empty = all languages)
    #[arg(long)]
    language: Option<String>,

    /// Trending window for the GitHub source (daily, weekly, monthly)
    #[arg(long)]
    period: Option<TrendingPeriod>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(summary) if summary.all_failed() => {
            log::error!(
                "All {} selected sources failed; no feeds were written",
                summary.attempted
            );
            ExitCode::from(1)
        }
        Ok(summary) => {
            log::info!(
                "Done: {} succeeded, {} failed",
                summary.succeeded,
                summary.failed
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            log::error!("{error}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<RunSummary> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    // CLI flags override the config file for the GitHub adapter.
    if let Some(language) = cli.language {
        config.github.language = language;
    }
    if let Some(period) = cli.period {
        config.github.period = period;
    }
    config.validate()?;

    log::info!(
        "Generating feeds for '{}' into {}",
        cli.source,
        cli.output_dir.display()
    );

    let config = Arc::new(config);
    let registry = SourceRegistry::new(Arc::clone(&config));
    let storage = LocalStorage::new(&cli.output_dir);

    pipeline::run_pipeline(&registry, &cli.source, &storage, config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["trendfeed"]);
        assert_eq!(cli.source, "github");
        assert_eq!(cli.output_dir, PathBuf::from("."));
        assert!(cli.period.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["trendfeed", "-s", "all", "-o", "/tmp/feeds", "-v"]);
        assert_eq!(cli.source, "all");
        assert_eq!(cli.output_dir, PathBuf::from("/tmp/feeds"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_period_parsing() {
        let cli = Cli::parse_from(["trendfeed", "--period", "weekly"]);
        assert_eq!(cli.period, Some(TrendingPeriod::Weekly));

        let result = Cli::try_parse_from(["trendfeed", "--period", "hourly"]);
        assert!(result.is_err());
    }
}
