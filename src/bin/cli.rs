//! docs-parser CLI
//!
//! Runs one extraction mode against the Python documentation site.

use std::path::PathBuf;

use clap::Parser;
use docs_parser::{
    error::Result,
    models::Config,
    pipeline::{self, Mode, OutputFormat},
    utils::http::CachedSession,
};

/// docs-parser - Python documentation and PEP auditor
#[derive(Parser, Debug)]
#[command(name = "docs-parser", version, about = "Python documentation parser")]
struct Cli {
    /// What to extract
    #[arg(value_enum)]
    mode: Mode,

    /// Clear the HTTP cache before running
    #[arg(short, long)]
    clear_cache: bool,

    /// Output format (plain rows when omitted)
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Path to the configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

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
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("Parser started");
    log::info!("Command line arguments: {:?}", cli);

    let config = Config::load_or_default(&cli.config);
    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    let session = CachedSession::new(&config)?;
    if cli.clear_cache {
        session.clear_cache()?;
    }

    if let Some(table) = pipeline::run_mode(cli.mode, &session, &config)? {
        pipeline::control_output(&table, cli.output, cli.mode, &config)?;
    }

    log::info!("Parser finished");
    Ok(())
}
