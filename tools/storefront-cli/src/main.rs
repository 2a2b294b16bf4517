//! Storefront CLI - Browse the catalog and drive shopper sessions.
//!
//! Commands:
//! - `storefront browse` - List products with a filter and sort
//! - `storefront categories` - Show category chips with counts
//! - `storefront run` - Run a scripted shopper session
//! - `storefront replay` - Replay a recorded session and diff the result
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;
mod script;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::{BrowseArgs, ConfigArgs, ReplayArgs, RunArgs};
use config::LoggingConfig;

/// Storefront CLI - Browse the catalog and run shopper sessions
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the projected product grid
    Browse(BrowseArgs),

    /// Show category chips with product counts
    Categories,

    /// Run a scripted shopper session
    Run(RunArgs),

    /// Replay a recorded session and compare the outcome
    Replay(ReplayArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    init_tracing(&ctx.config.logging, cli.verbose);
    match &ctx.config_path {
        Some(path) => debug!(path = %path.display(), "using config file"),
        None => debug!("no config file found, using defaults"),
    }

    // Execute command
    let result = match cli.command {
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Categories => commands::categories::run(&ctx).await,
        Commands::Run(args) => commands::run::run(args, &ctx).await,
        Commands::Replay(args) => commands::replay::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Install the stderr subscriber. `RUST_LOG` wins over the config level.
fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let default_level = if verbose { "debug" } else { logging.level.as_str() };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
