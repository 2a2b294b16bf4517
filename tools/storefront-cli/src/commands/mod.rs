//! CLI command implementations.

pub mod browse;
pub mod categories;
pub mod config;
pub mod replay;
pub mod run;

use clap::{Args, Subcommand};

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Category chip to filter by ("all" shows everything).
    #[arg(short = 'C', long, default_value = "all")]
    pub category: String,

    /// Sort order: featured, newest, price-low, price-high, rating.
    #[arg(short, long, default_value = "featured")]
    pub sort: String,
}

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Script file (TOML or JSON).
    pub script: String,

    /// Sleep through scripted waits instead of jumping the clock.
    #[arg(long)]
    pub realtime: bool,

    /// Save a recording under this name.
    #[arg(short, long)]
    pub record: Option<String>,

    /// Record with a generated name.
    #[arg(long, conflicts_with = "record")]
    pub auto_record: bool,
}

/// Arguments for the replay command.
#[derive(Args)]
pub struct ReplayArgs {
    #[command(subcommand)]
    pub command: ReplayCommand,
}

#[derive(Subcommand)]
pub enum ReplayCommand {
    /// List recordings.
    List,
    /// Show a recording's steps.
    Show {
        /// Recording name or file path.
        recording: String,
    },
    /// Replay a recording and compare the end state.
    Verify {
        /// Recording name or file path.
        recording: String,
    },
    /// Delete a recording.
    Delete {
        /// Recording name.
        recording: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
