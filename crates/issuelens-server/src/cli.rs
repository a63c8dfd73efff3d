// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for IssueLens.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// IssueLens - LLM-assisted GitHub issue classification.
///
/// Fetches a GitHub issue with its comments and asks an LLM for a summary,
/// type, priority, labels, and impact.
#[derive(Parser)]
#[command(name = "issuelens")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Config file path (defaults to ~/.config/issuelens/config.toml)
    #[arg(long, short = 'c', global = true, env = "ISSUELENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug-level logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides config)
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },

    /// Analyze a single issue and print the result as JSON
    Analyze {
        /// Repository URL (e.g., https://github.com/owner/repo)
        repo_url: String,

        /// Issue number
        issue_number: u64,
    },
}

impl Commands {
    /// Whether this command runs the long-lived server.
    pub fn is_serve(&self) -> bool {
        matches!(self, Commands::Serve { .. })
    }
}
