// SPDX-License-Identifier: Apache-2.0

//! IssueLens - LLM-assisted GitHub issue classification.
//!
//! Runs the HTTP API or analyzes a single issue from the command line.

mod cli;
mod logging;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use issuelens_core::{Credentials, EnvTokenProvider, Pipeline, config};
use issuelens_server::{AppState, run_http};
use tracing::debug;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.command.is_serve(), cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    }
    .context("Failed to load configuration")?;
    debug!("Configuration loaded successfully");

    // Credentials are captured once; handlers never read the environment.
    let credentials = Credentials::from_provider(&EnvTokenProvider);

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let state = AppState::from_config(&config, &credentials)
                .context("Failed to initialize server")?;
            run_http(&config.server.host, config.server.port, state).await
        }
        Commands::Analyze {
            repo_url,
            issue_number,
        } => {
            let pipeline = Pipeline::from_config(&config, &credentials)?;
            let result = pipeline.handle(&repo_url, issue_number).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
    }
}
