// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the IssueLens binary.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging to stderr.
//! Log level can be controlled via the `RUST_LOG` environment variable.
//!
//! # Examples
//!
//! ```bash
//! # Default for `serve`: info level for issuelens, errors only for reqwest
//! issuelens serve
//!
//! # Debug output for troubleshooting
//! RUST_LOG=issuelens=debug issuelens analyze https://github.com/owner/repo 1
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging subsystem.
///
/// `analyze` keeps stderr quiet unless something goes wrong, while `serve`
/// logs request activity. `verbose` raises both to debug. `RUST_LOG`
/// overrides everything.
///
/// # Arguments
///
/// * `serving` - Whether the HTTP server is being started
/// * `verbose` - Whether debug logging was requested (-v flag)
pub fn init_logging(serving: bool, verbose: bool) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let default_filter = match (verbose, serving) {
        (true, _) => "issuelens=debug,reqwest=error",
        (false, true) => "issuelens=info,reqwest=error",
        (false, false) => "issuelens=warn,reqwest=error",
    };
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
