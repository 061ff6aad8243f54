//! Logscan CLI Library
//!
//! Argument definitions, subcommand implementations and tracing setup for
//! the `logscan` binary.

pub mod args;
pub mod commands;
pub mod output;

use args::LogFormat;
use tracing_subscriber::{fmt, EnvFilter};

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Installs the global subscriber. `RUST_LOG` takes precedence over `verbose`.
///
/// Diagnostics go to stderr so stdout stays free for the report.
pub fn init_tracing(verbose: bool, format: LogFormat) {
    let default_directives = if verbose { "info,logscan=debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));
    let builder = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);
    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
