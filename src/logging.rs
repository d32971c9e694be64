// src/logging.rs

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter for a verbosity setting; `RUST_LOG` takes precedence.
pub fn default_filter(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "info,ponylist=debug",
        (false, _) => "debug,ponylist=trace",
    }
}

/// Install the global subscriber. Logs go to stderr so stdout only carries
/// the summary and verbose row dump.
pub fn init_logging(default: &str) -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("initialising logging: {}", e))
}
