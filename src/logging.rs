//! Structured logging setup for the command line front end.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Install a stderr `tracing` subscriber.
///
/// `verbose` raises the crate's own level to `debug` on top of the default filter so stdout
/// stays reserved for resolved output.
pub fn init_logging(verbose: bool) -> Result<()> {
  let fallback = if verbose {
    format!("{DEFAULT_FILTER},upload_url_resolver=debug")
  } else {
    DEFAULT_FILTER.to_string()
  };
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

  tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init()
    .map_err(|err| anyhow!("failed to install log subscriber: {err}"))?;

  tracing::debug!("logging initialized");
  Ok(())
}
