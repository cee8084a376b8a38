//! Log output for the dirgraph client.
//!
//! Every dispatcher attempt runs inside an `attempt` span carrying the
//! request's `client-request-id` and the endpoint it was sent to, so a line in
//! the log can be matched against the service's own request logs:
//!
//! ```text
//! WARN attempt{request_id=7c9e.. endpoint=https://graph.windows.net/contoso.com}: ...
//! ```

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "dirgraph.log";

/// Used when `RUST_LOG` is unset: attempt-level detail from the client crates only.
pub const DEFAULT_FILTER: &str = "info,dirgraph=debug,dirgraph_core=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `$XDG_STATE_HOME/dirgraph`, where the log file lives.
pub fn log_dir() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dirgraph")?;
    Ok(xdg_dirs.get_state_home())
}

/// Create `dir` if needed and open its log file for appending.
fn open_log_file(dir: &Path) -> Result<(File, PathBuf)> {
    fs::create_dir_all(dir).with_context(|| format!("create log dir {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;
    Ok((file, path))
}

/// Send logs to `$XDG_STATE_HOME/dirgraph/dirgraph.log`.
///
/// Fails if the file cannot be opened or a subscriber is already installed;
/// the CLI then calls [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let (file, path) = open_log_file(&log_dir()?)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {}", e))?;

    tracing::info!("logging to {}", path.display());
    Ok(())
}

/// Send logs to stderr. Never fails; a second install is ignored.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
