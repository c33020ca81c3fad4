//! Diagnostic logging setup.
//!
//! Logs go to stderr, filtered by `CLIPFORGE_LOG` (an `EnvFilter` directive)
//! or by the `-v` count. Runs started from a keyboard shortcut have no
//! terminal, so `CLIPFORGE_LOG_FILE` redirects logs to a file instead.
//! Log files get unique names (`{path}.{timestamp}.{pid}`) so concurrent
//! runs never interleave.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter directive override.
pub const LOG_ENV_VAR: &str = "CLIPFORGE_LOG";

/// Log file base path.
pub const LOG_FILE_ENV_VAR: &str = "CLIPFORGE_LOG_FILE";

/// Filter used when `CLIPFORGE_LOG` is unset.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// `{base}.{timestamp}.{pid}`
pub fn unique_log_path(base: &str, timestamp: u64, pid: u32) -> PathBuf {
    PathBuf::from(format!("{}.{}.{}", base, timestamp, pid))
}

/// Install the global subscriber. Safe to call once per process.
///
/// If the log file cannot be created, logs go to stderr instead.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    if let Some(file) = std::env::var(LOG_FILE_ENV_VAR)
        .ok()
        .filter(|p| !p.is_empty())
        .and_then(|base| open_log_file(&base))
    {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(true)
            .try_init();
        return;
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Create this process's log file under `base`, or `None` with a warning.
fn open_log_file(base: &str) -> Option<File> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let path = unique_log_path(base, timestamp, std::process::id());

    match File::create(&path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!(
                "Warning: failed to create log file {}: {} (logging to stderr)",
                path.display(),
                e
            );
            None
        }
    }
}
