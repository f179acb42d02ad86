//! File-based logging
//!
//! The TUI owns the terminal, so all tracing output goes to a daily-rotated file.

use std::path::Path;

use anyhow::Context;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const LOG_DIR: &str = ".logs";
const LOG_FILE_PREFIX: &str = "spotify-nowplaying";
const DEFAULT_FILTER: &str = "spotify_nowplaying=debug,rspotify=info,warn";

/// Initialize logging into `.logs/spotify-nowplaying.YYYY-MM-DD.log`.
///
/// `RUST_LOG` overrides the default levels:
/// - `spotify_nowplaying` modules: DEBUG
/// - `rspotify`: INFO
/// - Other crates: WARN
pub fn init_logging() -> anyhow::Result<()> {
    init_logging_in(Path::new(LOG_DIR))
}

pub fn init_logging_in(log_dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Flushes on drop, so it has to outlive the TUI
    Box::leak(Box::new(guard));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    tracing::info!(dir = %log_dir.display(), "Logging initialized");
    Ok(())
}

/// Log the outcome of a remote call (transport, track source or lyrics)
#[macro_export]
macro_rules! log_api_result {
    ($operation:expr, $result:expr) => {
        match &$result {
            Ok(_) => tracing::debug!(operation = $operation, "API request successful"),
            Err(e) => tracing::error!(operation = $operation, error = %e, "API request failed"),
        }
    };
}

/// Log a remote call before it is awaited, with additional context
#[macro_export]
macro_rules! log_api_request {
    ($operation:expr, $($field:tt)*) => {
        tracing::debug!(operation = $operation, $($field)*, "API request started");
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn api_macros_accept_fields_and_results() {
        let uri = "spotify:track:abc";
        crate::log_api_request!("set_playback", uri = %uri, playing = true);

        let ok: anyhow::Result<()> = Ok(());
        crate::log_api_result!("set_playback", ok);
        let err: anyhow::Result<()> = Err(anyhow::anyhow!("HTTP 404"));
        crate::log_api_result!("set_playback", err);
    }

    #[test]
    fn log_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("logs");
        // a subscriber may already be installed by another test; the dir must exist either way
        let _ = super::init_logging_in(&nested);
        assert!(nested.is_dir());
    }
}
