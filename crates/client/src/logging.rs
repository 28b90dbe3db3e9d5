//! Logging bootstrap for the terminal client.
//!
//! The TUI owns the terminal, so tracing output goes to a log file
//! only - never to stdout/stderr.

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Setup logging to `<cache dir>/warboard/logs/client.log`.
pub fn setup_logging() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer().with_writer(non_blocking_file);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Keep the non-blocking writer alive for the process lifetime.
    std::mem::forget(guard);

    tracing::info!("Logging initialized: {}/client.log", log_dir.display());
    Ok(())
}

/// Platform-appropriate log directory.
fn log_directory() -> std::path::PathBuf {
    if let Some(xdg_cache) = std::env::var_os("XDG_CACHE_HOME") {
        let mut path = std::path::PathBuf::from(xdg_cache);
        path.push("warboard");
        path.push("logs");
        return path;
    }
    if let Some(home) = std::env::var_os("HOME") {
        let mut path = std::path::PathBuf::from(home);
        path.push(".cache");
        path.push("warboard");
        path.push("logs");
        return path;
    }
    std::path::PathBuf::from("logs")
}
