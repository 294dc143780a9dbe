//! Logging Infrastructure
//!
//! `tracing-subscriber` with an env filter; optional daily rolling file output.

use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Initialize the logger (stdout only)
pub fn init_logger() {
    init_logger_with_file(None, false, None);
}

/// Initialize the logger with optional JSON format and file output
///
/// `RUST_LOG` takes precedence over `log_level`. Returns silently if a global
/// subscriber is already installed (tests).
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&Path>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},surrealdb=warn,tower_http=info")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    let file_dir = log_dir.filter(|dir| dir.exists());

    let result = match (file_dir, json) {
        (Some(dir), true) => {
            let file_appender = tracing_appender::rolling::daily(dir, "pos-server");
            builder
                .json()
                .with_writer(std::io::stdout.and(file_appender))
                .try_init()
        }
        (Some(dir), false) => {
            let file_appender = tracing_appender::rolling::daily(dir, "pos-server");
            builder
                .with_writer(std::io::stdout.and(file_appender))
                .try_init()
        }
        (None, true) => builder.json().try_init(),
        (None, false) => builder.try_init(),
    };

    if result.is_err() {
        tracing::debug!("Global logger already initialized");
    }
}
