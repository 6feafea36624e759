//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.

use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Initialize the logger with optional JSON format and daily-rolling file output.
///
/// `RUST_LOG` takes precedence over `log_level` when set.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("lunchly_server={level},http_access={level},sqlx=warn"))
    });

    let writer = match log_dir.map(Path::new) {
        Some(dir) if dir.is_dir() => {
            BoxMakeWriter::new(tracing_appender::rolling::daily(dir, "lunchly-server"))
        }
        Some(dir) => {
            eprintln!("Log directory {} does not exist, logging to stdout", dir.display());
            BoxMakeWriter::new(std::io::stdout)
        }
        None => BoxMakeWriter::new(std::io::stdout),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // try_init: a second call (tests, embedded use) keeps the first subscriber
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
