//! Structured Logger
//!
//! Wraps `tracing` with a human console layer on stderr (stdout carries
//! rendered HTML) and a JSON layer on a daily rolling file.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name prefix of the rolling log, e.g. `chatforge.log.2026-10-17`.
pub const LOG_FILE_PREFIX: &str = "chatforge.log";

/// Initialize the global logger. `RUST_LOG` takes precedence over `level`.
///
/// When the log directory cannot be created only the console layer is
/// installed. Calling it twice is harmless; the second call is ignored.
pub fn init_logger<P: AsRef<Path>>(log_dir: P, level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(log_dir.as_ref());
    let file_failure = file_appender.as_ref().err().map(ToString::to_string);

    let file_layer = file_appender.ok().map(|appender| {
        fmt::layer()
            .json()
            .with_writer(appender)
            .with_ansi(false)
    });

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true);

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_ok();

    if let (true, Some(error)) = (installed, file_failure) {
        tracing::warn!(dir = %log_dir.as_ref().display(), %error, "File logging disabled");
    }
}
