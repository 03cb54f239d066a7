//! Logging setup with dual output (stdout + a debug log file)

use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// File the second layer writes to, in the working directory
pub const DEBUG_LOG_FILE: &str = "debug.log";

/// Directive used when `RUST_LOG` is unset or unparsable
pub const DEFAULT_DIRECTIVE: &str = "info";

fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Initialize logging with dual output: stdout + [`DEBUG_LOG_FILE`]
///
/// Both outputs use the level from `RUST_LOG`, defaulting to `info`. The file
/// layer is written without ANSI colours by a non-blocking appender whose
/// guard lives for the rest of the process.
pub fn init_dual_logging() {
    let file_appender = tracing_appender::rolling::never(".", DEBUG_LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_filter(filter_from_env()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(filter_from_env()),
        )
        .init();

    // Dropping the guard would stop the file writer
    std::mem::forget(guard);
}
