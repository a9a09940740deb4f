//! Logging setup for the CLI binary and manual test runs.

use std::path::Path;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, EnvFilter};

static GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
static INIT: OnceLock<()> = OnceLock::new();

fn filter(default_filter: &str) -> EnvFilter {
    if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(default_filter).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Plain-text logging to stderr. `RUST_LOG` overrides `default_filter`.
/// Safe to call more than once; later calls are no-ops.
pub fn init_stderr_logging(default_filter: &str) {
    INIT.get_or_init(|| {
        let subscriber = fmt()
            .with_env_filter(filter(default_filter))
            .with_writer(std::io::stderr)
            .with_target(true)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// Non-blocking logging to a file, for long perft or self-play runs.
pub fn init_file_logging<P: AsRef<Path>>(path: P, default_filter: &str) {
    INIT.get_or_init(|| {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .expect("open log file");

        let (writer, guard) = tracing_appender::non_blocking(file);
        let _ = GUARD.set(guard);

        let subscriber = fmt()
            .with_env_filter(filter(default_filter))
            .with_ansi(false)
            .with_target(true)
            .with_writer(writer)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
