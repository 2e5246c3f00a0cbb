//! Logging setup.
//!
//! The terminal belongs to the view, so log output only ever goes to a file.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Mutex, Once};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the global tracing subscriber writing to `log_path`.
///
/// Without a path nothing is installed and every `tracing` macro is a no-op.
/// Subsequent calls are ignored.
pub fn init_tracing(log_path: Option<&Path>) {
    let log_path = match log_path {
        Some(path) => path,
        None => return,
    };

    INIT.call_once(|| {
        let file = match OpenOptions::new().create(true).append(true).open(log_path) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("hexitch: cannot open log file {}: {}", log_path.display(), e);
                return;
            }
        };

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let fmt_layer = fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();

        info!(path = %log_path.display(), "hexitch tracing initialized");
    });
}
