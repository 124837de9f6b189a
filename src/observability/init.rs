//! Tracing initialization and subscriber setup.
//!
//! Configures the `tracing` subscriber with an `EnvFilter` and either standard
//! output or an append-mode log file, depending on configuration.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::Config;

/// Initializes the tracing subscriber.
///
/// # Trace Level Resolution
///
/// 1. `RUST_LOG` environment variable (highest priority)
/// 2. `config.trace_level` if set
/// 3. Default: `"info"`
///
/// # Output
///
/// Events go to standard output unless `config.log_file` names a file, in
/// which case they are appended there without ANSI escapes. Parent directories
/// are created as needed.
///
/// # Initialization Behavior
///
/// - Silently does nothing if the log file cannot be opened (observability is
///   optional)
/// - Idempotent: safe to call multiple times, only the first call takes effect
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match &config.log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if std::fs::create_dir_all(parent).is_err() {
                    return;
                }
            }
            let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
                return;
            };
            let layer = fmt::layer().with_ansi(false).with_writer(Mutex::new(file));
            let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
        }
        None => {
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer())
                .try_init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_initialization_is_harmless() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            log_file: Some(dir.path().join("logs").join("pindrop.log")),
            trace_level: Some("debug".to_string()),
            ..Config::default()
        };

        init_tracing(&config);
        init_tracing(&config);

        assert!(config.log_file.as_ref().unwrap().exists());
    }
}
