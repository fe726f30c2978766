use std::io;

use configs::{LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, EnvFilter};

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Initialize the tracing subscriber from the `[logging]` config section.
/// - `RUST_LOG` wins over `logging.filter`
/// - output goes to stdout, compact or JSON
/// - calling it twice is harmless (the second init is ignored)
pub fn init_logging(cfg: &LoggingConfig) {
    match cfg.format {
        LogFormat::Compact => {
            let _ = fmt()
                .with_env_filter(env_filter(&cfg.filter))
                .with_target(false)
                .compact()
                .with_writer(io::stdout)
                .try_init();
        }
        LogFormat::Json => {
            let _ = fmt()
                .with_env_filter(env_filter(&cfg.filter))
                .with_target(false)
                .json()
                .with_writer(io::stdout)
                .try_init();
        }
    }
}

/// Compact output with the default filter; used before the config is available.
pub fn init_logging_default() {
    init_logging(&LoggingConfig::default());
}
