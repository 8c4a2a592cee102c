//! Logger initialisation for hosts embedding the renderer.
//!
//! The library itself only emits through the `log` facade. Hosts without a
//! logger of their own (the Python extension, small tools) call
//! [`init_logging`] once to get `env_logger` output.

use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` uses `env_logger` filter syntax, e.g. `"info"` or
/// `"imagestag_text=debug"`. When unset, `RUST_LOG` is consulted, then
/// `warn` is used.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
}

static INIT: Once = Once::new();

/// Install the global logger. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Warn);
        }

        // Another logger may already be installed by the host
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
