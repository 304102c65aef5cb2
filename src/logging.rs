//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::EnvConfig;

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Builds the filter from `TASKGPT_LOG`; `TASKGPT_DEBUG=1` without an explicit
/// filter raises the default to `debug`.
pub fn env_filter(config: &EnvConfig) -> EnvFilter {
    let fallback = if config.debug { "debug" } else { DEFAULT_LOG_FILTER };
    config
        .log_filter
        .as_deref()
        .and_then(|filter| EnvFilter::try_new(filter).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

/// Installs a global fmt subscriber. Returns `false` if one was already set.
pub fn init_logging(config: &EnvConfig) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(true)
        .try_init()
        .is_ok()
}
