//! Node configuration: defaults, then environment, then command-line flags.

use marble_exchange::ExchangeConfig;
use tracing::{info, warn};

/// Horizon base URL override.
pub const ENV_HORIZON_URL: &str = "MARBLE_HORIZON_URL";
/// Horizon request timeout override, in seconds.
pub const ENV_HORIZON_TIMEOUT: &str = "MARBLE_HORIZON_TIMEOUT_SECS";
/// Argument length bound override.
pub const ENV_MAX_ARG_LEN: &str = "MARBLE_MAX_ARG_LEN";

/// Load configuration from the process environment.
pub fn load_config() -> ExchangeConfig {
    load_config_from(|key| std::env::var(key).ok())
}

/// Load configuration, reading overrides through `lookup`.
pub fn load_config_from(lookup: impl Fn(&str) -> Option<String>) -> ExchangeConfig {
    let mut config = ExchangeConfig::default();

    if let Some(url) = lookup(ENV_HORIZON_URL) {
        info!("[marbles] Horizon URL from environment: {}", url);
        config.horizon.base_url = url;
    }

    if let Some(secs) = lookup(ENV_HORIZON_TIMEOUT) {
        match secs.parse() {
            Ok(s) => config.horizon.request_timeout_secs = s,
            Err(_) => warn!("{} must be a whole number of seconds", ENV_HORIZON_TIMEOUT),
        }
    }

    if let Some(len) = lookup(ENV_MAX_ARG_LEN) {
        match len.parse::<usize>() {
            Ok(n) if n > 0 => config.validation.max_argument_len = n,
            _ => warn!("{} must be a positive integer", ENV_MAX_ARG_LEN),
        }
    }

    config
}

/// Apply command-line overrides on top of `config`.
pub fn apply_overrides(
    mut config: ExchangeConfig,
    horizon_url: Option<String>,
    timeout_secs: Option<u64>,
) -> ExchangeConfig {
    if let Some(url) = horizon_url {
        config.horizon.base_url = url;
    }
    if let Some(secs) = timeout_secs {
        config.horizon.request_timeout_secs = secs;
    }
    config
}
