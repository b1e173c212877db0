use crate::app_config::{AppConfig, DEFAULT_USER_AGENT};
use crate::ConfigError;

/// Load scraper configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var cannot be parsed or is out of range.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load scraper configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var cannot be parsed or is out of range.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function, so the
/// parsing rules can be tested against a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("LOG_LEVEL", "info");
    let cookies = lookup("STORELEADS_COOKIES")
        .ok()
        .filter(|c| !c.trim().is_empty());
    let user_agent = or_default("STORELEADS_USER_AGENT", DEFAULT_USER_AGENT);

    let request_timeout_secs = parse_u64("STORELEADS_REQUEST_TIMEOUT_SECS", "20")?;
    let max_attempts = parse_u32("STORELEADS_MAX_ATTEMPTS", "3")?;
    if max_attempts == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "STORELEADS_MAX_ATTEMPTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let retry_backoff_base_ms = parse_u64("STORELEADS_RETRY_BACKOFF_BASE_MS", "400")?;
    let retry_backoff_max_ms = parse_u64("STORELEADS_RETRY_BACKOFF_MAX_MS", "3000")?;

    Ok(AppConfig {
        log_level,
        cookies,
        user_agent,
        request_timeout_secs,
        max_attempts,
        retry_backoff_base_ms,
        retry_backoff_max_ms,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
