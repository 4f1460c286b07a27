use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can pass a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("PROFINT_ENV", "development"))?;
    let log_level = or_default("PROFINT_LOG_LEVEL", "info");
    let output_dir = PathBuf::from(or_default("PROFINT_OUTPUT_DIR", "./reports"));

    let source_url = optional("PROFINT_SOURCE_URL");
    if let Some(url) = &source_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(invalid(
                "PROFINT_SOURCE_URL",
                format!("\"{url}\" is not an http(s) URL"),
            ));
        }
    }

    let request_timeout_secs = parse_u64("PROFINT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("PROFINT_USER_AGENT", "profint/0.1 (report-generator)");
    let max_retries = parse_u32("PROFINT_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("PROFINT_RETRY_BACKOFF_BASE_MS", "1000")?;

    let post_limit = parse_usize("PROFINT_POST_LIMIT", "100")?;
    if post_limit == 0 {
        return Err(invalid(
            "PROFINT_POST_LIMIT",
            "must be greater than zero".to_string(),
        ));
    }

    let thresholds_path = optional("PROFINT_THRESHOLDS_PATH").map(PathBuf::from);

    Ok(AppConfig {
        env,
        log_level,
        output_dir,
        source_url,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        post_limit,
        thresholds_path,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PROFINT_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
