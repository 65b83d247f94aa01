use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Browser-like identification sent with every outbound request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const DEFAULT_SITE_BASE_URL: &str = "https://www.flipkart.com";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
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
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable config.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be greater than zero".to_string()));
        }
        Ok(value)
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>().map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("REVIEWLENS_ENV", "development"))?;

    let bind_addr = or_default("REVIEWLENS_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("REVIEWLENS_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("REVIEWLENS_LOG_LEVEL", "info");

    let site_base_url = or_default("REVIEWLENS_SITE_BASE_URL", DEFAULT_SITE_BASE_URL)
        .trim_end_matches('/')
        .to_string();
    if !(site_base_url.starts_with("http://") || site_base_url.starts_with("https://")) {
        return Err(invalid(
            "REVIEWLENS_SITE_BASE_URL",
            format!("\"{site_base_url}\" must start with http:// or https://"),
        ));
    }
    let user_agent = or_default("REVIEWLENS_USER_AGENT", DEFAULT_USER_AGENT);

    let search_timeout_secs = parse_u64("REVIEWLENS_SEARCH_TIMEOUT_SECS", "15")?;
    let product_timeout_secs = parse_u64("REVIEWLENS_PRODUCT_TIMEOUT_SECS", "15")?;
    let review_timeout_secs = parse_u64("REVIEWLENS_REVIEW_TIMEOUT_SECS", "25")?;
    let pagination_timeout_secs = parse_u64("REVIEWLENS_PAGINATION_TIMEOUT_SECS", "15")?;

    let charts_dir = PathBuf::from(or_default("REVIEWLENS_CHARTS_DIR", "./static/charts"));
    let chart_retention = parse_usize("REVIEWLENS_CHART_RETENTION", "16")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        site_base_url,
        user_agent,
        search_timeout_secs,
        product_timeout_secs,
        review_timeout_secs,
        pagination_timeout_secs,
        charts_dir,
        chart_retention,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "REVIEWLENS_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
