use chrono_tz::Tz;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let openai_api_key = require("OPENAI_API_KEY")?;
    let bundle_api_key = require("BUNDLE_API_KEY")?;

    let team_ids = parse_team_ids(&require("TRENDPIN_TEAM_IDS")?)?;

    let board_name = or_default("TRENDPIN_BOARD_NAME", "Amazon Finds");
    let model = or_default("TRENDPIN_MODEL", "gpt-5-mini-nano");
    let openai_base_url = or_default("TRENDPIN_OPENAI_BASE_URL", "https://api.openai.com/v1");
    let bundle_base_url = or_default(
        "TRENDPIN_BUNDLE_BASE_URL",
        "https://api.bundle.social/api/v1",
    );
    let timezone = parse_timezone(&or_default("TRENDPIN_TIMEZONE", "America/New_York"))?;
    let affiliate_tag = or_default("TRENDPIN_AFFILIATE_TAG", "h2nter-20");
    let image_timeout_secs = parse_u64("TRENDPIN_IMAGE_TIMEOUT_SECS", "10")?;
    let log_level = or_default("TRENDPIN_LOG_LEVEL", "info");

    Ok(AppConfig {
        openai_api_key,
        bundle_api_key,
        team_ids,
        board_name,
        model,
        openai_base_url,
        bundle_base_url,
        timezone,
        affiliate_tag,
        image_timeout_secs,
        log_level,
    })
}

/// Parse a comma-separated team-id list, trimming entries and dropping empties.
///
/// The posting order is the order ids appear in the variable.
fn parse_team_ids(raw: &str) -> Result<Vec<String>, ConfigError> {
    let ids: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();

    if ids.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "TRENDPIN_TEAM_IDS".to_string(),
            reason: "expected at least one team id".to_string(),
        });
    }
    Ok(ids)
}

/// Parse an IANA time-zone name (e.g. `America/New_York`) into a [`Tz`].
fn parse_timezone(raw: &str) -> Result<Tz, ConfigError> {
    raw.parse::<Tz>().map_err(|e| ConfigError::InvalidEnvVar {
        var: "TRENDPIN_TIMEZONE".to_string(),
        reason: e.to_string(),
    })
}
