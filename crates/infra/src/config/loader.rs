//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file into the environment if one exists
//! 2. Attempts to load from environment variables
//! 3. If the required variable is missing, falls back to loading from file
//! 4. Probes multiple paths for config files
//! 5. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `ROTA_API_BASE_URL`: Roster service base URL (required)
//! - `ROTA_API_TIMEOUT_MS`: Request timeout in milliseconds
//! - `ROTA_API_MAX_ATTEMPTS`: Attempts per idempotent request
//! - `ROTA_ERROR_TTL_MS`: Lifetime of an error notification
//! - `ROTA_HIGHLIGHT_TTL_MS`: Lifetime of violating-date highlights
//! - `ROTA_WARNING_TTL_MS`: Lifetime of generation warnings
//! - `ROTA_PEOPLE_PER_DAY`: Default headcount for generation
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./rota.json` or `./rota.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. `../rota.json` or `../rota.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use rota_domain::{ApiConfig, Config, FeedbackConfig, Result, RosterConfig, RosterError};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the base URL is
/// missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `RosterError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
pub fn load() -> Result<Config> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `ROTA_API_BASE_URL` is required; every other variable falls back to
/// its default when unset.
///
/// # Errors
/// Returns `RosterError::Config` if the base URL is missing or a numeric
/// variable does not parse.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var("ROTA_API_BASE_URL")?;
    let api_defaults = ApiConfig::default();
    let feedback_defaults = FeedbackConfig::default();
    let roster_defaults = RosterConfig::default();

    let config = Config {
        api: ApiConfig {
            base_url,
            timeout_ms: env_parse("ROTA_API_TIMEOUT_MS", api_defaults.timeout_ms)?,
            max_attempts: env_parse("ROTA_API_MAX_ATTEMPTS", api_defaults.max_attempts)?,
        },
        feedback: FeedbackConfig {
            error_ttl_ms: env_parse("ROTA_ERROR_TTL_MS", feedback_defaults.error_ttl_ms)?,
            highlight_ttl_ms: env_parse(
                "ROTA_HIGHLIGHT_TTL_MS",
                feedback_defaults.highlight_ttl_ms,
            )?,
            warning_ttl_ms: env_parse("ROTA_WARNING_TTL_MS", feedback_defaults.warning_ttl_ms)?,
        },
        roster: RosterConfig {
            default_people_per_day: env_parse(
                "ROTA_PEOPLE_PER_DAY",
                roster_defaults.default_people_per_day,
            )?,
        },
    };

    validate(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `RosterError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(RosterError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            RosterError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| RosterError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path).and_then(validate)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `RosterError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| RosterError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| RosterError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(RosterError::Config(format!("Unsupported config format: {extension}"))),
    }
}

fn validate(config: Config) -> Result<Config> {
    if config.api.base_url.trim().is_empty() {
        return Err(RosterError::Config("api.base_url must not be empty".into()));
    }
    if config.roster.default_people_per_day == 0 {
        return Err(RosterError::Config("roster.default_people_per_day must be at least 1".into()));
    }
    Ok(config)
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 4] = ["rota.json", "rota.toml", "config.json", "config.toml"];

    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd.clone());
        roots.push(cwd.join(".."));
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    roots
        .iter()
        .flat_map(|root| NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `RosterError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| RosterError::Config(format!("Missing required environment variable: {key}")))
}

/// Parse an optional environment variable, falling back to `default`.
///
/// # Errors
/// Returns `RosterError::Config` if the variable is set but does not parse.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| RosterError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}
