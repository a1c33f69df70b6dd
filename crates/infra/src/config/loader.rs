//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Load `.env` from the working directory, if present
//! 2. Read the explicit config file, or the first file found by
//!    [`probe_config_paths`]; with no file, start from defaults
//! 3. Apply `TRAK_*` environment overrides
//! 4. Validate
//!
//! ## Environment Variables
//! - `TRAK_API_URL`: backend base URL
//! - `TRAK_API_TIMEOUT`: request timeout in seconds
//! - `TRAK_API_MAX_ATTEMPTS`: attempts per request
//! - `TRAK_REFRESH_INTERVAL_MS`: display refresh period
//! - `TRAK_LOG_LEVEL`: log filter, e.g. `info` or `trak_core=debug`
//! - `TRAK_LOG_JSON`: JSON log output (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./trak.toml` or `./trak.json` (current working directory)
//! 2. `./config.toml` or `./config.json` (current working directory)
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use trak_domain::{Config, Result, TrakError};

const FILE_NAMES: [&str; 4] = ["trak.toml", "trak.json", "config.toml", "config.json"];

/// Load configuration from file and environment
///
/// # Errors
/// Returns `TrakError::Config` if:
/// - An explicit `path` does not exist
/// - The file format is invalid
/// - An environment override does not parse
/// - The resulting configuration fails validation
pub fn load(path: Option<PathBuf>) -> Result<Config> {
    if let Ok(env_file) = dotenvy::dotenv() {
        tracing::debug!(path = %env_file.display(), "Loaded .env file");
    }

    let mut config = match path.or_else(probe_config_paths) {
        Some(path) => load_from_file(&path)?,
        None => {
            tracing::debug!("No config file found, using defaults");
            Config::default()
        }
    };

    apply_env_overrides(&mut config)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// Supports both JSON and TOML formats (detected by file extension). Missing
/// sections and fields take their defaults.
///
/// # Errors
/// Returns `TrakError::Config` if the file cannot be read or parsed.
pub fn load_from_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(TrakError::Config(format!("Config file not found: {}", path.display())));
    }

    tracing::info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| TrakError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| TrakError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| TrakError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(TrakError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

/// Apply `TRAK_*` environment variables on top of `config`
///
/// # Errors
/// Returns `TrakError::Config` when a numeric override does not parse.
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    apply_overrides(config, |key| std::env::var(key).ok())
}

fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("TRAK_API_URL") {
        config.api.base_url = url;
    }
    if let Some(timeout) = parse_var(&lookup, "TRAK_API_TIMEOUT")? {
        config.api.timeout_secs = timeout;
    }
    if let Some(attempts) = parse_var(&lookup, "TRAK_API_MAX_ATTEMPTS")? {
        config.api.max_attempts = attempts;
    }
    if let Some(interval) = parse_var(&lookup, "TRAK_REFRESH_INTERVAL_MS")? {
        config.display.refresh_interval_ms = interval;
    }
    if let Some(level) = lookup("TRAK_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = lookup("TRAK_LOG_JSON") {
        config.logging.json = parse_bool(&json);
    }
    Ok(())
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| TrakError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}

/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn parse_bool(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
