//! Application configuration loading from config.toml and the environment.
//!
//! The optional `config.toml` carries deployment settings; the
//! `DATABASE_URL` environment variable (usually via `.env`) overrides the
//! file. Everything has a working default so a fresh checkout runs as-is.

use crate::config::database::DEFAULT_DATABASE_URL;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Settings parsed from `config.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    /// Database connection string
    pub database_url: Option<String>,
    /// Workshop display name used on exports and the storefront
    pub workshop_name: Option<String>,
}

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database connection string
    pub database_url: String,
    /// Workshop display name
    pub workshop_name: String,
}

/// Parses a TOML configuration file.
///
/// # Errors
/// Returns [`Error::Config`] if the file cannot be read or is not valid TOML.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Resolves the effective configuration: `DATABASE_URL` from the environment
/// wins, then `config.toml` (if present), then the built-in defaults.
pub fn load() -> Result<AppConfig> {
    let file = match std::fs::metadata("config.toml") {
        Ok(_) => load_file("config.toml")?,
        Err(_) => FileConfig::default(),
    };

    Ok(resolve(file, std::env::var("DATABASE_URL").ok()))
}

/// Applies the layering: env var over file settings over defaults.
fn resolve(file: FileConfig, env_database_url: Option<String>) -> AppConfig {
    let database_url = env_database_url
        .or(file.database_url)
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

    AppConfig {
        database_url,
        workshop_name: file.workshop_name.unwrap_or_else(|| "Oficina".to_string()),
    }
}
