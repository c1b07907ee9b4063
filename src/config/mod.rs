mod schema;

pub use schema::{ChartConfig, Config};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Get the config directory path (~/.config/fuzzy-blt/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("fuzzy-blt"))
}

/// Get the default config file path (~/.config/fuzzy-blt/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}

fn read_config(path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/fuzzy-blt/config.yaml) and falls back to defaults when it
///   does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            read_config(&path)
        }
        None => match get_config_path() {
            Some(path) if path.exists() => read_config(&path),
            _ => {
                debug!("no config file, using defaults");
                Ok(Config::default())
            }
        },
    }
}

/// Validate configuration values.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.top_n == 0 {
        errors.push("top_n: must be at least 1".to_string());
    }
    if config.output.as_os_str().is_empty() {
        errors.push("output: must not be empty".to_string());
    }
    if config.charts.enabled {
        if config.charts.dir.as_os_str().is_empty() {
            errors.push("charts.dir: must not be empty".to_string());
        }
        for (name, size) in [
            ("charts.scatter_size", config.charts.scatter_size),
            ("charts.curve_size", config.charts.curve_size),
        ] {
            if !(100..=10_000).contains(&size) {
                errors.push(format!("{}: {} is outside 100-10000 pixels", name, size));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
