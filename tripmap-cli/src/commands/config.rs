//! Configuration management CLI commands.
//!
//! `config get`, `config set`, `config list` and `config path` over
//! `~/.tripmap/config.ini`. A file that fails to parse is reported and never
//! rewritten.

use std::path::Path;

use clap::Subcommand;
use tracing::info;
use tripmap::config::{config_file_path, ConfigFile, ConfigKey};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key in format section.key (e.g., proxy.base_url)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key in format section.key (e.g., proxy.base_url)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Placeholder shown for empty values.
const NOT_SET: &str = "(not set)";

/// Run a config subcommand against the default config file.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    let path = config_file_path();

    match command {
        ConfigCommands::Get { key } => println!("{}", get_value(&path, &key)?),
        ConfigCommands::Set { key, value } => {
            let key = set_value(&path, &key, &value)?;
            println!("{} = {}", key.name(), value);
        }
        ConfigCommands::List => {
            let config = ConfigFile::load_from(&path)?;
            println!("# {}", path.display());
            print!("{}", render_settings(&config));
        }
        ConfigCommands::Path => println!("{}", path.display()),
    }

    Ok(())
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Run 'tripmap config list' for the available keys.",
            key
        ))
    })
}

/// Reads one value from the file at `path`.
fn get_value(path: &Path, key: &str) -> Result<String, CliError> {
    let key = parse_key(key)?;
    let value = key.get(&ConfigFile::load_from(path)?);
    Ok(if value.is_empty() {
        NOT_SET.to_string()
    } else {
        value
    })
}

/// Validates and writes one value, keeping every other setting.
fn set_value(path: &Path, key: &str, value: &str) -> Result<ConfigKey, CliError> {
    let key = parse_key(key)?;
    let mut config = ConfigFile::load_from(path)?;

    key.set(&mut config, value)
        .map_err(|e| CliError::Config(e.to_string()))?;
    config.save_to(path)?;

    info!(key = key.name(), path = %path.display(), "Configuration updated");
    Ok(key)
}

/// One `section.key  value` line per key, names padded to a common width.
fn render_settings(config: &ConfigFile) -> String {
    let width = ConfigKey::all()
        .iter()
        .map(|key| key.name().len())
        .max()
        .unwrap_or(0);

    ConfigKey::all()
        .iter()
        .map(|key| {
            let value = key.get(config);
            let value = if value.is_empty() { NOT_SET } else { value.as_str() };
            format!("{:<width$}  {}\n", key.name(), value, width = width)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const BROKEN: &str = "\
[proxy]
base_url = https://trip.example.com
bearer_token = jwt-secret

[map]
zoom = -1
";

    fn write_config(dir: &TempDir, text: &str) -> std::path::PathBuf {
        let path = dir.path().join("config.ini");
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_set_refuses_to_overwrite_unparsable_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, BROKEN);

        let result = set_value(&path, "batch.delay_ms", "100");

        assert!(matches!(result, Err(CliError::Config(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), BROKEN);
    }

    #[test]
    fn test_get_reports_unparsable_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, BROKEN);

        let err = get_value(&path, "proxy.base_url").unwrap_err();
        assert!(err.to_string().contains("zoom"));
    }

    #[test]
    fn test_set_keeps_other_settings() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "[proxy]\nbase_url = https://trip.example.com\nbearer_token = jwt-secret\n",
        );

        set_value(&path, "batch.delay_ms", "100").unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.proxy.base_url, "https://trip.example.com");
        assert_eq!(config.proxy.bearer_token.as_deref(), Some("jwt-secret"));
        assert_eq!(config.batch.delay_ms, 100);
    }

    #[test]
    fn test_set_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        set_value(&path, "geocoder.city", "杭州").unwrap();
        assert_eq!(get_value(&path, "geocoder.city").unwrap(), "杭州");
    }

    #[test]
    fn test_invalid_value_is_rejected_before_saving() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");

        assert!(set_value(&path, "map.zoom", "-3").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_unknown_key() {
        let dir = TempDir::new().unwrap();
        let err = get_value(&dir.path().join("config.ini"), "proxy.nope").unwrap_err();
        assert!(err.to_string().contains("proxy.nope"));
    }

    #[test]
    fn test_render_lists_every_key() {
        let rendered = render_settings(&ConfigFile::default());
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), ConfigKey::all().len());
        assert!(lines
            .iter()
            .any(|l| l.starts_with("proxy.bearer_token") && l.ends_with(NOT_SET)));
        assert!(lines.iter().any(|l| l.starts_with("batch.delay_ms") && l.ends_with("500")));
    }
}
