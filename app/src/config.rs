use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::info;
use nodegraph::EngineConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOG_FILTER: &str = "info";

/// User settings, stored as TOML in the platform config directory.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Class whose nodes `run` starts from.
    pub entry_class: String,
    pub engine: EngineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            entry_class: "event.update".to_string(),
            engine: EngineConfig::default(),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "nodegraph", "nodegraph").map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn parse_config(toml_str: &str) -> Result<AppConfig> {
    toml::from_str(toml_str).context("Failed to parse config file")
}

/// Reads the config. A missing file yields the defaults; a file that cannot
/// be read or parsed is an error the caller may downgrade to a warning.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let Some(path) = path.map(Path::to_path_buf).or_else(default_config_path) else {
        return Ok(AppConfig::default());
    };
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let toml_str =
        fs::read_to_string(&path).with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_config(&toml_str)
}

pub fn save_config(config: &AppConfig, path: Option<&Path>) -> Result<PathBuf> {
    let path = path
        .map(Path::to_path_buf)
        .or_else(default_config_path)
        .context("No config directory available on this platform")?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create config directory {}", dir.display()))?;
    }
    let toml_str = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(&path, toml_str).with_context(|| format!("Failed to write config file {}", path.display()))?;
    info!("Config saved to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = parse_config(
            r#"
            entry_class = "event.start"

            [engine]
            max_depth = 32
            "#,
        )
        .unwrap();
        assert_eq!(config.entry_class, "event.start");
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.engine.max_depth, 32);
        assert_eq!(config.engine.first_node_id, 1);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(parse_config("engine = 3").is_err());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            log_filter: "debug".into(),
            ..AppConfig::default()
        };

        save_config(&config, Some(&path)).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
