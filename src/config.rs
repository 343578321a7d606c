use crate::model::policy::Field;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Inputs offered to the first model of every policy
    #[serde(default = "default_inputs")]
    pub default_inputs: Vec<Field>,
    /// Model types the draft form cycles through
    #[serde(default = "default_model_types")]
    pub model_types: Vec<String>,
    /// tracing filter directive, e.g. "info" or "policy_tui=debug"
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_inputs() -> Vec<Field> {
    vec![Field::new("raw", "string")]
}

fn default_model_types() -> Vec<String> {
    vec![
        "Morphline".to_string(),
        "DateTime".to_string(),
        "Type".to_string(),
    ]
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_inputs: default_inputs(),
            model_types: default_model_types(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".policy-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Default log file next to the config
    pub fn log_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("policy-tui.log"))
    }

    /// Load the config from `path`, or from the default location
    ///
    /// A missing file is written with defaults so the user has something to
    /// edit; a file that exists but does not parse is an error.
    pub fn load_or_init(path: Option<&Path>) -> anyhow::Result<Config> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()
                .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?,
        };

        if config_path.exists() {
            return Self::load_from(&config_path);
        }

        let config = Config::default();
        config.save_to(&config_path)?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Config> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Save the config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path(name: &str) -> PathBuf {
        env::temp_dir()
            .join(format!("policy-tui-test-{}-{}", name, std::process::id()))
            .join("config.json")
    }

    #[test]
    fn test_load_or_init_writes_defaults() {
        let path = temp_config_path("init");
        let _ = fs::remove_file(&path);

        let config = Config::load_or_init(Some(&path)).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_partial_config_fills_defaults() {
        let path = temp_config_path("partial");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"model_types": ["Geo"]}"#).unwrap();

        let config = Config::load_or_init(Some(&path)).unwrap();
        assert_eq!(config.model_types, vec!["Geo".to_string()]);
        assert_eq!(config.default_inputs, vec![Field::new("raw", "string")]);
        assert_eq!(config.log_level, "info");

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_invalid_config_is_error() {
        let path = temp_config_path("invalid");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        let err = Config::load_or_init(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
