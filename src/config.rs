use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::network::auth::DEFAULT_REGISTER_PATH;
use crate::network::webhook::DEFAULT_WEBHOOK_URL;

pub const DEFAULT_CONFIG_PATH: &str = "config/chat.json";
pub const DEFAULT_DB_PATH: &str = "data/chat.db";

pub const ENV_WEBHOOK_URL: &str = "CHAT_WEBHOOK_URL";
pub const ENV_API_URL: &str = "CHAT_API_URL";
pub const ENV_DB_PATH: &str = "CHAT_DB_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_webhook_url")]
    pub webhook_url: String,
    /// Base URL of the login/registration API; auth screens are disabled without it.
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default = "default_register_path")]
    pub register_path: String,
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            webhook_url: default_webhook_url(),
            api_base_url: None,
            register_path: default_register_path(),
            db_path: default_db_path(),
        }
    }
}

fn default_webhook_url() -> String {
    DEFAULT_WEBHOOK_URL.to_string()
}

fn default_register_path() -> String {
    DEFAULT_REGISTER_PATH.to_string()
}

fn default_db_path() -> PathBuf {
    PathBuf::from(DEFAULT_DB_PATH)
}

impl AppConfig {
    /// Environment variables win over the file.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = non_empty(ENV_WEBHOOK_URL) {
            self.webhook_url = url;
        }
        if let Some(url) = non_empty(ENV_API_URL) {
            self.api_base_url = Some(url);
        }
        if let Some(path) = non_empty(ENV_DB_PATH) {
            self.db_path = PathBuf::from(path);
        }
    }
}

/// Load the config file (falling back to defaults) and apply the environment.
pub fn load(path: &str) -> AppConfig {
    let mut config = load_config(path);
    config.apply_env_overrides(|key| std::env::var(key).ok());
    config
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

pub fn save_config(path: &str, config: &AppConfig) -> std::io::Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.json");
        let config = load_config(path.to_str().unwrap());

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.webhook_url, DEFAULT_WEBHOOK_URL);
        assert_eq!(config.api_base_url, None);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("chat.json");
        fs::write(&path, r#"{ "api_base_url": "http://localhost:3001" }"#).unwrap();

        let config = load_config(path.to_str().unwrap());
        assert_eq!(config.api_base_url.as_deref(), Some("http://localhost:3001"));
        assert_eq!(config.webhook_url, DEFAULT_WEBHOOK_URL);
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_PATH));
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("chat.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(load_config(path.to_str().unwrap()), AppConfig::default());
    }

    #[test]
    fn save_then_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("chat.json");
        let path = path.to_str().unwrap();
        let config = AppConfig {
            webhook_url: "http://localhost:5678/webhook/chat".to_string(),
            ..AppConfig::default()
        };

        save_config(path, &config).unwrap();
        assert_eq!(load_config(path), config);
    }

    #[test]
    fn env_overrides_non_empty_values_only() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_WEBHOOK_URL, "http://hook"),
            (ENV_API_URL, "  "),
            (ENV_DB_PATH, "/tmp/x.db"),
        ]);
        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| env.get(key).map(|value| value.to_string()));

        assert_eq!(config.webhook_url, "http://hook");
        assert_eq!(config.api_base_url, None);
        assert_eq!(config.db_path, PathBuf::from("/tmp/x.db"));
    }
}
