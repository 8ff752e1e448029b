use crate::{AppConfig, ConfigError};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

const ORG: &str = "io";
const AUTHOR: &str = "InboxIQ";
const APP: &str = "InboxIQ";

/// Overrides `api.base_url` for the current process.
pub const API_BASE_ENV: &str = "INBOXIQ_API_BASE";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from(ORG, AUTHOR, APP).ok_or(ConfigError::MissingDirectories)?;
        Self::at(dirs.config_dir().join("config.toml"))
    }

    /// Uses an explicit config file, writing defaults if it does not exist yet.
    pub fn at(config_path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let config_path = config_path.into();
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        if !config_path.exists() {
            let initial = AppConfig::default();
            let content = toml::to_string_pretty(&initial)?;
            fs::write(&config_path, content)?;
            tracing::info!(path = %config_path.display(), "wrote default config");
        }

        Ok(Self { config_path })
    }

    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let content = fs::read_to_string(&self.config_path)?;
        let mut config: AppConfig = toml::from_str(&content)?;
        apply_api_base_override(&mut config, std::env::var(API_BASE_ENV).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content)?;
        Ok(())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

fn apply_api_base_override(
    config: &mut AppConfig,
    value: Option<String>,
) -> Result<(), ConfigError> {
    let Some(raw) = value.filter(|raw| !raw.trim().is_empty()) else {
        return Ok(());
    };

    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    config.api.base_url = Url::parse(&raw)?;
    tracing::debug!(base_url = %config.api.base_url, "api base overridden from environment");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_default_file_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::at(dir.path().join("nested").join("config.toml")).unwrap();
        assert!(manager.config_path().exists());

        let mut config = manager.load().unwrap();
        config.routing.auto_route_threshold = 0.75;
        config.routing.extra_email_keywords = vec!["outbox".to_string()];
        manager.save(&config).unwrap();

        let reloaded = manager.load().unwrap();
        assert_eq!(reloaded.routing.auto_route_threshold, 0.75);
        assert_eq!(reloaded.routing.extra_email_keywords, vec!["outbox"]);
    }

    #[test]
    fn save_rejects_invalid_config() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::at(dir.path().join("config.toml")).unwrap();
        let mut config = AppConfig::default();
        config.api.request_timeout_secs = 0;
        assert!(manager.save(&config).is_err());
    }

    #[test]
    fn env_override_normalizes_trailing_slash() {
        let mut config = AppConfig::default();
        apply_api_base_override(&mut config, Some("https://inboxiq.example/api".to_string()))
            .unwrap();
        assert_eq!(config.api.base_url.as_str(), "https://inboxiq.example/api/");

        apply_api_base_override(&mut config, Some("   ".to_string())).unwrap();
        assert_eq!(config.api.base_url.as_str(), "https://inboxiq.example/api/");
    }
}
