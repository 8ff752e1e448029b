use crate::ConfigError;
use inboxiq_core::{Channel, ChatMode};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub version: u32,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    pub base_url: Url,
    pub email_path: String,
    pub calendar_path: String,
    pub draft_confirm_path: String,
    /// Where the user signs in again after a 401.
    pub auth_url: Url,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutingConfig {
    /// Confidence strictly above this is sent without asking.
    pub auto_route_threshold: f64,
    pub auto_detection: bool,
    pub default_mode: ChatMode,
    #[serde(default)]
    pub extra_calendar_keywords: Vec<String>,
    #[serde(default)]
    pub extra_email_keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://localhost:8000/api/").expect("static url"),
            email_path: "chat/".to_string(),
            calendar_path: "calendar/".to_string(),
            draft_confirm_path: "email/confirm/".to_string(),
            auth_url: Url::parse("http://localhost:8000/auth/oauth/start/").expect("static url"),
            request_timeout_secs: 30,
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            auto_route_threshold: 0.6,
            auto_detection: true,
            default_mode: ChatMode::Auto,
            extra_calendar_keywords: Vec::new(),
            extra_email_keywords: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            api: ApiConfig::default(),
            routing: RoutingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.routing.auto_route_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::Invalid(format!(
                "routing.auto_route_threshold must be within [0, 1], got {threshold}"
            )));
        }
        if self.api.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api.request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if !self.api.base_url.path().ends_with('/') {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must end with '/', got {}",
                self.api.base_url
            )));
        }
        for path in [
            &self.api.email_path,
            &self.api.calendar_path,
            &self.api.draft_confirm_path,
        ] {
            if path.starts_with('/') || !path.ends_with('/') {
                return Err(ConfigError::Invalid(format!(
                    "endpoint path `{path}` must be relative and end with '/'"
                )));
            }
        }
        Ok(())
    }
}

impl ApiConfig {
    pub fn channel_base(&self, channel: Channel) -> Result<Url, ConfigError> {
        let path = match channel {
            Channel::Email => &self.email_path,
            Channel::Calendar => &self.calendar_path,
        };
        Ok(self.base_url.join(path)?)
    }

    pub fn draft_confirm_url(&self) -> Result<Url, ConfigError> {
        Ok(self.base_url.join(&self.draft_confirm_path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoints_match_backend_routes() {
        let api = ApiConfig::default();
        assert_eq!(
            api.channel_base(Channel::Email).unwrap().as_str(),
            "http://localhost:8000/api/chat/"
        );
        assert_eq!(
            api.channel_base(Channel::Calendar).unwrap().as_str(),
            "http://localhost:8000/api/calendar/"
        );
        assert_eq!(
            api.draft_confirm_url().unwrap().as_str(),
            "http://localhost:8000/api/email/confirm/"
        );
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let mut config = AppConfig::default();
        config.routing.auto_route_threshold = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn partial_file_falls_back_to_section_defaults() {
        let config: AppConfig = toml::from_str("version = 1\n").expect("config parsed");
        assert_eq!(config, AppConfig::default());
    }
}
