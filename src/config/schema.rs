use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Connection settings for the Overseerr server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the Overseerr instance
    #[serde(default)]
    pub url: String,

    /// API key from Settings -> General
    #[serde(default)]
    pub api_key: String,
}

impl Config {
    #[cfg(test)]
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    /// Check that both fields are present, URL first
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::MissingUrl);
        }
        if self.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }

    /// API key with everything but the edges hidden, for display
    pub fn masked_api_key(&self) -> Option<String> {
        if self.api_key.is_empty() {
            return None;
        }

        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 12 {
            return Some("*".repeat(chars.len()));
        }

        let head: String = chars[..8].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        Some(format!("{}...{}", head, tail))
    }
}

/// Environment variable values that take precedence over the config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub url: Option<String>,
    pub api_key: Option<String>,
}

impl EnvOverrides {
    pub const URL_VAR: &'static str = "OVERSEERR_URL";
    pub const API_KEY_VAR: &'static str = "OVERSEERR_API_KEY";

    /// Snapshot the relevant variables from the process environment
    pub fn from_env() -> Self {
        Self::new(
            std::env::var(Self::URL_VAR).ok(),
            std::env::var(Self::API_KEY_VAR).ok(),
        )
    }

    /// Empty values are treated as unset
    pub fn new(url: Option<String>, api_key: Option<String>) -> Self {
        Self {
            url: url.filter(|v| !v.is_empty()),
            api_key: api_key.filter(|v| !v.is_empty()),
        }
    }

    /// True when the environment alone determines the whole config
    pub fn is_complete(&self) -> bool {
        self.url.is_some() && self.api_key.is_some()
    }

    /// Overwrite each field that has an environment value
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.url {
            config.url = url.clone();
        }
        if let Some(api_key) = &self.api_key {
            config.api_key = api_key.clone();
        }
    }
}
