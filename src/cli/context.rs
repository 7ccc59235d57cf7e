use tracing::debug;

use crate::api::OverseerrClient;
use crate::config::{load_config, Config};
use crate::error::{ConfigError, Result};
use crate::output::Output;

/// Per-invocation settings handed to every command
pub struct Context {
    pub output: Output,
    /// `--url` flag, wins over env and config file
    pub url_override: Option<String>,
}

impl Context {
    pub fn new(output: Output, url_override: Option<String>) -> Self {
        Self {
            output,
            url_override: url_override.filter(|u| !u.is_empty()),
        }
    }

    /// Apply the `--url` override, then validate
    fn finalize(&self, mut config: Config) -> std::result::Result<Config, ConfigError> {
        if let Some(url) = &self.url_override {
            debug!("using URL from --url flag");
            config.url = url.clone();
        }
        config.validate()?;
        Ok(config)
    }

    /// Build an authenticated API client from the resolved config
    pub fn client(&self) -> Result<OverseerrClient> {
        let config = self.finalize(load_config()?)?;
        Ok(OverseerrClient::new(&config.url, &config.api_key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_override_wins() {
        let ctx = Context::new(Output::default(), Some("https://flag.example.com".to_string()));
        let config = ctx
            .finalize(Config::new("https://file.example.com", "key"))
            .unwrap();
        assert_eq!(config.url, "https://flag.example.com");
        assert_eq!(config.api_key, "key");
    }

    #[test]
    fn test_url_override_fills_missing_url() {
        let ctx = Context::new(Output::default(), Some("https://flag.example.com".to_string()));
        let config = ctx.finalize(Config::new("", "key")).unwrap();
        assert_eq!(config.url, "https://flag.example.com");
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let ctx = Context::new(Output::default(), Some(String::new()));
        let err = ctx.finalize(Config::new("", "key")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingUrl));
    }

    #[test]
    fn test_override_does_not_supply_key() {
        let ctx = Context::new(Output::default(), Some("https://flag.example.com".to_string()));
        let err = ctx.finalize(Config::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }
}
