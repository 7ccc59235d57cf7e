use anyhow::Context as _;
use serde::Serialize;

use crate::cli::args::ConfigCommands;
use crate::cli::Context;
use crate::config::{config_path, load_config, set_api_key, set_url, Config};
use crate::error::Result;

/// What `config show` prints with `--json`; the key is always masked
#[derive(Debug, Serialize)]
struct ConfigView {
    path: String,
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
}

/// Handle the config subcommands
pub async fn config(ctx: &Context, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::SetUrl { url } => {
            set_url(&url).context("failed to save URL")?;
            ctx.output.info(format!("URL set to: {}", url));
        }
        ConfigCommands::SetKey { api_key } => {
            set_api_key(&api_key).context("failed to save API key")?;
            ctx.output.info("API key saved");
        }
        ConfigCommands::Show => {
            let path = config_path()?;
            let config = load_config().context("failed to load config")?;
            let view = ConfigView {
                path: path.display().to_string(),
                url: config.url.clone(),
                api_key: config.masked_api_key(),
            };

            if ctx.output.json {
                return ctx.output.json(&view);
            }

            ctx.output.heading("Configuration");
            ctx.output.block(&format_config(&view.path, &config));
        }
    }

    Ok(())
}

fn format_config(path: &str, config: &Config) -> String {
    let url = if config.url.is_empty() {
        "(not set)"
    } else {
        config.url.as_str()
    };
    let key = config
        .masked_api_key()
        .unwrap_or_else(|| "(not set)".to_string());

    format!("Config file: {}\nURL: {}\nAPI Key: {}\n", path, url, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_config_masks_key() {
        let config = Config::new("https://overseerr.example.com", "abcdefgh1234567890wxyz");
        assert_eq!(
            format_config("/home/me/.config/overseerr-cli/config.json", &config),
            "Config file: /home/me/.config/overseerr-cli/config.json\n\
             URL: https://overseerr.example.com\n\
             API Key: abcdefgh...wxyz\n"
        );
    }

    #[test]
    fn test_format_config_unset() {
        assert_eq!(
            format_config("config.json", &Config::default()),
            "Config file: config.json\nURL: (not set)\nAPI Key: (not set)\n"
        );
    }

    #[test]
    fn test_config_view_json_omits_missing_key() {
        let view = ConfigView {
            path: "config.json".to_string(),
            url: String::new(),
            api_key: None,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("api_key").is_none());
        assert_eq!(json["url"], "");
    }
}
