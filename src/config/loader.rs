use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt, PermissionsExt};

use tracing::debug;

use crate::config::{Config, EnvOverrides};
use crate::error::ConfigError;

const CONFIG_DIR: &str = ".config";
const APP_DIR: &str = "overseerr-cli";
const CONFIG_FILE: &str = "config.json";

/// Get the config file path (~/.config/overseerr-cli/config.json on every platform)
pub fn config_path() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| config_path_in(&home))
        .ok_or(ConfigError::NoConfigDir)
}

fn config_path_in(home: &Path) -> PathBuf {
    home.join(CONFIG_DIR).join(APP_DIR).join(CONFIG_FILE)
}

/// Resolve config from the environment and the default config file
pub fn load_config() -> Result<Config, ConfigError> {
    let env = EnvOverrides::from_env();
    if env.is_complete() {
        debug!("using OVERSEERR_URL and OVERSEERR_API_KEY from environment");
        let mut config = Config::default();
        env.apply(&mut config);
        return Ok(config);
    }

    load_from(&config_path()?, &env)
}

/// Resolve config from `path`, then overlay each environment value that is set
pub fn load_from(path: &Path, env: &EnvOverrides) -> Result<Config, ConfigError> {
    let mut config = Config::default();

    // Both values come from the environment, so the file cannot change the result
    if !env.is_complete() {
        config = read_file(path)?;
    }

    env.apply(&mut config);
    Ok(config)
}

fn read_file(path: &Path) -> Result<Config, ConfigError> {
    let content = match fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, starting empty");
            return Ok(Config::default());
        }
        Err(e) => return Err(e.into()),
    };

    debug!(path = %path.display(), "loaded config file");
    serde_json::from_slice(&content).map_err(|e| ConfigError::Invalid(e.to_string()))
}

/// Save config to `path`, creating the directory as 0700 and the file as 0600
pub fn save_to(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        create_private_dir(parent)?;
    }

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path)?;
    file.write_all(content.as_bytes())?;

    // An existing file keeps its old mode on open, so tighten it explicitly
    #[cfg(unix)]
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;

    debug!(path = %path.display(), "saved config file");
    Ok(())
}

fn create_private_dir(dir: &Path) -> Result<(), ConfigError> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o700);
    builder.create(dir)?;
    Ok(())
}

/// Update the stored URL, keeping the rest of the config
pub fn set_url(url: &str) -> Result<(), ConfigError> {
    update_file(&config_path()?, |config| config.url = url.to_string())
}

/// Update the stored API key, keeping the rest of the config
pub fn set_api_key(api_key: &str) -> Result<(), ConfigError> {
    update_file(&config_path()?, |config| config.api_key = api_key.to_string())
}

/// Read the file (falling back to an empty config on failure), modify and save.
///
/// Environment values are not applied, so they never end up persisted.
fn update_file<F>(path: &Path, update: F) -> Result<(), ConfigError>
where
    F: FnOnce(&mut Config),
{
    let mut config = read_file(path).unwrap_or_else(|e| {
        debug!(error = %e, "could not load existing config, starting empty");
        Config::default()
    });
    update(&mut config);
    save_to(path, &config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(APP_DIR).join(CONFIG_FILE);
        (dir, path)
    }

    fn env(url: Option<&str>, api_key: Option<&str>) -> EnvOverrides {
        EnvOverrides::new(url.map(String::from), api_key.map(String::from))
    }

    #[test]
    fn test_config_path_in_home_dot_config() {
        assert_eq!(
            config_path_in(Path::new("/home/me")),
            PathBuf::from("/home/me/.config/overseerr-cli/config.json")
        );
    }

    #[test]
    fn test_config_path_ignores_platform_config_dir() {
        if let (Ok(path), Some(home)) = (config_path(), dirs::home_dir()) {
            assert_eq!(path, home.join(".config/overseerr-cli/config.json"));
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (_dir, path) = temp_config();
        let config = load_from(&path, &EnvOverrides::default()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (_dir, path) = temp_config();
        let config = Config::new("https://saved.example.com", "saved-api-key");

        save_to(&path, &config).unwrap();
        let loaded = load_from(&path, &EnvOverrides::default()).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_malformed_file() {
        let (_dir, path) = temp_config();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let err = load_from(&path, &EnvOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_load_non_utf8_file_is_invalid() {
        let (_dir, path) = temp_config();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, [0xff, 0xfe, 0x7b, 0x7d]).unwrap();

        let err = load_from(&path, &EnvOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_both_env_vars_win_over_file() {
        let (_dir, path) = temp_config();
        save_to(&path, &Config::new("https://file.example.com", "file-key")).unwrap();

        let config = load_from(
            &path,
            &env(Some("https://env.example.com"), Some("env-key")),
        )
        .unwrap();

        assert_eq!(config, Config::new("https://env.example.com", "env-key"));
    }

    #[test]
    fn test_both_env_vars_ignore_malformed_file() {
        let (_dir, path) = temp_config();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "garbage").unwrap();

        let config = load_from(
            &path,
            &env(Some("https://env.example.com"), Some("env-key")),
        )
        .unwrap();

        assert_eq!(config, Config::new("https://env.example.com", "env-key"));
    }

    #[test]
    fn test_url_env_overlays_file() {
        let (_dir, path) = temp_config();
        save_to(&path, &Config::new("https://file.example.com", "file-key")).unwrap();

        let config = load_from(&path, &env(Some("https://env.example.com"), None)).unwrap();

        assert_eq!(config, Config::new("https://env.example.com", "file-key"));
    }

    #[test]
    fn test_api_key_env_overlays_file() {
        let (_dir, path) = temp_config();
        save_to(&path, &Config::new("https://file.example.com", "file-key")).unwrap();

        let config = load_from(&path, &env(None, Some("env-key"))).unwrap();

        assert_eq!(config, Config::new("https://file.example.com", "env-key"));
    }

    #[test]
    fn test_update_file_keeps_other_field() {
        let (_dir, path) = temp_config();
        save_to(&path, &Config::new("https://old.example.com", "kept-key")).unwrap();

        update_file(&path, |c| c.url = "https://new.example.com".to_string()).unwrap();

        let config = load_from(&path, &EnvOverrides::default()).unwrap();
        assert_eq!(config, Config::new("https://new.example.com", "kept-key"));
    }

    #[test]
    fn test_update_file_replaces_malformed_file() {
        let (_dir, path) = temp_config();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[1, 2").unwrap();

        update_file(&path, |c| c.api_key = "fresh-key".to_string()).unwrap();

        let config = load_from(&path, &EnvOverrides::default()).unwrap();
        assert_eq!(config, Config::new("", "fresh-key"));
    }

    #[cfg(unix)]
    #[test]
    fn test_save_permissions() {
        let (_dir, path) = temp_config();
        save_to(&path, &Config::new("u", "k")).unwrap();

        let file_mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(file_mode, 0o600);

        let dir_mode = fs::metadata(path.parent().unwrap())
            .unwrap()
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(dir_mode, 0o700);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_tightens_existing_file() {
        let (_dir, path) = temp_config();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        save_to(&path, &Config::new("u", "k")).unwrap();

        let file_mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(file_mode, 0o600);
    }
}
