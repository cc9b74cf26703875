use crate::services::upload_controller::DEFAULT_RELOAD_DELAY;
use crate::utils::get_config_dir;
use color_eyre::eyre;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";
pub const CONFIG_FILE_NAME: &str = "config.toml";
const ENV_PREFIX: &str = "FLASHVAULT";

/// Where and how the uploader talks to a FlashVault server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    pub server_url: String,
    /// Remote directory uploads land in, relative to the shared root
    pub upload_path: String,
    pub reload_delay_ms: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        ClientSettings {
            server_url: DEFAULT_SERVER_URL.to_string(),
            upload_path: String::new(),
            reload_delay_ms: DEFAULT_RELOAD_DELAY.as_millis() as u64,
        }
    }
}

impl ClientSettings {
    /// Defaults, then the config file, then `FLASHVAULT_*` variables
    pub fn load(config_file: Option<PathBuf>) -> eyre::Result<Self> {
        let path = config_file.unwrap_or_else(|| get_config_dir().join(CONFIG_FILE_NAME));
        Self::load_from(&path, Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    fn load_from(path: &Path, environment: Environment) -> eyre::Result<Self> {
        let defaults = ClientSettings::default();
        let settings = Config::builder()
            .set_default("server_url", defaults.server_url)?
            .set_default("upload_path", defaults.upload_path)?
            .set_default("reload_delay_ms", defaults.reload_delay_ms)?
            .add_source(File::from(path).required(false))
            .add_source(environment)
            .build()?;
        tracing::debug!(path = %path.display(), "settings loaded");
        Ok(settings.try_deserialize()?)
    }

    /// Applies command line flags on top of the loaded settings
    pub fn with_overrides(mut self, server_url: Option<String>, upload_path: Option<String>) -> Self {
        if let Some(url) = server_url {
            self.server_url = url;
        }
        if let Some(path) = upload_path {
            self.upload_path = path;
        }
        self
    }

    pub fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.reload_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use std::io::{self, Write};
    use tempfile::tempdir;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    fn write_config(dir: &Path, content: &str) -> io::Result<PathBuf> {
        let path = dir.join(CONFIG_FILE_NAME);
        let mut file = fs::File::create(&path)?;
        write!(file, "{}", content)?;
        Ok(path)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let settings = ClientSettings::load_from(&dir.path().join(CONFIG_FILE_NAME), no_env()).unwrap();
        assert_eq!(settings, ClientSettings::default());
        assert_eq!(settings.reload_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "server_url = \"http://nas.local:8000\"\nupload_path = \"photos\"\n",
        )
        .unwrap();

        let settings = ClientSettings::load_from(&path, no_env()).unwrap();

        assert_eq!(settings.server_url, "http://nas.local:8000");
        assert_eq!(settings.upload_path, "photos");
        assert_eq!(settings.reload_delay_ms, 500);
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "server_url = \"http://nas.local:8000\"\n").unwrap();
        let env = Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(Some(HashMap::from([
                ("FLASHVAULT_SERVER_URL".to_string(), "http://10.0.0.2:9000".to_string()),
                ("FLASHVAULT_RELOAD_DELAY_MS".to_string(), "0".to_string()),
            ])));

        let settings = ClientSettings::load_from(&path, env).unwrap();

        assert_eq!(settings.server_url, "http://10.0.0.2:9000");
        assert_eq!(settings.reload_delay(), Duration::ZERO);
    }

    #[test]
    fn test_broken_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "server_url = [").unwrap();
        assert!(ClientSettings::load_from(&path, no_env()).is_err());
    }

    #[test]
    fn test_cli_overrides_win() {
        let settings = ClientSettings::default()
            .with_overrides(Some("http://vault:1".into()), Some("music".into()));
        assert_eq!(settings.server_url, "http://vault:1");
        assert_eq!(settings.upload_path, "music");

        let untouched = ClientSettings::default().with_overrides(None, None);
        assert_eq!(untouched, ClientSettings::default());
    }
}
