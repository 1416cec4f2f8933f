/// CLI configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use songbox_playback::PlaybackConfig;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Settings {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default location is optional.
    /// Environment variables (`SONGBOX__PLAYBACK__VOLUME=60`) override the
    /// file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                if let Some(path) = default_config_path() {
                    settings = settings.add_source(config::File::from(path).required(false));
                }
            }
        }

        // Override with environment variables (prefixed with SONGBOX__)
        settings = settings.add_source(
            config::Environment::with_prefix("SONGBOX")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = settings.build()?.try_deserialize()?;
        Ok(settings)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.playback.volume > 100 {
            return Err(CliError::Config(format!(
                "volume must be between 0 and 100, got {}",
                self.playback.volume
            )));
        }

        if self.storage.state_path.as_os_str().is_empty() {
            return Err(CliError::Config(
                "state path is required (set SONGBOX__STORAGE__STATE_PATH)".to_string(),
            ));
        }

        Ok(())
    }
}

/// `<config dir>/songbox/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("songbox").join("config.toml"))
}

// Default values
fn default_state_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("songbox")
        .join("state.json")
}

fn default_level() -> String {
    "songbox=info".to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            state_path: default_state_path(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}
