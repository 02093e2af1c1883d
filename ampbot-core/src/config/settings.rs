//! Settings configuration loaded from TOML files.
//!
//! This module handles non-sensitive configuration stored in TOML format
//! in the XDG config directory (~/.config/ampbot/config.toml).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default TOML configuration file content
const DEFAULT_CONFIG_TOML: &str = r#"# ampbot configuration file
# Located at: ~/.config/ampbot/config.toml
#
# This file contains non-sensitive configuration.
# Secrets are loaded from environment variables:
#   - DISCORD_BOT_TOKEN (required)
#   - AMP_HOST, AMP_USERNAME, AMP_PASSWORD

[discord]
prefix = "!"
activity = "!help"
# Register slash commands on a single guild instead of globally
# guild_id = 123456789012345678
# Channel used for welcome messages (falls back to the guild system channel)
# welcome_channel_id = 123456789012345678

[amp]
port = 8080
use_tls = false
request_timeout_seconds = 10

[commands]
timeout_seconds = 15

[logging]
level = "info"
"#;

/// Settings loaded from TOML configuration file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    /// Discord bot configuration
    #[serde(default)]
    pub discord: DiscordSettings,

    /// AMP management panel configuration
    #[serde(default)]
    pub amp: AmpSettings,

    /// Command execution configuration
    #[serde(default)]
    pub commands: CommandSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Discord bot settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscordSettings {
    /// Prefix for text commands (e.g. `!ping`)
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Presence text shown as "Watching ..."
    #[serde(default = "default_activity")]
    pub activity: String,

    /// Guild to register slash commands on (global registration when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<u64>,

    /// Channel for welcome messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_channel_id: Option<u64>,
}

/// AMP panel settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AmpSettings {
    /// Port appended to `AMP_HOST` when the host carries none
    #[serde(default = "default_amp_port")]
    pub port: u16,

    /// Use https when `AMP_HOST` carries no scheme
    #[serde(default)]
    pub use_tls: bool,

    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_amp_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

/// Command execution settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommandSettings {
    /// Upper bound on a single command handler run, in seconds
    #[serde(default = "default_command_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Logging settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_prefix() -> String {
    "!".to_string()
}

fn default_activity() -> String {
    "!help".to_string()
}

fn default_amp_port() -> u16 {
    8080
}

fn default_amp_request_timeout_seconds() -> u64 {
    10
}

fn default_command_timeout_seconds() -> u64 {
    15
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DiscordSettings {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            activity: default_activity(),
            guild_id: None,
            welcome_channel_id: None,
        }
    }
}

impl Default for AmpSettings {
    fn default() -> Self {
        Self {
            port: default_amp_port(),
            use_tls: false,
            request_timeout_seconds: default_amp_request_timeout_seconds(),
        }
    }
}

impl Default for CommandSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: default_command_timeout_seconds(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AmpSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl CommandSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config directory not found")]
    ConfigDirNotFound,
}

impl Settings {
    /// Load settings from the TOML configuration file.
    ///
    /// If the config file doesn't exist, creates it with default values.
    pub fn load() -> Result<Self, SettingsError> {
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load settings from a specific file path, creating defaults if missing.
    pub fn load_from_path(config_path: &Path) -> Result<Self, SettingsError> {
        if !config_path.exists() {
            tracing::info!("Creating default configuration at {:?}", config_path);
            Self::create_default_config(config_path)?;
        }

        let content = fs::read_to_string(config_path)?;
        Self::from_toml(&content)
    }

    /// Parse settings from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content)?;
        Ok(settings)
    }

    /// Get the configuration file path.
    ///
    /// Uses XDG config directory: `~/.config/ampbot/config.toml`
    pub fn config_path() -> Result<PathBuf, SettingsError> {
        if let Ok(override_dir) = std::env::var("AMPBOT_CONFIG_DIR") {
            let dir = PathBuf::from(override_dir);
            return Ok(dir.join("config.toml"));
        }

        let config_dir = dirs::config_dir()
            .ok_or(SettingsError::ConfigDirNotFound)?
            .join("ampbot");

        Ok(config_dir.join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, DEFAULT_CONFIG_TOML)?;
        Ok(())
    }
}
