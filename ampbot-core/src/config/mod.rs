//! Configuration management for ampbot.
//!
//! Secrets come from environment variables, settings from a TOML file.
//!
//! # Configuration Sources
//!
//! ## Secrets (Environment Variables)
//! - `DISCORD_BOT_TOKEN` - Discord bot token (required)
//! - `AMP_HOST` - AMP panel host (default `127.0.0.1`)
//! - `AMP_USERNAME` / `AMP_PASSWORD` - AMP login
//!
//! ## Settings (TOML File)
//! Located at `~/.config/ampbot/config.toml`:
//! ```toml
//! [discord]
//! prefix = "!"
//! guild_id = 1238956633103663154
//!
//! [amp]
//! port = 8080
//!
//! [commands]
//! timeout_seconds = 15
//! ```

mod secrets;
mod settings;

pub use secrets::{Secrets, SecretsError};
pub use settings::{
    AmpSettings, CommandSettings, DiscordSettings, LoggingSettings, Settings, SettingsError,
};

/// Combined configuration containing both secrets and settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Secrets loaded from environment variables
    pub secrets: Secrets,
    /// Settings loaded from TOML configuration file
    pub settings: Settings,
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Secrets error: {0}")]
    Secrets(#[from] SecretsError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Command prefix must not be empty")]
    EmptyPrefix,

    #[error("{0} must be at least 1 second")]
    ZeroTimeout(&'static str),
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `DISCORD_BOT_TOKEN` is missing
    /// - The TOML file cannot be read or parsed
    /// - The command prefix is blank
    /// - A timeout is zero
    pub fn load() -> Result<Self, ConfigError> {
        let secrets = Secrets::from_env()?;
        let settings = Settings::load()?;
        Self::new(secrets, settings)
    }

    /// Validate and combine already loaded parts.
    pub fn new(secrets: Secrets, settings: Settings) -> Result<Self, ConfigError> {
        if settings.discord.prefix.trim().is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }
        if settings.amp.request_timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout("amp.request_timeout_seconds"));
        }
        if settings.commands.timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout("commands.timeout_seconds"));
        }
        Ok(Self { secrets, settings })
    }

    /// Get the Discord bot token.
    pub fn discord_bot_token(&self) -> &str {
        &self.secrets.discord_bot_token
    }

    /// Get the text command prefix.
    pub fn command_prefix(&self) -> &str {
        self.settings.discord.prefix.trim()
    }

    /// Base URL of the AMP panel, without trailing slash.
    ///
    /// A host that already carries a scheme is used verbatim; otherwise the
    /// scheme comes from `amp.use_tls` and the port from `amp.port` unless the
    /// host already names one.
    pub fn amp_base_url(&self) -> String {
        let host = self.secrets.amp_host.trim().trim_end_matches('/');
        if host.contains("://") {
            return host.to_string();
        }

        let scheme = if self.settings.amp.use_tls {
            "https"
        } else {
            "http"
        };
        if host.contains(':') {
            format!("{}://{}", scheme, host)
        } else {
            format!("{}://{}:{}", scheme, host, self.settings.amp.port)
        }
    }

    /// Get the AMP login user.
    pub fn amp_username(&self) -> &str {
        &self.secrets.amp_username
    }

    /// Get the AMP login password.
    pub fn amp_password(&self) -> &str {
        &self.secrets.amp_password
    }
}
