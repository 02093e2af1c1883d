//! Secrets configuration loaded from environment variables only.
//!
//! The Discord token and AMP credentials should never be stored in the
//! settings file. They are read from the environment (or a local `.env`).

use std::env;
use std::fmt;

const DEFAULT_AMP_HOST: &str = "127.0.0.1";
const DEFAULT_AMP_USERNAME: &str = "admin";
const DEFAULT_AMP_PASSWORD: &str = "password";

/// Secrets loaded exclusively from environment variables.
#[derive(Clone)]
pub struct Secrets {
    /// Discord bot token (env: DISCORD_BOT_TOKEN)
    pub discord_bot_token: String,

    /// AMP panel host, optionally with scheme and port (env: AMP_HOST)
    pub amp_host: String,

    /// AMP login user (env: AMP_USERNAME)
    pub amp_username: String,

    /// AMP login password (env: AMP_PASSWORD)
    pub amp_password: String,
}

/// Errors that can occur when loading secrets
#[derive(Debug, thiserror::Error)]
pub enum SecretsError {
    #[error("Missing required secret: {0}")]
    MissingSecret(String),
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("discord_bot_token", &"[redacted]")
            .field("amp_host", &self.amp_host)
            .field("amp_username", &self.amp_username)
            .field("amp_password", &"[redacted]")
            .finish()
    }
}

impl Secrets {
    /// Load secrets from environment variables.
    ///
    /// This function also loads .env file if present (for development),
    /// but production should rely on actual environment variables.
    pub fn from_env() -> Result<Self, SecretsError> {
        let _ = dotenvy::dotenv();

        Self::from_env_inner()
    }

    /// Internal method to load from environment without loading .env
    pub(crate) fn from_env_inner() -> Result<Self, SecretsError> {
        let discord_bot_token = non_blank_var("DISCORD_BOT_TOKEN")
            .ok_or_else(|| SecretsError::MissingSecret("DISCORD_BOT_TOKEN".to_string()))?;

        Ok(Self {
            discord_bot_token,
            amp_host: non_blank_var("AMP_HOST").unwrap_or_else(|| DEFAULT_AMP_HOST.to_string()),
            amp_username: non_blank_var("AMP_USERNAME")
                .unwrap_or_else(|| DEFAULT_AMP_USERNAME.to_string()),
            amp_password: env::var("AMP_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_AMP_PASSWORD.to_string()),
        })
    }
}

fn non_blank_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
