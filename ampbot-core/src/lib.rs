pub mod config;

// Config re-exports
pub use config::{
    AmpSettings, CommandSettings, Config, ConfigError, DiscordSettings, LoggingSettings, Secrets,
    SecretsError, Settings, SettingsError,
};
