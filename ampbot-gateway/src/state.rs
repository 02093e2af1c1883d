use ampbot_core::DiscordSettings;

use crate::command::Dispatcher;

/// Shared application state, immutable once the bot starts.
pub struct AppState {
    pub dispatcher: Dispatcher,
    /// Trimmed command prefix (e.g. `!`)
    pub prefix: String,
    pub discord: DiscordSettings,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher, prefix: impl Into<String>, discord: DiscordSettings) -> Self {
        Self {
            dispatcher,
            prefix: prefix.into(),
            discord,
        }
    }
}
