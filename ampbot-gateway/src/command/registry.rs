use std::collections::HashMap;

use super::{CommandSpec, Trigger};

/// Registry errors
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Command '{0}' is already registered")]
    DuplicateCommand(String),
}

/// Central registry of all commands.
///
/// Populated once at startup and read-only afterwards. Identifiers and
/// aliases share one namespace and are matched case-insensitively.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    specs: Vec<CommandSpec>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command, rejecting any name or alias already taken.
    pub fn register(&mut self, spec: CommandSpec) -> Result<(), RegistryError> {
        let mut keys: Vec<String> = Vec::new();
        for name in spec.names() {
            let key = name.to_lowercase();
            if self.index.contains_key(&key) || keys.contains(&key) {
                return Err(RegistryError::DuplicateCommand(name.to_string()));
            }
            keys.push(key);
        }

        let position = self.specs.len();
        for key in keys {
            self.index.insert(key, position);
        }
        self.specs.push(spec);
        Ok(())
    }

    /// Look up a command by identifier or alias.
    pub fn resolve(&self, identifier: &str) -> Option<&CommandSpec> {
        self.index
            .get(&identifier.trim().to_lowercase())
            .and_then(|position| self.specs.get(*position))
    }

    /// All specs in registration order.
    pub fn specs(&self) -> impl Iterator<Item = &CommandSpec> {
        self.specs.iter()
    }

    /// Specs users can type, in registration order.
    pub fn text_commands(&self) -> impl Iterator<Item = &CommandSpec> {
        self.specs
            .iter()
            .filter(|spec| spec.trigger == Trigger::Text)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
