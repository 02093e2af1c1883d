//! Built-in commands.
//!
//! Each module exposes a `spec` constructor returning a ready-to-register
//! [`CommandSpec`]. Handlers get their collaborators at construction.

pub mod guild_info;
pub mod help;
pub mod instances;
pub mod ping;
pub mod server_status;
pub mod welcome;
pub mod wheel;

use std::sync::Arc;

use crate::amp::ManagementApi;
use crate::command::{CommandRegistry, CommandSpec, HelpEntry, RegistryError, Trigger};

/// Build the registry with every built-in command, in help order.
pub fn builtin_registry(api: Arc<dyn ManagementApi>) -> Result<CommandRegistry, RegistryError> {
    let mut specs = vec![
        ping::spec(),
        guild_info::spec(),
        server_status::spec(api.clone()),
        instances::list_spec(api.clone()),
        instances::start_spec(api.clone()),
        instances::stop_spec(api),
        wheel::spec(),
        welcome::spec(),
    ];

    let mut entries: Vec<HelpEntry> = specs
        .iter()
        .filter(|spec| spec.trigger == Trigger::Text)
        .map(help_entry)
        .collect();
    entries.insert(1, help::entry());
    specs.insert(1, help::spec(entries));

    let mut registry = CommandRegistry::new();
    for spec in specs {
        registry.register(spec)?;
    }
    Ok(registry)
}

fn help_entry(spec: &CommandSpec) -> HelpEntry {
    let mut usage = spec.usage();
    for alias in &spec.aliases {
        usage.push_str(&format!(" | /{}", alias));
    }
    HelpEntry {
        usage,
        description: spec.description.to_string(),
    }
}
