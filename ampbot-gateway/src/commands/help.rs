use crate::command::{
    Args, CallerContext, CommandError, CommandHandler, CommandSpec, HelpEntry, Payload,
};

const NAME: &str = "help";
const DESCRIPTION: &str = "Show the list of available commands.";

/// Lists a fixed set of entries captured when the registry was built.
pub struct HelpCommand {
    entries: Vec<HelpEntry>,
}

#[async_trait::async_trait]
impl CommandHandler for HelpCommand {
    async fn run(&self, _args: &Args, _caller: &CallerContext) -> Result<Payload, CommandError> {
        Ok(Payload::Help {
            entries: self.entries.clone(),
        })
    }
}

/// Help's own entry.
pub fn entry() -> HelpEntry {
    HelpEntry {
        usage: NAME.to_string(),
        description: DESCRIPTION.to_string(),
    }
}

pub fn spec(entries: Vec<HelpEntry>) -> CommandSpec {
    CommandSpec::new(NAME, DESCRIPTION, HelpCommand { entries })
}
