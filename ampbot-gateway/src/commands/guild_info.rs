use crate::command::{Args, CallerContext, CommandError, CommandHandler, CommandSpec, Payload};

pub struct GuildInfoCommand;

#[async_trait::async_trait]
impl CommandHandler for GuildInfoCommand {
    async fn run(&self, _args: &Args, caller: &CallerContext) -> Result<Payload, CommandError> {
        let guild = caller.guild.clone().ok_or_else(|| {
            CommandError::Validation("this command can only be used in a server".to_string())
        })?;
        Ok(Payload::GuildInfo(guild))
    }
}

pub fn spec() -> CommandSpec {
    CommandSpec::new(
        "discordinfo",
        "Show information about this Discord server.",
        GuildInfoCommand,
    )
}
