use crate::command::{
    Args, CallerContext, CommandError, CommandHandler, CommandSpec, ParamSpec, Payload,
};

/// Identifier the chat adapter dispatches when a member joins.
pub const WELCOME_COMMAND: &str = "welcome";

const MEMBER_PARAM: &str = "member";

pub struct WelcomeCommand;

#[async_trait::async_trait]
impl CommandHandler for WelcomeCommand {
    async fn run(&self, args: &Args, caller: &CallerContext) -> Result<Payload, CommandError> {
        let member = args.text(MEMBER_PARAM)?;
        Ok(Payload::Welcome {
            member: member.to_string(),
            guild: caller.guild.as_ref().map(|guild| guild.name.clone()),
            avatar_url: caller.avatar_url.clone(),
        })
    }
}

pub fn spec() -> CommandSpec {
    CommandSpec::new(WELCOME_COMMAND, "Greet a new member.", WelcomeCommand)
        .event_only()
        .param(ParamSpec::text(MEMBER_PARAM, "Mention of the new member").greedy())
}
