use crate::command::{Args, CallerContext, CommandError, CommandHandler, CommandSpec, Payload};

pub struct PingCommand;

#[async_trait::async_trait]
impl CommandHandler for PingCommand {
    async fn run(&self, _args: &Args, caller: &CallerContext) -> Result<Payload, CommandError> {
        Ok(Payload::Pong {
            latency: caller.latency.unwrap_or_default(),
        })
    }
}

pub fn spec() -> CommandSpec {
    CommandSpec::new("ping", "Check the bot latency.", PingCommand)
}
