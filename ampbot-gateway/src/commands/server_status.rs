use std::sync::Arc;

use crate::amp::ManagementApi;
use crate::command::{Args, CallerContext, CommandError, CommandHandler, CommandSpec, Payload};

pub struct ServerStatusCommand {
    api: Arc<dyn ManagementApi>,
}

#[async_trait::async_trait]
impl CommandHandler for ServerStatusCommand {
    async fn run(&self, _args: &Args, _caller: &CallerContext) -> Result<Payload, CommandError> {
        let status = self.api.get_status().await?;
        Ok(Payload::ServerStatus(status))
    }
}

pub fn spec(api: Arc<dyn ManagementApi>) -> CommandSpec {
    CommandSpec::new(
        "serverinfo",
        "Show the status of the management panel.",
        ServerStatusCommand { api },
    )
}
