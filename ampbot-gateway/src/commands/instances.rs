//! Instance lifecycle commands: list, start and stop.

use std::sync::Arc;

use tracing::info;

use crate::amp::{ActionResult, ManagementApi};
use crate::command::{
    Args, CallerContext, CommandError, CommandHandler, CommandSpec, InstanceAction, ParamSpec,
    Payload,
};

const INSTANCE_PARAM: &str = "instance_name";

pub struct ListInstancesCommand {
    api: Arc<dyn ManagementApi>,
}

#[async_trait::async_trait]
impl CommandHandler for ListInstancesCommand {
    async fn run(&self, _args: &Args, _caller: &CallerContext) -> Result<Payload, CommandError> {
        // Entry 0 is the ADS controller, not a game server.
        let instances = self
            .api
            .list_instances()
            .await?
            .into_iter()
            .skip(1)
            .collect();
        Ok(Payload::Instances { instances })
    }
}

pub struct InstanceActionCommand {
    api: Arc<dyn ManagementApi>,
    action: InstanceAction,
}

#[async_trait::async_trait]
impl CommandHandler for InstanceActionCommand {
    async fn run(&self, args: &Args, caller: &CallerContext) -> Result<Payload, CommandError> {
        let instance = args.text(INSTANCE_PARAM)?;
        info!(
            instance,
            caller = caller.user.as_deref().unwrap_or("-"),
            "Requesting instance {}",
            self.action.verb()
        );

        let outcome = match self.action {
            InstanceAction::Start => self.api.start_instance(instance).await?,
            InstanceAction::Stop => self.api.stop_instance(instance).await?,
        };
        into_payload(self.action, instance, outcome)
    }
}

fn into_payload(
    action: InstanceAction,
    instance: &str,
    outcome: ActionResult,
) -> Result<Payload, CommandError> {
    if !outcome.status {
        return Err(CommandError::domain(outcome.reason));
    }
    Ok(Payload::InstanceAction {
        action,
        instance: instance.to_string(),
        result: outcome.result,
    })
}

pub fn list_spec(api: Arc<dyn ManagementApi>) -> CommandSpec {
    CommandSpec::new(
        "instances",
        "List the game server instances.",
        ListInstancesCommand { api },
    )
}

pub fn start_spec(api: Arc<dyn ManagementApi>) -> CommandSpec {
    CommandSpec::new(
        "start_instance",
        "Start a specified instance.",
        InstanceActionCommand {
            api,
            action: InstanceAction::Start,
        },
    )
    .param(ParamSpec::text(INSTANCE_PARAM, "Name of the instance to start"))
}

pub fn stop_spec(api: Arc<dyn ManagementApi>) -> CommandSpec {
    CommandSpec::new(
        "stop_instance",
        "Stop a specified instance.",
        InstanceActionCommand {
            api,
            action: InstanceAction::Stop,
        },
    )
    .param(ParamSpec::text(INSTANCE_PARAM, "Name of the instance to stop"))
}
