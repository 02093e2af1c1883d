use serenity::builder::{CreateCommand, CreateCommandOption, EditInteractionResponse};
use serenity::model::application::{CommandInteraction, CommandOptionType, Interaction};
use serenity::prelude::*;
use tracing::{debug, error};

use crate::command::{CommandRegistry, CommandSpec, Invocation};

use super::bot::Bot;
use super::send::to_embed;

/// Slash commands for every user-facing spec, one per name and alias.
pub(super) fn slash_commands(registry: &CommandRegistry) -> Vec<CreateCommand> {
    registry
        .text_commands()
        .flat_map(|spec| spec.names().map(move |name| slash_command(spec, name)))
        .collect()
}

fn slash_command(spec: &CommandSpec, name: &str) -> CreateCommand {
    spec.params.iter().fold(
        CreateCommand::new(name).description(spec.description),
        |command, param| {
            command.add_option(
                CreateCommandOption::new(CommandOptionType::String, param.name, param.description)
                    .required(param.required),
            )
        },
    )
}

/// Raw arguments in declaration order. Absent options become empty strings
/// so later options keep their position.
pub(super) fn slash_arguments(spec: &CommandSpec, values: &[(&str, &str)]) -> Vec<String> {
    spec.params
        .iter()
        .map(|param| {
            values
                .iter()
                .find(|(name, _)| *name == param.name)
                .map(|(_, value)| value.to_string())
                .unwrap_or_default()
        })
        .collect()
}

/// Serenity requires a single `EventHandler` impl, so the interaction body
/// lives here as a method the handler in `bot.rs` delegates to.
impl Bot {
    pub(super) async fn handle_interaction(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        debug!(
            "Slash command /{} from {} ({})",
            command.data.name, command.user.name, command.user.id
        );

        if let Err(e) = command.defer(&ctx.http).await {
            error!("Failed to acknowledge /{}: {}", command.data.name, e);
            return;
        }

        let invocation = self.invocation_for(&ctx, &command).await;
        let response = self.state.dispatcher.dispatch(invocation).await;

        if let Err(e) = command
            .edit_response(&ctx.http, EditInteractionResponse::new().embed(to_embed(&response)))
            .await
        {
            error!("Failed to respond to /{}: {}", command.data.name, e);
        }
    }

    async fn invocation_for(&self, ctx: &Context, command: &CommandInteraction) -> Invocation {
        let values: Vec<(&str, &str)> = command
            .data
            .options
            .iter()
            .filter_map(|option| Some((option.name.as_str(), option.value.as_str()?)))
            .collect();

        let args = match self.state.dispatcher.registry().resolve(&command.data.name) {
            Some(spec) => slash_arguments(spec, &values),
            None => values.iter().map(|(_, value)| value.to_string()).collect(),
        };

        let caller = self
            .caller_context(ctx, &command.user, command.guild_id)
            .await;
        Invocation::new(command.data.name.clone(), args).with_caller(caller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Args, CallerContext, CommandError, CommandHandler, ParamSpec, Payload};

    struct Noop;

    #[async_trait::async_trait]
    impl CommandHandler for Noop {
        async fn run(&self, _args: &Args, _caller: &CallerContext) -> Result<Payload, CommandError> {
            Ok(Payload::Help { entries: vec![] })
        }
    }

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry
            .register(
                CommandSpec::new("wheel", "Spin", Noop)
                    .alias("ruota")
                    .param(ParamSpec::text("options", "Options").greedy()),
            )
            .unwrap();
        registry
            .register(CommandSpec::new("welcome", "Greet", Noop).event_only())
            .unwrap();
        registry
    }

    #[test]
    fn test_slash_commands_cover_aliases_and_skip_events() {
        let commands = slash_commands(&registry());
        let json: Vec<serde_json::Value> = commands
            .iter()
            .map(|command| serde_json::to_value(command).unwrap())
            .collect();
        let names: Vec<&str> = json.iter().filter_map(|c| c["name"].as_str()).collect();
        assert_eq!(names, vec!["wheel", "ruota"]);
        assert_eq!(json[0]["options"][0]["name"], "options");
        assert_eq!(json[0]["options"][0]["required"], true);
    }

    #[test]
    fn test_slash_arguments_follow_declaration_order() {
        let spec = CommandSpec::new("pair", "Pair", Noop)
            .param(ParamSpec::text("first", "First"))
            .param(ParamSpec::text("second", "Second").optional());
        let args = slash_arguments(&spec, &[("second", "b"), ("first", "a")]);
        assert_eq!(args, vec!["a", "b"]);

        let args = slash_arguments(&spec, &[("second", "b")]);
        assert_eq!(args, vec!["", "b"]);
    }
}
