//! Response formatter.
//!
//! Turns a [`HandlerResult`] into a [`ResponseMessage`], a neutral structure
//! the chat adapter renders however it likes. Nothing here depends on a
//! rendering library.

use crate::command::{CommandSpec, FailureKind, HandlerResult, InstanceAction, Payload};
use crate::messages;

/// Presentation status, mapped to a colour by the adapter.
///
/// `Warn` marks a successful call with nothing to show (e.g. no instances).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Warn,
    Error,
}

/// Labeled block of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub text: String,
    pub inline: bool,
}

impl Section {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            inline: false,
        }
    }

    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }
}

/// Renderable response, produced once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMessage {
    pub title: String,
    pub description: Option<String>,
    pub sections: Vec<Section>,
    pub status: Status,
    pub thumbnail: Option<String>,
}

impl ResponseMessage {
    fn new(title: impl Into<String>, status: Status) -> Self {
        Self {
            title: title.into(),
            description: None,
            sections: Vec::new(),
            status,
            thumbnail: None,
        }
    }

    fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    fn thumbnail(mut self, url: Option<String>) -> Self {
        self.thumbnail = url;
        self
    }
}

/// Format a handler outcome. `spec` is `None` when the command was not found.
pub fn format(result: &HandlerResult, spec: Option<&CommandSpec>) -> ResponseMessage {
    match result {
        HandlerResult::Success(payload) => format_success(payload),
        HandlerResult::Failure { kind, message } => format_failure(*kind, message, spec),
    }
}

fn format_success(payload: &Payload) -> ResponseMessage {
    match payload {
        Payload::Pong { latency } => ResponseMessage::new(messages::PONG_TITLE, Status::Ok)
            .section(Section::new(
                messages::LATENCY_LABEL,
                messages::latency(latency.as_millis()),
            )),
        Payload::Help { entries } => {
            let mut message = ResponseMessage::new(messages::HELP_TITLE, Status::Ok)
                .description(messages::HELP_DESCRIPTION);
            for entry in entries {
                message = message.section(Section::new(
                    format!("/{}", entry.usage),
                    entry.description.clone(),
                ));
            }
            message
        }
        Payload::GuildInfo(guild) => ResponseMessage::new(messages::GUILD_INFO_TITLE, Status::Ok)
            .description(messages::guild_description(&guild.name))
            .section(Section::new("Server Name", guild.name.clone()))
            .section(Section::new("Server ID", guild.id.to_string()))
            .section(Section::new("Owner", format!("<@{}>", guild.owner_id)))
            .section(Section::new("Member Count", guild.member_count.to_string()))
            .thumbnail(guild.icon_url.clone()),
        Payload::ServerStatus(status) => {
            let state = if status.is_running() {
                messages::RUNNING
            } else {
                messages::STOPPED
            };
            ResponseMessage::new(messages::SERVER_STATUS_TITLE, Status::Ok)
                .description(messages::SERVER_STATUS_DESCRIPTION)
                .section(Section::new("🔹 Status", state))
                .section(Section::new(
                    "⏳ Uptime",
                    status.uptime.as_deref().unwrap_or(messages::UNKNOWN),
                ))
        }
        Payload::Instances { instances } => {
            if instances.is_empty() {
                return ResponseMessage::new(messages::INSTANCES_EMPTY_TITLE, Status::Warn)
                    .description(messages::NO_INSTANCES);
            }
            let mut message = ResponseMessage::new(messages::INSTANCES_TITLE, Status::Ok)
                .description(messages::instance_count(instances.len()));
            for (position, instance) in instances.iter().enumerate() {
                message = message.section(Section::new(
                    messages::instance_field_name(position + 1, &instance.friendly_name),
                    messages::instance_field_value(instance.running, &instance.id, &instance.name),
                ));
            }
            message
        }
        Payload::InstanceAction {
            action,
            instance,
            result,
        } => {
            let title = match action {
                InstanceAction::Start => messages::INSTANCE_STARTED_TITLE,
                InstanceAction::Stop => messages::INSTANCE_STOPPED_TITLE,
            };
            let mut message = ResponseMessage::new(title, Status::Ok)
                .description(messages::instance_action_done(*action, instance));
            if let Some(result) = result {
                message = message.section(Section::new("Result", result.clone()));
            }
            message
        }
        Payload::Wheel { options } => {
            let mut message = ResponseMessage::new(messages::WHEEL_TITLE, Status::Ok);
            if let Some(winner) = options.iter().find(|option| option.is_winner) {
                message = message.description(messages::wheel_landed_on(&winner.label));
            }
            for (position, option) in options.iter().enumerate() {
                let marker = if option.is_winner {
                    messages::WINNER
                } else {
                    messages::NOT_WINNER
                };
                message = message
                    .section(Section::new(format!("{}. {}", position + 1, option.label), marker).inline());
            }
            message
        }
        Payload::Welcome {
            member,
            guild,
            avatar_url,
        } => ResponseMessage::new(messages::WELCOME_TITLE, Status::Ok)
            .description(messages::welcome(member, guild.as_deref()))
            .section(Section::new("Getting started", messages::WELCOME_HINT))
            .thumbnail(avatar_url.clone()),
    }
}

fn format_failure(kind: FailureKind, message: &str, spec: Option<&CommandSpec>) -> ResponseMessage {
    match kind {
        FailureKind::Validation => {
            let hint = match spec {
                Some(spec) => messages::usage(&spec.usage()),
                None => messages::HELP_HINT.to_string(),
            };
            ResponseMessage::new(messages::INVALID_COMMAND_TITLE, Status::Error).section(
                Section::new("Problem", messages::problem_with_hint(message, &hint)),
            )
        }
        FailureKind::Domain => ResponseMessage::new(messages::REJECTED_TITLE, Status::Error)
            .section(Section::new(
                messages::operation_failed(spec.map(|spec| spec.name)),
                message,
            )),
        FailureKind::Transport | FailureKind::Internal => {
            ResponseMessage::new(messages::SERVER_ERROR_TITLE, Status::Error)
                .description(messages::server_error(spec.map(|spec| spec.name)))
                .section(Section::new("Details", messages::diagnostic(message)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::amp::{Instance, ServerStatus};
    use crate::command::{
        Args, CallerContext, CommandError, CommandHandler, ParamSpec, WheelOption,
    };

    struct Noop;

    #[async_trait::async_trait]
    impl CommandHandler for Noop {
        async fn run(&self, _args: &Args, _caller: &CallerContext) -> Result<Payload, CommandError> {
            Ok(Payload::Pong {
                latency: Duration::ZERO,
            })
        }
    }

    fn start_spec() -> CommandSpec {
        CommandSpec::new("start_instance", "Start a specified instance.", Noop)
            .param(ParamSpec::text("instance_name", "Instance to start"))
    }

    fn instance(id: &str, friendly: &str, running: bool) -> Instance {
        Instance {
            id: id.to_string(),
            name: id.to_uppercase(),
            friendly_name: friendly.to_string(),
            running,
        }
    }

    #[test]
    fn test_pong() {
        let message = format(
            &HandlerResult::Success(Payload::Pong {
                latency: Duration::from_millis(42),
            }),
            None,
        );
        assert_eq!(message.status, Status::Ok);
        assert_eq!(message.sections.len(), 1);
        insta::assert_snapshot!(message.sections[0].text, @"42 ms");
    }

    #[test]
    fn test_validation_error_shows_usage() {
        let spec = start_spec();
        let message = format(
            &HandlerResult::failure(FailureKind::Validation, "missing required argument"),
            Some(&spec),
        );
        assert_eq!(message.status, Status::Error);
        assert_eq!(message.sections.len(), 1);
        assert_eq!(
            message.sections[0].text,
            "missing required argument\n**Usage:** `/start_instance <instance_name>`"
        );
    }

    #[test]
    fn test_unknown_command_points_to_help() {
        let message = format(
            &HandlerResult::failure(FailureKind::Validation, "unknown command `x`"),
            None,
        );
        assert_eq!(message.sections.len(), 1);
        assert!(message.sections[0].text.ends_with(messages::HELP_HINT));
    }

    #[test]
    fn test_domain_error_names_operation() {
        let spec = start_spec();
        let message = format(
            &HandlerResult::failure(FailureKind::Domain, "Instance not found"),
            Some(&spec),
        );
        assert_eq!(message.title, messages::REJECTED_TITLE);
        assert_eq!(
            message.sections,
            vec![Section::new(
                "Operation `/start_instance` failed",
                "Instance not found"
            )]
        );
    }

    #[test]
    fn test_transport_and_internal_are_generic() {
        let spec = start_spec();
        for kind in [FailureKind::Transport, FailureKind::Internal] {
            let message = format(
                &HandlerResult::failure(kind, "connection refused"),
                Some(&spec),
            );
            assert_eq!(message.title, messages::SERVER_ERROR_TITLE);
            assert_eq!(message.status, Status::Error);
            assert_eq!(
                message.description.as_deref(),
                Some("Sorry, something went wrong while running `/start_instance`.")
            );
            assert_eq!(message.sections.len(), 1);
            assert_eq!(message.sections[0].text, "```connection refused```");
        }
    }

    #[test]
    fn test_instances_listing() {
        let message = format(
            &HandlerResult::Success(Payload::Instances {
                instances: vec![instance("a1", "Valheim", true), instance("b2", "Minecraft", false)],
            }),
            None,
        );
        assert_eq!(message.description.as_deref(), Some("Total Instances: 2"));
        assert_eq!(message.sections.len(), 2);
        assert_eq!(message.sections[0].name, "[1] Valheim");
        assert!(message.sections[0].text.contains(messages::RUNNING));
        assert!(message.sections[1].text.contains(messages::STOPPED));
        assert!(message.sections[1].text.contains("**Instance Name**: B2"));
    }

    #[test]
    fn test_instances_empty() {
        let message = format(
            &HandlerResult::Success(Payload::Instances { instances: vec![] }),
            None,
        );
        assert_eq!(message.status, Status::Warn);
        assert!(message.sections.is_empty());
        assert_eq!(message.description.as_deref(), Some(messages::NO_INSTANCES));
    }

    #[test]
    fn test_server_status_unknown_uptime() {
        let message = format(
            &HandlerResult::Success(Payload::ServerStatus(ServerStatus {
                state: 0,
                uptime: None,
            })),
            None,
        );
        assert_eq!(message.sections[0].text, messages::STOPPED);
        assert_eq!(message.sections[1].text, messages::UNKNOWN);
    }

    #[test]
    fn test_wheel_sections_follow_options() {
        let options = vec![
            WheelOption {
                label: "A".to_string(),
                is_winner: false,
            },
            WheelOption {
                label: "B".to_string(),
                is_winner: true,
            },
        ];
        let message = format(&HandlerResult::Success(Payload::Wheel { options }), None);
        assert_eq!(message.sections.len(), 2);
        assert_eq!(message.sections[0].name, "1. A");
        assert_eq!(message.sections[1].text, messages::WINNER);
        assert_eq!(
            message.description.as_deref(),
            Some("The wheel landed on **B**!")
        );
    }
}
