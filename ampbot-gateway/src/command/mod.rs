//! Command execution framework.
//!
//! A [`CommandSpec`] binds an identifier to a [`CommandHandler`] and declares
//! the arguments it takes. The [`CommandRegistry`] holds every spec, and the
//! [`Dispatcher`] turns an [`Invocation`] into exactly one
//! [`ResponseMessage`](crate::response::ResponseMessage).

mod dispatcher;
mod error;
mod payload;
mod registry;

use std::time::Duration;

pub use dispatcher::{Dispatcher, parse_args};
pub use error::{CommandError, FailureKind, HandlerResult, NO_REASON_GIVEN};
pub use payload::{HelpEntry, InstanceAction, Payload, WheelOption};
pub use registry::{CommandRegistry, RegistryError};

/// Parses one raw argument into a typed value, or explains why it can't.
pub type ParseFn = fn(&str) -> Result<ArgValue, String>;

/// Typed argument value produced by a [`ParseFn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Text(String),
    Options(Vec<String>),
}

/// Declared parameter of a command.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
    /// Consume the remainder of the input as a single value
    pub greedy: bool,
    pub parse: ParseFn,
}

impl ParamSpec {
    /// Required free-text parameter.
    pub fn text(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            required: true,
            greedy: false,
            parse: parse_text,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn greedy(mut self) -> Self {
        self.greedy = true;
        self
    }

    pub fn with_parser(mut self, parse: ParseFn) -> Self {
        self.parse = parse;
        self
    }
}

/// Default parser: any non-blank text, trimmed.
pub fn parse_text(raw: &str) -> Result<ArgValue, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("must not be empty".to_string());
    }
    Ok(ArgValue::Text(trimmed.to_string()))
}

/// How a command gets triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Slash or prefix command typed by a user
    Text,
    /// Platform event such as a member joining
    Event,
}

/// Trait that all command handlers implement.
///
/// Collaborators (e.g. the management API client) are injected when the
/// handler is constructed, never looked up globally.
#[async_trait::async_trait]
pub trait CommandHandler: Send + Sync {
    async fn run(&self, args: &Args, caller: &CallerContext) -> Result<Payload, CommandError>;
}

/// Registered command: identifier, argument shape and handler.
pub struct CommandSpec {
    pub name: &'static str,
    pub aliases: Vec<&'static str>,
    pub description: &'static str,
    pub trigger: Trigger,
    pub params: Vec<ParamSpec>,
    pub handler: Box<dyn CommandHandler>,
}

impl CommandSpec {
    pub fn new(
        name: &'static str,
        description: &'static str,
        handler: impl CommandHandler + 'static,
    ) -> Self {
        Self {
            name,
            aliases: Vec::new(),
            description,
            trigger: Trigger::Text,
            params: Vec::new(),
            handler: Box::new(handler),
        }
    }

    pub fn alias(mut self, alias: &'static str) -> Self {
        self.aliases.push(alias);
        self
    }

    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Mark the command as event-triggered only (not exposed to users).
    pub fn event_only(mut self) -> Self {
        self.trigger = Trigger::Event;
        self
    }

    /// Primary name followed by aliases.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }

    /// Usage string, e.g. `start_instance <instance_name>`.
    pub fn usage(&self) -> String {
        let mut usage = self.name.to_string();
        for param in &self.params {
            let label = if param.greedy {
                format!("{}...", param.name)
            } else {
                param.name.to_string()
            };
            if param.required {
                usage.push_str(&format!(" <{}>", label));
            } else {
                usage.push_str(&format!(" [{}]", label));
            }
        }
        usage
    }
}

impl std::fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("trigger", &self.trigger)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Parsed arguments, keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    values: Vec<(&'static str, ArgValue)>,
}

impl Args {
    pub fn insert(&mut self, name: &'static str, value: ArgValue) {
        self.values.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Text value of a parameter.
    pub fn text(&self, name: &str) -> Result<&str, CommandError> {
        match self.get(name) {
            Some(ArgValue::Text(text)) => Ok(text),
            Some(other) => Err(CommandError::Internal(format!(
                "argument `{}` has unexpected shape {:?}",
                name, other
            ))),
            None => Err(CommandError::Validation(format!(
                "missing argument `{}`",
                name
            ))),
        }
    }

    /// Option list value of a parameter.
    pub fn options(&self, name: &str) -> Result<&[String], CommandError> {
        match self.get(name) {
            Some(ArgValue::Options(options)) => Ok(options),
            Some(other) => Err(CommandError::Internal(format!(
                "argument `{}` has unexpected shape {:?}",
                name, other
            ))),
            None => Err(CommandError::Validation(format!(
                "missing argument `{}`",
                name
            ))),
        }
    }
}

/// Guild metadata captured by the chat adapter at invocation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildSnapshot {
    pub id: u64,
    pub name: String,
    pub owner_id: u64,
    pub member_count: u64,
    pub icon_url: Option<String>,
}

/// Caller context. The dispatcher passes it through untouched.
#[derive(Debug, Clone, Default)]
pub struct CallerContext {
    /// Display name of the user who triggered the command
    pub user: Option<String>,
    /// Guild the command was issued in (None in DMs)
    pub guild: Option<GuildSnapshot>,
    /// Gateway heartbeat latency, when known
    pub latency: Option<Duration>,
    /// Avatar of the user, used by welcome messages
    pub avatar_url: Option<String>,
}

/// One inbound request to run a command.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub command: String,
    pub args: Vec<String>,
    pub trigger: Trigger,
    pub caller: CallerContext,
}

impl Invocation {
    /// User-triggered invocation.
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            trigger: Trigger::Text,
            caller: CallerContext::default(),
        }
    }

    /// Event-triggered invocation (e.g. member join).
    pub fn event(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            trigger: Trigger::Event,
            ..Self::new(command, args)
        }
    }

    pub fn with_caller(mut self, caller: CallerContext) -> Self {
        self.caller = caller;
        self
    }

    /// Split a prefix-stripped text line (`start_instance vh1`) into an invocation.
    ///
    /// Returns `None` for a blank line.
    pub fn from_text(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let command = tokens.next()?;
        let args = tokens.map(str::to_string).collect();
        Some(Self::new(command.to_lowercase(), args))
    }
}
