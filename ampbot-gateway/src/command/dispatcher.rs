use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use tracing::{error, info, warn};

use crate::response::{self, ResponseMessage};

use super::{
    Args, CommandError, CommandRegistry, CommandSpec, FailureKind, HandlerResult, Invocation,
    ParamSpec,
};

/// Runs invocations against the registry under a uniform failure boundary.
///
/// `dispatch` never fails: unknown commands, bad arguments, collaborator
/// errors, timeouts and handler panics all end up as a formatted
/// [`ResponseMessage`].
pub struct Dispatcher {
    registry: CommandRegistry,
    timeout: Duration,
}

impl Dispatcher {
    pub fn new(registry: CommandRegistry, timeout: Duration) -> Self {
        Self { registry, timeout }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Resolve, run and format one invocation.
    pub async fn dispatch(&self, invocation: Invocation) -> ResponseMessage {
        let caller = invocation.caller.user.as_deref().unwrap_or("-");
        info!(
            command = %invocation.command,
            caller = %caller,
            "Dispatching command"
        );

        let Some(spec) = self
            .registry
            .resolve(&invocation.command)
            .filter(|spec| spec.trigger == invocation.trigger)
        else {
            info!("Unknown command '{}' from {}", invocation.command, caller);
            let result = HandlerResult::failure(
                FailureKind::Validation,
                format!("unknown command `{}`", invocation.command),
            );
            return response::format(&result, None);
        };

        let result = self.execute(spec, &invocation).await;
        log_outcome(spec, &result);
        response::format(&result, Some(spec))
    }

    /// Run a resolved command and classify its outcome.
    pub async fn execute(&self, spec: &CommandSpec, invocation: &Invocation) -> HandlerResult {
        let args = match parse_args(&spec.params, &invocation.args) {
            Ok(args) => args,
            Err(err) => return err.into(),
        };

        let run = AssertUnwindSafe(spec.handler.run(&args, &invocation.caller)).catch_unwind();
        match tokio::time::timeout(self.timeout, run).await {
            Err(_) => HandlerResult::failure(
                FailureKind::Transport,
                format!("timed out after {}s", self.timeout.as_secs_f32()),
            ),
            Ok(Err(panic)) => HandlerResult::failure(FailureKind::Internal, panic_message(&*panic)),
            Ok(Ok(result)) => result.into(),
        }
    }
}

/// Parse raw arguments against declared parameters, in declaration order.
///
/// The first bad parameter short-circuits. Extra arguments are ignored; a
/// greedy parameter takes everything left, joined by spaces.
pub fn parse_args(params: &[ParamSpec], raw: &[String]) -> Result<Args, CommandError> {
    let mut args = Args::default();
    let mut position = 0;

    for param in params {
        let value = if param.greedy {
            let rest = raw.get(position..).unwrap_or_default().join(" ");
            position = raw.len();
            rest
        } else {
            let value = raw.get(position).cloned().unwrap_or_default();
            position += 1;
            value
        };

        if value.trim().is_empty() {
            if !param.required {
                continue;
            }
            let parsed = (param.parse)(&value).map_err(|reason| {
                CommandError::Validation(format!(
                    "missing required argument `{}`: {}",
                    param.name, reason
                ))
            })?;
            args.insert(param.name, parsed);
            continue;
        }

        let parsed = (param.parse)(&value).map_err(|reason| {
            CommandError::Validation(format!("invalid argument `{}`: {}", param.name, reason))
        })?;
        args.insert(param.name, parsed);
    }

    Ok(args)
}

fn log_outcome(spec: &CommandSpec, result: &HandlerResult) {
    match result {
        HandlerResult::Success(_) => info!(command = spec.name, "Command succeeded"),
        HandlerResult::Failure { kind, message } => match kind {
            FailureKind::Validation => {
                info!(command = spec.name, "Rejected arguments: {}", message)
            }
            FailureKind::Domain => warn!(command = spec.name, "Request rejected: {}", message),
            FailureKind::Transport | FailureKind::Internal => error!(
                command = spec.name,
                kind = kind.as_str(),
                "Command failed: {}",
                message
            ),
        },
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        format!("handler panicked: {}", message)
    } else if let Some(message) = panic.downcast_ref::<String>() {
        format!("handler panicked: {}", message)
    } else {
        "handler panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{ArgValue, CallerContext, CommandHandler, Payload};
    use crate::response::Status;

    fn raw(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn parse_upper(raw: &str) -> Result<ArgValue, String> {
        if raw.chars().all(|c| c.is_ascii_uppercase() || c.is_whitespace()) {
            Ok(ArgValue::Text(raw.trim().to_string()))
        } else {
            Err("must be upper case".to_string())
        }
    }

    struct Echo;

    #[async_trait::async_trait]
    impl CommandHandler for Echo {
        async fn run(&self, args: &Args, _caller: &CallerContext) -> Result<Payload, CommandError> {
            Ok(Payload::InstanceAction {
                action: crate::command::InstanceAction::Start,
                instance: args.text("name")?.to_string(),
                result: None,
            })
        }
    }

    struct Panics;

    #[async_trait::async_trait]
    impl CommandHandler for Panics {
        async fn run(&self, _args: &Args, _caller: &CallerContext) -> Result<Payload, CommandError> {
            panic!("boom");
        }
    }

    struct Hangs;

    #[async_trait::async_trait]
    impl CommandHandler for Hangs {
        async fn run(&self, _args: &Args, _caller: &CallerContext) -> Result<Payload, CommandError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Err(CommandError::Internal("unreachable".to_string()))
        }
    }

    fn dispatcher() -> Dispatcher {
        let mut registry = CommandRegistry::new();
        registry
            .register(
                CommandSpec::new("echo", "Echo", Echo).param(ParamSpec::text("name", "Name")),
            )
            .unwrap();
        registry
            .register(CommandSpec::new("panics", "Panics", Panics))
            .unwrap();
        registry
            .register(CommandSpec::new("hangs", "Hangs", Hangs))
            .unwrap();
        registry
            .register(
                CommandSpec::new("greet", "Greet", Echo)
                    .param(ParamSpec::text("name", "Name"))
                    .event_only(),
            )
            .unwrap();
        Dispatcher::new(registry, Duration::from_millis(100))
    }

    #[test]
    fn test_parse_args_in_order_ignoring_extras() {
        let params = vec![ParamSpec::text("a", "A"), ParamSpec::text("b", "B")];
        let args = parse_args(&params, &raw(&["one", "two", "three"])).unwrap();
        assert_eq!(args.text("a").unwrap(), "one");
        assert_eq!(args.text("b").unwrap(), "two");
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_parse_args_missing_required() {
        let params = vec![ParamSpec::text("instance_name", "Instance")];
        let err = parse_args(&params, &[]).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Validation);
        assert!(err.to_string().contains("instance_name"));
    }

    #[test]
    fn test_parse_args_optional_absent() {
        let params = vec![ParamSpec::text("a", "A").optional()];
        let args = parse_args(&params, &[]).unwrap();
        assert!(args.is_empty());
    }

    #[test]
    fn test_parse_args_greedy_takes_remainder() {
        let params = vec![
            ParamSpec::text("first", "First"),
            ParamSpec::text("rest", "Rest").greedy(),
        ];
        let args = parse_args(&params, &raw(&["x", "A,", "B", "C"])).unwrap();
        assert_eq!(args.text("first").unwrap(), "x");
        assert_eq!(args.text("rest").unwrap(), "A, B C");
    }

    #[test]
    fn test_parse_args_first_failure_short_circuits() {
        let params = vec![
            ParamSpec::text("a", "A").with_parser(parse_upper),
            ParamSpec::text("b", "B"),
        ];
        let err = parse_args(&params, &raw(&["lower"])).unwrap_err();
        assert_eq!(
            err,
            CommandError::Validation("invalid argument `a`: must be upper case".to_string())
        );
    }

    #[tokio::test]
    async fn test_execute_success() {
        let dispatcher = dispatcher();
        let spec = dispatcher.registry().resolve("echo").unwrap();
        let result = dispatcher
            .execute(spec, &Invocation::new("echo", raw(&["vh1"])))
            .await;
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn test_execute_panic_is_internal() {
        let dispatcher = dispatcher();
        let spec = dispatcher.registry().resolve("panics").unwrap();
        let result = dispatcher
            .execute(spec, &Invocation::new("panics", vec![]))
            .await;
        assert_eq!(
            result,
            HandlerResult::failure(FailureKind::Internal, "handler panicked: boom")
        );
    }

    #[tokio::test]
    async fn test_execute_timeout_is_transport() {
        let dispatcher = dispatcher();
        let spec = dispatcher.registry().resolve("hangs").unwrap();
        let result = dispatcher
            .execute(spec, &Invocation::new("hangs", vec![]))
            .await;
        assert_eq!(result.failure_kind(), Some(FailureKind::Transport));
    }

    #[tokio::test]
    async fn test_dispatch_unknown_command() {
        let message = dispatcher()
            .dispatch(Invocation::new("nope", vec![]))
            .await;
        assert_eq!(message.status, Status::Error);
        assert!(
            message
                .sections
                .iter()
                .any(|section| section.text.contains("unknown command `nope`"))
        );
    }

    #[tokio::test]
    async fn test_dispatch_event_command_not_text_invocable() {
        let dispatcher = dispatcher();
        let typed = dispatcher
            .dispatch(Invocation::new("greet", raw(&["Mario"])))
            .await;
        assert_eq!(typed.status, Status::Error);

        let event = dispatcher
            .dispatch(Invocation::event("greet", raw(&["Mario"])))
            .await;
        assert_eq!(event.status, Status::Ok);
    }

    #[tokio::test]
    async fn test_dispatch_always_yields_one_message() {
        let dispatcher = dispatcher();
        for invocation in [
            Invocation::new("echo", vec![]),
            Invocation::new("echo", raw(&["  "])),
            Invocation::new("panics", vec![]),
            Invocation::new("hangs", vec![]),
            Invocation::new("", vec![]),
        ] {
            let message = dispatcher.dispatch(invocation).await;
            assert_eq!(message.status, Status::Error);
            assert!(!message.title.is_empty());
        }
    }
}
