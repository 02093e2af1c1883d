use super::Payload;

/// Placeholder reason when a collaborator rejects a request without saying why.
pub const NO_REASON_GIVEN: &str = "no reason given";

/// Failure classification shared by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Caller input malformed or missing
    Validation,
    /// Collaborator explicitly rejected the request
    Domain,
    /// Collaborator unreachable, timed out, or returned unparsable data
    Transport,
    /// Anything unexpected
    Internal,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Domain => "domain",
            Self::Transport => "transport",
            Self::Internal => "internal",
        }
    }
}

/// Error returned by command handlers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Domain(String),

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Internal(String),
}

impl CommandError {
    /// Domain failure carrying the collaborator's reason when it gave one.
    pub fn domain(reason: Option<String>) -> Self {
        let reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| NO_REASON_GIVEN.to_string());
        Self::Domain(reason)
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Validation(_) => FailureKind::Validation,
            Self::Domain(_) => FailureKind::Domain,
            Self::Transport(_) => FailureKind::Transport,
            Self::Internal(_) => FailureKind::Internal,
        }
    }
}

/// Outcome of exactly one invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerResult {
    Success(Payload),
    Failure { kind: FailureKind, message: String },
}

impl HandlerResult {
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success(_) => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }
}

impl From<CommandError> for HandlerResult {
    fn from(err: CommandError) -> Self {
        Self::failure(err.kind(), err.to_string())
    }
}

impl From<Result<Payload, CommandError>> for HandlerResult {
    fn from(result: Result<Payload, CommandError>) -> Self {
        match result {
            Ok(payload) => Self::Success(payload),
            Err(err) => err.into(),
        }
    }
}
