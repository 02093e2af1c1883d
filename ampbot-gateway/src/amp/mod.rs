//! AMP (CubeCoders Application Management Panel) collaborator.
//!
//! [`ManagementApi`] is the narrow seam the command handlers depend on;
//! [`AmpClient`] implements it over AMP's JSON HTTP API.

pub mod client;

pub use client::AmpClient;

use serde::{Deserialize, Serialize};

use crate::command::CommandError;

/// AMP application state `Ready`.
pub const STATE_READY: i32 = 20;
/// AMP application state `Indeterminate`, reported by the ADS controller itself.
pub const STATE_INDETERMINATE: i32 = 999;

/// Status of the panel's own instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub state: i32,
    pub uptime: Option<String>,
}

impl ServerStatus {
    pub fn is_running(&self) -> bool {
        matches!(self.state, STATE_READY | STATE_INDETERMINATE)
    }
}

/// One entry of the instance list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub id: String,
    pub name: String,
    pub friendly_name: String,
    pub running: bool,
}

/// Outcome of a start/stop request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub status: bool,
    pub result: Option<String>,
    pub reason: Option<String>,
}

/// AMP client errors
#[derive(Debug, thiserror::Error)]
pub enum AmpError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AMP returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("AMP login rejected: {0}")]
    LoginRejected(String),

    #[error("AMP API error: {message}")]
    Api { message: String },

    #[error("Invalid response format: {0}")]
    InvalidFormat(String),
}

impl From<AmpError> for CommandError {
    fn from(err: AmpError) -> Self {
        match err {
            AmpError::LoginRejected(reason) => {
                CommandError::Domain(format!("login rejected: {}", reason))
            }
            AmpError::Api { message } => CommandError::domain(Some(message)),
            AmpError::Http(e) if e.is_timeout() => {
                CommandError::Transport("management panel timed out".to_string())
            }
            other => CommandError::Transport(other.to_string()),
        }
    }
}

/// Management API used by the instance commands.
#[async_trait::async_trait]
pub trait ManagementApi: Send + Sync {
    async fn get_status(&self) -> Result<ServerStatus, AmpError>;

    /// All instances known to the controller. The first entry is the
    /// controller itself.
    async fn list_instances(&self) -> Result<Vec<Instance>, AmpError>;

    async fn start_instance(&self, name: &str) -> Result<ActionResult, AmpError>;

    async fn stop_instance(&self, name: &str) -> Result<ActionResult, AmpError>;
}
