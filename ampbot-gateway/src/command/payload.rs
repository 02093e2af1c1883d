use std::time::Duration;

use crate::amp::{Instance, ServerStatus};

use super::GuildSnapshot;

/// Success value of a command, one variant per response shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Pong {
        latency: Duration,
    },
    Help {
        entries: Vec<HelpEntry>,
    },
    GuildInfo(GuildSnapshot),
    ServerStatus(ServerStatus),
    /// Managed instances, controller entry already removed
    Instances {
        instances: Vec<Instance>,
    },
    InstanceAction {
        action: InstanceAction,
        instance: String,
        result: Option<String>,
    },
    Wheel {
        options: Vec<WheelOption>,
    },
    Welcome {
        member: String,
        guild: Option<String>,
        avatar_url: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub usage: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceAction {
    Start,
    Stop,
}

impl InstanceAction {
    /// Verb used in messages ("start", "stop").
    pub fn verb(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelOption {
    pub label: String,
    pub is_winner: bool,
}
