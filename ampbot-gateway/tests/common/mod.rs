//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use ampbot_gateway::amp::{ActionResult, AmpError, Instance, ManagementApi, ServerStatus};
use ampbot_gateway::command::{CallerContext, Dispatcher, GuildSnapshot};
use ampbot_gateway::commands::builtin_registry;

/// Scripted reply for a start/stop call.
#[derive(Debug, Clone)]
pub enum ActionReply {
    Ok(Option<String>),
    Rejected(Option<String>),
    Unreachable,
}

/// In-memory stand-in for the management panel.
pub struct FakeApi {
    pub instances: Vec<Instance>,
    pub action: ActionReply,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            instances: Vec::new(),
            action: ActionReply::Ok(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_instances(mut self, instances: Vec<Instance>) -> Self {
        self.instances = instances;
        self
    }

    pub fn with_action(mut self, action: ActionReply) -> Self {
        self.action = action;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn reply(&self) -> Result<ActionResult, AmpError> {
        match &self.action {
            ActionReply::Ok(result) => Ok(ActionResult {
                status: true,
                result: result.clone(),
                reason: None,
            }),
            ActionReply::Rejected(reason) => Ok(ActionResult {
                status: false,
                result: None,
                reason: reason.clone(),
            }),
            ActionReply::Unreachable => Err(AmpError::Status {
                status: 502,
                body: "Bad Gateway".to_string(),
            }),
        }
    }
}

#[async_trait::async_trait]
impl ManagementApi for FakeApi {
    async fn get_status(&self) -> Result<ServerStatus, AmpError> {
        self.record("get_status".to_string());
        Ok(ServerStatus {
            state: 20,
            uptime: Some("1.02:03:04".to_string()),
        })
    }

    async fn list_instances(&self) -> Result<Vec<Instance>, AmpError> {
        self.record("list_instances".to_string());
        Ok(self.instances.clone())
    }

    async fn start_instance(&self, name: &str) -> Result<ActionResult, AmpError> {
        self.record(format!("start {}", name));
        self.reply()
    }

    async fn stop_instance(&self, name: &str) -> Result<ActionResult, AmpError> {
        self.record(format!("stop {}", name));
        self.reply()
    }
}

pub fn instance(id: &str, friendly_name: &str, running: bool) -> Instance {
    Instance {
        id: id.to_string(),
        name: format!("{}01", friendly_name),
        friendly_name: friendly_name.to_string(),
        running,
    }
}

/// Dispatcher over the built-in commands.
pub fn dispatcher(api: Arc<FakeApi>) -> Dispatcher {
    let registry = builtin_registry(api).expect("built-in commands register");
    Dispatcher::new(registry, Duration::from_secs(5))
}

pub fn guild_caller() -> CallerContext {
    CallerContext {
        user: Some("tester".to_string()),
        guild: Some(GuildSnapshot {
            id: 1,
            name: "Test Guild".to_string(),
            owner_id: 42,
            member_count: 7,
            icon_url: Some("https://cdn.example/icon.png".to_string()),
        }),
        latency: Some(Duration::from_millis(35)),
        avatar_url: Some("https://cdn.example/avatar.png".to_string()),
    }
}
