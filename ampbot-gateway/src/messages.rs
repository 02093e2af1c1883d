//! Fixed user-facing texts.

use crate::command::InstanceAction;

pub const RUNNING: &str = "🟢 Running";
pub const STOPPED: &str = "🔴 Stopped";
pub const UNKNOWN: &str = "Unknown";

pub const PONG_TITLE: &str = "🏓 Pong!";
pub const LATENCY_LABEL: &str = "⌛ Latency";

pub const HELP_TITLE: &str = "❓ Help";
pub const HELP_DESCRIPTION: &str = "List of available commands:";

pub const GUILD_INFO_TITLE: &str = "🛠️ Server Info";

pub const SERVER_STATUS_TITLE: &str = "🟢 Server Status";
pub const SERVER_STATUS_DESCRIPTION: &str = "Current server instance information.";

pub const INSTANCES_EMPTY_TITLE: &str = "📜 Instances List";
pub const INSTANCES_TITLE: &str = "📜 Instances on the server";
pub const NO_INSTANCES: &str = "No instances found.";

pub const INSTANCE_STARTED_TITLE: &str = "✅ Instance Started";
pub const INSTANCE_STOPPED_TITLE: &str = "🛑 Instance Stopped";

pub const WHEEL_TITLE: &str = "🎡 Wheel of Fortune";
pub const WINNER: &str = "🏆 Winner";
pub const NOT_WINNER: &str = "-";

pub const WELCOME_TITLE: &str = "👋 Welcome!";
pub const WELCOME_HINT: &str = "Type `/help` to see what I can do.";

pub const INVALID_COMMAND_TITLE: &str = "⚠️ Invalid Command";
pub const REJECTED_TITLE: &str = "❌ Request Rejected";
pub const SERVER_ERROR_TITLE: &str = "❌ Server Error";
pub const HELP_HINT: &str = "Use `/help` to list available commands.";

pub fn latency(ms: u128) -> String {
    format!("{} ms", ms)
}

pub fn guild_description(guild: &str) -> String {
    format!("Some basic info about {}", guild)
}

pub fn instance_count(count: usize) -> String {
    format!("Total Instances: {}", count)
}

pub fn instance_field_name(position: usize, friendly_name: &str) -> String {
    format!("[{}] {}", position, friendly_name)
}

pub fn instance_field_value(running: bool, id: &str, name: &str) -> String {
    let status = if running { RUNNING } else { STOPPED };
    format!(
        "**Status:** {}\n**Instance ID**: {}\n**Instance Name**: {}",
        status, id, name
    )
}

pub fn instance_action_done(action: InstanceAction, instance: &str) -> String {
    match action {
        InstanceAction::Start => format!("Successfully started instance: **{}**", instance),
        InstanceAction::Stop => format!("Successfully stopped instance: **{}**", instance),
    }
}

pub fn wheel_landed_on(winner: &str) -> String {
    format!("The wheel landed on **{}**!", winner)
}

pub fn welcome(member: &str, guild: Option<&str>) -> String {
    match guild {
        Some(guild) => format!("Welcome to **{}**, {}!", guild, member),
        None => format!("Welcome, {}!", member),
    }
}

pub fn usage(usage: &str) -> String {
    format!("`/{}`", usage)
}

pub fn problem_with_hint(problem: &str, hint: &str) -> String {
    format!("{}\n**Usage:** {}", problem, hint)
}

pub fn operation_failed(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("Operation `/{}` failed", name),
        None => "Operation failed".to_string(),
    }
}

pub fn more_sections(count: usize) -> String {
    format!("…and {} more", count)
}

pub fn server_error(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("Sorry, something went wrong while running `/{}`.", name),
        None => "Sorry, something went wrong.".to_string(),
    }
}

pub fn diagnostic(detail: &str) -> String {
    format!("```{}```", detail)
}
