pub mod amp;
pub mod command;
pub mod commands;
pub mod discord;
pub mod messages;
pub mod response;
pub mod state;

pub use amp::{AmpClient, AmpError, ManagementApi};
pub use command::{CommandRegistry, Dispatcher, HandlerResult, Invocation};
pub use response::{ResponseMessage, Status};
