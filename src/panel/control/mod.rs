mod command;
mod processor;

pub use command::ControlCommand;
pub use processor::{ControlOutcome, ControlProcessor};
