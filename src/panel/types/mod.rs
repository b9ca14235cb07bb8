mod action;
mod message;

pub use action::PanelAction;
pub use message::{Importance, Message, UNKNOWN_SOURCE};
