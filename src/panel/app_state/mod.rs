mod engine;
mod events;
mod machine;
mod types;

pub use engine::{ModeApplyResult, ModeApplyStatus, ModeEngine};
pub use events::ModeCommand;
pub use types::{DisplayMode, ModeState};
