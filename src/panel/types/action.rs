use crate::panel::app_state::{DisplayMode, ModeCommand};

/// Everything a button press or a control command can do. Touch and the
/// control channel both resolve to one of these before touching state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelAction {
    ClearEvents,
    ClearSticky,
    ToggleRelativeTimestamps,
    SelectMode(DisplayMode),
    SetDebugLayout(bool),
    SetLogControl(bool),
}

impl PanelAction {
    /// The mode-machine command this action maps to, if it is not a store
    /// operation.
    pub const fn mode_command(self) -> Option<ModeCommand> {
        match self {
            Self::ClearEvents | Self::ClearSticky => None,
            Self::ToggleRelativeTimestamps => Some(ModeCommand::ToggleRelativeTimestamps),
            Self::SelectMode(DisplayMode::EventLog) => Some(ModeCommand::ActivateEvents),
            Self::SelectMode(DisplayMode::Clock) => Some(ModeCommand::ActivateClock),
            Self::SetDebugLayout(enabled) => Some(ModeCommand::SetDebugLayout(enabled)),
            Self::SetLogControl(enabled) => Some(ModeCommand::SetLogControl(enabled)),
        }
    }
}
