use crate::panel::{app_state::DisplayMode, types::PanelAction};

/// A recognized control-channel command. Anything else is dropped by
/// [`ControlCommand::parse`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlCommand {
    DebugLayout(bool),
    LogControl(bool),
    ModeSelect(DisplayMode),
    ClearEvents,
    ClearSticky,
}

fn parse_switch(payload: &str) -> Option<bool> {
    if payload.is_empty() || payload.eq_ignore_ascii_case("disable") {
        Some(false)
    } else if payload.eq_ignore_ascii_case("enable") {
        Some(true)
    } else {
        None
    }
}

impl ControlCommand {
    /// `command` is the topic suffix after the control prefix. Both parts
    /// are trimmed and matched case-insensitively.
    pub fn parse(command: &str, payload: &str) -> Option<Self> {
        let payload = payload.trim();
        match command.trim().to_ascii_lowercase().as_str() {
            "debug-layout" => parse_switch(payload).map(Self::DebugLayout),
            "log-control" => parse_switch(payload).map(Self::LogControl),
            "mode-select" => {
                if payload.eq_ignore_ascii_case("events") {
                    Some(Self::ModeSelect(DisplayMode::EventLog))
                } else if payload.eq_ignore_ascii_case("clock") {
                    Some(Self::ModeSelect(DisplayMode::Clock))
                } else {
                    None
                }
            }
            "clear-events" => Some(Self::ClearEvents),
            "clear-sticky" => Some(Self::ClearSticky),
            _ => None,
        }
    }

    pub const fn action(self) -> PanelAction {
        match self {
            Self::DebugLayout(enabled) => PanelAction::SetDebugLayout(enabled),
            Self::LogControl(enabled) => PanelAction::SetLogControl(enabled),
            Self::ModeSelect(mode) => PanelAction::SelectMode(mode),
            Self::ClearEvents => PanelAction::ClearEvents,
            Self::ClearSticky => PanelAction::ClearSticky,
        }
    }
}
