#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    #[default]
    EventLog,
    Clock,
}

impl DisplayMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::EventLog => "events",
            Self::Clock => "clock",
        }
    }
}

/// Everything the layout reads about the current mode. Copied out of the
/// engine on every render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeState {
    pub mode: DisplayMode,
    pub debug_layout: bool,
    pub log_control_messages: bool,
    pub relative_timestamps: bool,
}

impl Default for ModeState {
    fn default() -> Self {
        Self {
            mode: DisplayMode::EventLog,
            debug_layout: false,
            log_control_messages: false,
            relative_timestamps: false,
        }
    }
}
