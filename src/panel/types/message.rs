use chrono::{DateTime, Local};
use embedded_graphics::pixelcolor::Rgb888;

use crate::panel::config::{
    TEXT_COLOR_BODY, TEXT_COLOR_CONTROL, TEXT_COLOR_ERROR, TEXT_COLOR_WARNING,
};

pub const UNKNOWN_SOURCE: &str = "Unknown";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Importance {
    #[default]
    Info,
    Warning,
    Error,
    Control,
}

impl Importance {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("info") {
            Some(Self::Info)
        } else if value.eq_ignore_ascii_case("warning") {
            Some(Self::Warning)
        } else if value.eq_ignore_ascii_case("error") {
            Some(Self::Error)
        } else if value.eq_ignore_ascii_case("control") {
            Some(Self::Control)
        } else {
            None
        }
    }

    pub const fn is_sticky(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }

    pub const fn text_color(self) -> Rgb888 {
        match self {
            Self::Info => TEXT_COLOR_BODY,
            Self::Warning => TEXT_COLOR_WARNING,
            Self::Error => TEXT_COLOR_ERROR,
            Self::Control => TEXT_COLOR_CONTROL,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Control => "control",
        }
    }
}

/// One ingested event. Fields are private so a constructed message cannot
/// change, and stickiness is fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    text: String,
    source: String,
    importance: Importance,
    timestamp: DateTime<Local>,
    sticky: bool,
}

impl Message {
    /// Returns `None` when `text` is blank.
    pub fn new(
        text: impl Into<String>,
        source: impl Into<String>,
        importance: Importance,
        timestamp: DateTime<Local>,
    ) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        let source = source.into();
        let source = if source.trim().is_empty() {
            UNKNOWN_SOURCE.to_string()
        } else {
            source
        };
        Some(Self {
            text,
            source,
            importance,
            timestamp,
            sticky: importance.is_sticky(),
        })
    }

    pub fn info(text: impl Into<String>, source: impl Into<String>) -> Option<Self> {
        Self::new(text, source, Importance::Info, Local::now())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn importance(&self) -> Importance {
        self.importance
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn is_sticky(&self) -> bool {
        self.sticky
    }
}
