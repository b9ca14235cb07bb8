use embedded_graphics::{prelude::Point, primitives::Rectangle};

use crate::panel::{
    app_state::DisplayMode,
    types::PanelAction,
};

/// Stable button identifiers. Positions change with the frame, ids do not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ButtonId {
    Clear,
    Relative,
    Clock,
    Events,
}

impl ButtonId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Relative => "relative",
            Self::Clock => "clock",
            Self::Events => "events",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "clear" => Some(Self::Clear),
            "relative" => Some(Self::Relative),
            "clock" => Some(Self::Clock),
            "events" => Some(Self::Events),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Clear => "CLEAR",
            Self::Relative => "RELATIVE",
            Self::Clock => "CLOCK",
            Self::Events => "EVENTS",
        }
    }

    pub const fn action(self) -> PanelAction {
        match self {
            Self::Clear => PanelAction::ClearEvents,
            Self::Relative => PanelAction::ToggleRelativeTimestamps,
            Self::Clock => PanelAction::SelectMode(DisplayMode::Clock),
            Self::Events => PanelAction::SelectMode(DisplayMode::EventLog),
        }
    }

    /// Buttons a mode offers, in bottom-bar order.
    pub const fn for_mode(mode: DisplayMode) -> &'static [ButtonId] {
        match mode {
            DisplayMode::EventLog => &[Self::Clear, Self::Relative, Self::Clock],
            DisplayMode::Clock => &[Self::Events],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonRegion {
    pub id: ButtonId,
    pub bounds: Rectangle,
}

/// Buttons of the last computed frame, in registration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ButtonRegistry {
    regions: Vec<ButtonRegion>,
}

impl ButtonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: ButtonId, bounds: Rectangle) {
        self.regions.push(ButtonRegion { id, bounds });
    }

    /// First registered region containing `point` wins.
    pub fn hit(&self, point: Point) -> Option<ButtonId> {
        self.regions
            .iter()
            .find(|region| region.bounds.contains(point))
            .map(|region| region.id)
    }

    pub fn get(&self, id: ButtonId) -> Option<&ButtonRegion> {
        self.regions.iter().find(|region| region.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = ButtonId> + '_ {
        self.regions.iter().map(|region| region.id)
    }

    pub fn regions(&self) -> &[ButtonRegion] {
        &self.regions
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
