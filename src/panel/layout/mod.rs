//! Pure frame layout: mode, messages and screen size in, drawable scene and
//! button registry out.

mod chrome;
mod clock;
mod event_log;
mod metrics;
mod registry;
mod scene;
mod text;

use std::sync::Arc;

use chrono::{DateTime, Local};
use embedded_graphics::prelude::Size;

pub use chrome::ChromeGeometry;
pub use clock::{fit_display_face, format_timezone_label};
pub use event_log::{format_timestamp, EventLogColumns, TimestampLabel};
pub use metrics::{FixedMetrics, FontFace, TextMetrics, U8g2Metrics};
pub use registry::{ButtonId, ButtonRegion, ButtonRegistry};
pub use scene::{BarEnds, Scene, SceneItem, TextAlign};
pub use text::{truncate_to_width, wrap_text};

use crate::panel::{
    app_state::{DisplayMode, ModeState},
    config::{BG_COLOR, CLOCK_TITLE, DEFAULT_EVENT_LOG_TITLE, DEFAULT_STREAM_LABEL},
    types::Message,
};

/// Static strings the chrome shows in event-log mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChromeLabels {
    pub event_log_title: String,
    pub stream_label: String,
}

impl Default for ChromeLabels {
    fn default() -> Self {
        Self {
            event_log_title: DEFAULT_EVENT_LOG_TITLE.to_string(),
            stream_label: DEFAULT_STREAM_LABEL.to_string(),
        }
    }
}

/// Everything one frame depends on. Two equal inputs always produce equal
/// scenes.
#[derive(Clone, Copy, Debug)]
pub struct LayoutInput<'a> {
    pub mode: ModeState,
    pub messages: &'a [Arc<Message>],
    pub size: Size,
    pub now: DateTime<Local>,
    pub timezone_label: &'a str,
    pub labels: &'a ChromeLabels,
}

pub fn compute_scene(input: &LayoutInput<'_>, metrics: &impl TextMetrics) -> (Scene, ButtonRegistry) {
    let mut scene = scene::SceneBuilder::new(input.mode.debug_layout);
    let mut registry = ButtonRegistry::new();
    let geo = ChromeGeometry::compute(input.size, metrics);

    let (title, label) = match input.mode.mode {
        DisplayMode::EventLog => (
            input.labels.event_log_title.as_str(),
            input.labels.stream_label.as_str(),
        ),
        DisplayMode::Clock => (CLOCK_TITLE, input.timezone_label),
    };

    chrome::draw_top_bar(&mut scene, &geo, title, metrics);
    chrome::draw_bottom_bar(
        &mut scene,
        &mut registry,
        &geo,
        label,
        ButtonId::for_mode(input.mode.mode),
        metrics,
    );

    match input.mode.mode {
        DisplayMode::EventLog => event_log::draw_event_log(
            &mut scene,
            &geo,
            input.messages,
            input.mode.relative_timestamps,
            input.now,
            metrics,
        ),
        DisplayMode::Clock => clock::draw_clock(&mut scene, &geo, input.now, metrics),
    }

    (scene.finish(input.size, BG_COLOR), registry)
}

#[cfg(test)]
mod tests;
