use embedded_graphics::{pixelcolor::Rgb888, prelude::Size, primitives::Rectangle};

use super::{
    metrics::{FontFace, TextMetrics},
    registry::{ButtonId, ButtonRegistry},
    scene::{rect, BarEnds, SceneBuilder, TextAlign},
    text::truncate_to_width,
};
use crate::panel::config::{
    BUTTON_PADDING_X, COLOR_BARS, COLOR_BUTTON_CLEAR, COLOR_BUTTON_CLOCK, COLOR_BUTTON_EVENTS,
    COLOR_BUTTON_RELATIVE, PADDING, TEXT_COLOR_BUTTON_LABEL, TEXT_COLOR_TITLE,
};

/// Bar geometry shared by both modes. Everything is derived from the screen
/// size and the title face, so the two modes line up exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChromeGeometry {
    pub width: i32,
    pub height: i32,
    pub bar_height: i32,
    pub top_bar_y: i32,
    pub bottom_bar_y: i32,
    pub content_top: i32,
    /// Never negative; zero when the chrome leaves no room.
    pub content_height: i32,
}

impl ChromeGeometry {
    pub fn compute(size: Size, metrics: &impl TextMetrics) -> Self {
        let width = size.width as i32;
        let height = size.height as i32;
        let bar_height = metrics.line_height(FontFace::Title) as i32;
        let top_bar_y = PADDING;
        let bottom_bar_y = height - PADDING - bar_height;
        let content_top = top_bar_y + bar_height + PADDING;
        let content_bottom = bottom_bar_y - PADDING;
        Self {
            width,
            height,
            bar_height,
            top_bar_y,
            bottom_bar_y,
            content_top,
            content_height: (content_bottom - content_top).max(0),
        }
    }

    pub fn corner_radius(&self) -> i32 {
        self.bar_height / 2
    }

    pub fn content_bottom(&self) -> i32 {
        self.content_top + self.content_height
    }
}

pub(super) fn button_color(id: ButtonId) -> Rgb888 {
    match id {
        ButtonId::Clear => COLOR_BUTTON_CLEAR,
        ButtonId::Relative => COLOR_BUTTON_RELATIVE,
        ButtonId::Clock => COLOR_BUTTON_CLOCK,
        ButtonId::Events => COLOR_BUTTON_EVENTS,
    }
}

/// Left cap, bar, right-aligned title, right cap.
pub(super) fn draw_top_bar(
    scene: &mut SceneBuilder,
    geo: &ChromeGeometry,
    title: &str,
    metrics: &impl TextMetrics,
) {
    let bar = geo.bar_height;
    let y = geo.top_bar_y;
    let right_cap_x = geo.width - PADDING - bar;

    if let Some(bounds) = rect(PADDING, y, bar, bar) {
        scene.bar(bounds, COLOR_BARS, BarEnds::LEFT);
    }
    if let Some(bounds) = rect(right_cap_x, y, bar, bar) {
        scene.bar(bounds, COLOR_BARS, BarEnds::RIGHT);
    }

    let bar_start = PADDING + bar;
    let title_budget = (right_cap_x - PADDING - (bar_start + PADDING)).max(0) as u32;
    let title = truncate_to_width(title, None, title_budget, |text| {
        metrics.text_width(FontFace::Title, text)
    });
    let title_width = metrics.text_width(FontFace::Title, &title) as i32;
    let text_x = right_cap_x - PADDING - title_width;

    if let Some(bounds) = rect(bar_start, y, text_x - PADDING - bar_start, bar) {
        scene.bar(bounds, COLOR_BARS, BarEnds::SQUARE);
    }
    if let Some(bounds) = rect(text_x, y, title_width, bar) {
        scene.label(title, bounds, FontFace::Title, TEXT_COLOR_TITLE, TextAlign::Left);
    }
}

/// Left cap, mode label, buttons left to right, then a fill bar up to the
/// right margin. Buttons that do not fit are left out of the frame and the
/// registry alike.
pub(super) fn draw_bottom_bar(
    scene: &mut SceneBuilder,
    registry: &mut ButtonRegistry,
    geo: &ChromeGeometry,
    label: &str,
    buttons: &[ButtonId],
    metrics: &impl TextMetrics,
) {
    let bar = geo.bar_height;
    let y = geo.bottom_bar_y;
    let right_edge = geo.width - PADDING;
    let radius = geo.corner_radius();

    if let Some(bounds) = rect(PADDING, y, bar, bar) {
        scene.bar(bounds, COLOR_BARS, BarEnds::LEFT);
    }

    let button_widths: Vec<i32> = buttons
        .iter()
        .map(|id| metrics.text_width(FontFace::Button, id.label()) as i32 + 2 * BUTTON_PADDING_X)
        .collect();
    let buttons_total: i32 = button_widths.iter().map(|w| w + PADDING).sum();

    let label_x = PADDING + bar;
    let label_budget =
        (right_edge - label_x - 2 * BUTTON_PADDING_X - PADDING - buttons_total - radius).max(0);
    let label = truncate_to_width(label, None, label_budget as u32, |text| {
        metrics.text_width(FontFace::Title, text)
    });
    let label_width = metrics.text_width(FontFace::Title, &label) as i32 + 2 * BUTTON_PADDING_X;
    if let Some(bounds) = rect(label_x, y, label_width, bar) {
        if !label.is_empty() {
            scene.label(label, bounds, FontFace::Title, TEXT_COLOR_TITLE, TextAlign::Center);
        }
    }

    let mut x = label_x + label_width + PADDING;
    for (id, width) in buttons.iter().zip(button_widths) {
        if x + width > right_edge {
            break;
        }
        let Some(bounds) = rect(x, y, width, bar) else {
            break;
        };
        scene.bar(bounds, button_color(*id), BarEnds::SQUARE);
        scene.label(
            id.label(),
            bounds,
            FontFace::Button,
            TEXT_COLOR_BUTTON_LABEL,
            TextAlign::Center,
        );
        registry.register(*id, bounds);
        x += width + PADDING;
    }

    let fill_width = right_edge - x;
    if let Some(bounds) = rect(x, y, fill_width, bar) {
        let ends = if fill_width > radius {
            BarEnds::RIGHT
        } else {
            BarEnds::SQUARE
        };
        scene.bar(bounds, COLOR_BARS, ends);
    }
}

pub(super) fn content_rect(geo: &ChromeGeometry, x: i32, width: i32) -> Option<Rectangle> {
    rect(x, geo.content_top, width, geo.content_height)
}
