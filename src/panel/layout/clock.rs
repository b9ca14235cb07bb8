use chrono::{DateTime, Local};
use embedded_graphics::{pixelcolor::Rgb888, primitives::Rectangle};

use super::{
    chrome::ChromeGeometry,
    metrics::{FontFace, TextMetrics},
    scene::{rect, SceneBuilder, TextAlign},
};
use crate::panel::config::{
    CLOCK_TIME_SHARE_PCT, MESSAGE_AREA_PADDING_X, TEXT_COLOR_BODY, TEXT_COLOR_TITLE,
};

/// `Region/City - ABBR - UTC+HH:MM`; the abbreviation is dropped when it is
/// missing or just repeats the name.
pub fn format_timezone_label(name: &str, abbreviation: Option<&str>, offset_secs: i32) -> String {
    let sign = if offset_secs < 0 { '-' } else { '+' };
    let offset = offset_secs.unsigned_abs();
    let utc = format!("UTC{sign}{:02}:{:02}", offset / 3_600, (offset / 60) % 60);

    match abbreviation.map(str::trim).filter(|abbr| !abbr.is_empty()) {
        Some(abbr) if abbr != name => format!("{name} - {abbr} - {utc}"),
        _ => format!("{name} - {utc}"),
    }
}

/// Largest ladder face whose line fits `height` and whose advance fits
/// `width`; the smallest face when none does.
pub fn fit_display_face(metrics: &impl TextMetrics, text: &str, width: u32, height: u32) -> FontFace {
    let mut smallest = FontFace::Display(0);
    for face in FontFace::display_faces() {
        smallest = face;
        if metrics.line_height(face) <= height && metrics.text_width(face, text) <= width {
            return face;
        }
    }
    smallest
}

pub(super) fn draw_clock(
    scene: &mut SceneBuilder,
    geo: &ChromeGeometry,
    now: DateTime<Local>,
    metrics: &impl TextMetrics,
) {
    let x = MESSAGE_AREA_PADDING_X;
    let width = geo.width - 2 * MESSAGE_AREA_PADDING_X;
    let time_height = geo.content_height * CLOCK_TIME_SHARE_PCT as i32 / 100;
    let date_height = geo.content_height - time_height;

    if let Some(region) = rect(x, geo.content_top, width, time_height) {
        let time = now.format("%H:%M:%S").to_string();
        draw_centered(scene, region, time, TEXT_COLOR_TITLE, metrics);
    }
    if let Some(region) = rect(x, geo.content_top + time_height, width, date_height) {
        let date = now.format("%Y-%m-%d - %A").to_string();
        draw_centered(scene, region, date, TEXT_COLOR_BODY, metrics);
    }
}

fn draw_centered(
    scene: &mut SceneBuilder,
    region: Rectangle,
    text: String,
    color: Rgb888,
    metrics: &impl TextMetrics,
) {
    scene.content_region(region);

    let face = fit_display_face(metrics, &text, region.size.width, region.size.height);
    let text_width = metrics.text_width(face, &text).min(region.size.width) as i32;
    let text_height = metrics.line_height(face).min(region.size.height) as i32;
    let x = region.top_left.x + (region.size.width as i32 - text_width) / 2;
    let y = region.top_left.y + (region.size.height as i32 - text_height) / 2;

    if let Some(bounds) = rect(x, y, text_width, text_height) {
        scene.label(text, bounds, face, color, TextAlign::Center);
    }
}
