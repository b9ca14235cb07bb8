use core::fmt::Write as _;
use std::sync::Arc;

use chrono::{DateTime, Local};

use super::{
    chrome::{content_rect, ChromeGeometry},
    metrics::{FontFace, TextMetrics},
    scene::{rect, SceneBuilder, TextAlign},
    text::{truncate_to_width, wrap_text},
};
use crate::panel::{
    config::{
        LINE_SPACING, MESSAGE_AREA_PADDING_X, PADDING, RELATIVE_TIMESTAMP_SAMPLE,
        SOURCE_COLUMN_MAX_CHARS, SOURCE_COLUMN_MAX_FRACTION_PCT, TIMESTAMP_SAMPLE,
    },
    types::Message,
};

/// Both timestamp forms are eight or nine characters.
pub type TimestampLabel = heapless::String<12>;

const MAX_RELATIVE_SECS: i64 = 99 * 3_600 + 59 * 60 + 59;

/// Horizontal split of the event-log content area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventLogColumns {
    pub source_x: i32,
    pub source_width: i32,
    pub message_x: i32,
    pub message_width: i32,
    pub time_x: i32,
    pub time_width: i32,
    pub line_height: i32,
}

impl EventLogColumns {
    pub fn compute(screen_width: i32, relative: bool, metrics: &impl TextMetrics) -> Self {
        let em = metrics.text_width(FontFace::Body, "M") as i32;
        let by_fraction = screen_width * SOURCE_COLUMN_MAX_FRACTION_PCT as i32 / 100;
        let by_chars = SOURCE_COLUMN_MAX_CHARS as i32 * em + PADDING;
        let source_width = by_fraction.min(by_chars).max(0);

        let sample = if relative {
            RELATIVE_TIMESTAMP_SAMPLE
        } else {
            TIMESTAMP_SAMPLE
        };
        let time_width = metrics.text_width(FontFace::Body, sample) as i32 + PADDING;
        let time_x = screen_width - MESSAGE_AREA_PADDING_X - time_width;

        let source_x = MESSAGE_AREA_PADDING_X;
        let message_x = source_x + source_width + PADDING;
        let message_width = (time_x - PADDING - message_x).max(0);

        Self {
            source_x,
            source_width,
            message_x,
            message_width,
            time_x,
            time_width,
            line_height: (metrics.line_height(FontFace::Body) + LINE_SPACING) as i32,
        }
    }

    pub fn wrap_boundary(&self) -> i32 {
        self.message_x + self.message_width
    }
}

/// `HH:MM:SS` of the message, or its age as `-HH:MM:SS`.
pub fn format_timestamp(
    timestamp: DateTime<Local>,
    now: DateTime<Local>,
    relative: bool,
) -> TimestampLabel {
    let mut label = TimestampLabel::new();
    if !relative {
        let _ = write!(label, "{}", timestamp.format("%H:%M:%S"));
        return label;
    }
    let age = (now - timestamp).num_seconds().clamp(0, MAX_RELATIVE_SECS);
    let _ = write!(
        label,
        "-{:02}:{:02}:{:02}",
        age / 3_600,
        (age / 60) % 60,
        age % 60
    );
    label
}

struct PlacedMessage<'a> {
    message: &'a Message,
    lines: Vec<String>,
}

/// Sticky messages fill rows from the top in arrival order. Normal messages
/// fill what is left from the bottom up, newest first, until every row is
/// used; the oldest one shown keeps only its first lines.
fn plan_rows<'a>(
    messages: &'a [Arc<Message>],
    rows_total: usize,
    wrap: impl Fn(&str) -> Vec<String>,
) -> (Vec<PlacedMessage<'a>>, Vec<PlacedMessage<'a>>) {
    let mut sticky = Vec::new();
    let mut sticky_rows = 0usize;
    for message in messages.iter().filter(|m| m.is_sticky()) {
        let free = rows_total - sticky_rows;
        if free == 0 {
            break;
        }
        let mut lines = wrap(message.text());
        lines.truncate(free);
        sticky_rows += lines.len();
        sticky.push(PlacedMessage {
            message: message.as_ref(),
            lines,
        });
    }

    let available = rows_total - sticky_rows;
    let mut normal = Vec::new();
    let mut normal_rows = 0usize;
    for message in messages.iter().rev().filter(|m| !m.is_sticky()) {
        let free = available - normal_rows;
        if free == 0 {
            break;
        }
        let mut lines = wrap(message.text());
        lines.truncate(free);
        normal_rows += lines.len();
        normal.push(PlacedMessage {
            message: message.as_ref(),
            lines,
        });
    }
    // Oldest first, so rows are assigned top to bottom.
    normal.reverse();
    (sticky, normal)
}

pub(super) fn draw_event_log(
    scene: &mut SceneBuilder,
    geo: &ChromeGeometry,
    messages: &[Arc<Message>],
    relative: bool,
    now: DateTime<Local>,
    metrics: &impl TextMetrics,
) {
    let columns = EventLogColumns::compute(geo.width, relative, metrics);

    for (x, width) in [
        (columns.source_x, columns.source_width),
        (columns.message_x, columns.message_width),
        (columns.time_x, columns.time_width),
    ] {
        if let Some(bounds) = content_rect(geo, x, width) {
            scene.content_region(bounds);
        }
    }
    scene.wrap_marker(
        columns.wrap_boundary(),
        geo.content_top,
        geo.content_bottom(),
    );

    if columns.line_height <= 0 {
        return;
    }
    let rows_total = (geo.content_height / columns.line_height) as usize;
    let measure_body = |text: &str| metrics.text_width(FontFace::Body, text);
    let (sticky, normal) = plan_rows(messages, rows_total, |text| {
        wrap_text(text, columns.message_width as u32, measure_body)
    });

    let normal_rows: usize = normal.iter().map(|placed| placed.lines.len()).sum();
    let mut row = 0usize;
    for placed in &sticky {
        draw_message_rows(scene, geo, &columns, placed, row, relative, now, metrics);
        row += placed.lines.len();
    }
    let mut row = rows_total - normal_rows;
    for placed in &normal {
        draw_message_rows(scene, geo, &columns, placed, row, relative, now, metrics);
        row += placed.lines.len();
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_message_rows(
    scene: &mut SceneBuilder,
    geo: &ChromeGeometry,
    columns: &EventLogColumns,
    placed: &PlacedMessage<'_>,
    first_row: usize,
    relative: bool,
    now: DateTime<Local>,
    metrics: &impl TextMetrics,
) {
    let message = placed.message;
    let color = message.importance().text_color();
    let line_height = columns.line_height;

    for (offset, line) in placed.lines.iter().enumerate() {
        let y = geo.content_top + (first_row + offset) as i32 * line_height;

        if offset == 0 {
            let source = truncate_to_width(
                message.source(),
                Some(SOURCE_COLUMN_MAX_CHARS),
                columns.source_width.max(0) as u32,
                |text| metrics.text_width(FontFace::Body, text),
            );
            if let Some(bounds) = rect(columns.source_x, y, columns.source_width, line_height) {
                scene.text(source, bounds, FontFace::Body, color, TextAlign::Left);
            }
            let stamp = format_timestamp(message.timestamp(), now, relative);
            if let Some(bounds) = rect(columns.time_x, y, columns.time_width, line_height) {
                scene.text(stamp.as_str(), bounds, FontFace::Body, color, TextAlign::Right);
            }
        }

        if line.is_empty() {
            continue;
        }
        if let Some(bounds) = rect(columns.message_x, y, columns.message_width, line_height) {
            scene.text(line.as_str(), bounds, FontFace::Body, color, TextAlign::Left);
        }
    }
}
