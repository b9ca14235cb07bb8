use std::sync::Arc;

use chrono::{DateTime, Duration, Local, TimeZone};
use embedded_graphics::{
    prelude::{Point, Size},
    primitives::Rectangle,
};

use super::*;
use crate::panel::{
    config::{DEBUG_COLOR_CONTENT, DEBUG_COLOR_STRUCTURE, DEBUG_COLOR_WRAP_LINE, ELLIPSIS},
    types::Importance,
};

const SCREEN: Size = Size::new(480, 320);

fn t0() -> DateTime<Local> {
    Local.timestamp_opt(1_714_564_800, 0).unwrap()
}

fn msg(text: &str, source: &str, importance: Importance, offset_secs: i64) -> Arc<Message> {
    Arc::new(Message::new(text, source, importance, t0() + Duration::seconds(offset_secs)).unwrap())
}

fn infos(count: usize) -> Vec<Arc<Message>> {
    (0..count)
        .map(|i| msg(&format!("msg {i}"), "sensor", Importance::Info, i as i64))
        .collect()
}

fn layout(mode: ModeState, messages: &[Arc<Message>], size: Size) -> (Scene, ButtonRegistry) {
    let labels = ChromeLabels::default();
    let input = LayoutInput {
        mode,
        messages,
        size,
        now: t0() + Duration::seconds(120),
        timezone_label: "Europe/Berlin - CEST - UTC+02:00",
        labels: &labels,
    };
    compute_scene(&input, &FixedMetrics::default())
}

fn text_bounds<'a>(scene: &'a Scene, needle: &str) -> Option<&'a Rectangle> {
    scene.items.iter().find_map(|item| match item {
        SceneItem::Text { text, bounds, .. } if text == needle => Some(bounds),
        _ => None,
    })
}

fn clock_mode() -> ModeState {
    ModeState {
        mode: DisplayMode::Clock,
        ..ModeState::default()
    }
}

#[test]
fn geometry_matches_bar_height() {
    let geo = ChromeGeometry::compute(SCREEN, &FixedMetrics::default());
    assert_eq!(geo.bar_height, 24);
    assert_eq!(geo.bottom_bar_y, 291);
    assert_eq!(geo.content_top, 34);
    assert_eq!(geo.content_height, 252);
    assert_eq!(geo.corner_radius(), 12);
}

#[test]
fn columns_split_the_width() {
    let columns = EventLogColumns::compute(480, false, &FixedMetrics::default());
    assert_eq!(columns.source_x, 10);
    assert_eq!(columns.source_width, 120);
    assert_eq!(columns.message_x, 135);
    assert_eq!(columns.time_width, 85);
    assert_eq!(columns.time_x, 385);
    assert_eq!(columns.message_width, 245);
    assert_eq!(columns.line_height, 22);
}

#[test]
fn layout_is_deterministic() {
    let messages = infos(4);
    let first = layout(ModeState::default(), &messages, SCREEN);
    let second = layout(ModeState::default(), &messages, SCREEN);
    assert_eq!(first, second);
}

#[test]
fn registry_holds_exactly_the_mode_buttons() {
    let (_, registry) = layout(ModeState::default(), &[], SCREEN);
    let ids: Vec<ButtonId> = registry.ids().collect();
    assert_eq!(ids, [ButtonId::Clear, ButtonId::Relative, ButtonId::Clock]);

    let (_, registry) = layout(clock_mode(), &[], SCREEN);
    let ids: Vec<ButtonId> = registry.ids().collect();
    assert_eq!(ids, [ButtonId::Events]);
}

#[test]
fn buttons_sit_on_the_bottom_bar() {
    let (scene, registry) = layout(ModeState::default(), &[], SCREEN);
    let clear = registry.get(ButtonId::Clear).unwrap().bounds;
    assert_eq!(clear, Rectangle::new(Point::new(164, 291), Size::new(70, 24)));
    for region in registry.regions() {
        assert!(scene.items.iter().any(|item| matches!(
            item,
            SceneItem::Bar { bounds, .. } if *bounds == region.bounds
        )));
    }
}

#[test]
fn buttons_that_do_not_fit_are_dropped() {
    let (_, registry) = layout(ModeState::default(), &[], Size::new(300, 320));
    let ids: Vec<ButtonId> = registry.ids().collect();
    assert_eq!(ids, [ButtonId::Clear, ButtonId::Relative]);
}

#[test]
fn no_overlay_without_debug() {
    let (scene, _) = layout(ModeState::default(), &infos(3), SCREEN);
    assert!(!scene
        .items
        .iter()
        .any(|item| matches!(item, SceneItem::Outline { .. } | SceneItem::Line { .. })));
}

#[test]
fn debug_outlines_every_chrome_element() {
    for base in [ModeState::default(), clock_mode()] {
        let mode = ModeState {
            debug_layout: true,
            ..base
        };
        let (scene, _) = layout(mode, &infos(3), SCREEN);
        let structural: Vec<&Rectangle> = scene.outlines(DEBUG_COLOR_STRUCTURE).collect();
        let bars: Vec<&Rectangle> = scene
            .items
            .iter()
            .filter_map(|item| match item {
                SceneItem::Bar { bounds, .. } => Some(bounds),
                _ => None,
            })
            .collect();
        assert!(!bars.is_empty());
        for bar in bars {
            assert!(structural.contains(&bar), "bar {bar:?} lacks an outline");
        }
    }
}

#[test]
fn debug_marks_columns_and_wrap_boundary() {
    let mode = ModeState {
        debug_layout: true,
        ..ModeState::default()
    };
    let (scene, _) = layout(mode, &[], SCREEN);
    assert_eq!(scene.outlines(DEBUG_COLOR_CONTENT).count(), 3);
    let marker = scene.items.iter().find_map(|item| match item {
        SceneItem::Line { start, end, color } if *color == DEBUG_COLOR_WRAP_LINE => {
            Some((*start, *end))
        }
        _ => None,
    });
    assert_eq!(marker, Some((Point::new(380, 34), Point::new(380, 285))));
}

#[test]
fn newest_message_sits_on_the_last_row() {
    let (scene, _) = layout(ModeState::default(), &infos(5), SCREEN);
    // 11 rows of 22px starting at y=34.
    assert_eq!(text_bounds(&scene, "msg 4").unwrap().top_left.y, 254);
    assert_eq!(text_bounds(&scene, "msg 3").unwrap().top_left.y, 232);
    assert_eq!(text_bounds(&scene, "msg 0").unwrap().top_left.y, 166);
}

#[test]
fn overflowing_history_keeps_newest() {
    let (scene, _) = layout(ModeState::default(), &infos(30), SCREEN);
    assert!(text_bounds(&scene, "msg 29").is_some());
    assert!(text_bounds(&scene, "msg 19").is_some());
    assert!(text_bounds(&scene, "msg 18").is_none());
}

#[test]
fn older_message_fills_the_rows_left() {
    // 4 rows of 22px starting at y=34.
    let short = Size::new(480, 160);
    let older = vec!["aaaa"; 30].join(" ");
    let messages = vec![
        msg(&older, "older", Importance::Info, 0),
        msg("new one", "new", Importance::Info, 1),
    ];
    let (scene, _) = layout(ModeState::default(), &messages, short);

    let rows: Vec<i32> = scene
        .items
        .iter()
        .filter_map(|item| match item {
            SceneItem::Text { bounds, .. } if bounds.top_left.x == 135 => Some(bounds.top_left.y),
            _ => None,
        })
        .collect();
    assert_eq!(rows, [34, 56, 78, 100]);
    assert_eq!(text_bounds(&scene, "older").unwrap().top_left.y, 34);
    assert_eq!(text_bounds(&scene, "aaaa aaaa aaaa aaaa aaaa").unwrap().top_left.y, 34);
    assert_eq!(text_bounds(&scene, "new one").unwrap().top_left.y, 100);
}

#[test]
fn sticky_messages_pin_to_the_top() {
    let mut messages = vec![msg("disk failing", "nas", Importance::Error, 0)];
    messages.extend(infos(3));
    messages.push(msg("door open", "hall", Importance::Warning, 10));

    let (scene, _) = layout(ModeState::default(), &messages, SCREEN);
    assert_eq!(text_bounds(&scene, "disk failing").unwrap().top_left.y, 34);
    assert_eq!(text_bounds(&scene, "door open").unwrap().top_left.y, 56);
    assert_eq!(text_bounds(&scene, "msg 2").unwrap().top_left.y, 254);
}

#[test]
fn sticky_overflow_leaves_no_rows_for_normal() {
    let mut messages: Vec<Arc<Message>> = (0..20)
        .map(|i| msg(&format!("warn {i}"), "ups", Importance::Warning, i))
        .collect();
    messages.extend(infos(2));

    let (scene, _) = layout(ModeState::default(), &messages, SCREEN);
    assert!(text_bounds(&scene, "warn 10").is_some());
    assert!(text_bounds(&scene, "warn 11").is_none());
    assert!(text_bounds(&scene, "msg 1").is_none());
}

#[test]
fn long_messages_wrap_inside_the_column() {
    let text = "the quick brown fox jumps over the lazy dog and keeps on running far away";
    let messages = vec![msg(text, "zoo", Importance::Info, 0)];
    let (scene, _) = layout(ModeState::default(), &messages, SCREEN);

    let lines: Vec<(&str, &Rectangle)> = scene
        .items
        .iter()
        .filter_map(|item| match item {
            SceneItem::Text { text, bounds, .. } if bounds.top_left.x == 135 => {
                Some((text.as_str(), bounds))
            }
            _ => None,
        })
        .collect();
    assert!(lines.len() > 1);
    for (line, _) in &lines {
        assert!(line.chars().count() * 10 <= 245, "{line:?} is too wide");
    }
    let rejoined: Vec<&str> = lines.iter().map(|(line, _)| *line).collect();
    assert_eq!(rejoined.join(" "), text);
    // Last wrapped line ends on the bottom row.
    assert_eq!(lines.last().unwrap().1.top_left.y, 254);
}

#[test]
fn long_sources_are_truncated() {
    let messages = vec![msg(
        "hello",
        "home/garage/door/sensor/battery",
        Importance::Info,
        0,
    )];
    let (scene, _) = layout(ModeState::default(), &messages, SCREEN);
    let source = scene
        .texts()
        .find(|text| text.ends_with(ELLIPSIS))
        .unwrap();
    assert_eq!(source, "home/gara...");
}

#[test]
fn relative_timestamps_show_age() {
    let mode = ModeState {
        relative_timestamps: true,
        ..ModeState::default()
    };
    let messages = vec![msg("hello", "x", Importance::Info, 30)];
    let (scene, _) = layout(mode, &messages, SCREEN);
    assert!(scene.texts().any(|text| text == "-00:01:30"));
}

#[test]
fn timestamp_formats() {
    let now = t0();
    assert_eq!(
        format_timestamp(now, now, false).as_str(),
        now.format("%H:%M:%S").to_string()
    );
    assert_eq!(
        format_timestamp(now - Duration::seconds(3_725), now, true).as_str(),
        "-01:02:05"
    );
    assert_eq!(
        format_timestamp(now + Duration::seconds(5), now, true).as_str(),
        "-00:00:00"
    );
    assert_eq!(
        format_timestamp(now - Duration::days(30), now, true).as_str(),
        "-99:59:59"
    );
}

#[test]
fn clock_mode_shows_time_date_and_zone() {
    let (scene, _) = layout(clock_mode(), &infos(2), SCREEN);
    let now = t0() + Duration::seconds(120);
    let texts: Vec<&str> = scene.texts().collect();
    assert!(texts.contains(&"CURRENT TIME"));
    assert!(texts.contains(&now.format("%H:%M:%S").to_string().as_str()));
    assert!(texts.contains(&now.format("%Y-%m-%d - %A").to_string().as_str()));
    assert!(texts.contains(&"Europe/Berlin - CEST - UTC+02:00"));
    assert!(!texts.contains(&"msg 1"));
}

#[test]
fn degenerate_screen_degrades() {
    let (scene, registry) = layout(ModeState::default(), &infos(3), Size::new(40, 30));
    assert!(!scene.texts().any(|text| text.starts_with("msg")));
    assert!(registry.is_empty());

    let (scene, _) = layout(clock_mode(), &[], Size::new(1, 1));
    assert_eq!(scene.size, Size::new(1, 1));
}
