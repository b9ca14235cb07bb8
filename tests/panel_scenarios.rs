//! End-to-end runs through the public API: inbound traffic, frame rendering
//! into a headless display, and touch presses against the published frame.

use std::{io::Write as _, sync::Arc};

use chrono::{Duration, Local};
use embedded_graphics::prelude::{Point, Size};
use lcars_panel::{
    panel::{
        app_state::DisplayMode,
        config::{MqttSettings, PanelSection, PanelSettings, Rotation, DEBUG_COLOR_STRUCTURE},
        context::PanelContext,
        ingest::{InboundRouter, RouteOutcome},
        layout::{
            compute_scene, ButtonId, ChromeLabels, FixedMetrics, LayoutInput, SceneItem,
        },
        runtime::FrameRenderer,
        touch::{DispatchOutcome, RawTouch, TouchDispatcher, TouchResolution, TouchTransform},
        types::{Importance, Message},
    },
    platform::{DisplayOps, HeadlessDisplay},
};

const SCREEN: Size = Size::new(480, 320);

fn context(max_messages: usize) -> Arc<PanelContext> {
    Arc::new(PanelContext::new(&PanelSection {
        max_messages,
        ..PanelSection::default()
    }))
}

fn router() -> (InboundRouter, MqttSettings) {
    let mqtt = MqttSettings::default();
    (InboundRouter::from_settings(&mqtt), mqtt)
}

fn renderer() -> FrameRenderer<FixedMetrics> {
    FrameRenderer::with_metrics(SCREEN, ChromeLabels::default(), FixedMetrics::default())
}

fn render(context: &PanelContext, display: &mut HeadlessDisplay) {
    renderer()
        .render(context, display, Local::now(), "UTC - UTC+00:00")
        .unwrap();
}

fn press(dispatcher: &mut TouchDispatcher, context: &PanelContext, raw: Point) -> DispatchOutcome {
    dispatcher.handle(context, RawTouch::new(raw.x, raw.y, false));
    dispatcher.handle(context, RawTouch::new(raw.x, raw.y, true))
}

#[test]
fn rolling_window_keeps_most_recent_infos() {
    let context = context(3);
    let base = Local::now();
    for i in 0..5 {
        let message = Message::new(
            format!("info {i}"),
            "sensor",
            Importance::Info,
            base + Duration::seconds(i),
        )
        .unwrap();
        context.ingest(message);
    }

    let texts: Vec<String> = context
        .messages()
        .iter()
        .map(|message| message.text().to_string())
        .collect();
    assert_eq!(texts, ["info 2", "info 3", "info 4"]);
}

#[test]
fn warning_survives_info_flood() {
    let context = context(3);
    let (router, mqtt) = router();
    let topic = format!("{}/garage/door", mqtt.base_topic());

    let warning = br#"{"message": "door open", "importance": "warning"}"#;
    assert_eq!(router.route(&context, &topic, warning), RouteOutcome::Stored);
    for i in 0..10 {
        let payload = format!("plain reading {i}");
        assert_eq!(
            router.route(&context, &topic, payload.as_bytes()),
            RouteOutcome::Stored
        );
    }

    let messages = context.messages();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages.iter().filter(|message| message.is_sticky()).count(), 1);
    assert!(messages.iter().any(|message| message.text() == "door open"));
    for i in 7..10 {
        let text = format!("plain reading {i}");
        assert!(messages.iter().any(|message| message.text() == text));
    }
    assert!(messages.iter().all(|message| message.source() == "garage/door"));
}

#[test]
fn debug_layout_command_outlines_chrome() {
    let context = context(10);
    let (router, mqtt) = router();
    let topic = format!("{}/{}/debug-layout", mqtt.base_topic(), mqtt.control_suffix);

    let outcome = router.route(&context, &topic, b"enable");
    assert!(outcome.needs_redraw());
    assert!(context.mode_state().debug_layout);

    let snapshot = context.snapshot();
    let labels = ChromeLabels::default();
    let input = LayoutInput {
        mode: snapshot.mode,
        messages: &snapshot.messages,
        size: SCREEN,
        now: Local::now(),
        timezone_label: "UTC - UTC+00:00",
        labels: &labels,
    };
    let (scene, registry) = compute_scene(&input, &FixedMetrics::default());
    let outlines: Vec<_> = scene.outlines(DEBUG_COLOR_STRUCTURE).collect();

    for item in &scene.items {
        if let SceneItem::Bar { bounds, .. } = item {
            assert!(outlines.contains(&bounds), "no outline on {bounds:?}");
        }
    }
    for region in registry.regions() {
        assert!(outlines.contains(&&region.bounds), "no outline on {:?}", region.id);
    }
}

#[test]
fn rendered_frame_drives_touch_round_trip() {
    let context = context(10);
    let mut display = HeadlessDisplay::new(SCREEN);
    render(&context, &mut display);
    assert_eq!(display.presented(), 1);
    assert!(display.last_frame().is_some());

    assert_eq!(context.mode_state().mode, DisplayMode::EventLog);

    // Device resolution equal to the screen so raw points are logical points.
    let mut dispatcher = TouchDispatcher::new(TouchTransform::new(
        TouchResolution::new(SCREEN.width, SCREEN.height),
        Rotation::Deg0,
        SCREEN,
    ));
    let clock = context.button_at_center(ButtonId::Clock);
    let outcome = press(&mut dispatcher, &context, clock);
    assert_eq!(
        outcome,
        DispatchOutcome::Activated {
            id: ButtonId::Clock,
            changed: true
        }
    );
    assert_eq!(context.mode_state().mode, DisplayMode::Clock);

    // The clock frame only offers a way back.
    render(&context, &mut display);
    assert!(context.button_at(clock).is_none());
    let events = context.button_at_center(ButtonId::Events);
    press(&mut dispatcher, &context, events);
    assert_eq!(context.mode_state().mode, DisplayMode::EventLog);
}

#[test]
fn repeated_mode_select_is_idempotent() {
    let context = context(10);
    let (router, mqtt) = router();
    let topic = format!("{}/{}/mode-select", mqtt.base_topic(), mqtt.control_suffix);

    router.route(&context, &topic, b"clock");
    let once = context.mode_state();
    router.route(&context, &topic, b"clock");
    assert_eq!(context.mode_state(), once);
    assert_eq!(once.mode, DisplayMode::Clock);
}

#[test]
fn quarter_turn_mount_hits_the_rotated_button() {
    let context = context(10);
    let mut display = HeadlessDisplay::new(SCREEN);
    render(&context, &mut display);

    let target = context.button_at_center(ButtonId::Relative);
    // A 90 degree mount: device x follows logical y, device y runs against
    // logical x.
    let raw = Point::new(
        (target.y * 1000 + 160) / 320,
        1000 - (target.x * 1000 + 240) / 480,
    );

    let mut rotated = TouchDispatcher::new(TouchTransform::new(
        TouchResolution::new(1000, 1000),
        Rotation::Deg90,
        SCREEN,
    ));
    assert_eq!(
        press(&mut rotated, &context, raw),
        DispatchOutcome::Activated {
            id: ButtonId::Relative,
            changed: true
        }
    );
    assert!(context.mode_state().relative_timestamps);

    let mut unrotated = TouchDispatcher::new(TouchTransform::new(
        TouchResolution::new(1000, 1000),
        Rotation::Deg0,
        SCREEN,
    ));
    assert!(matches!(
        press(&mut unrotated, &context, raw),
        DispatchOutcome::Missed(_)
    ));
    assert!(context.mode_state().relative_timestamps);
}

#[test]
fn settings_file_shapes_the_panel() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[display]\nrotate = 90\n\n[panel]\nmax_messages = 2\ndebug_layout = true"
    )
    .unwrap();

    let settings = PanelSettings::from_file(file.path()).unwrap();
    assert_eq!(settings.display.rotate, Rotation::Deg90);

    let context = PanelContext::new(&settings.panel);
    assert!(context.mode_state().debug_layout);
    for i in 0..4 {
        context.ingest(Message::info(format!("m{i}"), "test").unwrap());
    }
    assert_eq!(context.messages().len(), 2);
}

#[test]
fn headless_display_blanks_between_runs() {
    let mut display = HeadlessDisplay::new(SCREEN);
    assert_eq!(display.logical_size(), SCREEN);
    render(&context(1), &mut display);
    display.blank().unwrap();
    assert!(display.last_frame().is_none());
    assert_eq!(display.presented(), 1);
}

trait ButtonCenter {
    fn button_at_center(&self, id: ButtonId) -> Point;
}

impl ButtonCenter for PanelContext {
    /// Center of `id` in the last published frame, found by scanning.
    fn button_at_center(&self, id: ButtonId) -> Point {
        let mut hits = Vec::new();
        for y in 0..SCREEN.height as i32 {
            for x in 0..SCREEN.width as i32 {
                if self.button_at(Point::new(x, y)) == Some(id) {
                    hits.push(Point::new(x, y));
                }
            }
        }
        assert!(!hits.is_empty(), "{id:?} is not on screen");
        let (min, max) = (hits[0], hits[hits.len() - 1]);
        Point::new((min.x + max.x) / 2, (min.y + max.y) / 2)
    }
}
