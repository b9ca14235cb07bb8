//! Process wiring: settings, display, input threads and the frame loop.

mod demo;
mod display;
#[cfg(feature = "mqtt")]
mod mqtt;
mod redraw;
mod signals;
mod timezone;
mod touch;

use std::{path::PathBuf, sync::Arc, time::Duration};

use chrono::Local;
use embedded_graphics::prelude::Size;
use tracing::{info, warn};

pub use demo::seed_demo_messages;
pub use display::{run_display_loop, FrameRenderer};
#[cfg(feature = "mqtt")]
pub use mqtt::spawn_mqtt_thread;
pub use redraw::{redraw_channel, RedrawNotifier};
pub use signals::ShutdownFlag;
pub use timezone::{local_timezone_label, zone_name_from};
pub use touch::spawn_touch_thread;

use crate::{
    drivers::{EvdevTouch, Framebuffer},
    panel::{
        config::PanelSettings,
        context::PanelContext,
        layout::ChromeLabels,
        render::{draw_probe, FrameCanvas, ProbeShape},
        touch::TouchTransform,
        Result,
    },
    platform::{DisplayOps, HeadlessDisplay, TouchOps},
};

#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    /// Render sample content once and exit.
    pub demo: bool,
    /// Draw a geometry probe and exit.
    pub probe: Option<ProbeShape>,
    pub fill: bool,
    /// Keep frames in memory instead of opening the framebuffer.
    pub headless: bool,
}

fn open_display(settings: &PanelSettings, headless: bool) -> Result<Box<dyn DisplayOps>> {
    if headless {
        let size = Size::new(
            settings.display.headless_width,
            settings.display.headless_height,
        );
        info!("display: headless {}x{}", size.width, size.height);
        return Ok(Box::new(HeadlessDisplay::new(size)));
    }
    Ok(Box::new(Framebuffer::open(
        &settings.display.device,
        settings.display.rotate,
    )?))
}

fn start_touch(
    settings: &PanelSettings,
    logical: Size,
    context: &Arc<PanelContext>,
    redraw: &RedrawNotifier,
    shutdown: &ShutdownFlag,
) {
    let Some(device) = settings.touch.device.as_deref() else {
        info!("touch: no device configured");
        return;
    };
    let touch = match EvdevTouch::open(device, (settings.touch.max_x, settings.touch.max_y)) {
        Ok(touch) => touch,
        Err(err) => {
            warn!("touch: disabled: {err}");
            return;
        }
    };
    let transform = TouchTransform::new(touch.resolution(), settings.display.rotate, logical);
    if let Err(err) = spawn_touch_thread(
        touch,
        transform,
        Arc::clone(context),
        redraw.clone(),
        shutdown.clone(),
    ) {
        warn!("touch: disabled: {err}");
    }
}

pub fn run(options: RunOptions) -> Result<()> {
    let settings = PanelSettings::load(options.config.as_deref())?;
    let mut display = open_display(&settings, options.headless)?;
    let logical = display.logical_size();
    display.blank()?;

    if let Some(shape) = options.probe {
        let mut canvas = FrameCanvas::new(logical);
        draw_probe(&mut canvas, shape, options.fill);
        display.present(&canvas)?;
        info!("probe: {shape:?} fill={} drawn", options.fill);
        return Ok(());
    }

    let context = Arc::new(PanelContext::new(&settings.panel));
    let labels = ChromeLabels {
        event_log_title: settings.display.title.clone(),
        stream_label: settings.display.stream_label.clone(),
    };
    let mut renderer = FrameRenderer::new(logical, labels);

    if options.demo {
        seed_demo_messages(&context);
        let now = Local::now();
        renderer.render(&context, display.as_mut(), now, &local_timezone_label(now))?;
        info!("demo: frame drawn");
        return Ok(());
    }

    let shutdown = ShutdownFlag::install();
    let (redraw, redraw_rx) = redraw_channel();

    start_touch(&settings, logical, &context, &redraw, &shutdown);

    #[cfg(feature = "mqtt")]
    let _mqtt = spawn_mqtt_thread(
        &settings.mqtt,
        Arc::clone(&context),
        redraw.clone(),
        shutdown.clone(),
    )?;
    #[cfg(not(feature = "mqtt"))]
    warn!("mqtt: built without the `mqtt` feature; only touch input is live");

    let refresh = Duration::from_millis(settings.display.refresh_ms);
    let result = run_display_loop(
        &context,
        display.as_mut(),
        &mut renderer,
        &redraw_rx,
        refresh,
        &shutdown,
    );
    drop(redraw);

    display.blank()?;
    info!("panel: shutdown");
    result
}
