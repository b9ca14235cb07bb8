use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossbeam_channel::{Receiver, RecvTimeoutError};
use embedded_graphics::prelude::{OriginDimensions, Size};
use tracing::{debug, info, warn};

use super::{signals::ShutdownFlag, timezone::local_timezone_label};
use crate::{
    panel::{
        app_state::DisplayMode,
        context::PanelContext,
        layout::{compute_scene, ChromeLabels, LayoutInput, TextMetrics, U8g2Metrics},
        render::{draw_scene, FrameCanvas},
        Result,
    },
    platform::DisplayOps,
};

// Upper bound on how long a shutdown request can go unnoticed.
const SHUTDOWN_POLL: Duration = Duration::from_millis(250);

/// Snapshot, layout, draw, present, publish; in that order, and with the
/// panel lock held only for the snapshot and the publish.
pub struct FrameRenderer<M = U8g2Metrics> {
    labels: ChromeLabels,
    metrics: M,
    canvas: FrameCanvas,
}

impl FrameRenderer<U8g2Metrics> {
    pub fn new(size: Size, labels: ChromeLabels) -> Self {
        Self::with_metrics(size, labels, U8g2Metrics)
    }
}

impl<M: TextMetrics> FrameRenderer<M> {
    pub fn with_metrics(size: Size, labels: ChromeLabels, metrics: M) -> Self {
        Self {
            labels,
            metrics,
            canvas: FrameCanvas::new(size),
        }
    }

    pub fn canvas(&self) -> &FrameCanvas {
        &self.canvas
    }

    pub fn render<D>(
        &mut self,
        context: &PanelContext,
        display: &mut D,
        now: DateTime<Local>,
        timezone_label: &str,
    ) -> Result<()>
    where
        D: DisplayOps + ?Sized,
    {
        let snapshot = context.snapshot();
        let input = LayoutInput {
            mode: snapshot.mode,
            messages: &snapshot.messages,
            size: self.canvas.size(),
            now,
            timezone_label,
            labels: &self.labels,
        };
        let (scene, registry) = compute_scene(&input, &self.metrics);
        draw_scene(&scene, &mut self.canvas);
        display.present(&self.canvas)?;
        context.publish_registry(registry);
        Ok(())
    }
}

/// Whether the frame goes stale on its own as time passes.
fn ticks(context: &PanelContext) -> bool {
    let mode = context.mode_state();
    mode.mode == DisplayMode::Clock || mode.relative_timestamps
}

/// Redraws on every nudge, and once per `refresh` while the frame shows
/// time. Returns when `shutdown` is set.
pub fn run_display_loop<D, M>(
    context: &PanelContext,
    display: &mut D,
    renderer: &mut FrameRenderer<M>,
    redraw: &Receiver<()>,
    refresh: Duration,
    shutdown: &ShutdownFlag,
) -> Result<()>
where
    D: DisplayOps + ?Sized,
    M: TextMetrics,
{
    info!("display: loop start refresh={}ms", refresh.as_millis());
    let mut last_frame: Option<Instant> = None;

    while !shutdown.is_set() {
        let due = match last_frame {
            None => true,
            Some(at) => ticks(context) && at.elapsed() >= refresh,
        };

        if due {
            let now = Local::now();
            let label = local_timezone_label(now);
            if let Err(err) = renderer.render(context, display, now, &label) {
                warn!("display: frame dropped: {err}");
            }
            last_frame = Some(Instant::now());
        }

        let wait = if ticks(context) {
            refresh.min(SHUTDOWN_POLL)
        } else {
            SHUTDOWN_POLL
        };
        match redraw.recv_timeout(wait) {
            Ok(()) => {
                debug!("display: redraw requested");
                last_frame = None;
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                info!("display: all producers gone");
                break;
            }
        }
    }

    info!("display: loop stop");
    Ok(())
}
