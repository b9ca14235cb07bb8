use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use tracing::{info, warn};

use super::{redraw::RedrawNotifier, signals::ShutdownFlag};
use crate::{
    panel::{
        context::PanelContext,
        touch::{DispatchOutcome, TouchDispatcher, TouchTransform},
        PanelError, Result,
    },
    platform::TouchOps,
};

/// Reads touches until the device goes away or shutdown is requested. The
/// read blocks, so on shutdown the thread is simply left behind.
pub fn spawn_touch_thread<T>(
    mut touch: T,
    transform: TouchTransform,
    context: Arc<PanelContext>,
    redraw: RedrawNotifier,
    shutdown: ShutdownFlag,
) -> Result<JoinHandle<()>>
where
    T: TouchOps + Send + 'static,
{
    thread::Builder::new()
        .name("touch".into())
        .spawn(move || {
            let mut dispatcher = TouchDispatcher::new(transform);
            info!("touch: thread start");
            while !shutdown.is_set() {
                match touch.next_touch() {
                    Ok(Some(report)) => {
                        if let DispatchOutcome::Activated { changed: true, .. } =
                            dispatcher.handle(&context, report)
                        {
                            redraw.nudge();
                        }
                    }
                    Ok(None) => {
                        warn!("touch: device closed");
                        break;
                    }
                    Err(err) => {
                        warn!("touch: read failed: {err}");
                        break;
                    }
                }
            }
            info!("touch: thread stop");
        })
        .map_err(|err| PanelError::Touch {
            device: "touch".into(),
            details: format!("spawn failed: {err}"),
        })
}
