use embedded_graphics::prelude::Point;
use tracing::{debug, info};

use super::{core::PressEdge, transform::TouchTransform, types::RawTouch};
use crate::panel::{context::PanelContext, layout::ButtonId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Not a press edge.
    Idle,
    /// Pressed outside every button of the last frame.
    Missed(Point),
    Activated { id: ButtonId, changed: bool },
}

/// Resolves presses against the registry of the last completed frame and
/// applies the bound action.
#[derive(Clone, Debug)]
pub struct TouchDispatcher {
    transform: TouchTransform,
    edge: PressEdge,
}

impl TouchDispatcher {
    pub fn new(transform: TouchTransform) -> Self {
        Self {
            transform,
            edge: PressEdge::new(),
        }
    }

    pub fn handle(&mut self, context: &PanelContext, touch: RawTouch) -> DispatchOutcome {
        if !self.edge.feed(touch.down) {
            return DispatchOutcome::Idle;
        }

        let point = self.transform.map(touch);
        let Some(id) = context.button_at(point) else {
            debug!(
                "touch: press raw=({}, {}) logical=({}, {}) hit nothing",
                touch.x, touch.y, point.x, point.y
            );
            return DispatchOutcome::Missed(point);
        };

        let changed = context.apply(id.action());
        info!(
            "touch: button={} at ({}, {}) changed={changed}",
            id.as_str(),
            point.x,
            point.y
        );
        DispatchOutcome::Activated { id, changed }
    }
}
