use std::{cell::RefCell, sync::Arc};

use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};
use embedded_graphics::prelude::Point;
use tracing::{debug, info};

use crate::panel::{
    app_state::{ModeApplyStatus, ModeEngine, ModeState},
    config::PanelSection,
    layout::{ButtonId, ButtonRegistry},
    storage::{IngestOutcome, MessageStore},
    types::{Message, PanelAction},
};

struct PanelShared {
    store: MessageStore,
    modes: ModeEngine,
    registry: ButtonRegistry,
}

/// Copy of what a frame needs, taken under the lock.
#[derive(Clone, Debug)]
pub struct RenderSnapshot {
    pub mode: ModeState,
    pub messages: Vec<Arc<Message>>,
}

/// The one owner of panel state. Every mutation and every snapshot goes
/// through a single lock, held only for the duration of the call.
pub struct PanelContext {
    shared: Mutex<CriticalSectionRawMutex, RefCell<PanelShared>>,
}

impl PanelContext {
    pub fn new(panel: &PanelSection) -> Self {
        let shared = PanelShared {
            store: MessageStore::new(panel.max_messages, panel.sticky_warn_threshold),
            modes: ModeEngine::new(panel.debug_layout, panel.log_control_messages),
            registry: ButtonRegistry::new(),
        };
        Self {
            shared: Mutex::new(RefCell::new(shared)),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut PanelShared) -> R) -> R {
        self.shared.lock(|cell| f(&mut cell.borrow_mut()))
    }

    pub fn ingest(&self, message: Message) -> IngestOutcome {
        debug!(
            "context: ingest source={} importance={}",
            message.source(),
            message.importance().label()
        );
        self.with(|shared| shared.store.ingest(message))
    }

    /// Applies one action. Returns whether anything visible changed.
    pub fn apply(&self, action: PanelAction) -> bool {
        let changed = self.with(|shared| match action {
            PanelAction::ClearEvents => {
                let had_any = !shared.store.is_empty();
                shared.store.clear_all();
                had_any
            }
            PanelAction::ClearSticky => {
                let had_sticky = shared.store.sticky_count() > 0;
                shared.store.clear_sticky();
                had_sticky
            }
            other => match other.mode_command() {
                Some(command) => {
                    let result = shared.modes.apply(command);
                    if result.mode_changed() {
                        info!(
                            "context: mode {} -> {}",
                            result.before.mode.label(),
                            result.after.mode.label()
                        );
                    }
                    result.status == ModeApplyStatus::Applied
                }
                None => false,
            },
        });
        debug!("context: action={action:?} changed={changed}");
        changed
    }

    pub fn mode_state(&self) -> ModeState {
        self.with(|shared| shared.modes.state())
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        self.with(|shared| RenderSnapshot {
            mode: shared.modes.state(),
            messages: shared.store.snapshot(),
        })
    }

    pub fn messages(&self) -> Vec<Arc<Message>> {
        self.with(|shared| shared.store.snapshot())
    }

    /// Replaces the registry touch resolves against. Called after each
    /// completed frame.
    pub fn publish_registry(&self, registry: ButtonRegistry) {
        self.with(|shared| shared.registry = registry);
    }

    pub fn button_at(&self, point: Point) -> Option<ButtonId> {
        self.with(|shared| shared.registry.hit(point))
    }
}
