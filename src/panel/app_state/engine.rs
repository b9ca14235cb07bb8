use statig::blocking::IntoStateMachineExt as _;

use super::events::ModeCommand;
use super::machine::{DispatchContext, ModeMachine};
use super::types::{DisplayMode, ModeState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeApplyStatus {
    Applied,
    Unchanged,
    Ignored,
}

#[derive(Clone, Copy, Debug)]
pub struct ModeApplyResult {
    pub before: ModeState,
    pub after: ModeState,
    pub status: ModeApplyStatus,
}

impl ModeApplyResult {
    pub fn changed(self) -> bool {
        matches!(self.status, ModeApplyStatus::Applied)
    }

    pub fn mode_changed(self) -> bool {
        self.before.mode != self.after.mode
    }
}

pub struct ModeEngine {
    machine: statig::blocking::StateMachine<ModeMachine>,
}

impl ModeEngine {
    /// Always starts in the event log; only the flags are seeded.
    pub fn new(debug_layout: bool, log_control_messages: bool) -> Self {
        let state = ModeState {
            mode: DisplayMode::EventLog,
            debug_layout,
            log_control_messages,
            relative_timestamps: false,
        };
        Self {
            machine: ModeMachine::new(state).state_machine(),
        }
    }

    pub fn state(&self) -> ModeState {
        self.machine.inner().state
    }

    pub fn apply(&mut self, command: ModeCommand) -> ModeApplyResult {
        let before = self.state();
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&command, &mut context);
        let after = self.state();
        ModeApplyResult {
            before,
            after,
            status: context.status,
        }
    }
}

impl Default for ModeEngine {
    fn default() -> Self {
        Self::new(false, false)
    }
}
