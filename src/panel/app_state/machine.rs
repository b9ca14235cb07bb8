use statig::prelude::*;

use super::engine::ModeApplyStatus;
use super::events::ModeCommand;
use super::types::{DisplayMode, ModeState};

#[derive(Clone, Copy, Debug)]
pub(super) struct ModeMachine {
    pub(super) state: ModeState,
}

#[derive(Clone, Copy, Debug)]
pub(super) struct DispatchContext {
    pub(super) status: ModeApplyStatus,
}

impl Default for DispatchContext {
    fn default() -> Self {
        Self {
            status: ModeApplyStatus::Unchanged,
        }
    }
}

impl ModeMachine {
    pub(super) fn new(state: ModeState) -> Self {
        Self { state }
    }

    // Flags live outside the mode graph and apply in every mode.
    fn apply_flag_command(&mut self, command: ModeCommand) -> ModeApplyStatus {
        let before = self.state;
        match command {
            ModeCommand::SetDebugLayout(enabled) => self.state.debug_layout = enabled,
            ModeCommand::SetLogControl(enabled) => self.state.log_control_messages = enabled,
            ModeCommand::ToggleRelativeTimestamps => {
                self.state.relative_timestamps = !self.state.relative_timestamps;
            }
            ModeCommand::ActivateClock | ModeCommand::ActivateEvents => {
                return ModeApplyStatus::Ignored;
            }
        }
        if before == self.state {
            ModeApplyStatus::Unchanged
        } else {
            ModeApplyStatus::Applied
        }
    }

    fn enter_mode(&mut self, context: &mut DispatchContext, mode: DisplayMode) {
        self.state.mode = mode;
        context.status = ModeApplyStatus::Applied;
    }
}

#[state_machine(initial = "State::event_log()")]
impl ModeMachine {
    #[state]
    fn event_log(&mut self, context: &mut DispatchContext, event: &ModeCommand) -> Outcome<State> {
        match event {
            ModeCommand::ActivateClock => {
                self.enter_mode(context, DisplayMode::Clock);
                Transition(State::clock())
            }
            // Already showing events: repeated selection is a no-op.
            ModeCommand::ActivateEvents => {
                context.status = ModeApplyStatus::Unchanged;
                Handled
            }
            _ => {
                context.status = self.apply_flag_command(*event);
                Handled
            }
        }
    }

    #[state]
    fn clock(&mut self, context: &mut DispatchContext, event: &ModeCommand) -> Outcome<State> {
        match event {
            ModeCommand::ActivateEvents => {
                self.enter_mode(context, DisplayMode::EventLog);
                Transition(State::event_log())
            }
            ModeCommand::ActivateClock => {
                context.status = ModeApplyStatus::Unchanged;
                Handled
            }
            _ => {
                context.status = self.apply_flag_command(*event);
                Handled
            }
        }
    }
}
