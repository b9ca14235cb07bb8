use chrono::Local;
use tracing::{info, warn};

use super::command::ControlCommand;
use crate::panel::{
    config::CONTROL_SOURCE_PREFIX,
    context::PanelContext,
    types::{Importance, Message},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlOutcome {
    Applied { command: ControlCommand, changed: bool },
    Ignored,
}

/// Applies control-channel commands to the panel, the same way a button
/// press would.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlProcessor;

impl ControlProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, context: &PanelContext, command: &str, payload: &str) -> ControlOutcome {
        let Some(parsed) = ControlCommand::parse(command, payload) else {
            warn!("control: ignored command={command:?} payload={payload:?}");
            return ControlOutcome::Ignored;
        };

        let changed = context.apply(parsed.action());
        info!("control: {command} {payload:?} applied changed={changed}");

        // Checked after applying, so `log-control enable` logs itself.
        if context.mode_state().log_control_messages {
            let text = if payload.trim().is_empty() {
                command.trim()
            } else {
                payload
            };
            let source = format!("{CONTROL_SOURCE_PREFIX}/{}", command.trim());
            if let Some(message) = Message::new(text, source, Importance::Control, Local::now()) {
                context.ingest(message);
            }
        }

        ControlOutcome::Applied {
            command: parsed,
            changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::{app_state::DisplayMode, config::PanelSection};

    fn context() -> PanelContext {
        PanelContext::new(&PanelSection::default())
    }

    #[test]
    fn debug_layout_toggles() {
        let context = context();
        let processor = ControlProcessor::new();
        processor.handle(&context, "debug-layout", "enable");
        assert!(context.mode_state().debug_layout);
        processor.handle(&context, "debug-layout", "");
        assert!(!context.mode_state().debug_layout);
    }

    #[test]
    fn mode_select_is_idempotent() {
        let context = context();
        let processor = ControlProcessor::new();
        let first = processor.handle(&context, "mode-select", "clock");
        let second = processor.handle(&context, "mode-select", "clock");
        assert_eq!(
            first,
            ControlOutcome::Applied {
                command: ControlCommand::ModeSelect(DisplayMode::Clock),
                changed: true
            }
        );
        assert_eq!(
            second,
            ControlOutcome::Applied {
                command: ControlCommand::ModeSelect(DisplayMode::Clock),
                changed: false
            }
        );
        assert_eq!(context.mode_state().mode, DisplayMode::Clock);
    }

    #[test]
    fn unknown_commands_change_nothing() {
        let context = context();
        let before = context.mode_state();
        assert_eq!(
            ControlProcessor::new().handle(&context, "self-destruct", "enable"),
            ControlOutcome::Ignored
        );
        assert_eq!(context.mode_state(), before);
        assert!(context.messages().is_empty());
    }

    #[test]
    fn control_messages_logged_only_when_enabled() {
        let context = context();
        let processor = ControlProcessor::new();
        processor.handle(&context, "debug-layout", "enable");
        assert!(context.messages().is_empty());

        processor.handle(&context, "log-control", "enable");
        processor.handle(&context, "mode-select", "clock");
        let messages = context.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text(), "enable");
        assert_eq!(messages[0].source(), "LCARS/log-control");
        assert_eq!(messages[1].text(), "clock");
        assert_eq!(messages[1].source(), "LCARS/mode-select");
        assert!(messages
            .iter()
            .all(|m| m.importance() == Importance::Control && !m.is_sticky()));

        processor.handle(&context, "log-control", "disable");
        assert_eq!(context.messages().len(), 2);
    }

    #[test]
    fn clear_events_survives_its_own_log_entry() {
        let context = context();
        let processor = ControlProcessor::new();
        processor.handle(&context, "log-control", "enable");
        processor.handle(&context, "clear-events", "");
        let messages = context.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text(), "clear-events");
    }
}
