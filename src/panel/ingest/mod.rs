//! Inbound topic/payload pairs to store messages or control commands.

mod payload;
mod topic;

use chrono::Local;
use tracing::{debug, warn};

pub use payload::{parse_payload, parse_timestamp, PayloadError};
pub use topic::{classify, TopicRoute};

use crate::panel::{
    config::MqttSettings,
    context::PanelContext,
    control::{ControlOutcome, ControlProcessor},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteOutcome {
    Stored,
    Control(ControlOutcome),
    Rejected,
}

impl RouteOutcome {
    /// Whether the frame on screen is now stale.
    pub fn needs_redraw(self) -> bool {
        match self {
            Self::Stored => true,
            Self::Control(ControlOutcome::Applied { .. }) => true,
            Self::Control(ControlOutcome::Ignored) | Self::Rejected => false,
        }
    }
}

/// Splits inbound traffic between the control processor and the store.
#[derive(Clone, Debug)]
pub struct InboundRouter {
    base_topic: String,
    control_suffix: String,
    control: ControlProcessor,
}

impl InboundRouter {
    pub fn new(base_topic: impl Into<String>, control_suffix: impl Into<String>) -> Self {
        Self {
            base_topic: base_topic.into(),
            control_suffix: control_suffix.into(),
            control: ControlProcessor::new(),
        }
    }

    pub fn from_settings(mqtt: &MqttSettings) -> Self {
        Self::new(mqtt.base_topic(), mqtt.control_suffix.as_str())
    }

    pub fn route(&self, context: &PanelContext, topic: &str, payload: &[u8]) -> RouteOutcome {
        match classify(topic, &self.base_topic, &self.control_suffix) {
            TopicRoute::Control { command } => {
                let payload = String::from_utf8_lossy(payload);
                RouteOutcome::Control(self.control.handle(context, command, &payload))
            }
            TopicRoute::Data { source } => match parse_payload(payload, source, Local::now()) {
                Ok(message) => {
                    debug!("ingest: topic={topic} accepted");
                    context.ingest(message);
                    RouteOutcome::Stored
                }
                Err(err) => {
                    warn!("ingest: topic={topic} rejected: {err}");
                    RouteOutcome::Rejected
                }
            },
        }
    }
}
