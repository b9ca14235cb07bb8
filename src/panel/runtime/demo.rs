use chrono::Local;

use crate::panel::{
    context::PanelContext,
    types::{Importance, Message},
};

const DEMO_MESSAGES: [(&str, &str, Importance); 4] = [
    (
        "This is a debug message for the LCARS panel.",
        "System",
        Importance::Info,
    ),
    ("Another short one.", "Debug", Importance::Info),
    (
        "This is a slightly longer debug message that should demonstrate how text wrapping \
         works on the display, spanning multiple lines if necessary.",
        "Debugger",
        Importance::Info,
    ),
    ("Warp core temperature nominal.", "Engineering", Importance::Warning),
];

/// Fills the store with sample content for a one-shot frame.
pub fn seed_demo_messages(context: &PanelContext) {
    let now = Local::now();
    for (text, source, importance) in DEMO_MESSAGES {
        if let Some(message) = Message::new(text, source, importance, now) {
            context.ingest(message);
        }
    }
}
