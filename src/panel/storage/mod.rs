mod message_store;

pub use message_store::{IngestOutcome, MessageStore};
