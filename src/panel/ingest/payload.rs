use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::panel::types::{Importance, Message};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("JSON payload has no usable `message` field")]
    MissingMessage,
    #[error("unknown importance `{0}`")]
    UnknownImportance(String),
    #[error("JSON object has wrongly typed fields: {0}")]
    Malformed(String),
    #[error("empty payload")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct JsonPayload {
    message: Option<String>,
    source: Option<String>,
    importance: Option<String>,
    timestamp: Option<String>,
}

/// Accepts RFC 3339, or a naive ISO-8601 date-time read as local time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Local));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}

/// Turns a raw payload into a message. JSON objects must carry a
/// `message`; anything that is not a JSON object is taken as plain text
/// attributed to `topic_source`.
pub fn parse_payload(
    payload: &[u8],
    topic_source: &str,
    now: DateTime<Local>,
) -> Result<Message, PayloadError> {
    let text = String::from_utf8_lossy(payload);

    let value = match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(value @ serde_json::Value::Object(_)) => value,
        _ => {
            return Message::new(text.trim(), topic_source, Importance::Info, now)
                .ok_or(PayloadError::Empty)
        }
    };

    let json: JsonPayload =
        serde_json::from_value(value).map_err(|err| PayloadError::Malformed(err.to_string()))?;

    let body = json
        .message
        .filter(|message| !message.trim().is_empty())
        .ok_or(PayloadError::MissingMessage)?;

    let importance = match json.importance.as_deref() {
        None => Importance::Info,
        Some(raw) => {
            Importance::parse(raw).ok_or_else(|| PayloadError::UnknownImportance(raw.to_string()))?
        }
    };

    let timestamp = match json.timestamp.as_deref() {
        None => now,
        Some(raw) => parse_timestamp(raw).unwrap_or_else(|| {
            debug!("ingest: unparseable timestamp {raw:?}, using arrival time");
            now
        }),
    };

    let source = json.source.unwrap_or_else(|| topic_source.to_string());
    Message::new(body, source, importance, timestamp).ok_or(PayloadError::MissingMessage)
}
