//! The normalized event record and its value types.
//!
//! An [`EventRecord`] is produced once per accepted webhook delivery and handed
//! to the [`crate::EventSink`] unchanged. Its JSON form (snake_case field names,
//! `event_type` as a plain string) is the wire contract of the state store's
//! `enqueue` operation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::EventId;

/// Constant `source` tag for events that arrived through the webhook channel.
pub const WEBHOOK_SOURCE: &str = "webhook";

// ---------------------------------------------------------------------------
// Event type
// ---------------------------------------------------------------------------

/// The provider's `type` / `action` pair, lower-cased.
///
/// The set of pairs is open-ended and unvalidated at this layer, so this is
/// not an enum. It renders as `"<type>.<action>"`, `"<type>"`, or `"unknown"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct EventType {
    kind: Option<String>,
    action: Option<String>,
}

impl EventType {
    /// Rendered value when the payload declares no type.
    pub const UNKNOWN: &'static str = "unknown";

    /// Builds an event type from the raw `type` and `action` values.
    ///
    /// Both are trimmed and lower-cased; blank values count as absent. An
    /// action without a type is dropped.
    pub fn new(kind: Option<&str>, action: Option<&str>) -> Self {
        let clean = |v: Option<&str>| {
            v.map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
        };
        let kind = clean(kind);
        let action = if kind.is_some() { clean(action) } else { None };
        Self { kind, action }
    }

    /// The base type (e.g. `"comment"`), if the payload declared one.
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// The action (e.g. `"create"`), if present alongside a type.
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Returns `true` if no type was declared.
    pub fn is_unknown(&self) -> bool {
        self.kind.is_none()
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.kind, &self.action) {
            (Some(kind), Some(action)) => write!(f, "{kind}.{action}"),
            (Some(kind), None) => write!(f, "{kind}"),
            _ => write!(f, "{}", Self::UNKNOWN),
        }
    }
}

impl From<EventType> for String {
    fn from(event_type: EventType) -> Self {
        event_type.to_string()
    }
}

impl From<String> for EventType {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case(Self::UNKNOWN) {
            return Self::default();
        }
        match value.split_once('.') {
            Some((kind, action)) => Self::new(Some(kind), Some(action)),
            None => Self::new(Some(&value), None),
        }
    }
}

// ---------------------------------------------------------------------------
// Event record
// ---------------------------------------------------------------------------

/// The verified, normalized representation of one webhook delivery.
///
/// String fields are empty rather than absent when the payload lacks a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Deduplication key; never empty.
    pub event_id: EventId,

    /// Ingestion channel tag; always [`WEBHOOK_SOURCE`] for records built here.
    pub source: String,

    /// Lower-cased `type.action` of the delivery.
    pub event_type: EventType,

    /// Provider id of the issue the event concerns.
    pub issue_id: String,

    /// Human-facing issue key (e.g. `"TEAM-1"`).
    pub issue_identifier: String,

    /// Id of the comment; only set for `comment` events.
    pub comment_id: String,

    /// Id of the user who triggered the event.
    pub actor_id: String,

    /// Id of the issue's assignee.
    pub assignee_id: String,

    /// The comment body inspected for mentions.
    pub mention_text: String,

    /// Whether [`mention_text`](Self::mention_text) addresses the agent.
    pub contains_mention: bool,

    /// The decoded payload as received.
    pub payload: Map<String, Value>,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
