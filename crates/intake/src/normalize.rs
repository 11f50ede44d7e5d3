//! Extraction of an [`EventRecord`] from a decoded webhook payload.
//!
//! Payload shapes differ by event type and fields are frequently absent, so
//! every lookup is an ordered chain of typed accessors that yield `None` on a
//! missing key or unexpected JSON type. Nothing here fails: an unusable value
//! degrades to an empty string and the next source in the chain is tried.
//!
//! ## Payload shapes
//!
//! | Declared `type` | Issue fields live in |
//! |-----------------|----------------------|
//! | `Comment` | `data.issue` (or flat `data.issueId`) |
//! | `Issue` | `data` itself |
//! | other | `data.issue` when present |

use serde_json::{Map, Value};
use tracing::debug;

use crate::{EventId, EventRecord, EventType, MentionMatcher, WEBHOOK_SOURCE};

/// Builds the canonical [`EventRecord`] for a decoded payload.
///
/// `fallback_event_id` is used when the payload carries neither `webhookId`
/// nor `id`; callers normally pass [`fallback_event_id`] of the raw body. A
/// payload that is not a JSON object is treated as an empty object. A blank
/// `agent_name` never matches a mention.
pub fn normalize(
    raw_payload: Value,
    agent_name: &str,
    fallback_event_id: &EventId,
) -> EventRecord {
    let mentions = MentionMatcher::new(agent_name).ok();
    build_record(raw_payload, mentions.as_ref(), fallback_event_id)
}

/// [`normalize`] with a matcher compiled once up front, for callers that
/// handle many deliveries for the same agent.
pub fn normalize_with(
    raw_payload: Value,
    mentions: &MentionMatcher,
    fallback_event_id: &EventId,
) -> EventRecord {
    build_record(raw_payload, Some(mentions), fallback_event_id)
}

fn build_record(
    raw_payload: Value,
    mentions: Option<&MentionMatcher>,
    fallback_event_id: &EventId,
) -> EventRecord {
    let payload = match raw_payload {
        Value::Object(map) => map,
        other => {
            debug!(
                kind = json_kind(&other),
                "Webhook payload is not an object; normalizing as empty"
            );
            Map::new()
        }
    };

    let declared_type = text(payload.get("type"))
        .map(|t| t.to_lowercase())
        .unwrap_or_default();

    let data = object(payload.get("data"));
    let issue = data
        .and_then(|d| object(d.get("issue")))
        .filter(|issue| !issue.is_empty())
        .or(if declared_type == "issue" { data } else { None });

    let data_text = |key: &str| text(data.and_then(|d| d.get(key)));
    let data_nested_text = |outer: &str, key: &str| {
        text(data.and_then(|d| object(d.get(outer))).and_then(|o| o.get(key)))
    };
    let issue_text = |key: &str| text(issue.and_then(|i| i.get(key)));

    let mention_text = data_text("body").unwrap_or_default();

    let actor_id = text(object(payload.get("actor")).and_then(|a| a.get("id")))
        .or_else(|| data_nested_text("user", "id"))
        .unwrap_or_default();

    let issue_id = issue_text("id")
        .or_else(|| data_text("issueId"))
        .unwrap_or_default();

    let issue_identifier = issue_text("identifier")
        .or_else(|| data_text("identifier"))
        .unwrap_or_default();

    let comment_id = if declared_type == "comment" {
        data_text("id").unwrap_or_default()
    } else {
        String::new()
    };

    let assignee_id = data_nested_text("assignee", "id")
        .or_else(|| data_text("assigneeId"))
        .unwrap_or_default();

    let event_type = EventType::new(
        text(payload.get("type")).as_deref(),
        text(payload.get("action")).as_deref(),
    );

    let event_id = text(payload.get("webhookId"))
        .or_else(|| text(payload.get("id")))
        .and_then(EventId::new)
        .unwrap_or_else(|| fallback_event_id.clone());

    let contains_mention = mentions.is_some_and(|m| m.is_match(&mention_text));

    EventRecord {
        event_id,
        source: WEBHOOK_SOURCE.to_string(),
        event_type,
        issue_id,
        issue_identifier,
        comment_id,
        actor_id,
        assignee_id,
        mention_text,
        contains_mention,
        payload,
    }
}

/// Deterministic event id for payloads that carry none: the SHA-256 of the
/// raw body as 64 lower-case hex characters.
///
/// Identical retransmitted bodies map to the same id and deduplicate
/// downstream.
pub fn fallback_event_id(raw_body: &[u8]) -> EventId {
    EventId::from_content_hash(raw_body)
}

/// Decodes a raw request body as JSON.
///
/// The only fallible step of intake: invalid UTF-8 or invalid JSON is
/// returned unchanged for the caller to turn into a rejection.
pub fn decode_payload(raw_body: &[u8]) -> Result<Value, serde_json::Error> {
    serde_json::from_slice(raw_body)
}

// ---------------------------------------------------------------------------
// Typed accessors
// ---------------------------------------------------------------------------

fn object(value: Option<&Value>) -> Option<&Map<String, Value>> {
    value.and_then(Value::as_object)
}

/// Non-empty string, or a number rendered in decimal. Anything else is absent.
///
/// Zero is a real value and is kept as `"0"`; only an empty string falls
/// through to the next source in a chain.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
