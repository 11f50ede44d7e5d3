use super::*;
use serde_json::json;

fn fallback() -> EventId {
    EventId::new("fallback").unwrap()
}

fn comment_create_payload() -> Value {
    json!({
        "type": "Comment",
        "action": "create",
        "webhookId": "evt_1",
        "data": {
            "id": "comment_1",
            "body": "@francis are you there?",
            "user": { "id": "human_1" },
            "issue": { "id": "issue_1", "identifier": "TEAM-1" }
        },
        "actor": { "id": "human_1" }
    })
}

// ---------------------------------------------------------------------------
// normalize
// ---------------------------------------------------------------------------

#[test]
fn test_comment_create_end_to_end() {
    let payload = comment_create_payload();
    let event = normalize(payload.clone(), "francis", &fallback());

    assert_eq!(event.event_id.as_str(), "evt_1");
    assert_eq!(event.source, "webhook");
    assert_eq!(event.event_type.to_string(), "comment.create");
    assert_eq!(event.issue_id, "issue_1");
    assert_eq!(event.issue_identifier, "TEAM-1");
    assert_eq!(event.comment_id, "comment_1");
    assert_eq!(event.actor_id, "human_1");
    assert_eq!(event.assignee_id, "");
    assert_eq!(event.mention_text, "@francis are you there?");
    assert!(event.contains_mention);
    assert_eq!(Value::Object(event.payload), payload);
}

#[test]
fn test_issue_event_reads_issue_fields_from_data() {
    let payload = json!({
        "type": "Issue",
        "action": "update",
        "data": {
            "id": "issue_9",
            "identifier": "TEAM-9",
            "assignee": { "id": "agent_1" }
        }
    });
    let event = normalize(payload, "francis", &fallback());

    assert_eq!(event.event_type.to_string(), "issue.update");
    assert_eq!(event.issue_id, "issue_9");
    assert_eq!(event.issue_identifier, "TEAM-9");
    assert_eq!(event.assignee_id, "agent_1");
    assert_eq!(event.comment_id, "", "data.id of an issue is not a comment id");
}

#[test]
fn test_issue_type_is_case_insensitive() {
    let payload = json!({ "type": "ISSUE", "data": { "id": "issue_2" } });
    let event = normalize(payload, "francis", &fallback());
    assert_eq!(event.issue_id, "issue_2");
}

#[test]
fn test_non_issue_event_does_not_treat_data_as_issue() {
    let payload = json!({ "type": "Reaction", "data": { "id": "reaction_1" } });
    let event = normalize(payload, "francis", &fallback());
    assert_eq!(event.issue_id, "");
    assert_eq!(event.comment_id, "");
}

#[test]
fn test_empty_nested_issue_falls_back_to_data_for_issue_events() {
    let payload = json!({ "type": "Issue", "data": { "id": "issue_3", "issue": {} } });
    let event = normalize(payload, "francis", &fallback());
    assert_eq!(event.issue_id, "issue_3");
}

#[test]
fn test_flat_issue_fields_used_when_no_issue_object() {
    let payload = json!({
        "type": "Comment",
        "data": { "id": "c1", "issueId": "issue_4", "identifier": "TEAM-4", "assigneeId": "u7" }
    });
    let event = normalize(payload, "francis", &fallback());
    assert_eq!(event.issue_id, "issue_4");
    assert_eq!(event.issue_identifier, "TEAM-4");
    assert_eq!(event.assignee_id, "u7");
    assert_eq!(event.comment_id, "c1");
}

#[test]
fn test_actor_falls_back_to_data_user() {
    let payload = json!({ "type": "Comment", "data": { "user": { "id": "human_2" } } });
    let event = normalize(payload, "francis", &fallback());
    assert_eq!(event.actor_id, "human_2");

    let payload = json!({ "actor": { "id": "" }, "data": { "user": { "id": "human_3" } } });
    let event = normalize(payload, "francis", &fallback());
    assert_eq!(event.actor_id, "human_3");
}

#[test]
fn test_event_id_resolution_order() {
    let event = normalize(json!({ "webhookId": "w", "id": "i" }), "francis", &fallback());
    assert_eq!(event.event_id.as_str(), "w");

    let event = normalize(json!({ "id": "i" }), "francis", &fallback());
    assert_eq!(event.event_id.as_str(), "i");

    let event = normalize(json!({ "webhookId": "" }), "francis", &fallback());
    assert_eq!(event.event_id.as_str(), "fallback");
}

#[test]
fn test_event_type_variants() {
    let event = normalize(json!({ "type": "Issue" }), "francis", &fallback());
    assert_eq!(event.event_type.to_string(), "issue");

    let event = normalize(json!({ "action": "create" }), "francis", &fallback());
    assert_eq!(event.event_type.to_string(), "unknown");

    let event = normalize(json!({ "type": " Comment ", "action": "REMOVE" }), "francis", &fallback());
    assert_eq!(event.event_type.to_string(), "comment.remove");
}

#[test]
fn test_non_object_payload_normalizes_as_empty() {
    for payload in [json!(null), json!([1, 2]), json!("text"), json!(42)] {
        let event = normalize(payload, "francis", &fallback());
        assert_eq!(event.event_id.as_str(), "fallback");
        assert_eq!(event.event_type.to_string(), "unknown");
        assert_eq!(event.issue_id, "");
        assert!(!event.contains_mention);
        assert!(event.payload.is_empty());
    }
}

#[test]
fn test_mistyped_nested_fields_degrade_to_empty() {
    let payload = json!({
        "type": "Comment",
        "actor": "not-an-object",
        "data": {
            "id": { "nested": true },
            "body": ["@francis"],
            "user": 17,
            "issue": "TEAM-1",
            "assignee": null
        }
    });
    let event = normalize(payload, "francis", &fallback());
    assert_eq!(event.actor_id, "");
    assert_eq!(event.comment_id, "");
    assert_eq!(event.mention_text, "");
    assert!(!event.contains_mention);
    assert_eq!(event.issue_id, "");
    assert_eq!(event.assignee_id, "");
}

#[test]
fn test_numeric_ids_are_rendered_as_text() {
    let payload = json!({ "id": 123, "type": "Comment", "data": { "id": 456 } });
    let event = normalize(payload, "francis", &fallback());
    assert_eq!(event.event_id.as_str(), "123");
    assert_eq!(event.comment_id, "456");
}

#[test]
fn test_zero_ids_are_kept() {
    let payload = json!({ "id": 0, "type": "Comment", "data": { "id": 0, "issueId": 0 } });
    let event = normalize(payload, "francis", &fallback());
    assert_eq!(event.event_id.as_str(), "0");
    assert_eq!(event.comment_id, "0");
    assert_eq!(event.issue_id, "0");
}

#[test]
fn test_mention_uses_agent_name() {
    let event = normalize(comment_create_payload(), "otherbot", &fallback());
    assert!(!event.contains_mention);
}

#[test]
fn test_blank_agent_name_never_mentions() {
    let event = normalize(comment_create_payload(), "  ", &fallback());
    assert!(!event.contains_mention);
    assert_eq!(event.mention_text, "@francis are you there?");
}

#[test]
fn test_normalize_with_matches_normalize() {
    let matcher = MentionMatcher::new("francis").unwrap();
    let with = normalize_with(comment_create_payload(), &matcher, &fallback());
    let without = normalize(comment_create_payload(), "francis", &fallback());

    assert!(with.contains_mention);
    assert_eq!(with, without);
}

// ---------------------------------------------------------------------------
// fallback_event_id / decode_payload
// ---------------------------------------------------------------------------

#[test]
fn test_fallback_event_id_is_deterministic_sha256() {
    let a = fallback_event_id(br#"{"a":1}"#);
    let b = fallback_event_id(br#"{"a":1}"#);
    let c = fallback_event_id(br#"{"a":2}"#);

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.as_str().len(), 64);
    assert_eq!(
        fallback_event_id(b"").as_str(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_decode_payload_propagates_errors() {
    assert!(decode_payload(b"{\"a\":1}").unwrap().is_object());
    assert!(decode_payload(b"not json").is_err());
    assert!(decode_payload(&[0xff, 0xfe]).is_err());
}
