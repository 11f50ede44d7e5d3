use super::*;
use serde_json::json;

#[test]
fn test_event_type_renders_type_and_action() {
    let et = EventType::new(Some("Comment"), Some("Create"));
    assert_eq!(et.to_string(), "comment.create");
    assert_eq!(et.kind(), Some("comment"));
    assert_eq!(et.action(), Some("create"));
}

#[test]
fn test_event_type_without_action_renders_type_alone() {
    assert_eq!(EventType::new(Some("Issue"), None).to_string(), "issue");
    assert_eq!(EventType::new(Some("Issue"), Some("  ")).to_string(), "issue");
}

#[test]
fn test_event_type_without_type_is_unknown() {
    let et = EventType::new(None, Some("create"));
    assert!(et.is_unknown());
    assert_eq!(et.to_string(), "unknown");
    assert_eq!(EventType::new(Some(" "), None).to_string(), "unknown");
}

#[test]
fn test_event_type_parses_rendered_form() {
    assert_eq!(
        EventType::from("comment.create".to_string()),
        EventType::new(Some("comment"), Some("create"))
    );
    assert!(EventType::from("unknown".to_string()).is_unknown());
}

#[test]
fn test_event_record_serializes_with_state_store_field_names() {
    let record = EventRecord {
        event_id: EventId::new("evt-1").unwrap(),
        source: WEBHOOK_SOURCE.to_string(),
        event_type: EventType::new(Some("comment"), Some("create")),
        issue_id: "issue-1".to_string(),
        issue_identifier: "TEAM-1".to_string(),
        comment_id: "comment-1".to_string(),
        actor_id: "human-1".to_string(),
        assignee_id: String::new(),
        mention_text: "@francis hi".to_string(),
        contains_mention: true,
        payload: Map::new(),
    };

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(
        value,
        json!({
            "event_id": "evt-1",
            "source": "webhook",
            "event_type": "comment.create",
            "issue_id": "issue-1",
            "issue_identifier": "TEAM-1",
            "comment_id": "comment-1",
            "actor_id": "human-1",
            "assignee_id": "",
            "mention_text": "@francis hi",
            "contains_mention": true,
            "payload": {},
        })
    );

    let back: EventRecord = serde_json::from_value(value).unwrap();
    assert_eq!(back, record);
}
