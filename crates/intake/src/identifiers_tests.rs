use super::*;

#[test]
fn test_event_id_rejects_empty() {
    assert!(EventId::new("").is_none());
    assert_eq!(EventId::new("evt_1").unwrap().as_str(), "evt_1");
}

#[test]
fn test_event_id_serializes_as_plain_string() {
    let id = EventId::new("evt_1").unwrap();
    assert_eq!(serde_json::to_value(&id).unwrap(), serde_json::json!("evt_1"));
}

#[test]
fn test_event_id_deserialize_rejects_empty_string() {
    let result: Result<EventId, _> = serde_json::from_value(serde_json::json!(""));
    assert!(result.is_err());

    let id: EventId = serde_json::from_value(serde_json::json!("evt_2")).unwrap();
    assert_eq!(id.to_string(), "evt_2");
}

#[test]
fn test_agent_name_try_from_string() {
    assert!(AgentName::try_from(String::new()).is_err());
    assert_eq!(
        AgentName::try_from("francis".to_string()).unwrap().as_str(),
        "francis"
    );
}

#[test]
fn test_delivery_ids_are_unique() {
    let a = DeliveryId::new_random();
    let b = DeliveryId::new_random();
    assert_ne!(a, b);
    assert_eq!(DeliveryId::from_uuid(a.as_uuid()), a);
}
