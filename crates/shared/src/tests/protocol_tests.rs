use super::*;

#[test]
fn event_message_decodes_all_three_fields() {
    let msg: EventMessage = serde_json::from_str(
        r#"{"identity":"btn0","event":"ButtonOnClick","value":""}"#,
    )
    .expect("json");
    assert_eq!(msg.identity, ControlId::from("btn0"));
    assert_eq!(msg.event, "ButtonOnClick");
    assert_eq!(msg.value, "");
    assert!(!msg.is_exit());
}

#[test]
fn event_message_requires_every_field() {
    assert!(serde_json::from_str::<EventMessage>(r#"{"event":"exit","value":""}"#).is_err());
    assert!(serde_json::from_str::<EventMessage>(r#"{"identity":"btn0","value":""}"#).is_err());
    assert!(
        serde_json::from_str::<EventMessage>(r#"{"identity":"btn0","event":"ButtonOnClick"}"#)
            .is_err()
    );
}

#[test]
fn event_message_rejects_non_string_value() {
    assert!(serde_json::from_str::<EventMessage>(
        r#"{"identity":"btn0","event":"ButtonOnClick","value":3}"#
    )
    .is_err());
}

#[test]
fn exit_is_recognized_for_any_identity() {
    assert!(EventMessage::new(WINDOW_IDENTITY, EXIT_EVENT, "").is_exit());
    assert!(EventMessage::new("btn0", "exit", "").is_exit());
}

#[test]
fn update_message_serializes_flat_fields() {
    let msg = UpdateMessage::new("lbl", "LabelSetText", "hi \"there\"");
    let value = serde_json::to_value(&msg).expect("json");
    assert_eq!(
        value,
        serde_json::json!({
            "identity": "lbl",
            "function": "LabelSetText",
            "value": "hi \"there\"",
        })
    );
}
