use depot_core::{DecisionType, NewAiDecision};
use depot_error::{BuilderError, BuilderErrorKind};
use serde_json::json;

#[test]
fn builder_assigns_an_id() -> anyhow::Result<()> {
    let first = NewAiDecision::builder()
        .decision_type(DecisionType::Allocation)
        .input_data(json!({}))
        .build()?;
    let second = NewAiDecision::builder()
        .decision_type(DecisionType::Allocation)
        .input_data(json!({}))
        .build()?;

    assert_ne!(first.id, second.id);
    assert!(first.reasoning.is_none());
    Ok(())
}

#[test]
fn missing_fields_become_builder_errors() {
    let result: Result<NewAiDecision, BuilderError> = NewAiDecision::builder()
        .input_data(json!({"guidance": "ship to Acme first"}))
        .build()
        .map_err(BuilderError::from);

    let err = result.unwrap_err();
    match err.kind() {
        BuilderErrorKind::ValidationFailed(msg) => assert!(msg.contains("decision_type")),
        other => panic!("unexpected kind: {other:?}"),
    }
}
