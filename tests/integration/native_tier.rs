//! Passthrough to connectors that apply deltas natively.

use crate::common::fixtures::{account, strings};
use crate::common::{RecordingConnector, UPDATE_DELTA, init_logging};
use connector_delta::objects::{AttributeDelta, OperationOptionsBuilder, Uid};
use connector_delta::{ConnectorError, UpdateDeltaEngine, UpdateError};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_echoed_deltas_are_returned() {
    init_logging();
    let connector = Arc::new(RecordingConnector::delta());
    let deltas = vec![
        AttributeDelta::replace("mail", strings(&["jdoe@example.com"])),
        AttributeDelta::add_remove("groups", Some(strings(&["c"])), Some(strings(&["a"]))),
    ];

    let side_effects = UpdateDeltaEngine::new(connector.clone())
        .update_delta(&account(), &Uid::new("jdoe"), &deltas, None)
        .await
        .unwrap();

    assert_eq!(side_effects, deltas);
    let calls = connector.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].deltas(), deltas.as_slice());
    assert_eq!(calls[0].uid(), &Uid::new("jdoe"));
}

#[tokio::test]
async fn test_connector_side_effects_are_passed_through() {
    init_logging();
    let rename = vec![AttributeDelta::replace("__UID__", vec![json!("john")])];
    let connector = Arc::new(RecordingConnector::delta().with_delta_result(rename.clone()));

    let side_effects = UpdateDeltaEngine::new(connector.clone())
        .update_delta(
            &account(),
            &Uid::new("jdoe"),
            &[AttributeDelta::replace("__NAME__", vec![json!("john")])],
            None,
        )
        .await
        .unwrap();

    assert_eq!(side_effects, rename);
}

#[tokio::test]
async fn test_options_are_passed_unchanged() {
    init_logging();
    let connector = Arc::new(RecordingConnector::delta().with_delta_result(Vec::new()));
    let options = OperationOptionsBuilder::new()
        .option("runAsUser", "admin")
        .build();

    let side_effects = UpdateDeltaEngine::new(connector.clone())
        .update_delta(
            &account(),
            &Uid::new("jdoe"),
            &[AttributeDelta::add("groups", strings(&["c"]))],
            Some(&options),
        )
        .await
        .unwrap();

    assert!(side_effects.is_empty());
    assert_eq!(connector.calls()[0].options(), &options);
}

#[tokio::test]
async fn test_empty_delta_set_still_reaches_connector() {
    init_logging();
    let connector = Arc::new(RecordingConnector::delta());

    let side_effects = UpdateDeltaEngine::new(connector.clone())
        .update_delta(&account(), &Uid::new("jdoe"), &[], None)
        .await
        .unwrap();

    assert!(side_effects.is_empty());
    assert_eq!(connector.operations(), vec![UPDATE_DELTA]);
}

#[tokio::test]
async fn test_connector_error_is_returned_unchanged() {
    init_logging();
    let error = ConnectorError::PermissionDenied {
        message: "read-only directory".to_string(),
    };
    let connector = Arc::new(RecordingConnector::delta().failing(UPDATE_DELTA, error.clone()));

    let result = UpdateDeltaEngine::new(connector)
        .update_delta(
            &account(),
            &Uid::new("jdoe"),
            &[AttributeDelta::add("groups", strings(&["c"]))],
            None,
        )
        .await;

    match result {
        Err(UpdateError::Connector(returned)) => assert_eq!(returned, error),
        other => panic!("Expected connector error, got {:?}", other),
    }
}
