//! Replace/add/remove sequencing on value-set connectors.

use crate::common::fixtures::{account, strings};
use crate::common::{ADD_VALUES, REMOVE_VALUES, RecordingConnector, UPDATE, init_logging};
use connector_delta::objects::{Attribute, AttributeDelta, Uid};
use connector_delta::{ConnectorError, UpdateDeltaEngine, UpdateError};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_single_replace_makes_one_update_call() {
    init_logging();
    let connector = Arc::new(RecordingConnector::value_set());

    let side_effects = UpdateDeltaEngine::new(connector.clone())
        .update_delta(
            &account(),
            &Uid::new("jdoe"),
            &[AttributeDelta::replace("mail", strings(&["new@example.com"]))],
            None,
        )
        .await
        .unwrap();

    assert!(side_effects.is_empty());
    let calls = connector.calls();
    assert_eq!(connector.operations(), vec![UPDATE]);
    assert_eq!(
        calls[0].attributes(),
        &[Attribute::new("mail", strings(&["new@example.com"]))]
    );
}

#[tokio::test]
async fn test_calls_run_replace_then_add_then_remove() {
    init_logging();
    let connector = Arc::new(RecordingConnector::value_set());
    let deltas = vec![
        AttributeDelta::remove("roles", strings(&["auditor"])),
        AttributeDelta::add_remove("groups", Some(strings(&["c"])), Some(strings(&["a"]))),
        AttributeDelta::replace("mail", strings(&["new@example.com"])),
    ];

    UpdateDeltaEngine::new(connector.clone())
        .update_delta(&account(), &Uid::new("jdoe"), &deltas, None)
        .await
        .unwrap();

    let calls = connector.calls();
    assert_eq!(connector.operations(), vec![UPDATE, ADD_VALUES, REMOVE_VALUES]);
    assert_eq!(
        calls[1].attributes(),
        &[Attribute::new("groups", strings(&["c"]))]
    );
    assert_eq!(
        calls[2].attributes(),
        &[
            Attribute::new("roles", strings(&["auditor"])),
            Attribute::new("groups", strings(&["a"])),
        ]
    );
}

#[tokio::test]
async fn test_empty_groups_are_skipped() {
    init_logging();
    let connector = Arc::new(RecordingConnector::value_set());

    UpdateDeltaEngine::new(connector.clone())
        .update_delta(
            &account(),
            &Uid::new("jdoe"),
            &[AttributeDelta::remove("groups", strings(&["a"]))],
            None,
        )
        .await
        .unwrap();

    assert_eq!(connector.operations(), vec![REMOVE_VALUES]);
}

#[tokio::test]
async fn test_rename_is_chained_and_reported() {
    init_logging();
    let connector = Arc::new(
        RecordingConnector::value_set().returning(UPDATE, Some(Uid::new("john"))),
    );

    let side_effects = UpdateDeltaEngine::new(connector.clone())
        .update_delta(
            &account(),
            &Uid::new("jdoe"),
            &[
                AttributeDelta::replace("__NAME__", vec![json!("john")]),
                AttributeDelta::add("groups", strings(&["c"])),
                AttributeDelta::remove("roles", strings(&["auditor"])),
            ],
            None,
        )
        .await
        .unwrap();

    let calls = connector.calls();
    assert_eq!(calls[0].uid(), &Uid::new("jdoe"));
    assert_eq!(calls[1].uid(), &Uid::new("john"));
    assert_eq!(calls[2].uid(), &Uid::new("john"));
    assert_eq!(
        side_effects,
        vec![AttributeDelta::replace("__UID__", vec![json!("john")])]
    );
}

#[tokio::test]
async fn test_missing_uid_keeps_previous_one() {
    init_logging();
    let connector = Arc::new(
        RecordingConnector::value_set()
            .returning(UPDATE, None)
            .returning(ADD_VALUES, Some(Uid::new("jdoe2"))),
    );

    let side_effects = UpdateDeltaEngine::new(connector.clone())
        .update_delta(
            &account(),
            &Uid::new("jdoe"),
            &[
                AttributeDelta::replace("mail", strings(&["new@example.com"])),
                AttributeDelta::add("groups", strings(&["c"])),
            ],
            None,
        )
        .await
        .unwrap();

    let calls = connector.calls();
    assert_eq!(calls[1].uid(), &Uid::new("jdoe"));
    assert_eq!(
        side_effects,
        vec![AttributeDelta::replace("__UID__", vec![json!("jdoe2")])]
    );
}

#[tokio::test]
async fn test_revision_change_alone_is_not_a_side_effect() {
    init_logging();
    let connector = Arc::new(
        RecordingConnector::value_set().returning(UPDATE, Some(Uid::with_revision("jdoe", "7"))),
    );

    let side_effects = UpdateDeltaEngine::new(connector)
        .update_delta(
            &account(),
            &Uid::new("jdoe"),
            &[AttributeDelta::replace("mail", strings(&["new@example.com"]))],
            None,
        )
        .await
        .unwrap();

    assert!(side_effects.is_empty());
}

#[tokio::test]
async fn test_failure_stops_sequence_without_rollback() {
    init_logging();
    let error = ConnectorError::ConnectionFailed {
        message: "connection reset".to_string(),
    };
    let connector = Arc::new(RecordingConnector::value_set().failing(ADD_VALUES, error.clone()));

    let result = UpdateDeltaEngine::new(connector.clone())
        .update_delta(
            &account(),
            &Uid::new("jdoe"),
            &[
                AttributeDelta::replace("mail", strings(&["new@example.com"])),
                AttributeDelta::add_remove("groups", Some(strings(&["c"])), Some(strings(&["a"]))),
            ],
            None,
        )
        .await;

    assert!(matches!(result, Err(UpdateError::Connector(ref returned)) if *returned == error));
    // The replace already happened and nothing undoes it.
    assert_eq!(connector.operations(), vec![UPDATE, ADD_VALUES]);
}
