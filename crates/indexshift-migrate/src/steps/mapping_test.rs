use super::*;
use crate::steps::fixtures::context;
use indexshift_client::{InMemoryCluster, Method};
use indexshift_template::TemplateSet;
use serde_json::json;

fn cluster_with_events() -> InMemoryCluster {
    let cluster = InMemoryCluster::new();
    cluster.index_document("context-event-2020", "e1", json!({"scope": "acme"}));
    cluster.index_document("context-event-2020", "e2", json!({"scope": "globex"}));
    cluster
}

#[tokio::test]
async fn test_update_mapping_adds_source_id() {
    let cluster = cluster_with_events();
    let templates = TemplateSet::bundled();
    let ctx = context(&cluster, &templates);
    let index = IndexName::new("context-event-2020");

    let outcome = update_mapping(&ctx, &index).await.unwrap();
    assert!(outcome.is_applied());

    let stored = cluster.index("context-event-2020").unwrap();
    assert_eq!(stored.properties["sourceId"], json!({"type": "keyword"}));
}

#[tokio::test]
async fn test_update_mapping_is_idempotent() {
    let cluster = cluster_with_events();
    let templates = TemplateSet::bundled();
    let ctx = context(&cluster, &templates);
    let index = IndexName::new("context-event-2020");

    let first = update_mapping(&ctx, &index).await.unwrap();
    let fields_after_first = cluster.index("context-event-2020").unwrap().properties;
    let second = update_mapping(&ctx, &index).await.unwrap();

    assert!(first.is_applied());
    assert!(second.is_applied());
    assert_eq!(
        cluster.index("context-event-2020").unwrap().properties,
        fields_after_first
    );
}

#[tokio::test]
async fn test_update_mapping_non_200_is_failed() {
    let cluster = cluster_with_events();
    cluster.fail_with_status(
        Method::Put,
        "context-event-2020/_mapping",
        400,
        r#"{"error":{"type":"illegal_argument_exception","reason":"mapper [sourceId] cannot be changed"}}"#,
    );
    let templates = TemplateSet::bundled();
    let ctx = context(&cluster, &templates);

    let outcome = update_mapping(&ctx, &IndexName::new("context-event-2020"))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        StepOutcome::failed("mapper [sourceId] cannot be changed", Some(400))
    );
}

#[tokio::test]
async fn test_update_mapping_missing_acknowledged_is_failed() {
    let cluster = cluster_with_events();
    cluster.fail_with_status(
        Method::Put,
        "context-event-2020/_mapping",
        200,
        r#"{"acknowledged":false}"#,
    );
    let templates = TemplateSet::bundled();
    let ctx = context(&cluster, &templates);

    let outcome = update_mapping(&ctx, &IndexName::new("context-event-2020"))
        .await
        .unwrap();
    assert_eq!(outcome, StepOutcome::failed(NOT_ACKNOWLEDGED, Some(200)));
}

#[tokio::test]
async fn test_backfill_copies_scope() {
    let cluster = cluster_with_events();
    let templates = TemplateSet::bundled();
    let ctx = context(&cluster, &templates);
    let index = IndexName::new("context-event-2020");

    let outcome = backfill_field(&ctx, &index).await.unwrap();
    assert_eq!(outcome, StepOutcome::success("total: 2, updated: 2"));

    for doc in cluster.documents("context-event-2020") {
        assert_eq!(doc["sourceId"], doc["scope"]);
    }
}

#[tokio::test]
async fn test_backfill_non_200_is_failed() {
    let cluster = InMemoryCluster::new();
    let templates = TemplateSet::bundled();
    let ctx = context(&cluster, &templates);

    let outcome = backfill_field(&ctx, &IndexName::new("context-event-missing"))
        .await
        .unwrap();
    assert!(outcome.is_failed());
    assert!(matches!(
        outcome,
        StepOutcome::Failed {
            http_status: Some(404),
            ..
        }
    ));
}
