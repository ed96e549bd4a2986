use super::*;
use crate::context::{MigrationContext, MigrationParams};
use crate::steps::fixtures::context;
use indexshift_client::{InMemoryCluster, Method};
use indexshift_core::ScopeValue;
use indexshift_template::TemplateSet;
use serde_json::json;

fn scope_set(values: &[&str]) -> ScopeSet {
    values.iter().map(|v| ScopeValue::new(*v)).collect()
}

#[tokio::test]
async fn test_single_request_for_all_values() {
    let cluster = InMemoryCluster::new();
    cluster.create_index("context-scope");
    let templates = TemplateSet::bundled();
    let ctx = context(&cluster, &templates);

    let outcome = bulk_insert(&ctx, &scope_set(&["x", "y"])).await.unwrap();
    assert_eq!(outcome, StepOutcome::success("2 scope(s) inserted"));

    let requests = cluster.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "context-scope/_bulk");
    assert_eq!(requests[0].content_type, Some(ContentType::NdJson));
    let body = requests[0].body.as_deref().unwrap();
    assert_eq!(body.lines().count(), 4);
    assert!(body.ends_with('\n'));

    assert_eq!(
        cluster.document("context-scope", "x").unwrap(),
        json!({
            "itemId": "x",
            "itemType": "scope",
            "metadata": {"id": "x", "name": "x", "scope": "systemscope"},
        })
    );
    assert!(cluster.document("context-scope", "y").is_some());
}

#[tokio::test]
async fn test_empty_values_skip_request() {
    let cluster = InMemoryCluster::new();
    let templates = TemplateSet::bundled();
    let ctx = context(&cluster, &templates);

    let outcome = bulk_insert(&ctx, &ScopeSet::new()).await.unwrap();
    assert_eq!(outcome, StepOutcome::success("nothing to insert"));
    assert!(cluster.requests().is_empty());
}

#[tokio::test]
async fn test_values_are_json_escaped() {
    let cluster = InMemoryCluster::new();
    cluster.create_index("context-scope");
    let templates = TemplateSet::bundled();
    let ctx = context(&cluster, &templates);

    let outcome = bulk_insert(&ctx, &scope_set(&[r#"say "hi""#])).await.unwrap();
    assert!(outcome.is_applied());
    let doc = cluster.document("context-scope", r#"say "hi""#).unwrap();
    assert_eq!(doc["itemId"], r#"say "hi""#);
}

#[tokio::test]
async fn test_rerun_overwrites() {
    let cluster = InMemoryCluster::new();
    cluster.create_index("context-scope");
    let templates = TemplateSet::bundled();
    let ctx = context(&cluster, &templates);
    let values = scope_set(&["acme"]);

    bulk_insert(&ctx, &values).await.unwrap();
    bulk_insert(&ctx, &values).await.unwrap();
    assert_eq!(cluster.documents("context-scope").len(), 1);
}

#[tokio::test]
async fn test_non_200_is_failed() {
    let cluster = InMemoryCluster::new();
    cluster.fail_with_status(Method::Post, "context-scope/_bulk", 429, "too many requests");
    let templates = TemplateSet::bundled();
    let ctx = context(&cluster, &templates);

    let outcome = bulk_insert(&ctx, &scope_set(&["acme"])).await.unwrap();
    assert_eq!(outcome, StepOutcome::failed("too many requests", Some(429)));
}

#[tokio::test]
async fn test_item_errors_pass_status_only() {
    // No scope index: every item fails but the request itself returns 200
    let cluster = InMemoryCluster::new();
    let templates = TemplateSet::bundled();
    let ctx = context(&cluster, &templates);

    let outcome = bulk_insert(&ctx, &scope_set(&["acme"])).await.unwrap();
    assert!(outcome.is_applied());
}

#[tokio::test]
async fn test_item_errors_fail_strict() {
    let cluster = InMemoryCluster::new();
    let templates = TemplateSet::bundled();
    let mut params = MigrationParams::new("context");
    params.bulk_verification = BulkVerification::Strict;
    let ctx = MigrationContext::new(&cluster, &templates, params);

    let outcome = bulk_insert(&ctx, &scope_set(&["acme", "globex"])).await.unwrap();
    assert_eq!(
        outcome,
        StepOutcome::failed("2 bulk item(s) failed: acme, globex", Some(200))
    );
}

#[tokio::test]
async fn test_strict_accepts_clean_response() {
    let cluster = InMemoryCluster::new();
    cluster.create_index("context-scope");
    let templates = TemplateSet::bundled();
    let mut params = MigrationParams::new("context");
    params.bulk_verification = BulkVerification::Strict;
    let ctx = MigrationContext::new(&cluster, &templates, params);

    let outcome = bulk_insert(&ctx, &scope_set(&["acme"])).await.unwrap();
    assert!(outcome.is_applied());
}

#[test]
fn test_verify_items_reports_first_ids() {
    let body = json!({
        "errors": true,
        "items": [
            {"index": {"_id": "a", "status": 201}},
            {"index": {"_id": "b", "status": 400, "error": {"type": "mapper_parsing_exception"}}},
        ]
    })
    .to_string();
    assert_eq!(
        verify_items(&body, 200),
        Some(StepOutcome::failed("1 bulk item(s) failed: b", Some(200)))
    );
    assert_eq!(verify_items(r#"{"errors":false,"items":[]}"#, 200), None);
}
