use super::*;

#[tokio::test]
async fn test_aliases_lists_indices() {
    let cluster = InMemoryCluster::new();
    cluster.create_index("context-event-2020");
    cluster.create_index("other-event1");

    let resp = cluster.get("_aliases").await.unwrap();
    assert!(resp.is_ok());
    let json = resp.json().unwrap();
    assert!(json.get("context-event-2020").is_some());
    assert!(json.get("other-event1").is_some());
}

#[tokio::test]
async fn test_get_missing_index_is_404() {
    let cluster = InMemoryCluster::new();
    assert_eq!(cluster.get("context-scope").await.unwrap().status, 404);
    cluster.create_index("context-scope");
    assert_eq!(cluster.get("context-scope").await.unwrap().status, 200);
}

#[tokio::test]
async fn test_create_index_twice_fails() {
    let cluster = InMemoryCluster::new();
    let body = r#"{"settings":{"index":{"number_of_shards":1}},"mappings":{"properties":{"itemId":{"type":"keyword"}}}}"#;
    assert_eq!(cluster.put("idx", body).await.unwrap().status, 200);
    assert_eq!(cluster.put("idx", body).await.unwrap().status, 400);

    let index = cluster.index("idx").unwrap();
    assert_eq!(index.settings["index"]["number_of_shards"], 1);
    assert!(index.properties.contains_key("itemId"));
}

#[tokio::test]
async fn test_put_mapping_merges_and_rejects_conflicts() {
    let cluster = InMemoryCluster::new();
    cluster.create_index("idx");

    let add = r#"{"properties":{"sourceId":{"type":"keyword"}}}"#;
    let resp = cluster.put("idx/_mapping", add).await.unwrap();
    assert!(resp.is_ok());
    assert_eq!(resp.json().unwrap()["acknowledged"], true);
    // Same definition again is accepted
    assert!(cluster.put("idx/_mapping", add).await.unwrap().is_ok());

    let conflict = r#"{"properties":{"sourceId":{"type":"long"}}}"#;
    assert_eq!(cluster.put("idx/_mapping", conflict).await.unwrap().status, 400);

    assert_eq!(cluster.put("missing/_mapping", add).await.unwrap().status, 404);
}

#[tokio::test]
async fn test_update_by_query_copies_field() {
    let cluster = InMemoryCluster::new();
    cluster.index_document("idx", "1", json!({"scope": "acme"}));
    cluster.index_document("idx", "2", json!({"scope": "globex"}));

    let body = r#"{"script":{"source":"ctx._source.sourceId = ctx._source.scope","lang":"painless"}}"#;
    let resp = cluster
        .post("idx/_update_by_query", body, ContentType::Json)
        .await
        .unwrap();
    let json = resp.json().unwrap();
    assert_eq!(json["total"], 2);
    assert_eq!(json["updated"], 2);
    assert_eq!(cluster.document("idx", "1").unwrap()["sourceId"], "acme");
    assert_eq!(cluster.document("idx", "2").unwrap()["sourceId"], "globex");
}

#[tokio::test]
async fn test_search_terms_and_stats_bucket() {
    let cluster = InMemoryCluster::new();
    cluster.index_document("a", "1", json!({"scope": "x"}));
    cluster.index_document("a", "2", json!({"scope": "y"}));
    cluster.index_document("b", "1", json!({"scope": "x"}));

    let body = r#"{"size":0,"aggs":{"scopes":{"terms":{"field":"scope"}},"bucketInfos":{"stats_bucket":{"buckets_path":"scopes._count"}}}}"#;
    let resp = cluster.post("a,b/_search", body, ContentType::Json).await.unwrap();
    let json = resp.json().unwrap();
    let buckets = json["aggregations"]["scopes"]["buckets"].as_array().unwrap();
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0]["key"], "x");
    assert_eq!(buckets[0]["doc_count"], 2);
    assert_eq!(json["aggregations"]["bucketInfos"]["count"], 2);

    let resp = cluster.post("a,missing/_search", body, ContentType::Json).await.unwrap();
    assert_eq!(resp.status, 404);
}

#[tokio::test]
async fn test_bulk_indexes_documents() {
    let cluster = InMemoryCluster::new();
    cluster.create_index("scope");
    let body = "{\"index\":{\"_id\":\"x\"}}\n{\"itemId\":\"x\"}\n{\"index\":{\"_id\":\"y\"}}\n{\"itemId\":\"y\"}\n";
    let resp = cluster.post("scope/_bulk", body, ContentType::NdJson).await.unwrap();
    let json = resp.json().unwrap();
    assert_eq!(json["errors"], false);
    assert_eq!(json["items"].as_array().unwrap().len(), 2);
    assert_eq!(cluster.documents("scope").len(), 2);

    // Re-running overwrites by id
    let resp = cluster.post("scope/_bulk", body, ContentType::NdJson).await.unwrap();
    assert_eq!(resp.json().unwrap()["items"][0]["index"]["result"], "updated");
    assert_eq!(cluster.documents("scope").len(), 2);
}

#[tokio::test]
async fn test_bulk_into_missing_index_reports_item_errors() {
    let cluster = InMemoryCluster::new();
    let body = "{\"index\":{\"_id\":\"x\"}}\n{\"itemId\":\"x\"}\n";
    let resp = cluster.post("scope/_bulk", body, ContentType::NdJson).await.unwrap();
    assert!(resp.is_ok());
    let json = resp.json().unwrap();
    assert_eq!(json["errors"], true);
    assert_eq!(json["items"][0]["index"]["status"], 404);

    let resp = cluster.post("scope/_bulk", "", ContentType::NdJson).await.unwrap();
    assert_eq!(resp.status, 400);
}

#[tokio::test]
async fn test_injected_failures_and_request_log() {
    let cluster = InMemoryCluster::new();
    cluster.create_index("idx");
    cluster.fail_with_status(Method::Put, "idx/_mapping", 500, "{}");
    cluster.fail_transport(Method::Get, "_aliases");

    let resp = cluster.put("idx/_mapping", "{}").await.unwrap();
    assert_eq!(resp.status, 500);
    assert!(matches!(
        cluster.get("_aliases").await,
        Err(ClientError::Transport { .. })
    ));

    assert_eq!(cluster.request_count(Method::Put, "idx/_mapping"), 1);
    assert_eq!(cluster.request_count(Method::Get, "/_aliases"), 1);
    let requests = cluster.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].content_type, Some(ContentType::Json));
}
