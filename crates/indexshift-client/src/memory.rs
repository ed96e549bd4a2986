//! In-memory search-engine cluster for tests.
//!
//! Implements the handful of REST endpoints a migration touches, with
//! enough fidelity for end-to-end runs: alias listing, mapping merge,
//! copy-field update-by-query scripts, index existence and creation,
//! terms + stats_bucket aggregations, and NDJSON bulk indexing.
//!
//! Bulk requests against a missing index fail per item instead of
//! auto-creating it, which lets tests exercise per-item verification.

use crate::error::{ClientError, ClientResult};
use crate::traits::{ContentType, IndexClient, IndexResponse};
use async_trait::async_trait;
use regex::Regex;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

/// HTTP method of a recorded request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Post,
}

impl Method {
    fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
        }
    }
}

/// A request received by the cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<String>,
    pub content_type: Option<ContentType>,
}

/// One index: settings, mapped fields, and documents by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryIndex {
    pub settings: Value,
    pub properties: Map<String, Value>,
    pub documents: BTreeMap<String, Value>,
}

#[derive(Debug, Clone)]
enum Injected {
    Status(u16, String),
    Transport(String),
}

#[derive(Debug, Clone)]
struct FailureRule {
    method: Method,
    path: String,
    injected: Injected,
}

#[derive(Debug, Default)]
struct ClusterState {
    indices: BTreeMap<String, MemoryIndex>,
    requests: Vec<RecordedRequest>,
    failures: Vec<FailureRule>,
    next_id: u64,
}

/// Fake cluster implementing [`IndexClient`]
#[derive(Debug, Default)]
pub struct InMemoryCluster {
    state: Mutex<ClusterState>,
}

impl InMemoryCluster {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, ClusterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create an empty index (no-op if it exists)
    pub fn create_index(&self, name: &str) {
        self.state().indices.entry(name.to_string()).or_default();
    }

    /// Store a document, creating the index if needed
    pub fn index_document(&self, index: &str, id: &str, document: Value) {
        self.state()
            .indices
            .entry(index.to_string())
            .or_default()
            .documents
            .insert(id.to_string(), document);
    }

    /// Respond with `status` and `body` to every matching request
    pub fn fail_with_status(&self, method: Method, path: &str, status: u16, body: &str) {
        self.state().failures.push(FailureRule {
            method,
            path: path.trim_start_matches('/').to_string(),
            injected: Injected::Status(status, body.to_string()),
        });
    }

    /// Fail every matching request with a transport error
    pub fn fail_transport(&self, method: Method, path: &str) {
        self.state().failures.push(FailureRule {
            method,
            path: path.trim_start_matches('/').to_string(),
            injected: Injected::Transport("connection refused".to_string()),
        });
    }

    pub fn index(&self, name: &str) -> Option<MemoryIndex> {
        self.state().indices.get(name).cloned()
    }

    pub fn index_names(&self) -> Vec<String> {
        self.state().indices.keys().cloned().collect()
    }

    pub fn document(&self, index: &str, id: &str) -> Option<Value> {
        self.state()
            .indices
            .get(index)
            .and_then(|i| i.documents.get(id).cloned())
    }

    pub fn documents(&self, index: &str) -> Vec<Value> {
        self.state()
            .indices
            .get(index)
            .map(|i| i.documents.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Every request received so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state().requests.clone()
    }

    /// Number of requests with this method and exact path
    pub fn request_count(&self, method: Method, path: &str) -> usize {
        let path = path.trim_start_matches('/');
        self.state()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    fn handle(
        &self,
        method: Method,
        path: &str,
        body: Option<&str>,
        content_type: Option<ContentType>,
    ) -> ClientResult<IndexResponse> {
        let path = path.trim_start_matches('/').to_string();
        let mut state = self.state();
        state.requests.push(RecordedRequest {
            method,
            path: path.clone(),
            body: body.map(String::from),
            content_type,
        });

        let injected = state
            .failures
            .iter()
            .find(|f| f.method == method && f.path == path)
            .map(|f| f.injected.clone());
        match injected {
            Some(Injected::Status(status, body)) => return Ok(IndexResponse::new(status, body)),
            Some(Injected::Transport(message)) => {
                return Err(ClientError::Transport {
                    method: method.as_str(),
                    url: format!("memory://{}", path),
                    message,
                })
            }
            None => {}
        }

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let body = body.unwrap_or("");
        let response = match (method, segments.as_slice()) {
            (Method::Get, ["_aliases"]) => state.aliases(),
            (Method::Get, [index]) => state.get_index(index),
            (Method::Put, [index]) => state.create(index, body),
            (Method::Put, [index, "_mapping"]) => state.put_mapping(index, body),
            (Method::Post, [index, "_update_by_query"]) => state.update_by_query(index, body),
            (Method::Post, [indices, "_search"]) => state.search(indices, body),
            (Method::Post, [index, "_bulk"]) => state.bulk(index, body),
            _ => error_response(400, "unsupported_operation", &path),
        };
        Ok(response)
    }
}

fn error_response(status: u16, kind: &str, reason: &str) -> IndexResponse {
    IndexResponse::new(
        status,
        json!({"error": {"type": kind, "reason": reason}, "status": status}).to_string(),
    )
}

fn ok_json(value: Value) -> IndexResponse {
    IndexResponse::new(200, value.to_string())
}

fn index_not_found(index: &str) -> IndexResponse {
    error_response(404, "index_not_found_exception", &format!("no such index [{}]", index))
}

fn copy_script_pattern() -> &'static Regex {
    static COPY_SCRIPT: OnceLock<Regex> = OnceLock::new();
    COPY_SCRIPT.get_or_init(|| {
        Regex::new(r"^\s*ctx\._source\.(\w+)\s*=\s*ctx\._source\.(\w+)\s*;?\s*$")
            .expect("valid regex literal")
    })
}

/// Render a field value as a terms-aggregation bucket key
fn bucket_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl ClusterState {
    fn aliases(&self) -> IndexResponse {
        let body: Map<String, Value> = self
            .indices
            .keys()
            .map(|name| (name.clone(), json!({"aliases": {}})))
            .collect();
        ok_json(Value::Object(body))
    }

    fn get_index(&self, name: &str) -> IndexResponse {
        match self.indices.get(name) {
            Some(index) => ok_json(json!({
                name: {
                    "aliases": {},
                    "mappings": {"properties": index.properties},
                    "settings": index.settings,
                }
            })),
            None => index_not_found(name),
        }
    }

    fn create(&mut self, name: &str, body: &str) -> IndexResponse {
        if self.indices.contains_key(name) {
            return error_response(
                400,
                "resource_already_exists_exception",
                &format!("index [{}] already exists", name),
            );
        }
        let request: Value = if body.trim().is_empty() {
            json!({})
        } else {
            match serde_json::from_str(body) {
                Ok(v) => v,
                Err(e) => return error_response(400, "parse_exception", &e.to_string()),
            }
        };

        let properties = request
            .pointer("/mappings/properties")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        let settings = request.get("settings").cloned().unwrap_or_else(|| json!({}));
        self.indices.insert(
            name.to_string(),
            MemoryIndex {
                settings,
                properties,
                documents: BTreeMap::new(),
            },
        );
        ok_json(json!({"acknowledged": true, "shards_acknowledged": true, "index": name}))
    }

    fn put_mapping(&mut self, name: &str, body: &str) -> IndexResponse {
        let Some(index) = self.indices.get_mut(name) else {
            return index_not_found(name);
        };
        let request: Value = match serde_json::from_str(body) {
            Ok(v) => v,
            Err(e) => return error_response(400, "parse_exception", &e.to_string()),
        };
        let Some(properties) = request.get("properties").and_then(Value::as_object) else {
            return error_response(400, "mapper_parsing_exception", "missing properties");
        };

        for (field, definition) in properties {
            if let Some(existing) = index.properties.get(field) {
                if existing.get("type") != definition.get("type") {
                    return error_response(
                        400,
                        "illegal_argument_exception",
                        &format!("mapper [{}] cannot be changed", field),
                    );
                }
            }
        }
        for (field, definition) in properties {
            index.properties.insert(field.clone(), definition.clone());
        }
        ok_json(json!({"acknowledged": true}))
    }

    fn update_by_query(&mut self, name: &str, body: &str) -> IndexResponse {
        let Some(index) = self.indices.get_mut(name) else {
            return index_not_found(name);
        };
        let request: Value = match serde_json::from_str(body) {
            Ok(v) => v,
            Err(e) => return error_response(400, "parse_exception", &e.to_string()),
        };
        let source = request
            .pointer("/script/source")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let Some(caps) = copy_script_pattern().captures(source) else {
            return error_response(400, "script_exception", "unsupported script");
        };
        let (target, from) = (caps[1].to_string(), caps[2].to_string());

        let total = index.documents.len();
        for document in index.documents.values_mut() {
            if let Some(fields) = document.as_object_mut() {
                let value = fields.get(&from).cloned().unwrap_or(Value::Null);
                fields.insert(target.clone(), value);
            }
        }
        ok_json(json!({
            "took": 1,
            "timed_out": false,
            "total": total,
            "updated": total,
            "deleted": 0,
            "failures": [],
        }))
    }

    fn search(&self, indices: &str, body: &str) -> IndexResponse {
        let mut documents: Vec<&Value> = Vec::new();
        for name in indices.split(',') {
            match self.indices.get(name) {
                Some(index) => documents.extend(index.documents.values()),
                None => return index_not_found(name),
            }
        }
        let request: Value = if body.trim().is_empty() {
            json!({})
        } else {
            match serde_json::from_str(body) {
                Ok(v) => v,
                Err(e) => return error_response(400, "parse_exception", &e.to_string()),
            }
        };

        let aggs = request
            .get("aggs")
            .or_else(|| request.get("aggregations"))
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let mut results = Map::new();
        for (name, agg) in &aggs {
            if let Some(field) = agg.pointer("/terms/field").and_then(Value::as_str) {
                let mut counts: BTreeMap<String, u64> = BTreeMap::new();
                for document in &documents {
                    if let Some(key) = document.get(field).and_then(bucket_key) {
                        *counts.entry(key).or_default() += 1;
                    }
                }
                let mut buckets: Vec<(String, u64)> = counts.into_iter().collect();
                buckets.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                let buckets: Vec<Value> = buckets
                    .into_iter()
                    .map(|(key, count)| json!({"key": key, "doc_count": count}))
                    .collect();
                results.insert(
                    name.clone(),
                    json!({
                        "doc_count_error_upper_bound": 0,
                        "sum_other_doc_count": 0,
                        "buckets": buckets,
                    }),
                );
            }
        }
        for (name, agg) in &aggs {
            if let Some(path) = agg.pointer("/stats_bucket/buckets_path").and_then(Value::as_str) {
                let source = path.split('.').next().unwrap_or_default();
                let counts: Vec<u64> = results
                    .get(source)
                    .and_then(|r| r.get("buckets"))
                    .and_then(Value::as_array)
                    .map(|b| {
                        b.iter()
                            .filter_map(|bucket| bucket.get("doc_count").and_then(Value::as_u64))
                            .collect()
                    })
                    .unwrap_or_default();
                let sum: u64 = counts.iter().sum();
                results.insert(
                    name.clone(),
                    json!({
                        "count": counts.len(),
                        "min": counts.iter().min(),
                        "max": counts.iter().max(),
                        "sum": sum,
                    }),
                );
            }
        }

        ok_json(json!({
            "took": 1,
            "timed_out": false,
            "hits": {"total": {"value": documents.len(), "relation": "eq"}, "hits": []},
            "aggregations": results,
        }))
    }

    fn bulk(&mut self, default_index: &str, body: &str) -> IndexResponse {
        let lines: Vec<&str> = body.lines().filter(|l| !l.trim().is_empty()).collect();
        if lines.is_empty() {
            return error_response(400, "action_request_validation_exception", "request body is required");
        }
        if lines.len() % 2 != 0 {
            return error_response(400, "illegal_argument_exception", "missing document line");
        }

        let mut items = Vec::new();
        let mut errors = false;
        for pair in lines.chunks(2) {
            let (action, document): (Value, Value) =
                match (serde_json::from_str(pair[0]), serde_json::from_str(pair[1])) {
                    (Ok(a), Ok(d)) => (a, d),
                    (Err(e), _) | (_, Err(e)) => {
                        return error_response(400, "parse_exception", &e.to_string())
                    }
                };
            let Some((op, meta)) = action.as_object().and_then(|a| a.iter().next()) else {
                return error_response(400, "illegal_argument_exception", "empty action");
            };
            let op = op.clone();
            let index = meta
                .get("_index")
                .and_then(Value::as_str)
                .unwrap_or(default_index)
                .to_string();
            let id = match meta.get("_id").and_then(Value::as_str) {
                Some(id) => id.to_string(),
                None => {
                    self.next_id += 1;
                    format!("generated-{}", self.next_id)
                }
            };

            let item = match self.indices.get_mut(&index) {
                Some(target) => {
                    let created = target.documents.insert(id.clone(), document).is_none();
                    json!({
                        "_index": index,
                        "_id": id,
                        "result": if created { "created" } else { "updated" },
                        "status": if created { 201 } else { 200 },
                    })
                }
                None => {
                    errors = true;
                    json!({
                        "_index": index,
                        "_id": id,
                        "status": 404,
                        "error": {
                            "type": "index_not_found_exception",
                            "reason": format!("no such index [{}]", index),
                        },
                    })
                }
            };
            items.push(json!({ op: item }));
        }

        ok_json(json!({"took": 1, "errors": errors, "items": items}))
    }
}

#[async_trait]
impl IndexClient for InMemoryCluster {
    async fn get(&self, path: &str) -> ClientResult<IndexResponse> {
        self.handle(Method::Get, path, None, None)
    }

    async fn put(&self, path: &str, body: &str) -> ClientResult<IndexResponse> {
        self.handle(Method::Put, path, Some(body), Some(ContentType::Json))
    }

    async fn post(
        &self,
        path: &str,
        body: &str,
        content_type: ContentType,
    ) -> ClientResult<IndexResponse> {
        self.handle(Method::Post, path, Some(body), Some(content_type))
    }

    fn address(&self) -> &str {
        "memory://cluster"
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
