//! Migration step functions
//!
//! Each step is one idempotent unit of work:
//! - `discover`: list the `<prefix>-event*` indices
//! - `mapping`: add the `sourceId` field and backfill it from `scope`
//! - `aux_index`: create `<prefix>-scope` unless it already exists
//! - `scopes`: aggregate the distinct `scope` values
//! - `bulk`: index one scope document per value

mod aux_index;
mod bulk;
mod discover;
mod mapping;
mod scopes;

pub use aux_index::{aux_index_exists, ensure_aux_index};
pub use bulk::bulk_insert;
pub use discover::discover_indices;
pub use mapping::{backfill_field, update_mapping, NOT_ACKNOWLEDGED};
pub use scopes::{extract_distinct_values, ScopeExtraction};

/// Short description of an error response body for log lines
pub(crate) fn error_reason(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.pointer("/error/reason")
                .or_else(|| json.get("error"))
                .map(|e| match e.as_str() {
                    Some(s) => s.to_string(),
                    None => e.to_string(),
                })
        })
        .unwrap_or_else(|| body.chars().take(200).collect())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_reason() {
        assert_eq!(
            error_reason(r#"{"error":{"type":"x","reason":"no such index"},"status":404}"#),
            "no such index"
        );
        assert_eq!(error_reason(r#"{"error":"plain"}"#), "plain");
        assert_eq!(error_reason("not json"), "not json");
    }
}
