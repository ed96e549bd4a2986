//! Names of the bundled request-body templates.

/// Mapping update adding the `sourceId` field to event indices
pub const UPDATE_MAPPING: &str = "update_mapping.json";

/// Update-by-query script copying `scope` into `sourceId`
pub const COPY_SCOPE_TO_SOURCE_ID: &str = "copy_scope_to_source_id.json";

/// Scope index creation body.
///
/// Keys: `numberOfShards`, `numberOfReplicas`, `mappingTotalFieldsLimit`,
/// `maxDocValueFieldsSearch`.
pub const SCOPE_INDEX: &str = "scope_index.json";

/// Terms aggregation over the `scope` field
pub const SEARCH_SCOPES: &str = "search_scopes.json";

/// Bulk action + document pair for one scope. Key: `scope`.
pub const BULK_SAVE_SCOPE: &str = "bulk_save_scope.ndjson";

pub(crate) const BUNDLED: &[(&str, &str)] = &[
    (UPDATE_MAPPING, include_str!("../templates/update_mapping.json")),
    (
        COPY_SCOPE_TO_SOURCE_ID,
        include_str!("../templates/copy_scope_to_source_id.json"),
    ),
    (SCOPE_INDEX, include_str!("../templates/scope_index.json")),
    (SEARCH_SCOPES, include_str!("../templates/search_scopes.json")),
    (BULK_SAVE_SCOPE, include_str!("../templates/bulk_save_scope.ndjson")),
];
