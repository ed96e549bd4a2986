use super::*;
use tempfile::tempdir;

#[test]
fn test_parse_minimal_config() {
    let config: Config = serde_yaml::from_str("{}").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.address, "http://localhost:9200");
    assert_eq!(config.index_prefix, "context");
    assert_eq!(config.templates.mode, TemplateMode::Lenient);
    assert_eq!(config.bulk_verification, BulkVerification::StatusOnly);
}

#[test]
fn test_scope_index_defaults() {
    let settings = ScopeIndexSettings::default();
    assert_eq!(settings.number_of_shards, 3);
    assert_eq!(settings.number_of_replicas, 0);
    assert_eq!(settings.total_fields_limit, 1000);
    assert_eq!(settings.max_docvalue_fields_search, 1000);
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
address: https://search.internal:9200
index_prefix: tenant
timeout_secs: 30
username: elastic
password: changeme
scope_index:
  number_of_shards: 1
  number_of_replicas: 2
  total_fields_limit: 500
  max_docvalue_fields_search: 200
templates:
  mode: strict
  dir: ./bodies
bulk_verification: strict
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    config.validate().unwrap();
    assert_eq!(config.index_prefix, "tenant");
    assert_eq!(config.timeout_secs, Some(30));
    assert_eq!(config.scope_index.number_of_replicas, 2);
    assert_eq!(config.templates.mode, TemplateMode::Strict);
    assert_eq!(config.templates.dir, Some(PathBuf::from("./bodies")));
    assert_eq!(config.bulk_verification, BulkVerification::Strict);
}

#[test]
fn test_partial_scope_index_uses_defaults() {
    let config: Config = serde_yaml::from_str("scope_index:\n  number_of_replicas: 1\n").unwrap();
    assert_eq!(config.scope_index.number_of_shards, 3);
    assert_eq!(config.scope_index.number_of_replicas, 1);
}

#[test]
fn test_unknown_field_rejected() {
    let result: Result<Config, _> = serde_yaml::from_str("adress: http://x:9200\n");
    assert!(result.is_err());
}

#[test]
fn test_validate_rejects_bad_values() {
    let config = Config {
        address: "localhost:9200".to_string(),
        ..Config::default()
    };
    assert!(config.validate().is_err());

    let config = Config {
        index_prefix: String::new(),
        ..Config::default()
    };
    assert!(config.validate().is_err());

    let config = Config {
        password: Some("secret".to_string()),
        ..Config::default()
    };
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.scope_index.number_of_shards = 0;
    assert!(config.validate().is_err());

    let config = Config {
        timeout_secs: Some(0),
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_load_from_dir() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("indexshift.yml"), "index_prefix: acme\n").unwrap();

    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.index_prefix, "acme");
}

#[test]
fn test_load_from_dir_yaml_extension() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("indexshift.yaml"), "index_prefix: acme\n").unwrap();

    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.index_prefix, "acme");
}

#[test]
fn test_load_missing_config() {
    let dir = tempdir().unwrap();
    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));

    let config = Config::load_from_dir_or_default(dir.path()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_invalid_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("indexshift.yml");
    std::fs::write(&path, "index_prefix: Not-Lowercase\n").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}
