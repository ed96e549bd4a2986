//! Configuration types and parsing for indexshift.yml

use crate::error::{CoreError, CoreResult};
use crate::index_name::validate_prefix;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names looked up in a directory, in order.
const CONFIG_FILE_NAMES: &[&str] = &["indexshift.yml", "indexshift.yaml"];

/// Main configuration from indexshift.yml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Search-engine base address, including scheme and port
    #[serde(default = "default_address")]
    pub address: String,

    /// Prefix shared by the indices to migrate (`<prefix>-event*`, `<prefix>-scope`)
    #[serde(default = "default_index_prefix")]
    pub index_prefix: String,

    /// Per-request timeout; unset means the HTTP client default
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Basic-auth user
    #[serde(default)]
    pub username: Option<String>,

    /// Basic-auth password (requires `username`)
    #[serde(default)]
    pub password: Option<String>,

    /// Creation settings for the scope index
    #[serde(default)]
    pub scope_index: ScopeIndexSettings,

    /// Request-body template settings
    #[serde(default)]
    pub templates: TemplatesConfig,

    /// How bulk responses are checked
    #[serde(default)]
    pub bulk_verification: BulkVerification,
}

/// Settings used when the scope index has to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScopeIndexSettings {
    #[serde(default = "default_number_of_shards")]
    pub number_of_shards: u32,

    #[serde(default)]
    pub number_of_replicas: u32,

    /// `mapping.total_fields.limit`
    #[serde(default = "default_limit")]
    pub total_fields_limit: u32,

    /// `max_docvalue_fields_search`
    #[serde(default = "default_limit")]
    pub max_docvalue_fields_search: u32,
}

impl Default for ScopeIndexSettings {
    fn default() -> Self {
        Self {
            number_of_shards: default_number_of_shards(),
            number_of_replicas: 0,
            total_fields_limit: default_limit(),
            max_docvalue_fields_search: default_limit(),
        }
    }
}

/// Template lookup and rendering settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct TemplatesConfig {
    /// Unresolved placeholder handling
    #[serde(default)]
    pub mode: TemplateMode,

    /// Directory whose files replace bundled templates of the same name
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// What rendering does with a `$placeholder` that has no substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemplateMode {
    /// Leave the placeholder verbatim and log a warning
    #[default]
    Lenient,
    /// Fail the render
    Strict,
}

/// How a bulk response is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BulkVerification {
    /// HTTP 200 is success, per-item results are not inspected
    #[default]
    StatusOnly,
    /// Also inspect the `errors` flag and every item of the response
    Strict,
}

impl std::fmt::Display for TemplateMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateMode::Lenient => write!(f, "lenient"),
            TemplateMode::Strict => write!(f, "strict"),
        }
    }
}

impl std::fmt::Display for BulkVerification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BulkVerification::StatusOnly => write!(f, "status_only"),
            BulkVerification::Strict => write!(f, "strict"),
        }
    }
}

const DEFAULT_ADDRESS: &str = "http://localhost:9200";

const DEFAULT_INDEX_PREFIX: &str = "context";

fn default_address() -> String {
    DEFAULT_ADDRESS.to_string()
}

fn default_index_prefix() -> String {
    DEFAULT_INDEX_PREFIX.to_string()
}

fn default_number_of_shards() -> u32 {
    3
}

fn default_limit() -> u32 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: default_address(),
            index_prefix: default_index_prefix(),
            timeout_secs: None,
            username: None,
            password: None,
            scope_index: ScopeIndexSettings::default(),
            templates: TemplatesConfig::default(),
            bulk_verification: BulkVerification::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory
    /// Looks for indexshift.yml or indexshift.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        match Self::find_in_dir(dir) {
            Some(path) => Self::load(&path),
            None => Err(CoreError::ConfigNotFound {
                path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
            }),
        }
    }

    /// Load from a directory, falling back to defaults when no file exists
    pub fn load_from_dir_or_default(dir: &Path) -> CoreResult<Self> {
        match Self::find_in_dir(dir) {
            Some(path) => Self::load(&path),
            None => {
                log::debug!("No config file in {}, using defaults", dir.display());
                Ok(Self::default())
            }
        }
    }

    fn find_in_dir(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.address.starts_with("http://") || self.address.starts_with("https://")) {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "address '{}' must start with http:// or https://",
                    self.address
                ),
            });
        }

        validate_prefix(&self.index_prefix).map_err(|e| CoreError::ConfigInvalid {
            message: format!("index_prefix: {}", e),
        })?;

        if self.password.is_some() && self.username.is_none() {
            return Err(CoreError::ConfigInvalid {
                message: "password is set but username is missing".to_string(),
            });
        }

        if self.timeout_secs == Some(0) {
            return Err(CoreError::ConfigInvalid {
                message: "timeout_secs must be greater than zero".to_string(),
            });
        }

        self.scope_index.validate()
    }
}

impl ScopeIndexSettings {
    /// Validate the creation settings
    pub fn validate(&self) -> CoreResult<()> {
        let checks = [
            ("number_of_shards", self.number_of_shards),
            ("total_fields_limit", self.total_fields_limit),
            ("max_docvalue_fields_search", self.max_docvalue_fields_search),
        ];
        for (name, value) in checks {
            if value == 0 {
                return Err(CoreError::ConfigInvalid {
                    message: format!("scope_index.{} must be greater than zero", name),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
