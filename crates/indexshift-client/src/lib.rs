//! indexshift-client - Search-engine HTTP client for Indexshift
//!
//! This crate provides the `IndexClient` trait used by every migration
//! step, a `reqwest`-backed implementation, and (with the `test-support`
//! feature) an in-memory cluster for tests.

pub mod error;
pub mod http;
#[cfg(feature = "test-support")]
pub mod memory;
pub mod traits;

pub use error::{ClientError, ClientResult};
pub use http::{HttpConfig, HttpIndexClient};
#[cfg(feature = "test-support")]
pub use memory::{InMemoryCluster, Method, RecordedRequest};
pub use traits::{ContentType, IndexClient, IndexResponse};
