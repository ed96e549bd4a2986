//! indexshift-template - Request-body templates for Indexshift
//!
//! This crate bundles the JSON/NDJSON request bodies sent during a
//! migration and renders them by replacing `$placeholder` tokens with
//! values from a [`Substitutions`] map.
//!
//! Unresolved placeholders are either left verbatim with a warning
//! ([`TemplateMode::Lenient`]) or rejected ([`TemplateMode::Strict`]).

pub mod error;
pub mod names;
pub mod render;
pub mod substitutions;
pub mod template_set;

pub use error::{TemplateError, TemplateResult};
pub use indexshift_core::TemplateMode;
pub use render::{render_str, Rendered};
pub use substitutions::Substitutions;
pub use template_set::TemplateSet;
