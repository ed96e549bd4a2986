//! CLI command implementations

pub(crate) mod common;
pub(crate) mod list;
pub(crate) mod migrate;
pub(crate) mod prompt;
pub(crate) mod render;
