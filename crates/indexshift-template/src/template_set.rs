//! Named template lookup and rendering

use crate::error::{TemplateError, TemplateResult};
use crate::names::BUNDLED;
use crate::render::render_str;
use crate::substitutions::Substitutions;
use indexshift_core::{TemplateMode, TemplatesConfig};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// The request-body templates available to a migration run.
///
/// Bodies come from the bundled resource set unless an override directory
/// holds a file with the same name.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    mode: TemplateMode,
    override_dir: Option<PathBuf>,
}

impl TemplateSet {
    /// Create a template set with an explicit mode and optional override directory
    pub fn new(mode: TemplateMode, override_dir: Option<PathBuf>) -> Self {
        Self { mode, override_dir }
    }

    /// Bundled templates only, lenient rendering
    pub fn bundled() -> Self {
        Self::default()
    }

    /// Create from the `templates:` section of the config
    pub fn from_config(config: &TemplatesConfig) -> Self {
        Self::new(config.mode, config.dir.clone())
    }

    pub fn mode(&self) -> TemplateMode {
        self.mode
    }

    pub fn override_dir(&self) -> Option<&Path> {
        self.override_dir.as_deref()
    }

    /// Names of all bundled templates
    pub fn names() -> Vec<&'static str> {
        BUNDLED.iter().map(|(name, _)| *name).collect()
    }

    /// Load the raw body of a template
    pub fn source(&self, name: &str) -> TemplateResult<Cow<'static, str>> {
        if let Some(path) = self.override_path(name) {
            log::debug!("Using template override {}", path.display());
            let body = std::fs::read_to_string(&path).map_err(|e| TemplateError::Io {
                path: path.display().to_string(),
                source: e,
            })?;
            return Ok(Cow::Owned(body));
        }

        BUNDLED
            .iter()
            .find(|(bundled, _)| *bundled == name)
            .map(|(_, body)| Cow::Borrowed(*body))
            .ok_or_else(|| TemplateError::ResourceNotFound {
                name: name.to_string(),
            })
    }

    /// Load a template and substitute its placeholders
    pub fn render(&self, name: &str, substitutions: &Substitutions) -> TemplateResult<String> {
        let source = self.source(name)?;
        let rendered = render_str(&source, substitutions);

        if !rendered.unresolved.is_empty() {
            let placeholders = rendered
                .unresolved
                .iter()
                .map(|p| format!("${}", p))
                .collect::<Vec<_>>()
                .join(", ");
            match self.mode {
                TemplateMode::Strict => {
                    return Err(TemplateError::UnresolvedPlaceholder {
                        template: name.to_string(),
                        placeholders,
                    });
                }
                TemplateMode::Lenient => {
                    log::warn!(
                        "Template {} rendered with unresolved placeholders: {}",
                        name,
                        placeholders
                    );
                }
            }
        }

        Ok(rendered.text)
    }

    /// Path of an override file for `name`, if one exists.
    ///
    /// Names containing path separators never resolve to an override.
    fn override_path(&self, name: &str) -> Option<PathBuf> {
        let dir = self.override_dir.as_ref()?;
        if name.contains(['/', '\\']) || name.starts_with('.') {
            return None;
        }
        let path = dir.join(name);
        path.is_file().then_some(path)
    }
}

#[cfg(test)]
#[path = "template_set_test.rs"]
mod tests;
