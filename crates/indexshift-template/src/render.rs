//! `$placeholder` substitution over a template body.

use crate::substitutions::Substitutions;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Result of substituting placeholders in one template body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// Placeholder names with no substitution, in order of first appearance
    pub unresolved: Vec<String>,
}

fn placeholder_pattern() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER
        .get_or_init(|| Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)").expect("valid regex literal"))
}

/// Replace every `$name` token that has a substitution.
///
/// Tokens without a value are kept verbatim and listed in
/// [`Rendered::unresolved`]. A `$` not followed by an identifier is not a
/// placeholder.
pub fn render_str(template: &str, substitutions: &Substitutions) -> Rendered {
    let mut unresolved: Vec<String> = Vec::new();
    let text = placeholder_pattern()
        .replace_all(template, |caps: &Captures<'_>| {
            let name = &caps[1];
            match substitutions.get(name) {
                Some(value) => value.to_string(),
                None => {
                    if !unresolved.iter().any(|n| n == name) {
                        unresolved.push(name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        })
        .into_owned();
    Rendered { text, unresolved }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
