//! Prompt-to-scene builder
//!
//! The entry point of this crate: match the prompt against the template
//! table and construct the winning template, or the fallback.

use prompt3d_scene::SceneNode;

use crate::templates::{fallback, Template, TEMPLATES};
use crate::GenerationOptions;

/// Find the first template whose keywords appear in the prompt
///
/// Matching is case-insensitive substring search, checked in the declared
/// order of [`TEMPLATES`]; the first hit wins and categories never merge.
pub fn matching_template(prompt: &str) -> Option<&'static Template> {
    let lowered = prompt.to_lowercase();
    TEMPLATES
        .iter()
        .find(|template| template.keywords.iter().any(|keyword| lowered.contains(keyword)))
}

/// Build a scene tree from a prompt
///
/// Deterministic: identical `(prompt, options)` inputs always yield a
/// structurally identical tree. The root is always a named group. Any
/// string is a valid prompt; unmatched prompts (including the empty
/// string) get the parametric fallback.
pub fn build(prompt: &str, options: &GenerationOptions) -> SceneNode {
    match matching_template(prompt) {
        Some(template) => {
            log::debug!("Prompt matched '{}' template", template.name);
            (template.build)(options)
        }
        None => {
            log::debug!(
                "No template keyword in prompt; using {}-sphere fallback",
                options.complexity.sphere_count()
            );
            fallback(options)
        }
    }
}
