//! Keyword-driven procedural scene generation
//!
//! Turns a free-text prompt into a [`SceneNode`] tree. Prompts matching a
//! known keyword category get a hand-authored template (bird, car, house,
//! tree, robot); anything else gets a parametric arrangement of spheres.
//!
//! Generation is deterministic: the same prompt and options always produce
//! a structurally identical tree. There is no randomness and no I/O.
//!
//! ```ignore
//! let options = GenerationOptions::default();
//! let scene = prompt3d_gen::build("a small bird on a branch", &options);
//! assert_eq!(scene.name.as_deref(), Some("bird"));
//! ```

mod options;
mod templates;
mod builder;

pub use options::{Complexity, GenerationOptions, ParseOptionError, Quality, Style};
pub use templates::{Template, TEMPLATES};
pub use builder::{build, matching_template};

pub use prompt3d_scene::SceneNode;
