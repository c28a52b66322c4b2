//! prompt3d - prompt-driven procedural 3D scene generation and export
//!
//! Library surface of the `prompt3d` binary:
//!
//! - [`config`] - layered TOML + environment configuration
//! - [`job`] - the generation-job capability and its simulated backend
//!
//! The heavy lifting lives in the workspace crates, re-exported here for
//! callers that want the whole pipeline through one dependency.

pub mod config;
pub mod job;

pub use prompt3d_gen::{build, Complexity, GenerationOptions, Quality, Style};
pub use prompt3d_export::{export, export_with, ExportArtifact, ExportOptions, Format};
pub use prompt3d_scene::{Material, Primitive, SceneNode, SceneValidator, Transform3D};
pub use prompt3d_math::Vec3;
