//! Scene-graph data model for prompt3d
//!
//! This crate provides the types shared between the prompt-driven scene
//! generator and the file-format exporters:
//!
//! - [`Transform3D`] - Position, Euler rotation, and per-axis scale
//! - [`Material`] - Visual properties of a node
//! - [`Primitive`] - Parametric shape (sphere, box, cone, cylinder)
//! - [`SceneNode`] - A node in the scene tree, with children
//! - [`SceneValidator`] - Structural validation of a scene tree
//!
//! Scene trees are built once, never mutated afterwards, and consumed by
//! readers only (renderers, exporters), so they are safe to share freely.

mod transform;
mod material;
mod node;
mod validator;

pub use transform::Transform3D;
pub use material::Material;
pub use node::{Primitive, SceneNode, SceneReadError, SceneWriteError};
pub use validator::{SceneValidator, ValidationError};

// Re-export commonly used math types for convenience
pub use prompt3d_math::{Mat4, Vec3};
