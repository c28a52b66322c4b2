//! 3D Transform (position, rotation, scale)
//!
//! A Transform3D represents the position, Euler rotation, and per-axis
//! scale of a node relative to its parent.

use prompt3d_math::{mat4, Mat4, Vec3};
use serde::{Serialize, Deserialize};

/// A 3D transform with position, XYZ Euler rotation (radians), and per-axis scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    /// Position relative to the parent node
    #[serde(default)]
    pub position: Vec3,
    /// Euler rotation in radians, applied in XYZ order
    #[serde(default)]
    pub rotation: Vec3,
    /// Per-axis scale factor
    #[serde(default = "default_scale")]
    pub scale: Vec3,
}

fn default_scale() -> Vec3 {
    Vec3::ONE
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform3D {
    /// Create an identity transform (no translation, rotation, or scale change)
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// Create a transform positioned at the given coordinates
    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self::from_position(Vec3::new(x, y, z))
    }

    /// Set the Euler rotation (radians)
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the per-axis scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Set a uniform scale on all three axes
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Whether this transform leaves geometry unchanged
    pub fn is_identity(&self) -> bool {
        self.position == Vec3::ZERO && self.rotation == Vec3::ZERO && self.scale == Vec3::ONE
    }

    /// Compose this transform into a matrix
    ///
    /// Applies scale, then rotation, then translation.
    pub fn to_matrix(&self) -> Mat4 {
        mat4::trs(self.position, self.rotation, self.scale)
    }
}
