//! Triangle mesh container
//!
//! The intermediate representation between parametric primitives and the
//! file-format encoders: positions, per-vertex normals, and indexed
//! triangles.

use prompt3d_math::{mat4, Mat4, Vec3};

/// An indexed triangle mesh
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Create an empty mesh
    pub fn empty() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Return a copy of this mesh with positions and normals transformed
    ///
    /// Normals go through the inverse-transpose so non-uniform scale keeps
    /// them perpendicular to the surface.
    pub fn transformed(&self, matrix: Mat4) -> Self {
        let normal = mat4::normal_matrix(matrix);
        Self {
            positions: self
                .positions
                .iter()
                .map(|p| mat4::transform_point(matrix, *p))
                .collect(),
            normals: self
                .normals
                .iter()
                .map(|n| mat4::transform_normal(normal, *n))
                .collect(),
            indices: self.indices.clone(),
        }
    }

    /// Axis-aligned bounds of the positions, `(min, max)`
    ///
    /// Returns zero bounds for an empty mesh.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let mut iter = self.positions.iter();
        let first = match iter.next() {
            Some(p) => *p,
            None => return (Vec3::ZERO, Vec3::ZERO),
        };
        iter.fold((first, first), |(min, max), p| {
            (min.min_components(*p), max.max_components(*p))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompt3d_math::mat4;

    fn unit_triangle() -> TriangleMesh {
        TriangleMesh {
            positions: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            normals: vec![Vec3::Z; 3],
            indices: vec![[0, 1, 2]],
        }
    }

    #[test]
    fn test_empty() {
        let mesh = TriangleMesh::empty();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert_eq!(mesh.bounds(), (Vec3::ZERO, Vec3::ZERO));
    }

    #[test]
    fn test_counts() {
        let mesh = unit_triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn test_transformed_translates_positions() {
        let mesh = unit_triangle().transformed(mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)));
        assert_eq!(mesh.positions[0], Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(mesh.positions[1], Vec3::new(11.0, 0.0, 0.0));
        // Translation leaves normals untouched
        assert_eq!(mesh.normals[0], Vec3::Z);
    }

    #[test]
    fn test_transformed_keeps_normals_unit_length() {
        let mesh =
            unit_triangle().transformed(mat4::from_scale(Vec3::new(2.0, 3.0, 0.5)));
        for n in &mesh.normals {
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
        // Squashing Z keeps a Z-facing normal on Z
        assert!((mesh.normals[0].z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_bounds() {
        let (min, max) = unit_triangle().bounds();
        assert_eq!(min, Vec3::ZERO);
        assert_eq!(max, Vec3::new(1.0, 1.0, 0.0));
    }
}
