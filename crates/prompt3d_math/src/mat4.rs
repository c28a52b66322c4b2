//! 4x4 Matrix utilities for 3D transforms
//!
//! Column-major matrices used to compose translation, Euler rotation, and
//! per-axis scale into a single transform, and to carry transforms down a
//! scene tree when flattening geometry for export.

use crate::Vec3;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Create a translation matrix
pub fn from_translation(t: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = t.x;
    m[3][1] = t.y;
    m[3][2] = t.z;
    m
}

/// Create a per-axis scale matrix
pub fn from_scale(s: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[0][0] = s.x;
    m[1][1] = s.y;
    m[2][2] = s.z;
    m
}

/// Rotation about the X axis (radians)
pub fn rotation_x(angle: f32) -> Mat4 {
    let (sn, cs) = angle.sin_cos();
    let mut m = IDENTITY;
    m[1][1] = cs;
    m[2][1] = -sn;
    m[1][2] = sn;
    m[2][2] = cs;
    m
}

/// Rotation about the Y axis (radians)
pub fn rotation_y(angle: f32) -> Mat4 {
    let (sn, cs) = angle.sin_cos();
    let mut m = IDENTITY;
    m[0][0] = cs;
    m[2][0] = sn;
    m[0][2] = -sn;
    m[2][2] = cs;
    m
}

/// Rotation about the Z axis (radians)
pub fn rotation_z(angle: f32) -> Mat4 {
    let (sn, cs) = angle.sin_cos();
    let mut m = IDENTITY;
    m[0][0] = cs;
    m[1][0] = -sn;
    m[0][1] = sn;
    m[1][1] = cs;
    m
}

/// Rotation from Euler angles, XYZ order
///
/// Equivalent to `Rx * Ry * Rz`, matching the convention of the renderers
/// this crate's scenes are exported toward.
pub fn from_euler(e: Vec3) -> Mat4 {
    mul(rotation_x(e.x), mul(rotation_y(e.y), rotation_z(e.z)))
}

/// Compose translation, Euler rotation, and scale: `T * R * S`
pub fn trs(translation: Vec3, rotation: Vec3, scale: Vec3) -> Mat4 {
    mul(from_translation(translation), mul(from_euler(rotation), from_scale(scale)))
}

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }
    result
}

/// Transform a point (w = 1)
pub fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
        m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
        m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
    )
}

/// 3x3 normal matrix (inverse transpose of the upper-left 3x3)
///
/// Needed because non-uniform scale breaks direct rotation of normals.
pub fn normal_matrix(m: Mat4) -> [[f32; 3]; 3] {
    let c0 = Vec3::new(m[0][0], m[0][1], m[0][2]);
    let c1 = Vec3::new(m[1][0], m[1][1], m[1][2]);
    let c2 = Vec3::new(m[2][0], m[2][1], m[2][2]);

    let det = c0.dot(c1.cross(c2));
    let inv_det = if det.abs() > 1e-12 { 1.0 / det } else { 1.0 };

    let n0 = c1.cross(c2) * inv_det;
    let n1 = c2.cross(c0) * inv_det;
    let n2 = c0.cross(c1) * inv_det;

    [n0.to_array(), n1.to_array(), n2.to_array()]
}

/// Transform a normal by a 3x3 normal matrix and re-normalize
pub fn transform_normal(n: [[f32; 3]; 3], v: Vec3) -> Vec3 {
    Vec3::new(
        n[0][0] * v.x + n[1][0] * v.y + n[2][0] * v.z,
        n[0][1] * v.x + n[1][1] * v.y + n[2][1] * v.z,
        n[0][2] * v.x + n[1][2] * v.y + n[2][2] * v.z,
    )
    .normalized()
}

/// Convert XYZ Euler angles to a quaternion `[x, y, z, w]`
pub fn euler_to_quaternion(e: Vec3) -> [f32; 4] {
    let (s1, c1) = (e.x * 0.5).sin_cos();
    let (s2, c2) = (e.y * 0.5).sin_cos();
    let (s3, c3) = (e.z * 0.5).sin_cos();

    [
        s1 * c2 * c3 + c1 * s2 * s3,
        c1 * s2 * c3 - s1 * c2 * s3,
        c1 * c2 * s3 + s1 * s2 * c3,
        c1 * c2 * c3 - s1 * s2 * s3,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    #[test]
    fn test_identity_transform() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert!(vec_approx_eq(transform_point(IDENTITY, p), p));
    }

    #[test]
    fn test_translation() {
        let m = from_translation(Vec3::new(1.0, 2.0, 3.0));
        let p = transform_point(m, Vec3::ZERO);
        assert!(vec_approx_eq(p, Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_scale() {
        let m = from_scale(Vec3::new(2.0, 3.0, 4.0));
        let p = transform_point(m, Vec3::ONE);
        assert!(vec_approx_eq(p, Vec3::new(2.0, 3.0, 4.0)));
    }

    #[test]
    fn test_rotation_z() {
        let m = rotation_z(PI / 2.0);
        let p = transform_point(m, Vec3::X);
        assert!(vec_approx_eq(p, Vec3::Y), "Expected Y, got {:?}", p);
    }

    #[test]
    fn test_rotation_x() {
        let m = rotation_x(PI / 2.0);
        let p = transform_point(m, Vec3::Y);
        assert!(vec_approx_eq(p, Vec3::Z), "Expected Z, got {:?}", p);
    }

    #[test]
    fn test_trs_order() {
        // trs applies: scale, then rotate, then translate
        let m = trs(
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, PI / 2.0),
            Vec3::splat(2.0),
        );
        // X * 2 = (2, 0, 0), rotated 90 deg about Z = (0, 2, 0), + (10, 0, 0) = (10, 2, 0)
        let p = transform_point(m, Vec3::X);
        assert!(vec_approx_eq(p, Vec3::new(10.0, 2.0, 0.0)), "got {:?}", p);
    }

    #[test]
    fn test_normal_matrix_nonuniform_scale() {
        // A plane squashed in Y must keep its normal pointing along Y
        let m = from_scale(Vec3::new(1.0, 0.1, 1.0));
        let n = normal_matrix(m);
        let transformed = transform_normal(n, Vec3::Y);
        assert!(vec_approx_eq(transformed, Vec3::Y), "got {:?}", transformed);
    }

    #[test]
    fn test_normal_matrix_rotation() {
        let m = rotation_z(PI / 2.0);
        let n = normal_matrix(m);
        let transformed = transform_normal(n, Vec3::X);
        assert!(vec_approx_eq(transformed, Vec3::Y), "got {:?}", transformed);
    }

    #[test]
    fn test_euler_to_quaternion_identity() {
        let q = euler_to_quaternion(Vec3::ZERO);
        assert_eq!(q, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_euler_to_quaternion_half_turn_x() {
        let q = euler_to_quaternion(Vec3::new(PI / 2.0, 0.0, 0.0));
        let half = (PI / 4.0).sin();
        assert!(approx_eq(q[0], half));
        assert!(approx_eq(q[1], 0.0));
        assert!(approx_eq(q[2], 0.0));
        assert!(approx_eq(q[3], half));
    }
}
