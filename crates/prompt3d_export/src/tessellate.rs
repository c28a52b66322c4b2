//! Primitive tessellation
//!
//! Turns parametric primitives into indexed triangle meshes. Segment
//! semantics match the renderer the scenes are authored against, so
//! exported geometry matches what the viewer shows: a UV sphere grid, a
//! 24-vertex box with per-face normals, and capped (possibly tapered)
//! cylinders. Cones are cylinders with a zero top radius.

use std::f32::consts::{PI, TAU};

use prompt3d_math::Vec3;
use prompt3d_scene::Primitive;

use crate::mesh::TriangleMesh;

/// Tessellate a primitive into a triangle mesh centered at the origin
pub fn tessellate(primitive: &Primitive) -> TriangleMesh {
    match *primitive {
        Primitive::Sphere { radius, width_segments, height_segments } => {
            uv_sphere(radius, width_segments.max(3), height_segments.max(2))
        }
        Primitive::Box { width, height, depth } => cuboid(width, height, depth),
        Primitive::Cone { radius, height, radial_segments } => {
            cylinder(0.0, radius, height, radial_segments.max(3))
        }
        Primitive::Cylinder { radius_top, radius_bottom, height, radial_segments } => {
            cylinder(radius_top, radius_bottom, height, radial_segments.max(3))
        }
    }
}

/// Expected triangle count for a primitive, without tessellating it
///
/// Useful for sizing buffers and for sanity checks in callers.
pub fn triangle_count(primitive: &Primitive) -> usize {
    match *primitive {
        Primitive::Sphere { width_segments, height_segments, .. } => {
            let w = width_segments.max(3) as usize;
            let h = height_segments.max(2) as usize;
            w * (2 * h - 2)
        }
        Primitive::Box { .. } => 12,
        Primitive::Cone { radial_segments, .. } => 2 * radial_segments.max(3) as usize,
        Primitive::Cylinder { radius_top, radius_bottom, radial_segments, .. } => {
            let seg = radial_segments.max(3) as usize;
            let mut count = 0;
            if radius_top > 0.0 {
                count += 2 * seg; // top side row + top cap
            }
            if radius_bottom > 0.0 {
                count += 2 * seg; // bottom side row + bottom cap
            }
            count
        }
    }
}

fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> TriangleMesh {
    let mut mesh = TriangleMesh::empty();
    let w = width_segments as usize;
    let h = height_segments as usize;

    for iy in 0..=h {
        let theta = iy as f32 / h as f32 * PI;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for ix in 0..=w {
            let phi = ix as f32 / w as f32 * TAU;
            let (sin_phi, cos_phi) = phi.sin_cos();
            let normal = Vec3::new(sin_theta * cos_phi, cos_theta, sin_theta * sin_phi);
            mesh.positions.push(normal * radius);
            mesh.normals.push(normal);
        }
    }

    let stride = (w + 1) as u32;
    for iy in 0..h as u32 {
        for ix in 0..w as u32 {
            let a = iy * stride + ix;
            let d = a + 1;
            let b = a + stride;
            let c = b + 1;
            // Skip the degenerate triangle touching each pole
            if iy != 0 {
                mesh.indices.push([a, d, b]);
            }
            if iy != h as u32 - 1 {
                mesh.indices.push([b, d, c]);
            }
        }
    }

    mesh
}

fn cuboid(width: f32, height: f32, depth: f32) -> TriangleMesh {
    let half = Vec3::new(width * 0.5, height * 0.5, depth * 0.5);
    let mut mesh = TriangleMesh::empty();

    // (normal, tangent, bitangent) with tangent x bitangent = normal, so
    // the quad corners below wind counter-clockwise seen from outside.
    let faces = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (-Vec3::X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (-Vec3::Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (-Vec3::Z, Vec3::Y, Vec3::X),
    ];

    for (normal, tangent, bitangent) in faces {
        let base = mesh.positions.len() as u32;
        let center = normal.component_mul(half);
        let t = tangent.component_mul(half);
        let b = bitangent.component_mul(half);

        for (st, sb) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            mesh.positions.push(center + t * st + b * sb);
            mesh.normals.push(normal);
        }
        mesh.indices.push([base, base + 1, base + 2]);
        mesh.indices.push([base, base + 2, base + 3]);
    }

    mesh
}

fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> TriangleMesh {
    let mut mesh = TriangleMesh::empty();
    let seg = radial_segments as usize;
    let half_height = height * 0.5;
    let slope = (radius_bottom - radius_top) / height;

    // Side wall: two rings of seg+1 vertices (the seam vertex repeats so
    // normals interpolate cleanly around the loop).
    for (y, radius) in [(half_height, radius_top), (-half_height, radius_bottom)] {
        for ix in 0..=seg {
            let phi = ix as f32 / seg as f32 * TAU;
            let (sin_phi, cos_phi) = phi.sin_cos();
            mesh.positions.push(Vec3::new(radius * cos_phi, y, radius * sin_phi));
            mesh.normals
                .push(Vec3::new(cos_phi, slope, sin_phi).normalized());
        }
    }

    let stride = (seg + 1) as u32;
    for ix in 0..seg as u32 {
        let a = ix; // top ring
        let d = ix + 1;
        let b = ix + stride; // bottom ring
        let c = b + 1;
        if radius_top > 0.0 {
            mesh.indices.push([a, d, b]);
        }
        if radius_bottom > 0.0 {
            mesh.indices.push([d, c, b]);
        }
    }

    // Caps: a center vertex plus a dedicated ring with axial normals.
    let mut cap = |y: f32, radius: f32, up: bool| {
        if radius <= 0.0 {
            return;
        }
        let normal = if up { Vec3::Y } else { -Vec3::Y };
        let center = mesh.positions.len() as u32;
        mesh.positions.push(Vec3::new(0.0, y, 0.0));
        mesh.normals.push(normal);
        let ring = mesh.positions.len() as u32;
        for ix in 0..=seg {
            let phi = ix as f32 / seg as f32 * TAU;
            let (sin_phi, cos_phi) = phi.sin_cos();
            mesh.positions.push(Vec3::new(radius * cos_phi, y, radius * sin_phi));
            mesh.normals.push(normal);
        }
        for ix in 0..seg as u32 {
            if up {
                mesh.indices.push([center, ring + ix + 1, ring + ix]);
            } else {
                mesh.indices.push([center, ring + ix, ring + ix + 1]);
            }
        }
    };
    cap(half_height, radius_top, true);
    cap(-half_height, radius_bottom, false);

    mesh
}
