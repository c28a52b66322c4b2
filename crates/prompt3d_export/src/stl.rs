//! STL encoder
//!
//! Binary STL is the default (80-byte header, little-endian triangle
//! records); the verbose ASCII variant is produced on request. STL carries
//! no per-vertex normals, so facet normals are recomputed from the
//! transformed triangle corners.

use prompt3d_math::Vec3;

use crate::collect::MeshInstance;

fn triangle_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalized()
}

pub(crate) fn encode_binary(instances: &[MeshInstance], name: &str) -> Vec<u8> {
    let total: usize = instances.iter().map(|i| i.mesh.triangle_count()).sum();
    let mut bytes = Vec::<u8>::with_capacity(84 + total * 50);

    let mut header = [0u8; 80];
    let name_bytes = name.as_bytes();
    let header_len = name_bytes.len().min(80);
    header[..header_len].copy_from_slice(&name_bytes[..header_len]);
    bytes.extend_from_slice(&header);

    bytes.extend_from_slice(&(total as u32).to_le_bytes());

    for instance in instances {
        let mesh = &instance.mesh;
        for tri in &mesh.indices {
            let a = mesh.positions[tri[0] as usize];
            let b = mesh.positions[tri[1] as usize];
            let c = mesh.positions[tri[2] as usize];
            let n = triangle_normal(a, b, c);

            for v in [n, a, b, c] {
                bytes.extend_from_slice(&v.x.to_le_bytes());
                bytes.extend_from_slice(&v.y.to_le_bytes());
                bytes.extend_from_slice(&v.z.to_le_bytes());
            }
            bytes.extend_from_slice(&0u16.to_le_bytes());
        }
    }

    bytes
}

pub(crate) fn encode_ascii(instances: &[MeshInstance], name: &str) -> String {
    let mut out = String::new();
    out.push_str("solid ");
    out.push_str(name);
    out.push('\n');

    for instance in instances {
        let mesh = &instance.mesh;
        for tri in &mesh.indices {
            let a = mesh.positions[tri[0] as usize];
            let b = mesh.positions[tri[1] as usize];
            let c = mesh.positions[tri[2] as usize];
            let n = triangle_normal(a, b, c);

            out.push_str(&format!("  facet normal {} {} {}\n", n.x, n.y, n.z));
            out.push_str("    outer loop\n");
            for v in [a, b, c] {
                out.push_str(&format!("      vertex {} {} {}\n", v.x, v.y, v.z));
            }
            out.push_str("    endloop\n");
            out.push_str("  endfacet\n");
        }
    }

    out.push_str("endsolid ");
    out.push_str(name);
    out.push('\n');
    out
}
