//! PLY encoder
//!
//! ASCII is the default; the binary little-endian sub-variant is produced
//! on request. Both share one header grammar: positions plus normals per
//! vertex, uchar-counted integer index lists per face. All instances are
//! merged into a single element pair.

use crate::collect::MeshInstance;

fn header(format: &str, vertex_count: usize, face_count: usize) -> String {
    let mut out = String::new();
    out.push_str("ply\n");
    out.push_str(&format!("format {} 1.0\n", format));
    out.push_str("comment generated by prompt3d\n");
    out.push_str(&format!("element vertex {}\n", vertex_count));
    out.push_str("property float x\n");
    out.push_str("property float y\n");
    out.push_str("property float z\n");
    out.push_str("property float nx\n");
    out.push_str("property float ny\n");
    out.push_str("property float nz\n");
    out.push_str(&format!("element face {}\n", face_count));
    out.push_str("property list uchar int vertex_indices\n");
    out.push_str("end_header\n");
    out
}

fn totals(instances: &[MeshInstance]) -> (usize, usize) {
    instances.iter().fold((0, 0), |(v, f), i| {
        (v + i.mesh.vertex_count(), f + i.mesh.triangle_count())
    })
}

pub(crate) fn encode_ascii(instances: &[MeshInstance]) -> String {
    let (vertex_count, face_count) = totals(instances);
    let mut out = header("ascii", vertex_count, face_count);

    for instance in instances {
        let mesh = &instance.mesh;
        for (p, n) in mesh.positions.iter().zip(mesh.normals.iter()) {
            out.push_str(&format!("{} {} {} {} {} {}\n", p.x, p.y, p.z, n.x, n.y, n.z));
        }
    }

    let mut offset = 0u32;
    for instance in instances {
        let mesh = &instance.mesh;
        for tri in &mesh.indices {
            out.push_str(&format!(
                "3 {} {} {}\n",
                tri[0] + offset,
                tri[1] + offset,
                tri[2] + offset,
            ));
        }
        offset += mesh.vertex_count() as u32;
    }

    out
}

pub(crate) fn encode_binary(instances: &[MeshInstance]) -> Vec<u8> {
    let (vertex_count, face_count) = totals(instances);
    let mut bytes = header("binary_little_endian", vertex_count, face_count).into_bytes();
    bytes.reserve(vertex_count * 24 + face_count * 13);

    for instance in instances {
        let mesh = &instance.mesh;
        for (p, n) in mesh.positions.iter().zip(mesh.normals.iter()) {
            for value in [p.x, p.y, p.z, n.x, n.y, n.z] {
                bytes.extend_from_slice(&value.to_le_bytes());
            }
        }
    }

    let mut offset = 0u32;
    for instance in instances {
        let mesh = &instance.mesh;
        for tri in &mesh.indices {
            bytes.push(3u8);
            for index in tri {
                bytes.extend_from_slice(&((index + offset) as i32).to_le_bytes());
            }
        }
        offset += mesh.vertex_count() as u32;
    }

    bytes
}
