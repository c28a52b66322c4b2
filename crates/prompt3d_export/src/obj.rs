//! Wavefront OBJ encoder
//!
//! One `o` group per mesh instance, vertices and normals in world space,
//! faces as `v//vn` triples with 1-based running indices. Everything goes
//! into a single file; no material library is referenced.

use crate::collect::MeshInstance;

pub(crate) fn encode(instances: &[MeshInstance]) -> String {
    let mut out = String::new();
    let mut vertex_offset = 1u32;
    let mut normal_offset = 1u32;

    for instance in instances {
        let mesh = &instance.mesh;
        out.push_str(&format!("o {}\n", instance.name));

        for p in &mesh.positions {
            out.push_str(&format!("v {} {} {}\n", p.x, p.y, p.z));
        }
        for n in &mesh.normals {
            out.push_str(&format!("vn {} {} {}\n", n.x, n.y, n.z));
        }
        for tri in &mesh.indices {
            out.push_str(&format!(
                "f {}//{} {}//{} {}//{}\n",
                tri[0] + vertex_offset,
                tri[0] + normal_offset,
                tri[1] + vertex_offset,
                tri[1] + normal_offset,
                tri[2] + vertex_offset,
                tri[2] + normal_offset,
            ));
        }

        vertex_offset += mesh.vertex_count() as u32;
        normal_offset += mesh.vertex_count() as u32;
    }

    out
}
