//! glTF 2.0 encoder
//!
//! One document builder feeds both output modes: the GLB binary container
//! (JSON chunk + BIN chunk) and the standalone JSON text form with the
//! buffer embedded as a base64 data URI.
//!
//! Unlike the flat formats, glTF preserves the scene hierarchy: every
//! visible node becomes a glTF node with its local TRS (rotation converted
//! to a quaternion), and primitives become meshes with POSITION/NORMAL
//! accessors and u32 indices. Invisible subtrees are left out entirely.

use serde_json::{json, Map, Value};

use prompt3d_math::{mat4, Vec3};
use prompt3d_scene::{Material, SceneNode};

use crate::mesh::TriangleMesh;
use crate::tessellate::tessellate;
use crate::EncodeError;

const GLB_MAGIC: u32 = 0x4654_6C67; // "glTF"
const CHUNK_JSON: u32 = 0x4E4F_534A; // "JSON"
const CHUNK_BIN: u32 = 0x004E_4942; // "BIN\0"

const COMPONENT_F32: u32 = 5126;
const COMPONENT_U32: u32 = 5125;
const TARGET_ARRAY_BUFFER: u32 = 34962;
const TARGET_ELEMENT_ARRAY_BUFFER: u32 = 34963;

#[derive(Default)]
struct DocumentBuilder {
    nodes: Vec<Value>,
    meshes: Vec<Value>,
    materials: Vec<Value>,
    accessors: Vec<Value>,
    buffer_views: Vec<Value>,
    bin: Vec<u8>,
}

impl DocumentBuilder {
    /// Append raw bytes as a buffer view, 4-byte aligned
    fn push_view(&mut self, bytes: &[u8], target: u32) -> usize {
        while self.bin.len() % 4 != 0 {
            self.bin.push(0);
        }
        let offset = self.bin.len();
        self.bin.extend_from_slice(bytes);
        self.buffer_views.push(json!({
            "buffer": 0,
            "byteOffset": offset,
            "byteLength": bytes.len(),
            "target": target,
        }));
        self.buffer_views.len() - 1
    }

    fn push_vec3_accessor(&mut self, data: &[Vec3], with_bounds: bool) -> usize {
        let view = self.push_view(bytemuck::cast_slice(data), TARGET_ARRAY_BUFFER);
        let mut accessor = json!({
            "bufferView": view,
            "componentType": COMPONENT_F32,
            "count": data.len(),
            "type": "VEC3",
        });
        if with_bounds {
            let (min, max) = bounds(data);
            accessor["min"] = json!(min.to_array());
            accessor["max"] = json!(max.to_array());
        }
        self.accessors.push(accessor);
        self.accessors.len() - 1
    }

    fn push_index_accessor(&mut self, indices: &[[u32; 3]]) -> usize {
        let view = self.push_view(bytemuck::cast_slice(indices), TARGET_ELEMENT_ARRAY_BUFFER);
        self.accessors.push(json!({
            "bufferView": view,
            "componentType": COMPONENT_U32,
            "count": indices.len() * 3,
            "type": "SCALAR",
        }));
        self.accessors.len() - 1
    }

    fn add_material(&mut self, material: &Material, name: Option<&str>) -> usize {
        let alpha = if material.transparent { material.opacity } else { 1.0 };
        let mut entry = Map::new();
        if let Some(name) = name {
            entry.insert("name".to_string(), json!(name));
        }
        entry.insert(
            "pbrMetallicRoughness".to_string(),
            json!({
                "baseColorFactor": [
                    material.base_color[0],
                    material.base_color[1],
                    material.base_color[2],
                    alpha,
                ],
                "metallicFactor": material.metalness,
                "roughnessFactor": material.roughness,
            }),
        );
        if let Some(emissive) = material.emissive {
            let factor: Vec<f32> = emissive
                .iter()
                .map(|c| (c * material.emissive_intensity).clamp(0.0, 1.0))
                .collect();
            entry.insert("emissiveFactor".to_string(), json!(factor));
        }
        if material.transparent {
            entry.insert("alphaMode".to_string(), json!("BLEND"));
        }
        self.materials.push(Value::Object(entry));
        self.materials.len() - 1
    }

    fn add_mesh(&mut self, mesh: &TriangleMesh, material: usize, name: Option<&str>) -> usize {
        let positions = self.push_vec3_accessor(&mesh.positions, true);
        let normals = self.push_vec3_accessor(&mesh.normals, false);
        let indices = self.push_index_accessor(&mesh.indices);

        let mut entry = Map::new();
        if let Some(name) = name {
            entry.insert("name".to_string(), json!(name));
        }
        entry.insert(
            "primitives".to_string(),
            json!([{
                "attributes": { "POSITION": positions, "NORMAL": normals },
                "indices": indices,
                "material": material,
            }]),
        );
        self.meshes.push(Value::Object(entry));
        self.meshes.len() - 1
    }

    /// Add a scene node and its visible subtree; returns the node index
    fn add_node(&mut self, node: &SceneNode) -> Option<usize> {
        if !node.visible {
            return None;
        }

        let children: Vec<usize> = node
            .children
            .iter()
            .filter_map(|child| self.add_node(child))
            .collect();

        let mut entry = Map::new();
        if let Some(name) = &node.name {
            entry.insert("name".to_string(), json!(name));
        }
        if let Some(primitive) = &node.primitive {
            let mesh = tessellate(primitive);
            let material = self.add_material(&node.material, node.name.as_deref());
            let mesh_index = self.add_mesh(&mesh, material, node.name.as_deref());
            entry.insert("mesh".to_string(), json!(mesh_index));
        }

        let transform = &node.transform;
        if transform.position != Vec3::ZERO {
            entry.insert("translation".to_string(), json!(transform.position.to_array()));
        }
        if transform.rotation != Vec3::ZERO {
            let quat = mat4::euler_to_quaternion(transform.rotation);
            entry.insert("rotation".to_string(), json!(quat));
        }
        if transform.scale != Vec3::ONE {
            entry.insert("scale".to_string(), json!(transform.scale.to_array()));
        }
        if !children.is_empty() {
            entry.insert("children".to_string(), json!(children));
        }

        self.nodes.push(Value::Object(entry));
        Some(self.nodes.len() - 1)
    }

    fn finish(mut self, root: usize, buffer_uri: Option<String>) -> (Value, Vec<u8>) {
        while self.bin.len() % 4 != 0 {
            self.bin.push(0);
        }
        let mut buffer = Map::new();
        buffer.insert("byteLength".to_string(), json!(self.bin.len()));
        if let Some(uri) = buffer_uri {
            buffer.insert("uri".to_string(), json!(uri));
        }

        let json = json!({
            "asset": { "version": "2.0", "generator": "prompt3d" },
            "scene": 0,
            "scenes": [{ "nodes": [root] }],
            "nodes": self.nodes,
            "meshes": self.meshes,
            "materials": self.materials,
            "accessors": self.accessors,
            "bufferViews": self.buffer_views,
            "buffers": [Value::Object(buffer)],
        });
        (json, self.bin)
    }
}

fn bounds(data: &[Vec3]) -> (Vec3, Vec3) {
    let mut iter = data.iter();
    let first = match iter.next() {
        Some(p) => *p,
        None => return (Vec3::ZERO, Vec3::ZERO),
    };
    iter.fold((first, first), |(min, max), p| {
        (min.min_components(*p), max.max_components(*p))
    })
}

fn build(scene: &SceneNode, embed_uri: bool) -> (Value, Vec<u8>) {
    let mut builder = DocumentBuilder::default();
    // The exporter rejects fully invisible scenes up front, so the root is
    // always present here.
    let root = builder.add_node(scene).unwrap_or_default();
    let uri_bin = embed_uri.then(|| builder.bin.clone());
    let uri = uri_bin.map(|mut bin| {
        while bin.len() % 4 != 0 {
            bin.push(0);
        }
        format!("data:application/octet-stream;base64,{}", base64::encode(&bin))
    });
    builder.finish(root, uri)
}

/// Encode a scene as a GLB binary container
pub(crate) fn encode_glb(scene: &SceneNode) -> Result<Vec<u8>, EncodeError> {
    let (json, bin) = build(scene, false);
    let mut json_bytes = serde_json::to_vec(&json)?;
    while json_bytes.len() % 4 != 0 {
        json_bytes.push(b' ');
    }

    let total = 12 + 8 + json_bytes.len() + 8 + bin.len();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());

    out.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    out.extend_from_slice(&json_bytes);

    out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
    out.extend_from_slice(&bin);

    Ok(out)
}

/// Encode a scene as pretty-printed glTF JSON with an embedded buffer
pub(crate) fn encode_json(scene: &SceneNode) -> Result<String, EncodeError> {
    let (json, _bin) = build(scene, true);
    Ok(serde_json::to_string_pretty(&json)?)
}
