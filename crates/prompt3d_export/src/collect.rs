//! Scene flattening
//!
//! Walks a scene tree once and bakes every visible primitive into a
//! world-space mesh instance. The flat-format encoders (OBJ, STL, PLY)
//! consume this; the glTF encoder keeps the hierarchy and walks the tree
//! itself.

use prompt3d_math::{mat4, Mat4};
use prompt3d_scene::SceneNode;

use crate::mesh::TriangleMesh;
use crate::tessellate::tessellate;

/// A primitive baked into world space
///
/// Materials stay behind: the flat formats carry geometry only (the glTF
/// encoder keeps the tree and handles materials itself).
pub(crate) struct MeshInstance {
    pub name: String,
    pub mesh: TriangleMesh,
}

/// Flatten all visible primitives of a scene into world-space meshes
///
/// Invisible nodes hide their entire subtree. Unnamed primitive nodes get
/// a positional fallback name so text formats always have a label.
pub(crate) fn flatten(root: &SceneNode) -> Vec<MeshInstance> {
    let mut instances = Vec::new();
    walk(root, mat4::IDENTITY, &mut instances);
    instances
}

fn walk(node: &SceneNode, parent: Mat4, out: &mut Vec<MeshInstance>) {
    if !node.visible {
        return;
    }
    let world = mat4::mul(parent, node.transform.to_matrix());

    if let Some(primitive) = &node.primitive {
        let name = node
            .name
            .clone()
            .unwrap_or_else(|| format!("mesh_{}", out.len()));
        out.push(MeshInstance {
            name,
            mesh: tessellate(primitive).transformed(world),
        });
    }

    for child in &node.children {
        walk(child, world, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompt3d_math::Vec3;
    use prompt3d_scene::{Primitive, Transform3D};

    #[test]
    fn test_flatten_bakes_nested_transforms() {
        let scene = SceneNode::group()
            .with_transform(Transform3D::from_xyz(10.0, 0.0, 0.0))
            .with_child(
                SceneNode::mesh(Primitive::cuboid(2.0, 2.0, 2.0))
                    .with_name("block")
                    .with_transform(Transform3D::from_xyz(0.0, 5.0, 0.0)),
            );

        let instances = flatten(&scene);
        assert_eq!(instances.len(), 1);
        let (min, max) = instances[0].mesh.bounds();
        assert_eq!(min, Vec3::new(9.0, 4.0, -1.0));
        assert_eq!(max, Vec3::new(11.0, 6.0, 1.0));
    }

    #[test]
    fn test_flatten_skips_invisible_subtree() {
        let scene = SceneNode::group()
            .with_child(SceneNode::mesh(Primitive::sphere(1.0, 8, 6)).with_name("kept"))
            .with_child(
                SceneNode::group()
                    .with_visible(false)
                    .with_child(SceneNode::mesh(Primitive::sphere(1.0, 8, 6)).with_name("hidden")),
            );

        let instances = flatten(&scene);
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].name, "kept");
    }

    #[test]
    fn test_flatten_names_unnamed_nodes() {
        let scene = SceneNode::group()
            .with_child(SceneNode::mesh(Primitive::sphere(1.0, 8, 6)))
            .with_child(SceneNode::mesh(Primitive::sphere(1.0, 8, 6)));

        let instances = flatten(&scene);
        assert_eq!(instances[0].name, "mesh_0");
        assert_eq!(instances[1].name, "mesh_1");
    }

    #[test]
    fn test_flatten_empty_group() {
        assert!(flatten(&SceneNode::group()).is_empty());
    }
}
