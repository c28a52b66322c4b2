//! Scene nodes and primitives
//!
//! A scene is a strict tree of [`SceneNode`]s. Each node carries a local
//! transform, an optional parametric [`Primitive`], a material, and its
//! children in draw order. A node without a primitive is a pure group.
//!
//! Trees can be saved to and loaded from RON files, which is how the CLI
//! round-trips generated scenes without re-running the generator.

use serde::{Serialize, Deserialize};
use std::fs;
use std::io;
use std::path::Path;

use crate::{Material, Transform3D};

/// Serializable parametric shape
///
/// Each variant stores the construction parameters of one basic shape.
/// All shapes are centered at the local origin; the node transform
/// positions them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Primitive {
    /// A UV sphere
    Sphere {
        radius: f32,
        /// Number of horizontal segments (around the equator)
        width_segments: u32,
        /// Number of vertical segments (pole to pole)
        height_segments: u32,
    },
    /// An axis-aligned box
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    /// A cone with its apex up
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u32,
    },
    /// A capped cylinder, possibly tapered
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
}

impl Primitive {
    /// Create a sphere primitive
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Primitive::Sphere { radius, width_segments, height_segments }
    }

    /// Create a box primitive
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Primitive::Box { width, height, depth }
    }

    /// Create a cone primitive
    pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Self {
        Primitive::Cone { radius, height, radial_segments }
    }

    /// Create a cylinder primitive
    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        Primitive::Cylinder { radius_top, radius_bottom, height, radial_segments }
    }
}

fn default_visible() -> bool {
    true
}

/// A node in the scene tree
///
/// Child order is significant: it is the draw and export order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    /// Optional name (used as an anchor by exporters)
    #[serde(default)]
    pub name: Option<String>,
    /// Transform relative to the parent
    #[serde(default)]
    pub transform: Transform3D,
    /// Shape of this node; `None` makes the node a pure group
    #[serde(default)]
    pub primitive: Option<Primitive>,
    /// Material of this node (ignored for groups)
    #[serde(default)]
    pub material: Material,
    /// Invisible nodes (and their subtrees) are skipped by exporters
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Child nodes, in draw order
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Create an empty group node
    pub fn group() -> Self {
        Self {
            name: None,
            transform: Transform3D::identity(),
            primitive: None,
            material: Material::default(),
            visible: true,
            children: Vec::new(),
        }
    }

    /// Create a node carrying a primitive
    pub fn mesh(primitive: Primitive) -> Self {
        Self {
            primitive: Some(primitive),
            ..Self::group()
        }
    }

    /// Set the name of this node
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the transform of this node
    pub fn with_transform(mut self, transform: Transform3D) -> Self {
        self.transform = transform;
        self
    }

    /// Set the material of this node
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Set the visibility of this node
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Append a child node
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child nodes, preserving order
    pub fn with_children(mut self, children: impl IntoIterator<Item = SceneNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Append a child node in place
    pub fn add_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    /// Whether this node is a pure group (no primitive)
    pub fn is_group(&self) -> bool {
        self.primitive.is_none()
    }

    /// Total number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SceneNode::node_count).sum::<usize>()
    }

    /// Number of primitive-carrying nodes in this subtree
    pub fn primitive_count(&self) -> usize {
        usize::from(self.primitive.is_some())
            + self.children.iter().map(SceneNode::primitive_count).sum::<usize>()
    }

    /// Number of visible primitive-carrying nodes in this subtree
    ///
    /// An invisible node hides its whole subtree.
    pub fn visible_primitive_count(&self) -> usize {
        if !self.visible {
            return 0;
        }
        usize::from(self.primitive.is_some())
            + self.children.iter().map(SceneNode::visible_primitive_count).sum::<usize>()
    }

    /// Visit every node in this subtree, depth first, in child order
    pub fn visit(&self, f: &mut impl FnMut(&SceneNode)) {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }

    /// Load a scene tree from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneReadError> {
        let contents = fs::read_to_string(&path)?;
        let node: SceneNode = ron::from_str(&contents)?;
        log::debug!(
            "Loaded scene from {} ({} nodes, {} primitives)",
            path.as_ref().display(),
            node.node_count(),
            node.primitive_count()
        );
        Ok(node)
    }

    /// Save this scene tree to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneWriteError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

/// Error loading a scene file
#[derive(Debug)]
pub enum SceneReadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for SceneReadError {
    fn from(e: io::Error) -> Self {
        SceneReadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneReadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneReadError::Parse(e)
    }
}

impl std::fmt::Display for SceneReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneReadError::Io(e) => write!(f, "IO error: {}", e),
            SceneReadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SceneReadError {}

/// Error saving a scene file
#[derive(Debug)]
pub enum SceneWriteError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for SceneWriteError {
    fn from(e: io::Error) -> Self {
        SceneWriteError::Io(e)
    }
}

impl From<ron::Error> for SceneWriteError {
    fn from(e: ron::Error) -> Self {
        SceneWriteError::Serialize(e)
    }
}

impl std::fmt::Display for SceneWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneWriteError::Io(e) => write!(f, "IO error: {}", e),
            SceneWriteError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneWriteError {}

#[cfg(test)]
mod tests {
    use super::*;
    use prompt3d_math::Vec3;

    fn small_scene() -> SceneNode {
        SceneNode::group()
            .with_name("root")
            .with_child(
                SceneNode::mesh(Primitive::sphere(1.0, 16, 8))
                    .with_name("body")
                    .with_transform(
                        Transform3D::identity().with_scale(Vec3::new(1.0, 1.5, 0.8)),
                    ),
            )
            .with_child(
                SceneNode::group().with_name("detail").with_child(
                    SceneNode::mesh(Primitive::cuboid(1.0, 2.0, 3.0)).with_name("block"),
                ),
            )
    }

    #[test]
    fn test_group_is_group() {
        let node = SceneNode::group();
        assert!(node.is_group());
        assert!(node.visible);
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_mesh_is_not_group() {
        let node = SceneNode::mesh(Primitive::cone(0.5, 1.0, 8));
        assert!(!node.is_group());
    }

    #[test]
    fn test_counts() {
        let scene = small_scene();
        assert_eq!(scene.node_count(), 4);
        assert_eq!(scene.primitive_count(), 2);
        assert_eq!(scene.visible_primitive_count(), 2);
    }

    #[test]
    fn test_invisible_subtree_not_counted() {
        let mut scene = small_scene();
        scene.children[1].visible = false;
        assert_eq!(scene.primitive_count(), 2);
        assert_eq!(scene.visible_primitive_count(), 1);
    }

    #[test]
    fn test_visit_order() {
        let scene = small_scene();
        let mut names = Vec::new();
        scene.visit(&mut |n| names.push(n.name.clone().unwrap_or_default()));
        assert_eq!(names, vec!["root", "body", "detail", "block"]);
    }

    #[test]
    fn test_primitive_serialization() {
        let prim = Primitive::cylinder(0.4, 0.4, 0.2, 16);
        let serialized = ron::to_string(&prim).unwrap();
        let deserialized: Primitive = ron::from_str(&serialized).unwrap();
        match deserialized {
            Primitive::Cylinder { radius_top, radius_bottom, height, radial_segments } => {
                assert_eq!(radius_top, 0.4);
                assert_eq!(radius_bottom, 0.4);
                assert_eq!(height, 0.2);
                assert_eq!(radial_segments, 16);
            }
            _ => panic!("Expected Cylinder variant"),
        }
    }

    #[test]
    fn test_scene_ron_round_trip() {
        let scene = small_scene();
        let pretty = ron::ser::PrettyConfig::new().struct_names(true);
        let serialized = ron::ser::to_string_pretty(&scene, pretty).unwrap();

        assert!(serialized.contains("root"));
        assert!(serialized.contains("Sphere"));

        let deserialized: SceneNode = ron::from_str(&serialized).unwrap();
        assert_eq!(deserialized, scene);
    }

    #[test]
    fn test_parse_scene_with_defaults() {
        // Omitted fields fall back to identity transform, default material,
        // visible, and no children.
        let scene_ron = r#"
SceneNode(
    name: Some("lone"),
    primitive: Some((type: "Sphere", radius: 1.0, width_segments: 8, height_segments: 6)),
)
"#;
        let scene: SceneNode = ron::from_str(scene_ron).unwrap();
        assert_eq!(scene.name.as_deref(), Some("lone"));
        assert!(scene.visible);
        assert!(scene.children.is_empty());
        assert_eq!(scene.transform, Transform3D::identity());
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join("prompt3d_scene_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("scene.ron");

        let scene = small_scene();
        scene.save(&path).unwrap();
        let loaded = SceneNode::load(&path).unwrap();
        assert_eq!(loaded, scene);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_file() {
        let err = SceneNode::load("/nonexistent/scene.ron").unwrap_err();
        match err {
            SceneReadError::Io(_) => {}
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_bad_syntax() {
        let dir = std::env::temp_dir().join("prompt3d_scene_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.ron");
        std::fs::write(&path, "not ron at all (").unwrap();

        let err = SceneNode::load(&path).unwrap_err();
        match err {
            SceneReadError::Parse(_) => {}
            other => panic!("Expected Parse error, got {:?}", other),
        }

        std::fs::remove_file(&path).ok();
    }
}
