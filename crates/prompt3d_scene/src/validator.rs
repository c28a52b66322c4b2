//! Scene validation
//!
//! Validates scene trees before export or rendering. The [`SceneValidator`]
//! checks for issues like empty scenes, non-positive shape dimensions,
//! out-of-range material fractions, and oversized trees.

use crate::node::{Primitive, SceneNode};

/// Validation error found in a scene tree
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Scene contains no primitives at all
    EmptyScene,
    /// A shape dimension is zero or negative
    NonPositiveDimension {
        /// Name of the offending node (or `<unnamed>`)
        node: String,
        /// Which dimension failed
        field: &'static str,
        value: f32,
    },
    /// A material fraction lies outside [0, 1]
    FractionOutOfRange {
        /// Name of the offending node (or `<unnamed>`)
        node: String,
        /// Which fraction failed
        field: &'static str,
        value: f32,
    },
    /// Tree exceeds the node budget
    TooManyNodes { count: usize, max: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyScene => write!(f, "Scene has no primitives"),
            ValidationError::NonPositiveDimension { node, field, value } => {
                write!(f, "Node '{}': {} must be positive, got {}", node, field, value)
            }
            ValidationError::FractionOutOfRange { node, field, value } => {
                write!(f, "Node '{}': {} must lie in [0, 1], got {}", node, field, value)
            }
            ValidationError::TooManyNodes { count, max } => {
                write!(f, "Scene has {} nodes (max {})", count, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Scene validator that checks for common errors
///
/// Performs static analysis of a [`SceneNode`] tree to detect problems
/// before exporters or renderers walk it.
///
/// # Example
/// ```ignore
/// let errors = SceneValidator::validate(&scene);
/// if !errors.is_empty() {
///     for e in &errors {
///         log::warn!("scene issue: {}", e);
///     }
/// }
/// ```
pub struct SceneValidator;

impl SceneValidator {
    /// Default node budget; externally supplied complexity is a small enum,
    /// so any tree near this size indicates a caller bug.
    pub const MAX_NODES: usize = 4096;

    /// Validate a scene tree against the default node budget
    pub fn validate(root: &SceneNode) -> Vec<ValidationError> {
        Self::validate_with_limit(root, Self::MAX_NODES)
    }

    /// Validate a scene tree against a custom node budget
    pub fn validate_with_limit(root: &SceneNode, max_nodes: usize) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if root.primitive_count() == 0 {
            errors.push(ValidationError::EmptyScene);
        }

        let count = root.node_count();
        if count > max_nodes {
            errors.push(ValidationError::TooManyNodes { count, max: max_nodes });
        }

        root.visit(&mut |node| {
            if let Some(primitive) = &node.primitive {
                Self::check_dimensions(node, primitive, &mut errors);
            }
            Self::check_material(node, &mut errors);
        });

        errors
    }

    /// Whether a scene tree passes validation
    pub fn is_valid(root: &SceneNode) -> bool {
        Self::validate(root).is_empty()
    }

    fn node_label(node: &SceneNode) -> String {
        node.name.clone().unwrap_or_else(|| "<unnamed>".to_string())
    }

    fn check_dimensions(node: &SceneNode, primitive: &Primitive, errors: &mut Vec<ValidationError>) {
        let mut check = |field: &'static str, value: f32| {
            if value <= 0.0 {
                errors.push(ValidationError::NonPositiveDimension {
                    node: Self::node_label(node),
                    field,
                    value,
                });
            }
        };

        match *primitive {
            Primitive::Sphere { radius, .. } => check("radius", radius),
            Primitive::Box { width, height, depth } => {
                check("width", width);
                check("height", height);
                check("depth", depth);
            }
            Primitive::Cone { radius, height, .. } => {
                check("radius", radius);
                check("height", height);
            }
            // A cylinder may taper to a point at either end, but not both,
            // and neither radius may go negative.
            Primitive::Cylinder { radius_top, radius_bottom, height, .. } => {
                check("height", height);
                if radius_top < 0.0 {
                    check("radius_top", radius_top);
                }
                if radius_bottom < 0.0 {
                    check("radius_bottom", radius_bottom);
                }
                if radius_top <= 0.0 && radius_bottom <= 0.0 {
                    check("radius", radius_top.max(radius_bottom));
                }
            }
        }
    }

    fn check_material(node: &SceneNode, errors: &mut Vec<ValidationError>) {
        let material = &node.material;
        let mut check = |field: &'static str, value: f32| {
            if !(0.0..=1.0).contains(&value) {
                errors.push(ValidationError::FractionOutOfRange {
                    node: Self::node_label(node),
                    field,
                    value,
                });
            }
        };

        check("metalness", material.metalness);
        check("roughness", material.roughness);
        check("opacity", material.opacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Primitive, SceneNode};

    fn valid_scene() -> SceneNode {
        SceneNode::group()
            .with_name("root")
            .with_child(SceneNode::mesh(Primitive::sphere(1.0, 8, 6)).with_name("a"))
            .with_child(SceneNode::mesh(Primitive::cuboid(1.0, 2.0, 3.0)).with_name("b"))
    }

    #[test]
    fn test_valid_scene_passes() {
        assert!(SceneValidator::is_valid(&valid_scene()));
    }

    #[test]
    fn test_empty_scene_fails() {
        let scene = SceneNode::group().with_name("empty");
        let errors = SceneValidator::validate(&scene);
        assert_eq!(errors, vec![ValidationError::EmptyScene]);
    }

    #[test]
    fn test_non_positive_radius() {
        let scene = SceneNode::group()
            .with_child(SceneNode::mesh(Primitive::sphere(0.0, 8, 6)).with_name("bad"));
        let errors = SceneValidator::validate(&scene);
        assert_eq!(errors.len(), 1);
        match &errors[0] {
            ValidationError::NonPositiveDimension { node, field, value } => {
                assert_eq!(node, "bad");
                assert_eq!(*field, "radius");
                assert_eq!(*value, 0.0);
            }
            other => panic!("Expected NonPositiveDimension, got {:?}", other),
        }
    }

    #[test]
    fn test_cone_shaped_cylinder_is_valid() {
        // radius_top of zero is how cones are expressed as cylinders
        let scene = SceneNode::group()
            .with_child(SceneNode::mesh(Primitive::cylinder(0.0, 0.8, 2.0, 8)));
        assert!(SceneValidator::is_valid(&scene));
    }

    #[test]
    fn test_degenerate_cylinder_fails() {
        let scene = SceneNode::group()
            .with_child(SceneNode::mesh(Primitive::cylinder(0.0, 0.0, 2.0, 8)).with_name("line"));
        let errors = SceneValidator::validate(&scene);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_material_fraction_out_of_range() {
        let scene = SceneNode::group().with_child(
            SceneNode::mesh(Primitive::sphere(1.0, 8, 6))
                .with_name("shiny")
                .with_material(Material::from_rgb([1.0, 0.0, 0.0]).with_metal_rough(1.5, 0.2)),
        );
        let errors = SceneValidator::validate(&scene);
        assert_eq!(errors.len(), 1);
        match &errors[0] {
            ValidationError::FractionOutOfRange { field, value, .. } => {
                assert_eq!(*field, "metalness");
                assert_eq!(*value, 1.5);
            }
            other => panic!("Expected FractionOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_node_budget() {
        let mut scene = SceneNode::group();
        for i in 0..10 {
            scene.add_child(SceneNode::mesh(Primitive::sphere(1.0, 4, 3)).with_name(format!("s{}", i)));
        }
        let errors = SceneValidator::validate_with_limit(&scene, 5);
        assert!(errors.contains(&ValidationError::TooManyNodes { count: 11, max: 5 }));
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::EmptyScene;
        assert_eq!(format!("{}", err), "Scene has no primitives");

        let err = ValidationError::TooManyNodes { count: 10, max: 5 };
        assert!(format!("{}", err).contains("10"));
    }
}
