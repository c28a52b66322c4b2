//! Hand-authored scene templates
//!
//! Each template is a fixed composition of primitives with hardcoded
//! relative transforms. Style only switches between two color palettes
//! (realistic vs everything else); it never changes topology.
//!
//! [`TEMPLATES`] is checked in declared order and the first matching
//! keyword wins, so the table order IS the priority order.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use prompt3d_math::color::{hex, hsl};
use prompt3d_math::Vec3;
use prompt3d_scene::{Material, Primitive, SceneNode, Transform3D};

use crate::GenerationOptions;

/// A keyword category with its scene constructor
pub struct Template {
    /// Category name; becomes the root group name
    pub name: &'static str,
    /// Keywords that select this template (substring match, lowercase)
    pub keywords: &'static [&'static str],
    /// Constructor producing the template's scene tree
    pub build: fn(&GenerationOptions) -> SceneNode,
}

/// Keyword templates in priority order; the fallback is implicit and last
pub const TEMPLATES: &[Template] = &[
    Template { name: "bird", keywords: &["bird", "eagle", "owl"], build: bird },
    Template { name: "car", keywords: &["car", "vehicle", "automobile"], build: car },
    Template { name: "house", keywords: &["house", "building", "home"], build: house },
    Template { name: "tree", keywords: &["tree", "plant", "forest"], build: tree },
    Template { name: "robot", keywords: &["robot", "mech", "android"], build: robot },
];

/// Pick between the two palette entries of a template part
fn styled(options: &GenerationOptions, realistic: u32, stylized: u32) -> [f32; 3] {
    if options.style.is_realistic() {
        hex(realistic)
    } else {
        hex(stylized)
    }
}

fn bird(options: &GenerationOptions) -> SceneNode {
    let wing = |x: f32, roll: f32, name: &str| {
        SceneNode::mesh(Primitive::cone(0.8, 2.0, 8))
            .with_name(name)
            .with_transform(
                Transform3D::from_xyz(x, 0.0, 0.0).with_rotation(Vec3::new(0.0, 0.0, roll)),
            )
            .with_material(
                Material::from_rgb(styled(options, 0x654321, 0xFF8C42)).with_opacity(0.8),
            )
    };

    SceneNode::group()
        .with_name("bird")
        .with_child(
            SceneNode::mesh(Primitive::sphere(1.0, 16, 8))
                .with_name("body")
                .with_transform(Transform3D::identity().with_scale(Vec3::new(1.0, 1.5, 0.8)))
                .with_material(Material::from_rgb(styled(options, 0x8B4513, 0xFF6B35))),
        )
        .with_child(wing(-1.2, FRAC_PI_4, "wing_left"))
        .with_child(wing(1.2, -FRAC_PI_4, "wing_right"))
        .with_child(
            SceneNode::mesh(Primitive::sphere(0.5, 12, 8))
                .with_name("head")
                .with_transform(Transform3D::from_xyz(0.0, 1.8, 0.3))
                .with_material(Material::from_rgb(styled(options, 0xA0522D, 0xFFB347))),
        )
        .with_child(
            SceneNode::mesh(Primitive::cone(0.1, 0.4, 6))
                .with_name("beak")
                .with_transform(
                    Transform3D::from_xyz(0.0, 1.8, 0.7)
                        .with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0)),
                )
                .with_material(Material::from_rgb(hex(0xFFA500))),
        )
}

fn car(options: &GenerationOptions) -> SceneNode {
    let wheel = |x: f32, z: f32, name: &str| {
        SceneNode::mesh(Primitive::cylinder(0.4, 0.4, 0.2, 16))
            .with_name(name)
            .with_transform(
                Transform3D::from_xyz(x, -0.7, z)
                    .with_rotation(Vec3::new(0.0, 0.0, FRAC_PI_2)),
            )
            .with_material(Material::from_rgb(hex(0x333333)))
    };

    SceneNode::group()
        .with_name("car")
        .with_child(
            SceneNode::mesh(Primitive::cuboid(3.0, 1.0, 1.5))
                .with_name("body")
                .with_material(
                    Material::from_rgb(styled(options, 0xFF0000, 0x00D9FF))
                        .with_metal_rough(0.8, 0.2),
                ),
        )
        .with_child(
            SceneNode::mesh(Primitive::cuboid(2.0, 1.0, 1.2))
                .with_name("cabin")
                .with_transform(Transform3D::from_xyz(0.0, 1.0, 0.0))
                .with_material(
                    Material::from_rgb(styled(options, 0xCCCCCC, 0x0099CC)).with_opacity(0.7),
                ),
        )
        .with_child(wheel(-1.2, 0.8, "wheel_front_left"))
        .with_child(wheel(1.2, 0.8, "wheel_front_right"))
        .with_child(wheel(-1.2, -0.8, "wheel_rear_left"))
        .with_child(wheel(1.2, -0.8, "wheel_rear_right"))
}

fn house(options: &GenerationOptions) -> SceneNode {
    let window = |x: f32, name: &str| {
        SceneNode::mesh(Primitive::cuboid(0.5, 0.5, 0.05))
            .with_name(name)
            .with_transform(Transform3D::from_xyz(x, 0.3, 1.05))
            .with_material(Material::from_rgb(hex(0x87CEEB)).with_opacity(0.6))
    };

    SceneNode::group()
        .with_name("house")
        .with_child(
            SceneNode::mesh(Primitive::cuboid(2.5, 2.0, 2.0))
                .with_name("base")
                .with_material(Material::from_rgb(styled(options, 0xDEB887, 0xFF9999))),
        )
        .with_child(
            // Four radial segments make the cone a pyramid; the quarter
            // turn lines its edges up with the walls.
            SceneNode::mesh(Primitive::cone(2.0, 1.5, 4))
                .with_name("roof")
                .with_transform(
                    Transform3D::from_xyz(0.0, 1.75, 0.0)
                        .with_rotation(Vec3::new(0.0, FRAC_PI_4, 0.0)),
                )
                .with_material(Material::from_rgb(styled(options, 0x8B4513, 0xFF6666))),
        )
        .with_child(
            SceneNode::mesh(Primitive::cuboid(0.6, 1.5, 0.1))
                .with_name("door")
                .with_transform(Transform3D::from_xyz(0.0, -0.25, 1.05))
                .with_material(Material::from_rgb(hex(0x654321))),
        )
        .with_child(window(-0.8, "window_left"))
        .with_child(window(0.8, "window_right"))
}

fn tree(options: &GenerationOptions) -> SceneNode {
    let foliage = |radius: f32, y: f32, realistic: u32, stylized: u32, name: &str| {
        SceneNode::mesh(Primitive::sphere(radius, 12, 8))
            .with_name(name)
            .with_transform(Transform3D::from_xyz(0.0, y, 0.0))
            .with_material(Material::from_rgb(styled(options, realistic, stylized)))
    };

    SceneNode::group()
        .with_name("tree")
        .with_child(
            SceneNode::mesh(Primitive::cylinder(0.3, 0.4, 2.0, 8))
                .with_name("trunk")
                .with_transform(Transform3D::from_xyz(0.0, -1.0, 0.0))
                .with_material(Material::from_rgb(hex(0x8B4513))),
        )
        .with_child(foliage(1.2, 0.5, 0x228B22, 0x00FF88, "foliage_low"))
        .with_child(foliage(1.0, 0.8, 0x32CD32, 0x88FF00, "foliage_mid"))
        .with_child(foliage(0.8, 1.1, 0x90EE90, 0xCCFF99, "foliage_top"))
}

fn robot(_options: &GenerationOptions) -> SceneNode {
    let limb = |width: f32, x: f32, y: f32, color: u32, metalness: f32, roughness: f32, name: &str| {
        SceneNode::mesh(Primitive::cuboid(width, 1.5, width))
            .with_name(name)
            .with_transform(Transform3D::from_xyz(x, y, 0.0))
            .with_material(Material::from_rgb(hex(color)).with_metal_rough(metalness, roughness))
    };
    let eye = |x: f32, name: &str| {
        SceneNode::mesh(Primitive::sphere(0.1, 8, 8))
            .with_name(name)
            .with_transform(Transform3D::from_xyz(x, 1.6, 0.5))
            .with_material(
                Material::from_rgb(hex(0x00FF00)).with_emissive(hex(0x00FF00), 0.5),
            )
    };

    SceneNode::group()
        .with_name("robot")
        .with_child(
            SceneNode::mesh(Primitive::cuboid(1.5, 2.0, 1.0))
                .with_name("torso")
                .with_material(Material::from_rgb(hex(0xC0C0C0)).with_metal_rough(0.9, 0.1)),
        )
        .with_child(
            SceneNode::mesh(Primitive::cuboid(1.0, 1.0, 1.0))
                .with_name("head")
                .with_transform(Transform3D::from_xyz(0.0, 1.5, 0.0))
                .with_material(Material::from_rgb(hex(0xE0E0E0)).with_metal_rough(0.8, 0.2)),
        )
        .with_child(limb(0.4, -1.2, 0.5, 0xA0A0A0, 0.7, 0.3, "arm_left"))
        .with_child(limb(0.4, 1.2, 0.5, 0xA0A0A0, 0.7, 0.3, "arm_right"))
        .with_child(limb(0.5, -0.5, -1.5, 0x808080, 0.6, 0.4, "leg_left"))
        .with_child(limb(0.5, 0.5, -1.5, 0x808080, 0.6, 0.4, "leg_right"))
        .with_child(eye(-0.3, "eye_left"))
        .with_child(eye(0.3, "eye_right"))
}

/// Parametric fallback for prompts with no keyword match
///
/// Places `complexity.sphere_count()` spheres on a ring, cycling hue
/// around the color wheel with a fixed one-third-turn offset.
pub fn fallback(options: &GenerationOptions) -> SceneNode {
    let count = options.complexity.sphere_count();
    let (metalness, roughness) = if options.style.is_realistic() {
        (0.1, 0.8)
    } else {
        (0.7, 0.3)
    };

    let mut root = SceneNode::group().with_name("abstract");
    for i in 0..count {
        let fraction = i as f32 / count as f32;
        let angle = fraction * TAU;
        let radius = 0.5 + (i as f32).sin() * 0.3;
        let hue = (fraction + 1.0 / 3.0) % 1.0;

        root.add_child(
            SceneNode::mesh(Primitive::sphere(radius, 8, 6))
                .with_name(format!("orb_{}", i))
                .with_transform(Transform3D::from_xyz(
                    angle.cos() * 1.5,
                    (angle * 0.5).sin() * 0.5,
                    angle.sin() * 1.5,
                ))
                .with_material(
                    Material::from_rgb(hsl(hue, 0.8, 0.6)).with_metal_rough(metalness, roughness),
                ),
        );
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Complexity, Style};

    #[test]
    fn test_table_order() {
        let names: Vec<_> = TEMPLATES.iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["bird", "car", "house", "tree", "robot"]);
    }

    #[test]
    fn test_bird_layout() {
        let scene = bird(&GenerationOptions::default());
        assert_eq!(scene.name.as_deref(), Some("bird"));
        assert!(scene.is_group());
        assert_eq!(scene.primitive_count(), 5);

        let body = &scene.children[0];
        assert_eq!(body.transform.scale, Vec3::new(1.0, 1.5, 0.8));
        match body.primitive {
            Some(Primitive::Sphere { radius, width_segments, height_segments }) => {
                assert_eq!(radius, 1.0);
                assert_eq!(width_segments, 16);
                assert_eq!(height_segments, 8);
            }
            _ => panic!("Expected sphere body"),
        }

        let wing = &scene.children[1];
        assert_eq!(wing.transform.position.x, -1.2);
        assert!((wing.transform.rotation.z - FRAC_PI_4).abs() < 1e-6);
        assert!(wing.material.transparent);
        assert_eq!(wing.material.opacity, 0.8);
    }

    #[test]
    fn test_car_has_four_wheels() {
        let scene = car(&GenerationOptions::default());
        let wheels: Vec<_> = scene
            .children
            .iter()
            .filter(|n| n.name.as_deref().is_some_and(|n| n.starts_with("wheel")))
            .collect();
        assert_eq!(wheels.len(), 4);
        for wheel in wheels {
            assert!((wheel.transform.rotation.z - FRAC_PI_2).abs() < 1e-6);
        }
    }

    #[test]
    fn test_house_roof_is_pyramid() {
        let scene = house(&GenerationOptions::default());
        let roof = scene
            .children
            .iter()
            .find(|n| n.name.as_deref() == Some("roof"))
            .unwrap();
        match roof.primitive {
            Some(Primitive::Cone { radial_segments, .. }) => assert_eq!(radial_segments, 4),
            _ => panic!("Expected cone roof"),
        }
    }

    #[test]
    fn test_tree_foliage_stacks() {
        let scene = tree(&GenerationOptions::default());
        assert_eq!(scene.primitive_count(), 4);
        let heights: Vec<f32> = scene.children[1..]
            .iter()
            .map(|n| n.transform.position.y)
            .collect();
        assert_eq!(heights, vec![0.5, 0.8, 1.1]);
    }

    #[test]
    fn test_robot_eyes_glow() {
        let scene = robot(&GenerationOptions::default());
        assert_eq!(scene.primitive_count(), 8);
        let eye = scene
            .children
            .iter()
            .find(|n| n.name.as_deref() == Some("eye_left"))
            .unwrap();
        assert_eq!(eye.material.emissive, Some(hex(0x00FF00)));
        assert_eq!(eye.material.emissive_intensity, 0.5);
    }

    #[test]
    fn test_style_only_changes_colors() {
        let realistic = car(&GenerationOptions::default());
        let stylized = car(&GenerationOptions::default().with_style(Style::Stylized));

        assert_eq!(realistic.node_count(), stylized.node_count());
        for (a, b) in realistic.children.iter().zip(stylized.children.iter()) {
            assert_eq!(a.transform, b.transform);
            assert_eq!(a.primitive, b.primitive);
        }

        let body_a = &realistic.children[0].material;
        let body_b = &stylized.children[0].material;
        assert_ne!(body_a.base_color, body_b.base_color);
        assert_eq!(body_a.metalness, body_b.metalness);
    }

    #[test]
    fn test_fallback_counts() {
        for (complexity, expected) in [
            (Complexity::Simple, 3),
            (Complexity::Medium, 5),
            (Complexity::Detailed, 8),
        ] {
            let scene = fallback(&GenerationOptions::default().with_complexity(complexity));
            assert_eq!(scene.primitive_count(), expected);
        }
    }

    #[test]
    fn test_fallback_ring_positions() {
        let scene = fallback(&GenerationOptions::default().with_complexity(Complexity::Simple));
        let first = &scene.children[0];
        // angle = 0: position (1.5, 0, 0), radius 0.5
        assert!((first.transform.position.x - 1.5).abs() < 1e-6);
        assert!((first.transform.position.z).abs() < 1e-6);
        match first.primitive {
            Some(Primitive::Sphere { radius, .. }) => assert!((radius - 0.5).abs() < 1e-6),
            _ => panic!("Expected sphere"),
        }
    }

    #[test]
    fn test_fallback_metal_rough_pairs() {
        let realistic = fallback(&GenerationOptions::default());
        let stylized = fallback(&GenerationOptions::default().with_style(Style::Lowpoly));
        assert_eq!(realistic.children[0].material.metalness, 0.1);
        assert_eq!(realistic.children[0].material.roughness, 0.8);
        assert_eq!(stylized.children[0].material.metalness, 0.7);
        assert_eq!(stylized.children[0].material.roughness, 0.3);
    }
}
