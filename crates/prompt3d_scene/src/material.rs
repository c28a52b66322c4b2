//! Material type
//!
//! A small PBR-style material: base color plus the metalness/roughness,
//! emissive, and opacity parameters the generator's templates use.

use serde::{Serialize, Deserialize};

/// Visual properties of a scene node
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color as linear RGB (each component 0.0-1.0)
    pub base_color: [f32; 3],
    /// Metalness factor in [0, 1]
    #[serde(default)]
    pub metalness: f32,
    /// Roughness factor in [0, 1]
    #[serde(default = "default_roughness")]
    pub roughness: f32,
    /// Optional emissive color as linear RGB
    #[serde(default)]
    pub emissive: Option<[f32; 3]>,
    /// Emissive intensity multiplier (meaningful only with `emissive`)
    #[serde(default = "default_emissive_intensity")]
    pub emissive_intensity: f32,
    /// Opacity in [0, 1]; only honored when `transparent` is set
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// Whether the material participates in alpha blending
    #[serde(default)]
    pub transparent: bool,
}

fn default_roughness() -> f32 {
    1.0
}

fn default_emissive_intensity() -> f32 {
    1.0
}

fn default_opacity() -> f32 {
    1.0
}

impl Default for Material {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Material {
    /// White, fully rough, opaque material
    pub const WHITE: Self = Self {
        base_color: [1.0, 1.0, 1.0],
        metalness: 0.0,
        roughness: 1.0,
        emissive: None,
        emissive_intensity: 1.0,
        opacity: 1.0,
        transparent: false,
    };

    /// Gray material
    pub const GRAY: Self = Self {
        base_color: [0.5, 0.5, 0.5],
        ..Self::WHITE
    };

    /// Create an opaque material with the given RGB color
    pub fn from_rgb(base_color: [f32; 3]) -> Self {
        Self {
            base_color,
            ..Self::WHITE
        }
    }

    /// Set metalness and roughness together
    pub fn with_metal_rough(mut self, metalness: f32, roughness: f32) -> Self {
        self.metalness = metalness;
        self.roughness = roughness;
        self
    }

    /// Set opacity and enable alpha blending
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = true;
        self
    }

    /// Set an emissive color with the given intensity
    pub fn with_emissive(mut self, color: [f32; 3], intensity: f32) -> Self {
        self.emissive = Some(color);
        self.emissive_intensity = intensity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let m = Material::default();
        assert_eq!(m.base_color, [1.0, 1.0, 1.0]);
        assert_eq!(m.metalness, 0.0);
        assert_eq!(m.roughness, 1.0);
        assert_eq!(m.opacity, 1.0);
        assert!(!m.transparent);
        assert!(m.emissive.is_none());
    }

    #[test]
    fn test_from_rgb() {
        let m = Material::from_rgb([0.5, 0.6, 0.7]);
        assert_eq!(m.base_color, [0.5, 0.6, 0.7]);
        assert!(!m.transparent);
    }

    #[test]
    fn test_with_metal_rough() {
        let m = Material::from_rgb([1.0, 0.0, 0.0]).with_metal_rough(0.8, 0.2);
        assert_eq!(m.metalness, 0.8);
        assert_eq!(m.roughness, 0.2);
    }

    #[test]
    fn test_with_opacity_sets_transparent() {
        let m = Material::from_rgb([1.0, 1.0, 1.0]).with_opacity(0.7);
        assert_eq!(m.opacity, 0.7);
        assert!(m.transparent);
    }

    #[test]
    fn test_with_emissive() {
        let m = Material::from_rgb([0.0, 1.0, 0.0]).with_emissive([0.0, 1.0, 0.0], 0.5);
        assert_eq!(m.emissive, Some([0.0, 1.0, 0.0]));
        assert_eq!(m.emissive_intensity, 0.5);
    }
}
