//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`P3D_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use prompt3d_gen::{Complexity, GenerationOptions, Quality, Style};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default generation options
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Export configuration
    #[serde(default)]
    pub export: ExportConfig,
    /// Input-size limits
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`P3D_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // User config overrides the defaults (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // P3D_EXPORT__FORMAT=stl -> export.format = "stl"
        figment = figment.merge(Env::prefixed("P3D_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Default generation options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Generation quality (draft, standard, high)
    pub quality: Quality,
    /// Visual style (realistic, stylized, lowpoly, sculpted)
    pub style: Style,
    /// Fallback complexity (simple, medium, detailed)
    pub complexity: Complexity,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            quality: Quality::Standard,
            style: Style::Realistic,
            complexity: Complexity::Medium,
        }
    }
}

impl GenerationConfig {
    /// Convert to the generator's options record
    pub fn to_options(&self) -> GenerationOptions {
        GenerationOptions::new(self.quality, self.style, self.complexity)
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Default export format tag (glb, gltf, obj, stl, ply)
    pub format: String,
    /// Directory artifacts are written into
    pub output_dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: "glb".to_string(),
            output_dir: ".".to_string(),
        }
    }
}

/// Input-size limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum node count accepted from loaded scene files
    pub max_nodes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_nodes: prompt3d_scene::SceneValidator::MAX_NODES,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.export.format, "glb");
        assert_eq!(config.generation.style, Style::Realistic);
        assert_eq!(config.limits.max_nodes, 4096);
    }

    #[test]
    fn test_to_options() {
        let config = GenerationConfig {
            quality: Quality::High,
            style: Style::Lowpoly,
            complexity: Complexity::Detailed,
        };
        let options = config.to_options();
        assert_eq!(options.quality, Quality::High);
        assert_eq!(options.style, Style::Lowpoly);
        assert_eq!(options.complexity, Complexity::Detailed);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("format"));
        assert!(toml.contains("log_level"));
    }

    #[test]
    fn test_missing_dir_yields_defaults() {
        // No files and no env vars means serde defaults apply
        let config = AppConfig::load_from("/nonexistent/config/dir").unwrap();
        assert_eq!(config.export.format, "glb");
    }
}
