//! Generation options
//!
//! Three small enums controlling how a prompt is turned into geometry.
//! They are pure inputs: immutable once passed to the builder.

use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

/// Requested generation quality
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Draft,
    #[default]
    Standard,
    High,
}

/// Visual style of the generated model
///
/// Only `Realistic` selects the muted palette; every other style shares
/// the saturated one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Realistic,
    Stylized,
    Lowpoly,
    Sculpted,
}

impl Style {
    /// Whether this style selects the realistic color palette
    pub fn is_realistic(self) -> bool {
        matches!(self, Style::Realistic)
    }
}

/// Geometric complexity of the fallback model
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    #[default]
    Medium,
    Detailed,
}

impl Complexity {
    /// Number of spheres placed on the fallback ring
    pub fn sphere_count(self) -> usize {
        match self {
            Complexity::Simple => 3,
            Complexity::Medium => 5,
            Complexity::Detailed => 8,
        }
    }
}

/// Options for a single generation request
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    #[serde(default)]
    pub quality: Quality,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub complexity: Complexity,
}

impl GenerationOptions {
    /// Create options with explicit values for all fields
    pub fn new(quality: Quality, style: Style, complexity: Complexity) -> Self {
        Self { quality, style, complexity }
    }

    /// Set the style
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the complexity
    pub fn with_complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = complexity;
        self
    }

    /// Set the quality
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }
}

/// Error parsing an option enum from a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
}

impl ParseOptionError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self { kind, value: value.to_string() }
    }
}

impl fmt::Display for ParseOptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown {}: '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseOptionError {}

impl FromStr for Quality {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Quality::Draft),
            "standard" => Ok(Quality::Standard),
            "high" => Ok(Quality::High),
            other => Err(ParseOptionError::new("quality", other)),
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Quality::Draft => "draft",
            Quality::Standard => "standard",
            Quality::High => "high",
        };
        f.write_str(s)
    }
}

impl FromStr for Style {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "realistic" => Ok(Style::Realistic),
            "stylized" => Ok(Style::Stylized),
            "lowpoly" => Ok(Style::Lowpoly),
            "sculpted" => Ok(Style::Sculpted),
            other => Err(ParseOptionError::new("style", other)),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Style::Realistic => "realistic",
            Style::Stylized => "stylized",
            Style::Lowpoly => "lowpoly",
            Style::Sculpted => "sculpted",
        };
        f.write_str(s)
    }
}

impl FromStr for Complexity {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(Complexity::Simple),
            "medium" => Ok(Complexity::Medium),
            "detailed" => Ok(Complexity::Detailed),
            other => Err(ParseOptionError::new("complexity", other)),
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Complexity::Simple => "simple",
            Complexity::Medium => "medium",
            Complexity::Detailed => "detailed",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = GenerationOptions::default();
        assert_eq!(options.quality, Quality::Standard);
        assert_eq!(options.style, Style::Realistic);
        assert_eq!(options.complexity, Complexity::Medium);
    }

    #[test]
    fn test_sphere_count() {
        assert_eq!(Complexity::Simple.sphere_count(), 3);
        assert_eq!(Complexity::Medium.sphere_count(), 5);
        assert_eq!(Complexity::Detailed.sphere_count(), 8);
    }

    #[test]
    fn test_is_realistic() {
        assert!(Style::Realistic.is_realistic());
        assert!(!Style::Stylized.is_realistic());
        assert!(!Style::Lowpoly.is_realistic());
        assert!(!Style::Sculpted.is_realistic());
    }

    #[test]
    fn test_from_str_round_trip() {
        for style in [Style::Realistic, Style::Stylized, Style::Lowpoly, Style::Sculpted] {
            assert_eq!(style.to_string().parse::<Style>().unwrap(), style);
        }
        for quality in [Quality::Draft, Quality::Standard, Quality::High] {
            assert_eq!(quality.to_string().parse::<Quality>().unwrap(), quality);
        }
        for complexity in [Complexity::Simple, Complexity::Medium, Complexity::Detailed] {
            assert_eq!(complexity.to_string().parse::<Complexity>().unwrap(), complexity);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "shiny".parse::<Style>().unwrap_err();
        assert!(format!("{}", err).contains("shiny"));
    }
}
