//! Scene-graph exporters for prompt3d
//!
//! Serializes a [`SceneNode`] tree into common 3D file formats. Five
//! formats are encoded locally (GLB, glTF, OBJ, STL, PLY); the remaining
//! recognized formats need a server-side converter and fail with a
//! distinct error so callers can phrase that differently from a plain
//! unsupported format.
//!
//! ```ignore
//! let artifact = prompt3d_export::export(&scene, Format::Glb, "bird")?;
//! std::fs::write(&artifact.filename, artifact.payload.into_bytes())?;
//! ```
//!
//! Exporting never touches the filesystem or network itself; it returns an
//! in-memory [`ExportArtifact`] and the caller decides where it goes.

mod mesh;
mod tessellate;
mod collect;
mod gltf;
mod obj;
mod ply;
mod stl;

pub use mesh::TriangleMesh;
pub use tessellate::{tessellate, triangle_count};

use bitflags::bitflags;
use std::fmt;
use std::str::FromStr;

use prompt3d_scene::{SceneNode, SceneValidator, ValidationError};

/// Export file format
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// Binary glTF 2.0 container
    Glb,
    /// glTF 2.0 JSON with embedded buffers
    Gltf,
    /// Wavefront OBJ
    Obj,
    /// Stereolithography triangle soup
    Stl,
    /// Polygon file format
    Ply,
    /// COLLADA (server conversion only)
    Dae,
    /// X3D markup (server conversion only)
    X3d,
    /// Scalable vector graphics (server conversion only)
    Svg,
    /// Autodesk FBX (server conversion only)
    Fbx,
    /// 3D Studio (server conversion only)
    ThreeDs,
    /// Alembic (server conversion only)
    Abc,
    /// Universal Scene Description (server conversion only)
    Usd,
}

impl Format {
    /// Every recognized format, locally encodable or not
    pub const ALL: [Format; 12] = [
        Format::Glb,
        Format::Gltf,
        Format::Obj,
        Format::Stl,
        Format::Ply,
        Format::Dae,
        Format::X3d,
        Format::Svg,
        Format::Fbx,
        Format::ThreeDs,
        Format::Abc,
        Format::Usd,
    ];

    /// Canonical lowercase tag, which is also the file extension
    pub fn tag(self) -> &'static str {
        match self {
            Format::Glb => "glb",
            Format::Gltf => "gltf",
            Format::Obj => "obj",
            Format::Stl => "stl",
            Format::Ply => "ply",
            Format::Dae => "dae",
            Format::X3d => "x3d",
            Format::Svg => "svg",
            Format::Fbx => "fbx",
            Format::ThreeDs => "3ds",
            Format::Abc => "abc",
            Format::Usd => "usd",
        }
    }

    /// Whether this format is recognized but only convertible server-side
    pub fn server_only(self) -> bool {
        encoder_for(self).is_none()
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Format {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        Format::ALL
            .into_iter()
            .find(|format| format.tag() == lowered)
            .ok_or_else(|| ExportError::UnsupportedFormat(s.to_string()))
    }
}

/// Payload encoding variant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Text,
    Binary,
}

bitflags! {
    /// Which payload encodings an encoder can produce
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct EncoderCaps: u8 {
        const TEXT = 1 << 0;
        const BINARY = 1 << 1;
    }
}

/// Serialized scene payload
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Text(String),
    Binary(Vec<u8>),
}

impl Payload {
    pub fn is_binary(&self) -> bool {
        matches!(self, Payload::Binary(_))
    }

    pub fn len(&self) -> usize {
        match self {
            Payload::Text(s) => s.len(),
            Payload::Binary(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the payload as raw bytes, whichever variant it is
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Payload::Text(s) => s.into_bytes(),
            Payload::Binary(b) => b,
        }
    }
}

/// The product of a successful export
///
/// Ownership transfers to the caller; nothing is persisted here.
#[derive(Clone, Debug)]
pub struct ExportArtifact {
    pub format: Format,
    pub payload: Payload,
    /// Suggested filename, hint stem plus the format extension
    pub filename: String,
    /// MIME type matching the payload variant
    pub mime: &'static str,
}

/// Options for a single export call
#[derive(Clone, Copy, Debug, Default)]
pub struct ExportOptions {
    /// Preferred payload encoding; `None` takes the format's default
    /// (binary for STL, text for PLY)
    pub encoding: Option<Encoding>,
}

/// Error from an encoder rejecting a scene
#[derive(Debug)]
pub enum EncodeError {
    /// The scene has no visible primitives; encoding would produce an
    /// empty-but-valid file, which callers must never receive silently
    EmptyScene,
    /// The scene failed structural validation
    Invalid(ValidationError),
    /// The requested payload encoding is not available for this format
    EncodingUnavailable { format: Format, encoding: Encoding },
    /// Document serialization failed
    Serialize(serde_json::Error),
}

impl From<serde_json::Error> for EncodeError {
    fn from(e: serde_json::Error) -> Self {
        EncodeError::Serialize(e)
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::EmptyScene => write!(f, "Scene has no visible primitives"),
            EncodeError::Invalid(e) => write!(f, "Invalid scene: {}", e),
            EncodeError::EncodingUnavailable { format, encoding } => {
                write!(f, "Format '{}' has no {:?} encoding", format, encoding)
            }
            EncodeError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EncodeError::Serialize(e) => Some(e),
            EncodeError::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

/// Unified error type for export operations
#[derive(Debug)]
pub enum ExportError {
    /// The format string names no recognized format
    UnsupportedFormat(String),
    /// The format is recognized but intentionally not encodable locally
    ServerConversionRequired(Format),
    /// A local encoder rejected the scene
    Encoding(EncodeError),
}

impl From<EncodeError> for ExportError {
    fn from(e: EncodeError) -> Self {
        ExportError::Encoding(e)
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::UnsupportedFormat(s) => write!(f, "Unsupported format: '{}'", s),
            ExportError::ServerConversionRequired(format) => {
                write!(f, "Export to {} requires server-side conversion", format)
            }
            ExportError::Encoding(e) => write!(f, "Encoding failed: {}", e),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Encoding(e) => Some(e),
            _ => None,
        }
    }
}

/// A single-format encoder
trait Encoder: Sync {
    fn caps(&self) -> EncoderCaps;
    fn default_encoding(&self) -> Encoding;
    fn mime(&self, encoding: Encoding) -> &'static str;
    fn encode(&self, scene: &SceneNode, encoding: Encoding) -> Result<Payload, EncodeError>;
}

struct GlbEncoder;

impl Encoder for GlbEncoder {
    fn caps(&self) -> EncoderCaps {
        EncoderCaps::BINARY
    }

    fn default_encoding(&self) -> Encoding {
        Encoding::Binary
    }

    fn mime(&self, _encoding: Encoding) -> &'static str {
        "model/gltf-binary"
    }

    fn encode(&self, scene: &SceneNode, _encoding: Encoding) -> Result<Payload, EncodeError> {
        Ok(Payload::Binary(gltf::encode_glb(scene)?))
    }
}

struct GltfEncoder;

impl Encoder for GltfEncoder {
    fn caps(&self) -> EncoderCaps {
        EncoderCaps::TEXT
    }

    fn default_encoding(&self) -> Encoding {
        Encoding::Text
    }

    fn mime(&self, _encoding: Encoding) -> &'static str {
        "model/gltf+json"
    }

    fn encode(&self, scene: &SceneNode, _encoding: Encoding) -> Result<Payload, EncodeError> {
        Ok(Payload::Text(gltf::encode_json(scene)?))
    }
}

struct ObjEncoder;

impl Encoder for ObjEncoder {
    fn caps(&self) -> EncoderCaps {
        EncoderCaps::TEXT
    }

    fn default_encoding(&self) -> Encoding {
        Encoding::Text
    }

    fn mime(&self, _encoding: Encoding) -> &'static str {
        "text/plain"
    }

    fn encode(&self, scene: &SceneNode, _encoding: Encoding) -> Result<Payload, EncodeError> {
        Ok(Payload::Text(obj::encode(&collect::flatten(scene))))
    }
}

struct StlEncoder;

impl Encoder for StlEncoder {
    fn caps(&self) -> EncoderCaps {
        EncoderCaps::TEXT | EncoderCaps::BINARY
    }

    fn default_encoding(&self) -> Encoding {
        Encoding::Binary
    }

    fn mime(&self, _encoding: Encoding) -> &'static str {
        "model/stl"
    }

    fn encode(&self, scene: &SceneNode, encoding: Encoding) -> Result<Payload, EncodeError> {
        let name = scene.name.as_deref().unwrap_or("scene");
        let instances = collect::flatten(scene);
        Ok(match encoding {
            Encoding::Binary => Payload::Binary(stl::encode_binary(&instances, name)),
            Encoding::Text => Payload::Text(stl::encode_ascii(&instances, name)),
        })
    }
}

struct PlyEncoder;

impl Encoder for PlyEncoder {
    fn caps(&self) -> EncoderCaps {
        EncoderCaps::TEXT | EncoderCaps::BINARY
    }

    fn default_encoding(&self) -> Encoding {
        Encoding::Text
    }

    fn mime(&self, encoding: Encoding) -> &'static str {
        match encoding {
            Encoding::Text => "text/plain",
            Encoding::Binary => "application/octet-stream",
        }
    }

    fn encode(&self, scene: &SceneNode, encoding: Encoding) -> Result<Payload, EncodeError> {
        let instances = collect::flatten(scene);
        Ok(match encoding {
            Encoding::Text => Payload::Text(ply::encode_ascii(&instances)),
            Encoding::Binary => Payload::Binary(ply::encode_binary(&instances)),
        })
    }
}

static GLB: GlbEncoder = GlbEncoder;
static GLTF: GltfEncoder = GltfEncoder;
static OBJ: ObjEncoder = ObjEncoder;
static STL: StlEncoder = StlEncoder;
static PLY: PlyEncoder = PlyEncoder;

/// Look up the local encoder for a format
///
/// Formats absent from this table are the server-conversion set; the
/// lookup, not a conditional chain, is what decides.
fn encoder_for(format: Format) -> Option<&'static dyn Encoder> {
    match format {
        Format::Glb => Some(&GLB),
        Format::Gltf => Some(&GLTF),
        Format::Obj => Some(&OBJ),
        Format::Stl => Some(&STL),
        Format::Ply => Some(&PLY),
        _ => None,
    }
}

/// Export a scene with the format's default payload encoding
pub fn export(
    scene: &SceneNode,
    format: Format,
    filename_hint: &str,
) -> Result<ExportArtifact, ExportError> {
    export_with(scene, format, filename_hint, &ExportOptions::default())
}

/// Export a scene, optionally forcing a text or binary payload
///
/// Fails with [`ExportError::ServerConversionRequired`] for recognized
/// formats that have no local encoder, and with
/// [`ExportError::Encoding`] when the scene is empty, fails validation,
/// or requests an encoding the format cannot produce.
pub fn export_with(
    scene: &SceneNode,
    format: Format,
    filename_hint: &str,
    options: &ExportOptions,
) -> Result<ExportArtifact, ExportError> {
    let encoder =
        encoder_for(format).ok_or(ExportError::ServerConversionRequired(format))?;

    if scene.visible_primitive_count() == 0 {
        return Err(EncodeError::EmptyScene.into());
    }
    if let Some(error) = SceneValidator::validate(scene).into_iter().next() {
        return Err(EncodeError::Invalid(error).into());
    }

    let encoding = options.encoding.unwrap_or_else(|| encoder.default_encoding());
    let required = match encoding {
        Encoding::Text => EncoderCaps::TEXT,
        Encoding::Binary => EncoderCaps::BINARY,
    };
    if !encoder.caps().contains(required) {
        return Err(EncodeError::EncodingUnavailable { format, encoding }.into());
    }

    let payload = encoder.encode(scene, encoding)?;
    let stem = if filename_hint.is_empty() { "model" } else { filename_hint };
    log::debug!(
        "Exported '{}' as {} ({} bytes)",
        stem,
        format,
        payload.len()
    );

    Ok(ExportArtifact {
        format,
        payload,
        filename: format!("{}.{}", stem, format.tag()),
        mime: encoder.mime(encoding),
    })
}
