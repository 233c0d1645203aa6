//! Error types for Lodge

use thiserror::Error;

/// The main error type for Lodge operations
#[derive(Debug, Error)]
pub enum LodgeError {
    #[error("No height data found")]
    NoHeightData,

    #[error("Mesh not initialized")]
    NotInitialized,

    #[error("Live mesh does not match height field: mesh has {mesh} vertices, field has {field}")]
    MeshMismatch { mesh: usize, field: usize },

    #[error("No geometry: a {size_x}x{size_z} grid has no cells")]
    NoGeometry { size_x: u32, size_z: u32 },

    #[error("Invalid height field: {0}")]
    InvalidHeightField(String),

    #[error("Vertex index out of range: {index} (vertex count {len})")]
    VertexOutOfRange { index: usize, len: usize },

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("Physics error: {0}")]
    PhysicsError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Lodge operations
pub type Result<T> = std::result::Result<T, LodgeError>;

impl From<toml::de::Error> for LodgeError {
    fn from(err: toml::de::Error) -> Self {
        LodgeError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for LodgeError {
    fn from(err: toml::ser::Error) -> Self {
        LodgeError::TomlSerError(err.to_string())
    }
}
