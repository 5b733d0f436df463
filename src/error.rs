use std::path::PathBuf;

use thiserror::Error;

/// Domain errors raised by the vector math.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// Normalization of a vector whose length is (numerically) zero.
    #[error("cannot normalize a zero-length vector (length {length})")]
    ZeroLength { length: f32 },

    /// A component was NaN or infinite.
    #[error("vector has non-finite components")]
    NonFinite,
}

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scene description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to load mesh {}: {source}", path.display())]
    Mesh {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("invalid surface: {0}")]
    Surface(#[from] GeometryError),

    #[error("mesh {} has no faces", .0.display())]
    EmptyMesh(PathBuf),
}
