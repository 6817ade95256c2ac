//! Error types for aoimap

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AoimapError {
    // Geometry errors
    #[error("Search candidate '{candidate}' carries no usable geometry")]
    MissingGeometry { candidate: String },

    #[error("Open drawing has {points} vertices; a polygon needs at least 3")]
    IncompleteDrawing { points: usize },

    // Geocoding errors
    #[error("Geocoding request failed: {reason}")]
    Search { reason: String },

    // Persistence errors
    #[error("Stored session snapshot could not be parsed: {reason}")]
    SnapshotParse { reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, AoimapError>;
