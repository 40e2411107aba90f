//! Error types for Delaunay mesh construction

use thiserror::Error;

/// Errors that can occur while configuring, building or validating a mesh
///
/// Most geometric failures are not errors at all: a point that cannot be
/// located is dropped and a degenerate circumcircle is treated as infinite.
/// These variants cover the cases a caller can actually act on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DelaunayError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A triangle handed to a rebuild references a vertex that does not exist
    #[error("invalid face {face}: vertex index {vertex} out of range (vertex count {vertex_count})")]
    InvalidFace {
        face: usize,
        vertex: usize,
        vertex_count: usize,
    },

    /// A half-edge invariant does not hold
    #[error("topology violation ({check}) at element {element}: {details}")]
    TopologyViolation {
        check: &'static str,
        element: usize,
        details: String,
    },

    /// Generation failed due to geometry issues
    #[error("generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type alias for mesh operations
pub type Result<T> = std::result::Result<T, DelaunayError>;
