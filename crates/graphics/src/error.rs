use thiserror::Error;

/// Failures raised while building or projecting 3D geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("face needs at least 2 vertices, got {count}")]
    TooFewVertices { count: usize },

    #[error("face index {index} is outside the vertex list (len {len})")]
    VertexOutOfRange { index: usize, len: usize },

    #[error("zero-length vector where a direction is required")]
    ZeroLengthVector,

    #[error("world contains no vertices")]
    EmptyWorld,

    #[error("unknown world object")]
    UnknownObject,

    #[error("optimal distance did not converge after {iterations} iterations")]
    NoConvergence { iterations: usize },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}
