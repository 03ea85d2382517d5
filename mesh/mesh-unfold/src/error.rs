//! Error types for mesh unfolding.

use thiserror::Error;

/// Result type for unfolding operations.
pub type UnfoldResult<T> = Result<T, UnfoldError>;

/// Result type for the geometry kernel.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Errors raised by the planar geometry kernel.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// The three edge lengths cannot form a triangle.
    ///
    /// Raised when the triangle inequality is violated, including
    /// zero-length edges.
    #[error("degenerate triangle (edge lengths {len01}, {len12}, {len20})")]
    DegenerateTriangle {
        /// Length of the edge between the two fixed points.
        len01: f64,
        /// Length from the second fixed point to the third point.
        len12: f64,
        /// Length from the third point back to the first fixed point.
        len20: f64,
    },
}

/// Errors that can occur while unfolding a mesh.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UnfoldError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references a vertex that does not exist.
    #[error("face {face} references invalid vertex index {index} (mesh has {vertex_count} vertices)")]
    InvalidVertexIndex {
        /// The offending face.
        face: usize,
        /// The invalid vertex index.
        index: u32,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A face uses the same vertex more than once.
    #[error("face {face} does not have three distinct vertices")]
    RepeatedVertex {
        /// The offending face.
        face: usize,
    },

    /// An edge is shared by more than two faces.
    #[error("edge ({v0}, {v1}) is shared by {face_count} faces")]
    NonManifoldEdge {
        /// First vertex of the edge.
        v0: u32,
        /// Second vertex of the edge.
        v1: u32,
        /// Number of faces sharing the edge.
        face_count: usize,
    },

    /// A face could not be placed in the plane.
    #[error("face {face} cannot be placed: {source}")]
    DegenerateFace {
        /// The face whose edge lengths are invalid.
        face: usize,
        /// The underlying geometry failure.
        #[source]
        source: GeometryError,
    },

    /// A face does not contain the hinge it was reached across.
    #[error("face {face} does not share edge {edge} with its tree parent")]
    BrokenHinge {
        /// The face being placed.
        face: usize,
        /// The hinge mesh edge.
        edge: crate::edges::EdgeId,
    },

    /// A parameter value was rejected.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// The exhaustive cut search was asked to explore too many edges.
    #[error("exhaustive cut search over {candidates} edges exceeds the limit of {limit}")]
    CutSearchTooLarge {
        /// Number of distinct candidate tree edges.
        candidates: usize,
        /// Configured limit.
        limit: usize,
    },
}

impl UnfoldError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
