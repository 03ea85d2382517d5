//! Mesh unfolding into flat papercraft nets.
//!
//! This crate lays a triangle mesh out in the plane so it can be printed,
//! cut out, folded and glued back into the original shape. Faces stay
//! connected along a spanning tree of fold edges; every other edge is cut
//! and labelled with a glue number shared by its two halves.
//!
//! # Features
//!
//! - **Isometric placement**: every triangle keeps its 3-D edge lengths
//! - **Fold directions**: mountain/valley from the signed dihedral angle
//! - **Overlap removal**: overlapping faces are separated by cutting folds
//! - **Pluggable cut strategy**: greedy set cover by default, exhaustive
//!   search for small inputs
//! - **Emitter adapter**: styled segments and glue labels at a common scale
//!
//! # Input
//!
//! A [`Mesh`] is plain data: `Point3<f64>` positions and `[u32; 3]` faces
//! with consistent counter-clockwise winding. Loading, triangulating and
//! repairing meshes happens upstream; this crate only needs the indices,
//! the positions, and the per-face normal, area and dihedral angle that
//! [`Mesh`] derives from them.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Other game engines
//!
//! # Example
//!
//! ```
//! use mesh_unfold::{unfold_mesh, Mesh, UnfoldParams};
//!
//! // A unit square made of two triangles.
//! let square = Mesh::from_raw(
//!     &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0],
//!     &[0, 1, 2, 0, 2, 3],
//! );
//!
//! let output = unfold_mesh(&square, &UnfoldParams::verified()).unwrap();
//! println!("{output}");
//!
//! let layout = output.layout();
//! for segment in layout.normalized_segments(0).unwrap() {
//!     println!("{:?} -> {:?} fold={}", segment.start, segment.end, segment.is_folding_edge);
//! }
//! assert_eq!(output.island_count(), 1);
//! assert!(output.is_overlap_free());
//! ```
//!
//! # Algorithm
//!
//! 1. Build the dual graph: one node per face, one edge per interior mesh
//!    edge, weighted `1` for the shortest mesh edge down to `0` for the
//!    longest, so the minimum tree keeps long edges as folds and cuts
//!    short ones
//! 2. Take its minimum spanning forest (Kruskal, ties by edge order)
//! 3. Walk each tree depth-first from its smallest face, placing every
//!    face across its hinge with the law of cosines
//! 4. Test all pairs of placed triangles for overlap
//! 5. Cut tree edges until no overlapping pair stays connected, then
//!    unfold every remaining component as its own island
//!
//! Overlap detection is quadratic in the number of faces.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bounds;
mod cut;
mod dual_graph;
mod edges;
mod error;
mod geometry;
mod island;
mod layout;
mod mesh;
mod overlap;
mod params;
mod pipeline;
mod result;
mod spanning_tree;
mod unfold;
mod unfolded;

// Re-export main types and functions
pub use bounds::Bounds2;
pub use cut::{CutStrategy, ExhaustiveCut, GreedyCut, resolve_conflicts};
pub use dual_graph::{DualEdge, DualGraph};
pub use edges::{EdgeId, EdgeTable, MeshEdge};
pub use error::{GeometryError, GeometryResult, UnfoldError, UnfoldResult};
pub use geometry::{
    Triangle2, centroid, point_in_triangle, segments_intersect, signed_area, third_point,
    triangles_intersect,
};
pub use island::{EdgeSegment, GlueLabel, Island};
pub use layout::IslandLayout;
pub use mesh::Mesh;
pub use overlap::{Conflict, detect_overlaps};
pub use params::UnfoldParams;
pub use pipeline::{unfold_mesh, unfold_mesh_with};
pub use result::UnfoldOutput;
pub use spanning_tree::SpanningTree;
pub use unfold::Unfolder;
pub use unfolded::{FoldDirection, UnfoldedEdge, UnfoldedFace, UnfoldedMesh};

// Re-export nalgebra point types for convenience
pub use nalgebra::{Point2, Point3, Vector3};
