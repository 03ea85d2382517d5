//! Flat (2-D) output of one unfolding pass.

use nalgebra::Point2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bounds::Bounds2;
use crate::edges::EdgeId;
use crate::geometry::{Triangle2, signed_area};

/// Physical fold direction of a fold edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FoldDirection {
    /// Convex edge: the paper is folded away from the printed side.
    Mountain,
    /// Concave edge: the paper is folded towards the printed side.
    Valley,
    /// Coplanar faces, or not a fold at all.
    #[default]
    None,
}

/// A placed triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnfoldedFace {
    /// Indices into [`UnfoldedMesh::vertices`], in the same order as the
    /// source face's vertex triple.
    pub vertices: [u32; 3],
    /// The 3-D face this triangle was placed from.
    pub source_face: usize,
}

/// An edge of the flat net.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnfoldedEdge {
    /// Indices into [`UnfoldedMesh::vertices`].
    pub vertices: [u32; 2],
    /// The mesh edge this was placed from.
    pub mesh_edge: EdgeId,
    /// Whether the edge is a hinge between two placed faces.
    pub is_folding_edge: bool,
    /// Fold direction; always [`FoldDirection::None`] for cut edges.
    pub folding_direction: FoldDirection,
    /// Label pairing this cut edge with its partner; `None` on fold edges.
    pub glue_number: Option<EdgeId>,
    /// Whether the source mesh edge borders only one face (open mesh).
    pub is_boundary: bool,
}

/// The flat layout of one connected set of faces.
///
/// Vertices are shared along fold edges: the root face owns three, every
/// other face adds exactly one. Cut edges appear once per incident face;
/// fold edges appear once.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnfoldedMesh {
    /// Planar vertex positions in this net's local frame.
    pub vertices: Vec<Point2<f64>>,
    /// Placed faces, in placement order.
    pub faces: Vec<UnfoldedFace>,
    /// All distinct edges of the net.
    pub edges: Vec<UnfoldedEdge>,
}

impl UnfoldedMesh {
    /// Number of placed faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check whether nothing was placed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Positions of a placed face.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn triangle(&self, index: usize) -> Triangle2 {
        let [a, b, c] = self.faces[index].vertices;
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    /// Iterate over all placed triangles with their source faces.
    pub fn triangles(&self) -> impl Iterator<Item = (usize, Triangle2)> + '_ {
        (0..self.faces.len()).map(|i| (self.faces[i].source_face, self.triangle(i)))
    }

    /// Endpoints of an edge.
    #[must_use]
    pub fn edge_points(&self, edge: &UnfoldedEdge) -> (Point2<f64>, Point2<f64>) {
        (
            self.vertices[edge.vertices[0] as usize],
            self.vertices[edge.vertices[1] as usize],
        )
    }

    /// Number of fold edges.
    #[must_use]
    pub fn fold_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_folding_edge).count()
    }

    /// Number of cut (and boundary) edges.
    #[must_use]
    pub fn cut_edge_count(&self) -> usize {
        self.edges.len() - self.fold_edge_count()
    }

    /// Total area of the placed triangles.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.triangles().map(|(_, t)| signed_area(&t).abs()).sum()
    }

    /// Bounding box of all vertices.
    #[must_use]
    pub fn bounds(&self) -> Bounds2 {
        Bounds2::from_points(self.vertices.iter())
    }
}
