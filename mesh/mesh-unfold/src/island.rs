//! Islands: independently placed nets, and their drawable form.

use nalgebra::Point2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bounds::Bounds2;
use crate::edges::EdgeId;
use crate::overlap::{Conflict, detect_overlaps};
use crate::unfolded::{FoldDirection, UnfoldedMesh};

/// One connected piece of the output, in its own local frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Island {
    /// The placed net.
    pub mesh: UnfoldedMesh,
    /// Bounding box of `mesh`.
    pub bounds: Bounds2,
}

/// A styled line of an island, ready for a drawing backend.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeSegment {
    /// First endpoint.
    pub start: Point2<f64>,
    /// Second endpoint.
    pub end: Point2<f64>,
    /// Hinge between two faces of this island.
    pub is_folding_edge: bool,
    /// Fold direction of a hinge.
    pub folding_direction: FoldDirection,
    /// Label shared with the partner edge; `None` on folds.
    pub glue_number: Option<EdgeId>,
    /// Open-mesh border: has no partner to glue to.
    pub is_boundary: bool,
}

impl EdgeSegment {
    /// Midpoint of the segment.
    #[must_use]
    pub fn midpoint(&self) -> Point2<f64> {
        nalgebra::center(&self.start, &self.end)
    }

    /// Direction of the segment in radians, in `(-π, π]`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        let d = self.end - self.start;
        d.y.atan2(d.x)
    }

    /// Length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// Where to print a glue number.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GlueLabel {
    /// The label text: id of the source mesh edge.
    pub glue_number: EdgeId,
    /// Edge midpoint.
    pub position: Point2<f64>,
    /// Rotation of the text, the edge direction in radians.
    pub angle: f64,
}

impl Island {
    /// Wrap a net, computing its bounding box.
    #[must_use]
    pub fn new(mesh: UnfoldedMesh) -> Self {
        let bounds = mesh.bounds();
        Self { mesh, bounds }
    }

    /// Largest of the bounding box width and height.
    #[inline]
    #[must_use]
    pub fn size(&self) -> f64 {
        self.bounds.size()
    }

    /// Number of faces in this island.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.mesh.face_count()
    }

    /// Source face ids, in placement order.
    pub fn source_faces(&self) -> impl Iterator<Item = usize> + '_ {
        self.mesh.faces.iter().map(|f| f.source_face)
    }

    /// All edges as segments, in net edge order.
    #[must_use]
    pub fn segments(&self) -> Vec<EdgeSegment> {
        self.mesh
            .edges
            .iter()
            .map(|edge| {
                let (start, end) = self.mesh.edge_points(edge);
                EdgeSegment {
                    start,
                    end,
                    is_folding_edge: edge.is_folding_edge,
                    folding_direction: edge.folding_direction,
                    glue_number: edge.glue_number,
                    is_boundary: edge.is_boundary,
                }
            })
            .collect()
    }

    /// One label per cut edge that has a partner.
    #[must_use]
    pub fn glue_labels(&self) -> Vec<GlueLabel> {
        self.segments()
            .iter()
            .filter(|s| !s.is_boundary)
            .filter_map(|s| {
                s.glue_number.map(|glue_number| GlueLabel {
                    glue_number,
                    position: s.midpoint(),
                    angle: s.angle(),
                })
            })
            .collect()
    }

    /// Overlapping face pairs inside this island.
    #[must_use]
    pub fn overlaps(&self, eps: f64) -> Vec<Conflict> {
        detect_overlaps(&self.mesh, eps)
    }
}
