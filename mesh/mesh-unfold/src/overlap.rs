//! All-pairs overlap detection on a flat net.
//!
//! Every pair of placed triangles is tested, O(F²) in the number of faces.
//! There is no broad phase; for meshes of several thousand faces this is
//! the dominant cost of the whole pipeline.

use crate::geometry::triangles_intersect;
use crate::unfolded::UnfoldedMesh;

/// A pair of source faces whose placed triangles overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Conflict {
    /// Lower source face index.
    pub a: usize,
    /// Higher source face index.
    pub b: usize,
}

impl Conflict {
    /// Create a conflict with the faces in canonical order.
    #[inline]
    #[must_use]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            a: a.min(b),
            b: a.max(b),
        }
    }
}

/// Find every pair of overlapping triangles in a net.
///
/// Pairs are reported once, by source face, in the order the pairs are
/// scanned. Triangles that only touch (shared hinge, shared vertex) are not
/// overlaps; see [`triangles_intersect`].
///
/// # Example
///
/// ```
/// use mesh_unfold::{detect_overlaps, UnfoldedMesh};
///
/// assert!(detect_overlaps(&UnfoldedMesh::default(), 1e-9).is_empty());
/// ```
#[must_use]
pub fn detect_overlaps(net: &UnfoldedMesh, eps: f64) -> Vec<Conflict> {
    let triangles: Vec<_> = net.triangles().collect();
    let mut conflicts = Vec::new();

    for (i, (face_i, tri_i)) in triangles.iter().enumerate() {
        for (face_j, tri_j) in &triangles[i + 1..] {
            if face_i == face_j {
                continue;
            }
            if triangles_intersect(tri_i, tri_j, eps) {
                conflicts.push(Conflict::new(*face_i, *face_j));
            }
        }
    }

    conflicts
}
