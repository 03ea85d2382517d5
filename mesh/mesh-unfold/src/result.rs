//! Result type for the unfolding pipeline.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::edges::EdgeId;
use crate::island::Island;
use crate::layout::IslandLayout;

/// Result of unfolding a mesh.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnfoldOutput {
    /// The islands, ordered by their smallest source face.
    pub islands: Vec<Island>,

    /// Largest island size, the common scale reference.
    pub max_size: f64,

    /// Mesh edges turned from folds into cuts to remove overlaps.
    pub cut_edges: Vec<EdgeId>,

    /// Overlapping face pairs found in the first unfold.
    pub conflicts_detected: usize,

    /// Connected components of the dual graph before cutting.
    pub initial_components: usize,

    /// Overlapping face pairs left inside the final islands, when checked.
    pub residual_overlaps: Option<usize>,
}

impl UnfoldOutput {
    /// Number of islands.
    #[inline]
    #[must_use]
    pub fn island_count(&self) -> usize {
        self.islands.len()
    }

    /// Total number of fold edges over all islands.
    #[must_use]
    pub fn fold_edge_count(&self) -> usize {
        self.islands.iter().map(|i| i.mesh.fold_edge_count()).sum()
    }

    /// Total number of placed faces over all islands.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.islands.iter().map(Island::face_count).sum()
    }

    /// Check whether verification ran and found nothing.
    #[must_use]
    pub fn is_overlap_free(&self) -> bool {
        self.residual_overlaps == Some(0)
    }

    /// View the islands at their common scale.
    #[must_use]
    pub fn layout(&self) -> IslandLayout<'_> {
        IslandLayout::new(&self.islands)
    }
}

impl std::fmt::Display for UnfoldOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Unfold: {} faces → {} islands ({} folds, {} cuts, {} conflicts)",
            self.face_count(),
            self.island_count(),
            self.fold_edge_count(),
            self.cut_edges.len(),
            self.conflicts_detected
        )?;
        if let Some(residual) = self.residual_overlaps {
            write!(f, ", {residual} residual overlaps")?;
        }
        Ok(())
    }
}
