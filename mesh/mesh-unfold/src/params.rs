//! Parameters for mesh unfolding.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{UnfoldError, UnfoldResult};

/// Parameters for mesh unfolding.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnfoldParams {
    /// Tolerance of the intersection predicates. Triangles that only touch
    /// within this tolerance do not overlap. Default: 1e-9
    pub epsilon: f64,

    /// Fold edges whose dihedral angle is smaller than this (radians) get
    /// [`FoldDirection::None`](crate::FoldDirection::None). Default: 1e-6
    pub flat_angle_tolerance: f64,

    /// Detect overlaps and cut the net into islands to remove them.
    /// When false the first unfold is returned as is. Default: true
    pub resolve_overlaps: bool,

    /// Re-run overlap detection on every final island and report the
    /// residual count. Default: false
    pub verify_islands: bool,
}

impl Default for UnfoldParams {
    fn default() -> Self {
        Self {
            epsilon: 1e-9,
            flat_angle_tolerance: 1e-6,
            resolve_overlaps: true,
            verify_islands: false,
        }
    }
}

impl UnfoldParams {
    /// Skip overlap resolution: one unfold per connected component.
    #[must_use]
    pub fn fast() -> Self {
        Self {
            resolve_overlaps: false,
            ..Default::default()
        }
    }

    /// Resolve overlaps and check the result.
    #[must_use]
    pub fn verified() -> Self {
        Self {
            verify_islands: true,
            ..Default::default()
        }
    }

    /// Set the intersection tolerance.
    #[must_use]
    pub const fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the flat angle tolerance.
    #[must_use]
    pub const fn with_flat_angle_tolerance(mut self, tolerance: f64) -> Self {
        self.flat_angle_tolerance = tolerance;
        self
    }

    /// Set overlap resolution.
    #[must_use]
    pub const fn with_resolve_overlaps(mut self, resolve: bool) -> Self {
        self.resolve_overlaps = resolve;
        self
    }

    /// Set island verification.
    #[must_use]
    pub const fn with_verify_islands(mut self, verify: bool) -> Self {
        self.verify_islands = verify;
        self
    }

    /// Check that the tolerances are usable.
    ///
    /// # Errors
    ///
    /// Returns [`UnfoldError::InvalidParameter`] for a negative or
    /// non-finite tolerance, or an `epsilon` of 0.5 or more (no segment
    /// parameter could then lie strictly inside `(eps, 1 - eps)`).
    pub fn validate(&self) -> UnfoldResult<()> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(UnfoldError::invalid_param(
                "epsilon",
                self.epsilon,
                "must be finite and non-negative",
            ));
        }
        if self.epsilon >= 0.5 {
            return Err(UnfoldError::invalid_param(
                "epsilon",
                self.epsilon,
                "must be below 0.5",
            ));
        }
        if !self.flat_angle_tolerance.is_finite() || self.flat_angle_tolerance < 0.0 {
            return Err(UnfoldError::invalid_param(
                "flat_angle_tolerance",
                self.flat_angle_tolerance,
                "must be finite and non-negative",
            ));
        }
        Ok(())
    }
}
