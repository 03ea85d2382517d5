//! Common scale for a set of islands.
//!
//! Each island lives in its own frame. For output every island is moved so
//! its bounding box starts at the origin and scaled by the same factor,
//! `1 / max_size`, so relative sizes survive across pages.

use nalgebra::{Point2, Vector2};

use crate::island::{EdgeSegment, GlueLabel, Island};

/// Borrowed view of islands with their shared scale reference.
#[derive(Debug, Clone, Copy)]
pub struct IslandLayout<'a> {
    islands: &'a [Island],
    max_size: f64,
}

impl<'a> IslandLayout<'a> {
    /// Build a layout, taking the scale reference from the largest island.
    #[must_use]
    pub fn new(islands: &'a [Island]) -> Self {
        Self {
            islands,
            max_size: max_size(islands),
        }
    }

    /// Largest island size (bounding box width or height).
    #[inline]
    #[must_use]
    pub fn max_size(&self) -> f64 {
        self.max_size
    }

    /// The islands in this layout.
    #[inline]
    #[must_use]
    pub fn islands(&self) -> &'a [Island] {
        self.islands
    }

    /// Factor applied to every coordinate. 1 when all islands are points.
    #[must_use]
    pub fn scale(&self) -> f64 {
        if self.max_size > 0.0 {
            1.0 / self.max_size
        } else {
            1.0
        }
    }

    /// Segments of island `index`, moved to the origin and scaled.
    ///
    /// Every coordinate lands in `[0, 1]`. Returns `None` for an invalid
    /// index.
    #[must_use]
    pub fn normalized_segments(&self, index: usize) -> Option<Vec<EdgeSegment>> {
        let island = self.islands.get(index)?;
        let map = self.transform(island);
        Some(
            island
                .segments()
                .into_iter()
                .map(|s| EdgeSegment {
                    start: map(s.start),
                    end: map(s.end),
                    ..s
                })
                .collect(),
        )
    }

    /// Glue labels of island `index` in the same normalized frame.
    #[must_use]
    pub fn normalized_glue_labels(&self, index: usize) -> Option<Vec<GlueLabel>> {
        let island = self.islands.get(index)?;
        let map = self.transform(island);
        Some(
            island
                .glue_labels()
                .into_iter()
                .map(|l| GlueLabel {
                    position: map(l.position),
                    ..l
                })
                .collect(),
        )
    }

    fn transform(&self, island: &Island) -> impl Fn(Point2<f64>) -> Point2<f64> {
        let origin = if island.bounds.is_empty() {
            Vector2::zeros()
        } else {
            island.bounds.min.coords
        };
        let scale = self.scale();
        move |p: Point2<f64>| Point2::from((p.coords - origin) * scale)
    }
}

/// Largest island size, 0 for no islands.
#[must_use]
pub fn max_size(islands: &[Island]) -> f64 {
    islands.iter().map(Island::size).fold(0.0, f64::max)
}
