//! Planar geometry kernel.
//!
//! Everything here works on [`Point2`]. The only bridge from 3-D is the
//! edge lengths handed to [`third_point`].
//!
//! The intersection predicates share one tolerance policy: contacts that
//! only touch (shared endpoints, a vertex lying on an edge, collinear
//! overlap) are never reported. Only strict interior crossings and strict
//! interior containment count.

// Standard geometric variable names
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]

use nalgebra::{Point2, Vector2};

use crate::error::{GeometryError, GeometryResult};

/// A placed triangle, vertices in winding order.
pub type Triangle2 = [Point2<f64>; 3];

/// 2-D cross product (z component of the 3-D cross product).
#[inline]
fn cross(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    a.x.mul_add(b.y, -(a.y * b.x))
}

/// Both candidate positions of a triangle's third vertex.
///
/// Given fixed points `v0` and `v1` at distance `len01`, returns the two
/// points lying at distance `len12` from `v1` and `len20` from `v0`. The
/// first result lies to the left of the directed line `v0 -> v1`
/// (positive side), the second is its mirror image on the right.
///
/// By the law of cosines the third point sits at offset
/// `x = (len01² + len20² − len12²) / (2·len01)` along the base and
/// `y = ±sqrt((a+b+c)(a+b−c)(a−b+c)(−a+b+c)) / (2·len01)` across it.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateTriangle`] if the lengths violate the
/// triangle inequality or any of them is zero or not finite.
///
/// # Example
///
/// ```
/// use mesh_unfold::{third_point, Point2};
///
/// let (left, right) = third_point(
///     Point2::new(0.0, 0.0),
///     Point2::new(3.0, 0.0),
///     3.0,
///     4.0,
///     5.0,
/// ).unwrap();
///
/// assert!((left.x - 3.0).abs() < 1e-12 && (left.y - 4.0).abs() < 1e-12);
/// assert!((right.y + 4.0).abs() < 1e-12);
/// ```
pub fn third_point(
    v0: Point2<f64>,
    v1: Point2<f64>,
    len01: f64,
    len12: f64,
    len20: f64,
) -> GeometryResult<(Point2<f64>, Point2<f64>)> {
    let degenerate = GeometryError::DegenerateTriangle {
        len01,
        len12,
        len20,
    };

    let base = v1 - v0;
    let Some(u) = base.try_normalize(0.0) else {
        return Err(degenerate);
    };
    // A zero side leaves the radicand at exactly 0, so check lengths first.
    if [len01, len12, len20]
        .iter()
        .any(|&len| len <= 0.0 || !len.is_finite())
    {
        return Err(degenerate);
    }

    let radicand = (len01 + len20 + len12)
        * (len01 + len20 - len12)
        * (len01 - len20 + len12)
        * (-len01 + len20 + len12);
    if radicand.is_nan() || radicand < 0.0 {
        return Err(degenerate);
    }

    let x = len20.mul_add(len20, len01.mul_add(len01, -(len12 * len12))) / (2.0 * len01);
    let y = radicand.sqrt() / (2.0 * len01);

    let n = Vector2::new(-u.y, u.x);
    let foot = v0 + u * x;
    Ok((foot + n * y, foot - n * y))
}

/// Check whether segments `p1-p2` and `p3-p4` cross in their interiors.
///
/// Both intersection parameters must lie strictly inside `(eps, 1 - eps)`,
/// so segments that merely share an endpoint or touch end-to-side are not
/// reported. Parallel and collinear segments never cross.
#[must_use]
pub fn segments_intersect(
    p1: Point2<f64>,
    p2: Point2<f64>,
    p3: Point2<f64>,
    p4: Point2<f64>,
    eps: f64,
) -> bool {
    let r = p2 - p1;
    let s = p4 - p3;
    let denom = cross(&r, &s);

    // |r × s| = |r||s| sin θ; treat near-parallel as parallel.
    let scale = r.norm() * s.norm();
    if denom.abs() <= f64::EPSILON * scale || scale == 0.0 {
        return false;
    }

    let qp = p3 - p1;
    let t = cross(&qp, &s) / denom;
    let u = cross(&qp, &r) / denom;

    t > eps && t < 1.0 - eps && u > eps && u < 1.0 - eps
}

/// Check whether `p` lies strictly inside triangle `a, b, c`.
///
/// Uses barycentric coordinates; every coordinate must exceed `eps`, so
/// points on an edge or vertex are outside. Works for either winding.
/// Degenerate (zero-area) triangles contain nothing.
#[must_use]
pub fn point_in_triangle(
    a: Point2<f64>,
    b: Point2<f64>,
    c: Point2<f64>,
    p: Point2<f64>,
    eps: f64,
) -> bool {
    let area2 = cross(&(b - a), &(c - a));
    if area2 == 0.0 || !area2.is_finite() {
        return false;
    }

    let wa = cross(&(c - b), &(p - b)) / area2;
    let wb = cross(&(a - c), &(p - c)) / area2;
    let wc = cross(&(b - a), &(p - a)) / area2;

    wa > eps && wb > eps && wc > eps
}

/// Check whether two placed triangles overlap.
///
/// True if any pair of edges crosses (9 segment tests), or if all three
/// vertices of one triangle are inside the other (6 point tests, both
/// directions). Each centroid is also tested against the other triangle so
/// exactly coincident triangles are caught. Triangles that only touch along
/// an edge or at a vertex do not overlap.
#[must_use]
pub fn triangles_intersect(t1: &Triangle2, t2: &Triangle2, eps: f64) -> bool {
    for i in 0..3 {
        let (a1, a2) = (t1[i], t1[(i + 1) % 3]);
        for j in 0..3 {
            let (b1, b2) = (t2[j], t2[(j + 1) % 3]);
            if segments_intersect(a1, a2, b1, b2, eps) {
                return true;
            }
        }
    }

    contains(t1, t2, eps) || contains(t2, t1, eps)
}

/// Whether `outer` contains `inner` entirely, or contains its centroid.
fn contains(outer: &Triangle2, inner: &Triangle2, eps: f64) -> bool {
    let [a, b, c] = *outer;
    if inner.iter().all(|&p| point_in_triangle(a, b, c, p, eps)) {
        return true;
    }
    point_in_triangle(a, b, c, centroid(inner), eps)
}

/// Centroid of a triangle.
#[inline]
#[must_use]
pub fn centroid(t: &Triangle2) -> Point2<f64> {
    Point2::from((t[0].coords + t[1].coords + t[2].coords) / 3.0)
}

/// Signed area of a triangle (positive for counter-clockwise winding).
#[inline]
#[must_use]
pub fn signed_area(t: &Triangle2) -> f64 {
    cross(&(t[1] - t[0]), &(t[2] - t[0])) * 0.5
}
