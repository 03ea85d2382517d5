//! The input triangle mesh.
//!
//! Positions are `nalgebra::Point3<f64>` and faces are `[u32; 3]`; normals,
//! areas and dihedral angles are computed here from those alone.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{UnfoldError, UnfoldResult};

/// An indexed triangle mesh to be unfolded.
///
/// Faces use **counter-clockwise (CCW) winding** when viewed from outside,
/// and winding must be consistent across shared edges. Placement relies on
/// it to put every child triangle on the far side of its hinge, and fold
/// directions are read from the face normals it implies.
///
/// # Example
///
/// ```
/// use mesh_unfold::{Mesh, Point3};
///
/// let mesh = Mesh::from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// );
///
/// assert_eq!(mesh.face_count(), 1);
/// assert!(mesh.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,

    /// Triangle faces as indices into `vertices`.
    pub faces: Vec<[u32; 3]>,
}

impl Mesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Point3<f64>>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Create a mesh from flat coordinate and index arrays.
    ///
    /// Returns an empty mesh if either array length is not a multiple of 3.
    ///
    /// ```
    /// use mesh_unfold::Mesh;
    ///
    /// let mesh = Mesh::from_raw(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], &[0, 1, 2]);
    /// assert_eq!(mesh.vertex_count(), 3);
    /// ```
    #[must_use]
    pub fn from_raw(positions: &[f64], indices: &[u32]) -> Self {
        if positions.len() % 3 != 0 || indices.len() % 3 != 0 {
            return Self::new();
        }

        let vertices = positions
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();
        let faces = indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();

        Self { vertices, faces }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangular faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check whether the mesh has no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Check that the mesh can be unfolded.
    ///
    /// # Errors
    ///
    /// - [`UnfoldError::EmptyMesh`] if there are no faces
    /// - [`UnfoldError::InvalidVertexIndex`] if a face points past the vertex list
    /// - [`UnfoldError::RepeatedVertex`] if a face does not have 3 distinct vertices
    pub fn validate(&self) -> UnfoldResult<()> {
        if self.faces.is_empty() {
            return Err(UnfoldError::EmptyMesh);
        }

        let vertex_count = self.vertices.len();
        for (face, &[a, b, c]) in self.faces.iter().enumerate() {
            for index in [a, b, c] {
                if index as usize >= vertex_count {
                    return Err(UnfoldError::InvalidVertexIndex {
                        face,
                        index,
                        vertex_count,
                    });
                }
            }
            if a == b || b == c || c == a {
                return Err(UnfoldError::RepeatedVertex { face });
            }
        }

        Ok(())
    }

    /// Vertex positions of a face, in winding order.
    ///
    /// # Panics
    ///
    /// Panics if `face` or one of its vertex indices is out of range. Call
    /// [`Mesh::validate`] first.
    #[inline]
    #[must_use]
    pub fn face_positions(&self, face: usize) -> [Point3<f64>; 3] {
        let [a, b, c] = self.faces[face];
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    /// Euclidean distance between two vertices.
    #[inline]
    #[must_use]
    pub fn edge_length(&self, v0: u32, v1: u32) -> f64 {
        (self.vertices[v1 as usize] - self.vertices[v0 as usize]).norm()
    }

    /// Unnormalized face normal (magnitude is twice the face area).
    #[must_use]
    pub fn face_normal_unnormalized(&self, face: usize) -> Vector3<f64> {
        let [p0, p1, p2] = self.face_positions(face);
        (p1 - p0).cross(&(p2 - p0))
    }

    /// Unit face normal, or `None` for a zero-area face.
    #[must_use]
    pub fn face_normal(&self, face: usize) -> Option<Vector3<f64>> {
        self.face_normal_unnormalized(face).try_normalize(f64::EPSILON)
    }

    /// Area of a face.
    #[must_use]
    pub fn face_area(&self, face: usize) -> f64 {
        self.face_normal_unnormalized(face).norm() * 0.5
    }

    /// Total surface area.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        (0..self.faces.len()).map(|f| self.face_area(f)).sum()
    }

    /// Signed dihedral angle across the edge `v0`–`v1` shared by two faces.
    ///
    /// The magnitude is the angle between the face normals (0 for coplanar
    /// faces). The sign is negative where the surface bends away from its
    /// normals (a convex edge, folded as a mountain) and positive where it
    /// bends towards them (a concave edge, folded as a valley). Returns 0
    /// if either face is degenerate.
    #[must_use]
    pub fn signed_dihedral_angle(&self, face_a: usize, face_b: usize, v0: u32, v1: u32) -> f64 {
        let (Some(na), Some(nb)) = (self.face_normal(face_a), self.face_normal(face_b)) else {
            return 0.0;
        };

        // Orient the hinge the way face A traverses it.
        let [a0, a1, a2] = self.faces[face_a];
        let forward = (a0 == v0 && a1 == v1) || (a1 == v0 && a2 == v1) || (a2 == v0 && a0 == v1);
        let (from, to) = if forward { (v0, v1) } else { (v1, v0) };
        let Some(axis) = (self.vertices[to as usize] - self.vertices[from as usize])
            .try_normalize(f64::EPSILON)
        else {
            return 0.0;
        };

        let sin = nb.cross(&na).dot(&axis);
        let cos = na.dot(&nb);
        sin.atan2(cos)
    }
}
