//! Face adjacency (dual) graph.
//!
//! Nodes are faces; every interior mesh edge links the two faces it
//! separates. Boundary edges have no dual counterpart and can never
//! become folds.

use crate::edges::{EdgeId, EdgeTable};

/// An edge of the dual graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DualEdge {
    /// The two faces, lower index first.
    pub faces: (usize, usize),
    /// The mesh edge shared by the faces.
    pub mesh_edge: EdgeId,
    /// 3-D length of the shared edge.
    pub length: f64,
    /// Normalized weight in `[0, 1]`: 1 for the shortest mesh edge, 0 for the
    /// longest.
    pub weight: f64,
}

impl DualEdge {
    /// The face on the other side of `face`, if `face` is an endpoint.
    #[inline]
    #[must_use]
    pub const fn opposite(&self, face: usize) -> Option<usize> {
        if self.faces.0 == face {
            Some(self.faces.1)
        } else if self.faces.1 == face {
            Some(self.faces.0)
        } else {
            None
        }
    }
}

/// Weighted face adjacency graph of a mesh.
///
/// Every face is a node, including faces with no neighbours, so a mesh
/// that is already disconnected yields a disconnected graph rather than
/// losing faces.
#[derive(Debug, Clone)]
pub struct DualGraph {
    edges: Vec<DualEdge>,
    /// For each face, indices into `edges`, in increasing order.
    adjacency: Vec<Vec<usize>>,
    /// Dual edge index per mesh edge (`None` for boundary edges).
    by_mesh_edge: Vec<Option<usize>>,
}

impl DualGraph {
    /// Build the dual graph from an edge table.
    ///
    /// Weights are `1 - (length - min) / (max - min)` with `min`/`max` taken
    /// over all mesh edges, boundary edges included. When every edge has
    /// the same length all weights are 1.
    #[must_use]
    pub fn build(face_count: usize, table: &EdgeTable) -> Self {
        let (min_len, max_len) = table.length_range().unwrap_or((0.0, 0.0));
        let span = max_len - min_len;

        let mut edges = Vec::with_capacity(table.len());
        let mut adjacency = vec![Vec::new(); face_count];
        let mut by_mesh_edge = vec![None; table.len()];

        for (id, edge) in table.iter() {
            let &[a, b] = edge.faces.as_slice() else {
                continue;
            };

            let weight = if span > 0.0 {
                1.0 - (edge.length - min_len) / span
            } else {
                1.0
            };

            let index = edges.len();
            edges.push(DualEdge {
                faces: (a.min(b), a.max(b)),
                mesh_edge: id,
                length: edge.length,
                weight,
            });
            adjacency[a].push(index);
            adjacency[b].push(index);
            by_mesh_edge[id.index()] = Some(index);
        }

        Self {
            edges,
            adjacency,
            by_mesh_edge,
        }
    }

    /// Number of nodes (faces).
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of dual edges.
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All dual edges, indexed by dual edge index.
    #[inline]
    #[must_use]
    pub fn edges(&self) -> &[DualEdge] {
        &self.edges
    }

    /// Get a dual edge by index.
    #[inline]
    #[must_use]
    pub fn edge(&self, index: usize) -> Option<&DualEdge> {
        self.edges.get(index)
    }

    /// Dual edges incident to a face.
    #[inline]
    #[must_use]
    pub fn incident(&self, face: usize) -> &[usize] {
        self.adjacency.get(face).map_or(&[], Vec::as_slice)
    }

    /// Dual edge index of a mesh edge, `None` for boundary edges.
    #[inline]
    #[must_use]
    pub fn dual_of(&self, mesh_edge: EdgeId) -> Option<usize> {
        self.by_mesh_edge.get(mesh_edge.index()).copied().flatten()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn strip() -> Mesh {
        // Two triangles sharing the long diagonal of a 1 x 2 rectangle.
        Mesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(2.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn single_shared_edge() {
        let mesh = strip();
        let table = EdgeTable::build(&mesh).unwrap();
        let graph = DualGraph::build(mesh.face_count(), &table);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);

        let edge = graph.edge(0).unwrap();
        assert_eq!(edge.faces, (0, 1));
        assert_eq!(edge.mesh_edge, table.find(0, 2).unwrap());
        // The diagonal is the longest edge.
        assert_relative_eq!(edge.weight, 0.0);
        assert_eq!(edge.opposite(1), Some(0));
        assert_eq!(edge.opposite(7), None);

        assert_eq!(graph.incident(0), &[0]);
        assert_eq!(graph.dual_of(table.find(0, 1).unwrap()), None);
        assert_eq!(graph.dual_of(table.find(0, 2).unwrap()), Some(0));
    }

    #[test]
    fn shortest_edge_weighs_one() {
        let mesh = Mesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.5, 3.0, 0.0),
                Point3::new(0.5, -3.0, 0.0),
            ],
            vec![[0, 1, 2], [1, 0, 3]],
        );
        let table = EdgeTable::build(&mesh).unwrap();
        let graph = DualGraph::build(mesh.face_count(), &table);
        assert_eq!(graph.edge_count(), 1);
        assert_relative_eq!(graph.edges()[0].length, 1.0);
        assert_relative_eq!(graph.edges()[0].weight, 1.0);
    }

    #[test]
    fn isolated_faces_are_nodes() {
        let mesh = Mesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(5.0, 0.0, 0.0),
                Point3::new(6.0, 0.0, 0.0),
                Point3::new(5.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [3, 4, 5]],
        );
        let table = EdgeTable::build(&mesh).unwrap();
        let graph = DualGraph::build(mesh.face_count(), &table);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.incident(1).is_empty());
    }
}
