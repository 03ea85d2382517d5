//! Undirected mesh edges and their incident faces.

use hashbrown::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{UnfoldError, UnfoldResult};
use crate::mesh::Mesh;

/// Identifier of an undirected mesh edge.
///
/// Ids are assigned in order of first appearance while scanning faces in
/// order, so they are stable for a given mesh. The id doubles as the glue
/// number printed on cut edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeId(pub u32);

impl EdgeId {
    /// The id as a `usize` index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One undirected mesh edge.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshEdge {
    /// Endpoints with `vertices.0 < vertices.1`.
    pub vertices: (u32, u32),
    /// Incident faces, in face order. One for a boundary edge, two for an
    /// interior edge.
    pub faces: Vec<usize>,
    /// 3-D length.
    pub length: f64,
}

impl MeshEdge {
    /// Check whether only one face borders this edge.
    #[inline]
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        self.faces.len() == 1
    }
}

/// Table of all distinct edges of a manifold mesh.
#[derive(Debug, Clone)]
pub struct EdgeTable {
    edges: Vec<MeshEdge>,
    lookup: HashMap<(u32, u32), EdgeId>,
    face_edges: Vec<[EdgeId; 3]>,
}

impl EdgeTable {
    /// Build the edge table of a validated mesh.
    ///
    /// # Errors
    ///
    /// Returns [`UnfoldError::NonManifoldEdge`] if an edge is shared by more
    /// than two faces.
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: edge ids are u32, meshes with >4B edges are unsupported
    pub fn build(mesh: &Mesh) -> UnfoldResult<Self> {
        let mut edges: Vec<MeshEdge> = Vec::with_capacity(mesh.faces.len() * 3 / 2 + 1);
        let mut lookup: HashMap<(u32, u32), EdgeId> = HashMap::with_capacity(edges.capacity());
        let mut face_edges = Vec::with_capacity(mesh.faces.len());

        for (face_idx, &[a, b, c]) in mesh.faces.iter().enumerate() {
            let mut ids = [EdgeId(0); 3];
            for (slot, (v0, v1)) in [(a, b), (b, c), (c, a)].into_iter().enumerate() {
                let key = normalize_edge(v0, v1);
                let id = *lookup.entry(key).or_insert_with(|| {
                    edges.push(MeshEdge {
                        vertices: key,
                        faces: Vec::with_capacity(2),
                        length: mesh.edge_length(key.0, key.1),
                    });
                    EdgeId((edges.len() - 1) as u32)
                });

                let edge = &mut edges[id.index()];
                edge.faces.push(face_idx);
                if edge.faces.len() > 2 {
                    return Err(UnfoldError::NonManifoldEdge {
                        v0: key.0,
                        v1: key.1,
                        face_count: edge.faces.len(),
                    });
                }
                ids[slot] = id;
            }
            face_edges.push(ids);
        }

        Ok(Self {
            edges,
            lookup,
            face_edges,
        })
    }

    /// Number of distinct edges.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Check whether the table has no edges.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Get an edge by id.
    #[inline]
    #[must_use]
    pub fn get(&self, id: EdgeId) -> Option<&MeshEdge> {
        self.edges.get(id.index())
    }

    /// Iterate over all edges with their ids, in id order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn iter(&self) -> impl Iterator<Item = (EdgeId, &MeshEdge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| (EdgeId(i as u32), e))
    }

    /// Look up the id of the edge between two vertices.
    #[must_use]
    pub fn find(&self, v0: u32, v1: u32) -> Option<EdgeId> {
        self.lookup.get(&normalize_edge(v0, v1)).copied()
    }

    /// Edge ids of a face, in winding order: `[v0-v1, v1-v2, v2-v0]`.
    #[inline]
    #[must_use]
    pub fn face_edges(&self, face: usize) -> [EdgeId; 3] {
        self.face_edges[face]
    }

    /// Number of boundary edges.
    #[must_use]
    pub fn boundary_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_boundary()).count()
    }

    /// Shortest and longest edge length, or `None` for an empty table.
    #[must_use]
    pub fn length_range(&self) -> Option<(f64, f64)> {
        self.edges.iter().map(|e| e.length).fold(None, |acc, len| {
            Some(acc.map_or((len, len), |(lo, hi): (f64, f64)| (lo.min(len), hi.max(len))))
        })
    }
}

/// Normalize edge direction so v0 < v1.
#[inline]
fn normalize_edge(v0: u32, v1: u32) -> (u32, u32) {
    if v0 < v1 { (v0, v1) } else { (v1, v0) }
}
