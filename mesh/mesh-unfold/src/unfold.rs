//! Spanning-tree unfolding: place faces in the plane by walking the tree.
//!
//! The root face is laid with its first edge on the +X axis and its third
//! vertex above it. Every other face is reached across a tree edge whose
//! two endpoints are already placed by the parent; only its third vertex
//! is new. That vertex is always put on the left of the child's own
//! half-edge along the hinge. With consistent winding the parent runs the
//! hinge the other way, so the child lands on the far side of it and every
//! placed triangle keeps counter-clockwise orientation.

// Planar vertex indices are u32, like mesh indices
#![allow(clippy::cast_possible_truncation)]

use hashbrown::{HashMap, HashSet};
use nalgebra::Point2;
use tracing::debug;

use crate::dual_graph::DualGraph;
use crate::edges::{EdgeId, EdgeTable};
use crate::error::{UnfoldError, UnfoldResult};
use crate::geometry::third_point;
use crate::mesh::Mesh;
use crate::params::UnfoldParams;
use crate::spanning_tree::SpanningTree;
use crate::unfolded::{FoldDirection, UnfoldedEdge, UnfoldedFace, UnfoldedMesh};

/// Places the faces of spanning-tree components in the plane.
///
/// Holds borrowed, read-only views of everything derived from the mesh, so
/// one unfolder can lay out any number of components of any forest over
/// the same dual graph.
#[derive(Debug, Clone, Copy)]
pub struct Unfolder<'a> {
    mesh: &'a Mesh,
    edges: &'a EdgeTable,
    graph: &'a DualGraph,
    flat_angle_tolerance: f64,
}

/// Pending placement: `child` is reached from `parent` across `dual_edge`.
#[derive(Debug, Clone, Copy)]
struct Step {
    parent: usize,
    child: usize,
    dual_edge: usize,
}

impl<'a> Unfolder<'a> {
    /// Create an unfolder over a mesh and its derived structures.
    #[must_use]
    pub fn new(
        mesh: &'a Mesh,
        edges: &'a EdgeTable,
        graph: &'a DualGraph,
        params: &UnfoldParams,
    ) -> Self {
        Self {
            mesh,
            edges,
            graph,
            flat_angle_tolerance: params.flat_angle_tolerance,
        }
    }

    /// Unfold one connected component of `tree`.
    ///
    /// `faces` must be a component as returned by
    /// [`SpanningTree::components`]; its first face is the root. Faces are
    /// visited depth-first, tree neighbours in dual edge order. The result
    /// is a pure function of the inputs.
    ///
    /// # Errors
    ///
    /// Returns [`UnfoldError::DegenerateFace`] if a face's edge lengths
    /// violate the triangle inequality.
    pub fn unfold(&self, tree: &SpanningTree, faces: &[usize]) -> UnfoldResult<UnfoldedMesh> {
        let Some(&root) = faces.first() else {
            return Ok(UnfoldedMesh::default());
        };

        let mut net = UnfoldedMesh {
            vertices: Vec::with_capacity(faces.len() + 2),
            faces: Vec::with_capacity(faces.len()),
            edges: Vec::with_capacity(faces.len() * 2 + 1),
        };
        let mut placed: HashMap<usize, [u32; 3]> = HashMap::with_capacity(faces.len());
        let mut emitted_folds: HashSet<EdgeId> = HashSet::new();

        let local = self.place_root(root, &mut net)?;
        placed.insert(root, local);
        self.emit_edges(tree, root, local, &mut net, &mut emitted_folds);

        let mut stack: Vec<Step> = Vec::new();
        self.push_children(tree, root, &placed, &mut stack);

        while let Some(step) = stack.pop() {
            if placed.contains_key(&step.child) {
                continue;
            }
            let Some(&parent_local) = placed.get(&step.parent) else {
                continue;
            };

            let local = self.place_child(step, parent_local, &mut net)?;
            placed.insert(step.child, local);
            self.emit_edges(tree, step.child, local, &mut net, &mut emitted_folds);
            self.push_children(tree, step.child, &placed, &mut stack);
        }

        debug!(
            root,
            faces = net.faces.len(),
            vertices = net.vertices.len(),
            edges = net.edges.len(),
            "Unfolded component"
        );

        Ok(net)
    }

    /// Queue unplaced tree neighbours so the first neighbour is popped first.
    fn push_children(
        &self,
        tree: &SpanningTree,
        face: usize,
        placed: &HashMap<usize, [u32; 3]>,
        stack: &mut Vec<Step>,
    ) {
        for &(child, dual_edge) in tree.neighbors(face).iter().rev() {
            if !placed.contains_key(&child) {
                stack.push(Step {
                    parent: face,
                    child,
                    dual_edge,
                });
            }
        }
    }

    fn place_root(&self, face: usize, net: &mut UnfoldedMesh) -> UnfoldResult<[u32; 3]> {
        let [a, b, c] = self.mesh.faces[face];
        let len_ab = self.mesh.edge_length(a, b);
        let len_bc = self.mesh.edge_length(b, c);
        let len_ca = self.mesh.edge_length(c, a);

        let pa = Point2::origin();
        let pb = Point2::new(len_ab, 0.0);
        let (pc, _) = third_point(pa, pb, len_ab, len_bc, len_ca)
            .map_err(|source| UnfoldError::DegenerateFace { face, source })?;

        let base = net.vertices.len() as u32;
        net.vertices.extend([pa, pb, pc]);
        let local = [base, base + 1, base + 2];
        net.faces.push(UnfoldedFace {
            vertices: local,
            source_face: face,
        });
        Ok(local)
    }

    fn place_child(
        &self,
        step: Step,
        parent_local: [u32; 3],
        net: &mut UnfoldedMesh,
    ) -> UnfoldResult<[u32; 3]> {
        let face = step.child;
        let child_verts = self.mesh.faces[face];
        let parent_verts = self.mesh.faces[step.parent];
        let hinge = self.graph.edges()[step.dual_edge].mesh_edge;

        // Slot of the hinge in the child's winding: x -> y is the child's
        // half-edge, z the vertex to place.
        let Some(slot) = (0..3).find(|&k| self.edges.face_edges(face)[k] == hinge) else {
            return Err(UnfoldError::BrokenHinge { face, edge: hinge });
        };
        let x = child_verts[slot];
        let y = child_verts[(slot + 1) % 3];
        let z = child_verts[(slot + 2) % 3];

        let local_of = |v: u32| {
            parent_verts
                .iter()
                .position(|&p| p == v)
                .map(|i| parent_local[i])
        };
        let (Some(lx), Some(ly)) = (local_of(x), local_of(y)) else {
            return Err(UnfoldError::BrokenHinge { face, edge: hinge });
        };

        let len_xy = self.mesh.edge_length(x, y);
        let len_yz = self.mesh.edge_length(y, z);
        let len_zx = self.mesh.edge_length(z, x);
        let (pz, _) = third_point(
            net.vertices[lx as usize],
            net.vertices[ly as usize],
            len_xy,
            len_yz,
            len_zx,
        )
        .map_err(|source| UnfoldError::DegenerateFace { face, source })?;

        let lz = net.vertices.len() as u32;
        net.vertices.push(pz);

        let mut local = [0; 3];
        local[slot] = lx;
        local[(slot + 1) % 3] = ly;
        local[(slot + 2) % 3] = lz;
        net.faces.push(UnfoldedFace {
            vertices: local,
            source_face: face,
        });
        Ok(local)
    }

    /// Record the three edges of a freshly placed face.
    ///
    /// Fold edges are shared with a neighbour and recorded only once.
    fn emit_edges(
        &self,
        tree: &SpanningTree,
        face: usize,
        local: [u32; 3],
        net: &mut UnfoldedMesh,
        emitted_folds: &mut HashSet<EdgeId>,
    ) {
        let verts = self.mesh.faces[face];
        for (slot, id) in self.edges.face_edges(face).into_iter().enumerate() {
            let next = (slot + 1) % 3;
            let fold = self
                .graph
                .dual_of(id)
                .filter(|&d| tree.contains(d))
                .and_then(|d| self.graph.edges()[d].opposite(face));

            let edge = match fold {
                Some(other) => {
                    if !emitted_folds.insert(id) {
                        continue;
                    }
                    let angle =
                        self.mesh
                            .signed_dihedral_angle(face, other, verts[slot], verts[next]);
                    UnfoldedEdge {
                        vertices: [local[slot], local[next]],
                        mesh_edge: id,
                        is_folding_edge: true,
                        folding_direction: self.fold_direction(angle),
                        glue_number: None,
                        is_boundary: false,
                    }
                }
                None => UnfoldedEdge {
                    vertices: [local[slot], local[next]],
                    mesh_edge: id,
                    is_folding_edge: false,
                    folding_direction: FoldDirection::None,
                    glue_number: Some(id),
                    is_boundary: self.edges.get(id).is_some_and(|e| e.is_boundary()),
                },
            };
            net.edges.push(edge);
        }
    }

    fn fold_direction(&self, angle: f64) -> FoldDirection {
        if angle < -self.flat_angle_tolerance {
            FoldDirection::Mountain
        } else if angle > self.flat_angle_tolerance {
            FoldDirection::Valley
        } else {
            FoldDirection::None
        }
    }
}
