//! Minimum spanning forest over the dual graph.
//!
//! Tree edges are the folds of the net. The forest is only ever pruned
//! after construction, by the cut resolver.

use std::collections::VecDeque;

use crate::dual_graph::DualGraph;

/// Disjoint-set forest with path halving and union by size.
#[derive(Debug, Clone)]
struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge the sets of `a` and `b`. Returns `false` if already merged.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        true
    }
}

/// A spanning forest of a [`DualGraph`].
///
/// Edges are referred to by their dual edge index. Neighbour lists keep
/// dual edge order so traversals are deterministic.
#[derive(Debug, Clone)]
pub struct SpanningTree {
    /// Membership flag per dual edge.
    in_tree: Vec<bool>,
    /// For each face, `(neighbour face, dual edge)` pairs.
    adjacency: Vec<Vec<(usize, usize)>>,
    edge_count: usize,
}

impl SpanningTree {
    /// Compute a minimum spanning forest with Kruskal's algorithm.
    ///
    /// Edges are taken in increasing weight; ties go to the lower dual edge
    /// index, which makes the result a pure function of the mesh.
    #[must_use]
    pub fn minimum(graph: &DualGraph) -> Self {
        let edges = graph.edges();
        let mut order: Vec<usize> = (0..edges.len()).collect();
        order.sort_by(|&a, &b| edges[a].weight.total_cmp(&edges[b].weight).then(a.cmp(&b)));

        let mut sets = UnionFind::new(graph.node_count());
        let mut in_tree = vec![false; edges.len()];
        for index in order {
            let (a, b) = edges[index].faces;
            if sets.union(a, b) {
                in_tree[index] = true;
            }
        }

        Self::from_membership(graph, in_tree)
    }

    /// Build a forest from an explicit set of dual edges.
    ///
    /// The caller is responsible for the edges forming no cycle.
    #[must_use]
    pub fn from_edges(graph: &DualGraph, tree_edges: &[usize]) -> Self {
        let mut in_tree = vec![false; graph.edge_count()];
        for &index in tree_edges {
            if let Some(flag) = in_tree.get_mut(index) {
                *flag = true;
            }
        }
        Self::from_membership(graph, in_tree)
    }

    fn from_membership(graph: &DualGraph, in_tree: Vec<bool>) -> Self {
        let mut adjacency = vec![Vec::new(); graph.node_count()];
        let mut edge_count = 0;
        for (index, edge) in graph.edges().iter().enumerate() {
            if in_tree[index] {
                let (a, b) = edge.faces;
                adjacency[a].push((b, index));
                adjacency[b].push((a, index));
                edge_count += 1;
            }
        }
        Self {
            in_tree,
            adjacency,
            edge_count,
        }
    }

    /// Number of faces (nodes).
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of tree edges.
    #[inline]
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Check whether a dual edge is part of the forest.
    #[inline]
    #[must_use]
    pub fn contains(&self, dual_edge: usize) -> bool {
        self.in_tree.get(dual_edge).copied().unwrap_or(false)
    }

    /// Dual edge indices of the forest, ascending.
    #[must_use]
    pub fn edges(&self) -> Vec<usize> {
        self.in_tree
            .iter()
            .enumerate()
            .filter_map(|(i, &t)| t.then_some(i))
            .collect()
    }

    /// Tree neighbours of a face as `(face, dual edge)` pairs.
    #[inline]
    #[must_use]
    pub fn neighbors(&self, face: usize) -> &[(usize, usize)] {
        self.adjacency.get(face).map_or(&[], Vec::as_slice)
    }

    /// The dual edges on the unique tree path between two faces.
    ///
    /// Returns `None` when the faces lie in different components, and an
    /// empty path when `from == to`. Edges are listed from `from` to `to`.
    #[must_use]
    pub fn path(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        let n = self.adjacency.len();
        if from >= n || to >= n {
            return None;
        }
        if from == to {
            return Some(Vec::new());
        }

        // BFS from `from`, recording the edge used to reach each face.
        let mut parent: Vec<Option<(usize, usize)>> = vec![None; n];
        let mut seen = vec![false; n];
        let mut queue = VecDeque::new();
        seen[from] = true;
        queue.push_back(from);

        while let Some(face) = queue.pop_front() {
            if face == to {
                break;
            }
            for &(next, edge) in &self.adjacency[face] {
                if !seen[next] {
                    seen[next] = true;
                    parent[next] = Some((face, edge));
                    queue.push_back(next);
                }
            }
        }

        if !seen[to] {
            return None;
        }

        let mut path = Vec::new();
        let mut cursor = to;
        while let Some((prev, edge)) = parent[cursor] {
            path.push(edge);
            cursor = prev;
        }
        path.reverse();
        Some(path)
    }

    /// Remove dual edges from the forest. Edges not in the forest are ignored.
    pub fn remove_edges(&mut self, dual_edges: &[usize]) {
        for &index in dual_edges {
            let Some(flag) = self.in_tree.get_mut(index) else {
                continue;
            };
            if !*flag {
                continue;
            }
            *flag = false;
            self.edge_count -= 1;
            for list in &mut self.adjacency {
                list.retain(|&(_, e)| e != index);
            }
        }
    }

    /// Connected components of the forest.
    ///
    /// Each component lists its faces in ascending order; components are
    /// ordered by their smallest face.
    #[must_use]
    pub fn components(&self) -> Vec<Vec<usize>> {
        let n = self.adjacency.len();
        let mut seen = vec![false; n];
        let mut components = Vec::new();
        let mut stack = Vec::new();

        for start in 0..n {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            stack.push(start);
            let mut faces = Vec::new();

            while let Some(face) = stack.pop() {
                faces.push(face);
                for &(next, _) in &self.adjacency[face] {
                    if !seen[next] {
                        seen[next] = true;
                        stack.push(next);
                    }
                }
            }

            faces.sort_unstable();
            components.push(faces);
        }

        components
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::edges::EdgeTable;
    use crate::mesh::Mesh;
    use nalgebra::Point3;

    /// Fan of `n` triangles around vertex 0 in the XY plane.
    fn fan(n: u32) -> Mesh {
        let mut vertices = vec![Point3::new(0.0, 0.0, 0.0)];
        for i in 0..=n {
            let angle = f64::from(i) * 0.3;
            vertices.push(Point3::new(angle.cos(), angle.sin(), 0.0));
        }
        let faces = (1..=n).map(|i| [0, i, i + 1]).collect();
        Mesh::from_parts(vertices, faces)
    }

    fn tetrahedron() -> Mesh {
        Mesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.5, 1.0, 0.0),
                Point3::new(0.5, 0.5, 1.0),
            ],
            vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]],
        )
    }

    fn graph_of(mesh: &Mesh) -> DualGraph {
        DualGraph::build(mesh.face_count(), &EdgeTable::build(mesh).unwrap())
    }

    #[test]
    fn union_find_merges() {
        let mut sets = UnionFind::new(4);
        assert!(sets.union(0, 1));
        assert!(sets.union(2, 3));
        assert!(!sets.union(1, 0));
        assert!(sets.union(1, 3));
        assert_eq!(sets.find(0), sets.find(2));
    }

    #[test]
    fn tree_spans_tetrahedron() {
        let graph = graph_of(&tetrahedron());
        assert_eq!(graph.edge_count(), 6);

        let tree = SpanningTree::minimum(&graph);
        assert_eq!(tree.edge_count(), 3);
        assert_eq!(tree.edges().len(), 3);
        assert_eq!(tree.components().len(), 1);
    }

    #[test]
    fn tree_prefers_low_weight() {
        let graph = graph_of(&tetrahedron());
        let tree = SpanningTree::minimum(&graph);

        let total: f64 = tree.edges().iter().map(|&e| graph.edges()[e].weight).sum();
        // Brute force over all 3-edge subsets that span the 4 faces.
        let mut best = f64::INFINITY;
        for mask in 0u32..64 {
            if mask.count_ones() != 3 {
                continue;
            }
            let chosen: Vec<usize> = (0..6).filter(|i| mask & (1 << i) != 0).collect();
            let candidate = SpanningTree::from_edges(&graph, &chosen);
            if candidate.components().len() == 1 {
                let w: f64 = chosen.iter().map(|&e| graph.edges()[e].weight).sum();
                best = best.min(w);
            }
        }
        assert!((total - best).abs() < 1e-12);
    }

    #[test]
    fn tree_keeps_long_edges_and_cuts_short_ones() {
        let mesh = tetrahedron();
        let table = EdgeTable::build(&mesh).unwrap();
        let graph = DualGraph::build(mesh.face_count(), &table);
        let tree = SpanningTree::minimum(&graph);

        // 0-3 and 1-3 are the longest edges, 0-1 the shortest.
        let dual = |a, b| graph.dual_of(table.find(a, b).unwrap()).unwrap();
        assert!(tree.contains(dual(0, 3)));
        assert!(tree.contains(dual(1, 3)));
        assert!(!tree.contains(dual(0, 1)));
    }

    #[test]
    fn tree_is_deterministic() {
        let graph = graph_of(&tetrahedron());
        let a = SpanningTree::minimum(&graph);
        let b = SpanningTree::minimum(&graph);
        assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn path_along_fan() {
        let graph = graph_of(&fan(5));
        let tree = SpanningTree::minimum(&graph);
        // A fan's dual graph is already a path.
        assert_eq!(tree.edge_count(), 4);

        let path = tree.path(0, 4).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(tree.path(3, 1).unwrap().len(), 2);
        assert!(tree.path(2, 2).unwrap().is_empty());
        assert!(tree.path(0, 99).is_none());
    }

    #[test]
    fn removing_an_edge_splits_components() {
        let graph = graph_of(&fan(5));
        let mut tree = SpanningTree::minimum(&graph);
        let middle = tree.path(1, 2).unwrap()[0];

        tree.remove_edges(&[middle, middle]);
        assert_eq!(tree.edge_count(), 3);
        assert!(!tree.contains(middle));

        let components = tree.components();
        assert_eq!(components, vec![vec![0, 1], vec![2, 3, 4]]);
        assert!(tree.path(0, 4).is_none());
    }
}
