//! End-to-end unfolding: mesh in, islands out.

use tracing::{debug, info, warn};

use crate::cut::{CutStrategy, GreedyCut, resolve_conflicts};
use crate::dual_graph::DualGraph;
use crate::edges::{EdgeId, EdgeTable};
use crate::error::UnfoldResult;
use crate::island::Island;
use crate::layout::max_size;
use crate::mesh::Mesh;
use crate::overlap::{Conflict, detect_overlaps};
use crate::params::UnfoldParams;
use crate::result::UnfoldOutput;
use crate::spanning_tree::SpanningTree;
use crate::unfold::Unfolder;
use crate::unfolded::UnfoldedMesh;

/// Unfold a mesh into flat islands, cutting overlaps greedily.
///
/// See [`unfold_mesh_with`].
///
/// # Errors
///
/// See [`unfold_mesh_with`].
///
/// # Example
///
/// ```
/// use mesh_unfold::{unfold_mesh, Mesh, Point3, UnfoldParams};
///
/// let tetrahedron = Mesh::from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.5, 0.75_f64.sqrt(), 0.0),
///         Point3::new(0.5, 0.75_f64.sqrt() / 3.0, (2.0_f64 / 3.0).sqrt()),
///     ],
///     vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]],
/// );
///
/// let output = unfold_mesh(&tetrahedron, &UnfoldParams::default()).unwrap();
/// assert_eq!(output.island_count(), 1);
/// assert_eq!(output.fold_edge_count(), 3);
/// ```
pub fn unfold_mesh(mesh: &Mesh, params: &UnfoldParams) -> UnfoldResult<UnfoldOutput> {
    unfold_mesh_with(mesh, params, &GreedyCut)
}

/// Unfold a mesh into flat islands with a chosen cut strategy.
///
/// 1. Build the edge table and the dual graph.
/// 2. Take the minimum spanning forest and unfold each component.
/// 3. Detect overlaps inside every component (unless disabled).
/// 4. Cut the tree edges chosen by `strategy`, then unfold each resulting
///    component again as its own island.
///
/// Overlap resolution runs once; islands are not re-checked unless
/// [`UnfoldParams::verify_islands`] is set.
///
/// # Errors
///
/// Returns an error if the parameters are invalid, the mesh is empty,
/// malformed or non-manifold, a face is degenerate, or the strategy fails.
pub fn unfold_mesh_with(
    mesh: &Mesh,
    params: &UnfoldParams,
    strategy: &dyn CutStrategy,
) -> UnfoldResult<UnfoldOutput> {
    params.validate()?;
    mesh.validate()?;

    info!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "Starting mesh unfold"
    );

    let edges = EdgeTable::build(mesh)?;
    debug!(
        edges = edges.len(),
        boundary = edges.boundary_count(),
        "Built edge table"
    );

    let graph = DualGraph::build(mesh.face_count(), &edges);
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Built dual graph"
    );

    let mut tree = SpanningTree::minimum(&graph);
    let unfolder = Unfolder::new(mesh, &edges, &graph, params);

    let components = tree.components();
    let initial_components = components.len();
    debug!(
        tree_edges = tree.edge_count(),
        components = initial_components,
        "Built spanning forest"
    );

    let mut nets = unfold_components(&unfolder, &tree, &components)?;
    let mut cut_edges: Vec<EdgeId> = Vec::new();
    let mut conflicts_detected = 0;

    if params.resolve_overlaps {
        let conflicts: Vec<Conflict> = nets
            .iter()
            .flat_map(|net| detect_overlaps(net, params.epsilon))
            .collect();
        conflicts_detected = conflicts.len();
        debug!(conflicts = conflicts_detected, "Detected overlaps");

        if !conflicts.is_empty() {
            let cuts = resolve_conflicts(&tree, &conflicts, strategy)?;
            cut_edges = cuts
                .iter()
                .filter(|&&d| tree.contains(d))
                .filter_map(|&d| graph.edge(d).map(|e| e.mesh_edge))
                .collect();
            tree.remove_edges(&cuts);

            let components = tree.components();
            debug!(
                cuts = cut_edges.len(),
                components = components.len(),
                "Partitioned spanning forest"
            );
            nets = unfold_components(&unfolder, &tree, &components)?;
        }
    }

    let islands: Vec<Island> = nets.into_iter().map(Island::new).collect();

    let residual_overlaps = params.verify_islands.then(|| {
        let residual: usize = islands
            .iter()
            .map(|island| island.overlaps(params.epsilon).len())
            .sum();
        if residual > 0 {
            warn!(residual, "Islands still contain overlapping faces");
        }
        residual
    });

    let output = UnfoldOutput {
        max_size: max_size(&islands),
        islands,
        cut_edges,
        conflicts_detected,
        initial_components,
        residual_overlaps,
    };

    info!(
        islands = output.island_count(),
        cuts = output.cut_edges.len(),
        conflicts = output.conflicts_detected,
        "Unfold complete"
    );

    Ok(output)
}

fn unfold_components(
    unfolder: &Unfolder<'_>,
    tree: &SpanningTree,
    components: &[Vec<usize>],
) -> UnfoldResult<Vec<UnfoldedMesh>> {
    components
        .iter()
        .map(|faces| unfolder.unfold(tree, faces))
        .collect()
}
