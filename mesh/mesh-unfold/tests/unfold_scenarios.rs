//! End-to-end unfolding scenarios on small reference meshes.
//!
//! Run with: cargo test -p mesh-unfold --test unfold_scenarios

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;

use approx::assert_relative_eq;
use mesh_unfold::{
    EdgeId, EdgeTable, ExhaustiveCut, FoldDirection, Mesh, Point3, UnfoldError, UnfoldOutput,
    UnfoldParams, signed_area, unfold_mesh, unfold_mesh_with,
};

// =============================================================================
// Reference meshes
// =============================================================================

/// Regular tetrahedron with unit edges, shifted by `dx` along X.
fn tetrahedron(dx: f64) -> Mesh {
    let h = 0.75_f64.sqrt();
    Mesh::from_parts(
        vec![
            Point3::new(dx, 0.0, 0.0),
            Point3::new(dx + 1.0, 0.0, 0.0),
            Point3::new(dx + 0.5, h, 0.0),
            Point3::new(dx + 0.5, h / 3.0, (2.0_f64 / 3.0).sqrt()),
        ],
        vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]],
    )
}

fn unit_cube() -> Mesh {
    Mesh::from_raw(
        &[
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0,
        ],
        &[
            0, 2, 1, 0, 3, 2, 4, 5, 6, 4, 6, 7, 0, 1, 5, 0, 5, 4, //
            3, 7, 6, 3, 6, 2, 0, 4, 7, 0, 7, 3, 1, 2, 6, 1, 6, 5,
        ],
    )
}

/// The cube without its top (z = 1) face.
fn open_box() -> Mesh {
    let mut mesh = unit_cube();
    mesh.faces.retain(|f| *f != [4, 5, 6] && *f != [4, 6, 7]);
    mesh
}

/// A flat row of 10 triangles in the XY plane.
fn flat_strip() -> Mesh {
    let mut vertices = Vec::new();
    for i in 0..=5 {
        vertices.push(Point3::new(f64::from(i), 0.0, 0.0));
    }
    for i in 0..=5 {
        vertices.push(Point3::new(f64::from(i), 1.0, 0.0));
    }
    let mut faces = Vec::new();
    for i in 0..5 {
        let (b0, b1, t0, t1) = (i, i + 1, i + 6, i + 7);
        faces.push([b0, b1, t0]);
        faces.push([b1, t1, t0]);
    }
    Mesh::from_parts(vertices, faces)
}

fn merge(a: &Mesh, b: &Mesh) -> Mesh {
    let offset = a.vertices.len() as u32;
    let mut mesh = a.clone();
    mesh.vertices.extend_from_slice(&b.vertices);
    mesh.faces
        .extend(b.faces.iter().map(|f| [f[0] + offset, f[1] + offset, f[2] + offset]));
    mesh
}

// =============================================================================
// Shared checks
// =============================================================================

/// How often each glue number appears over all islands.
fn glue_counts(output: &UnfoldOutput) -> HashMap<EdgeId, usize> {
    let mut counts = HashMap::new();
    for island in &output.islands {
        for segment in island.segments() {
            if let Some(glue) = segment.glue_number {
                *counts.entry(glue).or_insert(0) += 1;
            }
        }
    }
    counts
}

fn assert_isometric(mesh: &Mesh, output: &UnfoldOutput) {
    let table = EdgeTable::build(mesh).unwrap();
    for island in &output.islands {
        for edge in &island.mesh.edges {
            let (a, b) = island.mesh.edge_points(edge);
            let source = table.get(edge.mesh_edge).unwrap();
            assert_relative_eq!((b - a).norm(), source.length, epsilon = 1e-9);
        }
        for (_, t) in island.mesh.triangles() {
            assert!(signed_area(&t) > 0.0);
        }
    }
    let area: f64 = output.islands.iter().map(|i| i.mesh.area()).sum();
    assert_relative_eq!(area, mesh.surface_area(), epsilon = 1e-9);
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn tetrahedron_unfolds_to_one_island() {
    let mesh = tetrahedron(0.0);
    let output = unfold_mesh(&mesh, &UnfoldParams::verified()).unwrap();

    assert_eq!(output.island_count(), 1);
    assert_eq!(output.face_count(), 4);
    assert_eq!(output.fold_edge_count(), 3);
    assert_eq!(output.conflicts_detected, 0);
    assert!(output.cut_edges.is_empty());
    assert!(output.is_overlap_free());

    // 3F - T edges: 3 folds plus 3 cut pairs.
    let island = &output.islands[0];
    assert_eq!(island.mesh.edges.len(), 9);
    let counts = glue_counts(&output);
    assert_eq!(counts.len(), 3);
    assert!(counts.values().all(|&c| c == 2));
    assert_eq!(island.glue_labels().len(), 6);

    for segment in island.segments().iter().filter(|s| s.is_folding_edge) {
        assert_eq!(segment.folding_direction, FoldDirection::Mountain);
    }
    assert_isometric(&mesh, &output);
}

#[test]
fn flat_strip_needs_no_cuts() {
    let mesh = flat_strip();
    let output = unfold_mesh(&mesh, &UnfoldParams::verified()).unwrap();

    assert_eq!(output.island_count(), 1);
    assert_eq!(output.fold_edge_count(), 9);
    assert!(output.cut_edges.is_empty());
    assert!(output.is_overlap_free());

    let island = &output.islands[0];
    assert_eq!(island.mesh.edges.len(), 3 * 10 - 9);
    for segment in island.segments() {
        if segment.is_folding_edge {
            assert_eq!(segment.folding_direction, FoldDirection::None);
        } else {
            assert!(segment.is_boundary);
        }
    }
    // Boundary edges have nothing to be glued to.
    assert!(island.glue_labels().is_empty());

    // Laid flat, the strip keeps its 5 x 1 outline.
    assert_relative_eq!(island.bounds.width(), 5.0, epsilon = 1e-9);
    assert_relative_eq!(island.bounds.height(), 1.0, epsilon = 1e-9);
    assert_isometric(&mesh, &output);
}

#[test]
fn cube_unfolds_without_overlaps() {
    let mesh = unit_cube();
    let output = unfold_mesh(&mesh, &UnfoldParams::verified()).unwrap();

    assert_eq!(output.face_count(), 12);
    assert_eq!(output.initial_components, 1);
    assert!(output.is_overlap_free());
    assert_eq!(
        output.fold_edge_count(),
        12 - output.island_count(),
        "a forest over 12 faces has 12 - components edges"
    );

    // All 18 cube edges are interior: cuts pair up exactly.
    let counts = glue_counts(&output);
    assert_eq!(counts.len(), 18 - output.fold_edge_count());
    assert!(counts.values().all(|&c| c == 2));
    assert_isometric(&mesh, &output);
}

#[test]
fn open_box_marks_boundary_edges() {
    let mesh = open_box();
    let output = unfold_mesh(&mesh, &UnfoldParams::verified()).unwrap();

    assert_eq!(output.face_count(), 10);
    assert!(output.is_overlap_free());

    let segments: Vec<_> = output.islands.iter().flat_map(|i| i.segments()).collect();
    let boundary = segments.iter().filter(|s| s.is_boundary).count();
    assert_eq!(boundary, 4);
    for segment in segments.iter().filter(|s| s.is_boundary) {
        assert!(!segment.is_folding_edge);
        assert!(segment.glue_number.is_some());
    }

    let labels: usize = output.islands.iter().map(|i| i.glue_labels().len()).sum();
    let glued = segments
        .iter()
        .filter(|s| !s.is_folding_edge && !s.is_boundary)
        .count();
    assert_eq!(labels, glued);
    assert_isometric(&mesh, &output);
}

#[test]
fn disconnected_mesh_starts_as_separate_islands() {
    let mesh = merge(&tetrahedron(0.0), &tetrahedron(5.0));
    let output = unfold_mesh(&mesh, &UnfoldParams::verified()).unwrap();

    assert_eq!(output.initial_components, 2);
    assert_eq!(output.island_count(), 2);
    assert_eq!(output.fold_edge_count(), 6);

    let first: Vec<usize> = output.islands[0].source_faces().collect();
    assert!(first.iter().all(|&f| f < 4));
    assert!(output.is_overlap_free());
}

#[test]
fn non_manifold_edge_is_rejected() {
    let mesh = Mesh::from_parts(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, -1.0, 0.0),
            Point3::new(0.5, 0.0, 1.0),
        ],
        vec![[0, 1, 2], [1, 0, 3], [0, 1, 4]],
    );
    let err = unfold_mesh(&mesh, &UnfoldParams::default()).unwrap_err();
    assert!(matches!(
        err,
        UnfoldError::NonManifoldEdge {
            v0: 0,
            v1: 1,
            face_count: 3
        }
    ));
}

#[test]
fn degenerate_face_aborts_unfold() {
    // Vertices 0 and 1 coincide: a zero-length edge.
    let mesh = Mesh::from_parts(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2]],
    );
    let err = unfold_mesh(&mesh, &UnfoldParams::default()).unwrap_err();
    assert!(matches!(err, UnfoldError::DegenerateFace { face: 0, .. }));
}

#[test]
fn zero_length_side_of_root_aborts_unfold() {
    // Vertex 2 sits on vertex 1: the base is fine, the second side is not.
    let mesh = Mesh::from_parts(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ],
        vec![[0, 1, 2]],
    );
    let err = unfold_mesh(&mesh, &UnfoldParams::default()).unwrap_err();
    assert!(matches!(err, UnfoldError::DegenerateFace { face: 0, .. }));
}

#[test]
fn zero_length_side_of_child_aborts_unfold() {
    // Face 1 is reached across edge (0, 1); its vertex 3 sits on vertex 0.
    let mesh = Mesh::from_parts(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ],
        vec![[0, 1, 2], [1, 0, 3]],
    );
    let err = unfold_mesh(&mesh, &UnfoldParams::default()).unwrap_err();
    assert!(matches!(err, UnfoldError::DegenerateFace { face: 1, .. }));
}

#[test]
fn invalid_index_is_rejected() {
    let mesh = Mesh::from_parts(vec![Point3::origin()], vec![[0, 1, 2]]);
    assert!(matches!(
        unfold_mesh(&mesh, &UnfoldParams::default()),
        Err(UnfoldError::InvalidVertexIndex { face: 0, .. })
    ));
}

#[test]
fn unfold_is_deterministic() {
    let mesh = unit_cube();
    let first = unfold_mesh(&mesh, &UnfoldParams::verified()).unwrap();
    let second = unfold_mesh(&mesh, &UnfoldParams::verified()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn exhaustive_and_greedy_agree_on_cube() {
    let mesh = unit_cube();
    let params = UnfoldParams::verified();
    let greedy = unfold_mesh(&mesh, &params).unwrap();
    let exact = unfold_mesh_with(&mesh, &params, &ExhaustiveCut::default()).unwrap();

    assert!(greedy.is_overlap_free());
    assert!(exact.is_overlap_free());
    assert!(exact.cut_edges.len() <= greedy.cut_edges.len());
}

#[test]
fn layout_normalizes_islands() {
    let mesh = merge(&tetrahedron(0.0), &unit_cube());
    let output = unfold_mesh(&mesh, &UnfoldParams::default()).unwrap();
    let layout = output.layout();

    assert_relative_eq!(layout.max_size(), output.max_size);
    for index in 0..output.island_count() {
        for segment in layout.normalized_segments(index).unwrap() {
            for p in [segment.start, segment.end] {
                assert!(p.x >= -1e-12 && p.x <= 1.0 + 1e-12);
                assert!(p.y >= -1e-12 && p.y <= 1.0 + 1e-12);
            }
        }
    }
}
