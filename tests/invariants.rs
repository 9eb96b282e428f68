//! Universal mesh invariants (spec.md §8): orientation, adjacency
//! reciprocity, index validity, constraint-edge presence, the empty-circle
//! Delaunay property, and idempotence of subdomain classification, checked
//! against a handful of representative builds.

mod common;

use cdt::data_structures::mesh::MeshStore;
use cdt::data_structures::point::Vec2;
use cdt::{bbox, build, insertion, subdomain, Config, InputEdge, InputPoint};
use common::{assert_delaunay_property, assert_mesh_invariants};

#[test]
fn invariants_hold_for_unconstrained_mesh() {
    let points = vec![
        InputPoint::new(0.0, 0.0),
        InputPoint::new(4.0, 0.0),
        InputPoint::new(4.0, 4.0),
        InputPoint::new(0.0, 4.0),
        InputPoint::new(2.0, 2.0),
        InputPoint::new(1.0, 3.0),
    ];
    let mesh = build(&points, &[], &Config::default()).unwrap();
    assert_mesh_invariants(&mesh);
    assert_delaunay_property(&mesh);
}

#[test]
fn invariants_hold_for_constrained_mesh() {
    let points = vec![
        InputPoint::new(0.0, 0.0),
        InputPoint::new(5.0, 0.0),
        InputPoint::new(5.0, 5.0),
        InputPoint::new(0.0, 5.0),
        InputPoint::new(2.0, 2.0),
    ];
    let constraints = vec![InputEdge::new(0, 2, 1)];
    let mesh = build(&points, &constraints, &Config::default()).unwrap();
    assert_mesh_invariants(&mesh);
}

#[test]
fn invariants_hold_with_a_dense_random_looking_point_set() {
    let points: Vec<InputPoint> = [
        (0.5, 0.5),
        (3.2, 1.1),
        (4.8, 3.9),
        (1.0, 4.5),
        (2.5, 2.5),
        (0.2, 3.0),
        (4.0, 0.3),
        (3.5, 4.8),
    ]
    .into_iter()
    .map(|(x, y)| InputPoint::new(x, y))
    .collect();
    let mesh = build(&points, &[], &Config::default()).unwrap();
    assert_mesh_invariants(&mesh);
    assert_delaunay_property(&mesh);
    assert_eq!(mesh.points.len(), points.len());
}

/// spec.md §8: "running the subdomain marker a second time produces
/// identical `ref` values." Exercised directly against the kernel's public
/// submodules (rather than through `build`, which doesn't expose the
/// post-classification, pre-cleanup store) for both classification paths:
/// unconstrained (bounding-box-incidence tagging) and constrained
/// (constraint-stopped flood fill).
#[test]
fn subdomain_classification_is_idempotent_without_constraints() {
    let mut store = MeshStore::new(16, 16);
    let bb = bbox::seed(&mut store, 10.0, 10.0).unwrap();
    let config = Config::default();
    let mut hint = bb.triangles[0];
    for (i, (x, y)) in [(5.0, 5.0), (2.0, 3.0), (7.0, 6.0)].into_iter().enumerate() {
        let (_point, landing) =
            insertion::insert_point(&mut store, &config, Vec2::new(x, y), hint, i).unwrap();
        hint = landing;
    }

    subdomain::classify(&mut store, bb.corners);
    let first: Vec<i32> = store
        .live_triangle_indices()
        .map(|t| store.get_triangle(t).reference)
        .collect();

    subdomain::classify(&mut store, bb.corners);
    let second: Vec<i32> = store
        .live_triangle_indices()
        .map(|t| store.get_triangle(t).reference)
        .collect();

    assert_eq!(first, second);
    assert!(first.iter().all(|&r| r > 0), "every reference must be positive");
}

#[test]
fn subdomain_classification_is_idempotent_with_constraints() {
    let mut store = MeshStore::new(16, 16);
    let bb = bbox::seed(&mut store, 10.0, 10.0).unwrap();
    let config = Config::default();
    let mut hint = bb.triangles[0];
    let mut inserted = Vec::new();
    for (i, (x, y)) in [(2.0, 2.0), (8.0, 2.0), (8.0, 8.0), (2.0, 8.0)]
        .into_iter()
        .enumerate()
    {
        let (point, landing) =
            insertion::insert_point(&mut store, &config, Vec2::new(x, y), hint, i).unwrap();
        inserted.push(point);
        hint = landing;
    }
    store
        .constraints
        .insert(cdt::data_structures::edge::ConstraintEdge::new(inserted[1], inserted[3], 1));
    cdt::boundary::enforce_constraints(&mut store, &config).unwrap();

    subdomain::classify(&mut store, bb.corners);
    let first: Vec<i32> = store
        .live_triangle_indices()
        .map(|t| store.get_triangle(t).reference)
        .collect();

    subdomain::classify(&mut store, bb.corners);
    let second: Vec<i32> = store
        .live_triangle_indices()
        .map(|t| store.get_triangle(t).reference)
        .collect();

    assert_eq!(first, second);
}
