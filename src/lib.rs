//! Constrained Delaunay triangulation kernel for planar mesh generation.
//!
//! Builds a 2D triangular mesh over a point set with an optional set of
//! edges the mesh must contain exactly (a planar straight-line graph),
//! classifying the resulting triangles into subdomains where the edges
//! divide the plane into distinct regions.
//!
//! The pipeline, in order: seed a bounding quadrilateral around the
//! (normalized) input ([`bbox`]), insert every input point with
//! Bowyer-Watson cavity excavation ([`insertion`], using [`point_location`]
//! to find each point's containing triangle), recover every requested
//! constraint edge by walking its crossing triangulation edges and flipping
//! diagonals ([`boundary`]), classify triangles into subdomains
//! ([`subdomain`]), and strip the bounding box back out ([`cleanup`]).
//!
//! ```
//! use cdt::{build, Config, InputPoint};
//!
//! let points = vec![
//!     InputPoint::new(0.0, 0.0),
//!     InputPoint::new(1.0, 0.0),
//!     InputPoint::new(1.0, 1.0),
//!     InputPoint::new(0.0, 1.0),
//! ];
//! let mesh = build(&points, &[], &Config::default()).unwrap();
//! assert!(!mesh.triangles.is_empty());
//! ```

pub mod bbox;
pub mod boundary;
pub mod cleanup;
pub mod config;
pub mod data_structures;
pub mod error;
pub mod insertion;
pub mod math_utils;
pub mod normalize;
pub mod point_location;
pub mod subdomain;

use std::collections::HashMap;

use data_structures::edge::ConstraintEdge;
use data_structures::mesh::MeshStore;
use data_structures::point::Vec2;
use data_structures::triangle::AdjacentRef;
use math_utils::{segments_properly_intersect, Orientation};

pub use config::{Config, RenumMode};
pub use error::MeshError;

/// A caller-supplied input vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputPoint {
    pub x: f32,
    pub y: f32,
}

impl InputPoint {
    pub fn new(x: f32, y: f32) -> Self {
        InputPoint { x, y }
    }
}

impl From<InputPoint> for Vec2 {
    fn from(p: InputPoint) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// A caller-supplied constraint edge, referencing two indices into the
/// input point slice, with an arbitrary caller-defined reference label
/// carried through to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEdge {
    pub a: usize,
    pub b: usize,
    pub reference: i32,
}

impl InputEdge {
    pub fn new(a: usize, b: usize, reference: i32) -> Self {
        InputEdge { a, b, reference }
    }
}

/// The triangulated mesh, with every index into `points` dense
/// (`0..points.len()`) regardless of how many bounding-box or duplicate
/// points were discarded internally.
#[derive(Debug, Clone)]
pub struct MeshOutput {
    pub points: Vec<Vec2>,
    pub triangles: Vec<[usize; 3]>,
    pub adjacency: Vec<[AdjacentRef; 3]>,
    pub triangle_references: Vec<i32>,
    pub edges: Vec<(usize, usize, i32)>,
}

/// Triangulates `points`, recovering every edge in `constraints` exactly,
/// and classifies the resulting triangles into subdomains.
pub fn build(
    points: &[InputPoint],
    constraints: &[InputEdge],
    config: &Config,
) -> Result<MeshOutput, MeshError> {
    if points.is_empty() {
        return Err(MeshError::EmptyInput);
    }
    for (edge_index, edge) in constraints.iter().enumerate() {
        if edge.a >= points.len() {
            return Err(MeshError::InvalidEdgeReference {
                edge_index,
                point_index: edge.a,
            });
        }
        if edge.b >= points.len() {
            return Err(MeshError::InvalidEdgeReference {
                edge_index,
                point_index: edge.b,
            });
        }
    }

    let raw: Vec<Vec2> = points.iter().map(|&p| p.into()).collect();
    if all_collinear(&raw) {
        return Err(MeshError::DegenerateInput);
    }

    let (normalized, normalization) = normalize::normalize(&raw);

    log::debug!("triangulating {} point(s), {} constraint edge(s)", points.len(), constraints.len());

    let mut store = MeshStore::new(raw.len() + 4, raw.len() * 2 + 8)
        .with_memory_cap(config.max_points, config.max_triangles);

    let bb = bbox::seed(&mut store, normalization.working_width, normalization.working_height)?;

    let mut vertex_map = Vec::with_capacity(normalized.len());
    let mut hint = bb.triangles[0];
    for (point_index, &p) in normalized.iter().enumerate() {
        let (mesh_index, landing) = insertion::insert_point(&mut store, config, p, hint, point_index)?;
        vertex_map.push(mesh_index);
        hint = landing;
    }

    let mesh_to_input: HashMap<usize, usize> = vertex_map
        .iter()
        .enumerate()
        .map(|(input_i, &mesh_i)| (mesh_i, input_i))
        .collect();

    for edge in constraints {
        let a = vertex_map[edge.a];
        let b = vertex_map[edge.b];
        let coord_a = store.point_coord(a);
        let coord_b = store.point_coord(b);
        for existing in store.constraints.iter() {
            let coord_ea = store.point_coord(existing.a);
            let coord_eb = store.point_coord(existing.b);
            if segments_properly_intersect(coord_a, coord_b, coord_ea, coord_eb) {
                return Err(MeshError::CrossingConstraints {
                    a0: edge.a,
                    a1: edge.b,
                    b0: mesh_to_input[&existing.a],
                    b1: mesh_to_input[&existing.b],
                });
            }
        }
        store.constraints.insert(ConstraintEdge::new(a, b, edge.reference));
    }

    boundary::enforce_constraints(&mut store, config)?;
    subdomain::classify(&mut store, bb.corners);
    cleanup::cleanup(&mut store, bb.corners, config);

    #[cfg(debug_assertions)]
    store.assert_reciprocity();

    Ok(build_output(&store, &normalization))
}

fn all_collinear(points: &[Vec2]) -> bool {
    if points.len() < 3 {
        return true;
    }
    let p0 = points[0];
    let Some(&p1) = points[1..].iter().find(|&&p| p != p0) else {
        return true;
    };
    points
        .iter()
        .all(|&p| math_utils::orient2d(p0, p1, p) == Orientation::Collinear)
}

fn build_output(store: &MeshStore, normalization: &normalize::Normalization) -> MeshOutput {
    let live_points: Vec<usize> = store.live_point_indices().collect();
    let mut point_reindex = vec![usize::MAX; store.point_count()];
    for (new_index, &old_index) in live_points.iter().enumerate() {
        point_reindex[old_index] = new_index;
    }
    let points: Vec<Vec2> = live_points
        .iter()
        .map(|&i| normalize::denormalize(store.point_coord(i), normalization))
        .collect();

    let live_triangles: Vec<usize> = store.live_triangle_indices().collect();
    let mut triangle_reindex = vec![usize::MAX; store.triangle_count()];
    for (new_index, &old_index) in live_triangles.iter().enumerate() {
        triangle_reindex[old_index] = new_index;
    }

    let mut triangles = Vec::with_capacity(live_triangles.len());
    let mut adjacency = Vec::with_capacity(live_triangles.len());
    let mut triangle_references = Vec::with_capacity(live_triangles.len());
    for &t in &live_triangles {
        let tri = store.get_triangle(t);
        triangles.push([
            point_reindex[tri.vertices[0]],
            point_reindex[tri.vertices[1]],
            point_reindex[tri.vertices[2]],
        ]);
        adjacency.push(tri.adjacent.map(|slot| slot.map(|(n, ni)| (triangle_reindex[n], ni))));
        triangle_references.push(tri.reference);
    }

    let edges = store
        .constraints
        .iter()
        .map(|e| (point_reindex[e.a], point_reindex[e.b], e.reference))
        .collect();

    MeshOutput {
        points,
        triangles,
        adjacency,
        triangle_references,
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_with_diagonal_constraint() {
        let points = vec![
            InputPoint::new(0.0, 0.0),
            InputPoint::new(1.0, 0.0),
            InputPoint::new(1.0, 1.0),
            InputPoint::new(0.0, 1.0),
        ];
        let constraints = vec![InputEdge::new(0, 2, 1)];
        let mesh = build(&points, &constraints, &Config::default()).unwrap();
        assert_eq!(mesh.points.len(), 4);
        assert_eq!(mesh.triangles.len(), 2);
    }

    #[test]
    fn unconstrained_five_point_set_triangulates() {
        let points = vec![
            InputPoint::new(0.0, 0.0),
            InputPoint::new(4.0, 0.0),
            InputPoint::new(4.0, 4.0),
            InputPoint::new(0.0, 4.0),
            InputPoint::new(2.0, 2.0),
        ];
        let mesh = build(&points, &[], &Config::default()).unwrap();
        assert_eq!(mesh.points.len(), 5);
        assert_eq!(mesh.triangles.len(), 4);
    }

    #[test]
    fn collinear_input_is_rejected() {
        let points = vec![
            InputPoint::new(0.0, 0.0),
            InputPoint::new(1.0, 0.0),
            InputPoint::new(2.0, 0.0),
        ];
        let result = build(&points, &[], &Config::default());
        assert_eq!(result, Err(MeshError::DegenerateInput));
    }

    #[test]
    fn out_of_range_edge_reference_is_rejected() {
        let points = vec![
            InputPoint::new(0.0, 0.0),
            InputPoint::new(1.0, 0.0),
            InputPoint::new(1.0, 1.0),
        ];
        let constraints = vec![InputEdge::new(0, 5, 1)];
        let result = build(&points, &constraints, &Config::default());
        assert_eq!(
            result,
            Err(MeshError::InvalidEdgeReference {
                edge_index: 0,
                point_index: 5
            })
        );
    }

    #[test]
    fn reverse_order_convex_polygon_boundary_recovers() {
        let points = vec![
            InputPoint::new(0.0, 0.0),
            InputPoint::new(2.0, 0.0),
            InputPoint::new(2.0, 2.0),
            InputPoint::new(0.0, 2.0),
        ];
        // Boundary supplied in reverse winding order relative to input order.
        let constraints = vec![
            InputEdge::new(3, 2, 1),
            InputEdge::new(2, 1, 1),
            InputEdge::new(1, 0, 1),
            InputEdge::new(0, 3, 1),
        ];
        let mesh = build(&points, &constraints, &Config::default()).unwrap();
        for (a, b, _) in &mesh.edges {
            let has = mesh
                .triangles
                .iter()
                .any(|t| t.contains(a) && t.contains(b));
            assert!(has, "constraint ({a}, {b}) missing from triangulation");
        }
    }
}
