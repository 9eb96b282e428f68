//! Boundary/constraint enforcement.
//!
//! Grounded in `hole_creation.rs::add_constrained_edge_to_triangulation`
//! and the older `triangle_set_old.rs::get_intersecting_edges` /
//! `find_triangle_that_contains_line_endpoint`: locate the wedge at the
//! segment's start vertex that contains it, walk forward collecting the
//! triangulation edges it crosses, and repeatedly flip the diagonal of each
//! crossed edge's quadrilateral when that quadrilateral is convex,
//! requeuing a flipped diagonal that still crosses the target. Unlike an
//! unbounded swap loop, this one carries a bounded swap budget and surfaces
//! `MeshError::EnforcementFailed` instead of looping forever on a
//! constraint that cannot be recovered.

use std::collections::VecDeque;

use crate::config::Config;
use crate::data_structures::mesh::MeshStore;
use crate::error::MeshError;
use crate::math_utils::{
    is_point_to_the_left_of_edge, is_point_to_the_right_of_edge, is_quadrilateral_convex,
    segments_properly_intersect,
};

/// Flips the shared diagonal of the two triangles on either side of
/// `(t1, local)`, replacing edge `(u, w)` with `(apex1, apex2)`. Returns the
/// (possibly renumbered-in-place) pair of triangle indices, which do not
/// change across a flip — only their vertices and adjacency do.
pub fn flip_edge(store: &mut MeshStore, t1: usize, local: u8) -> Result<(usize, usize), MeshError> {
    let (t2, local2) = store
        .get_triangle(t1)
        .adjacent[local as usize]
        .ok_or_else(|| MeshError::InternalInvariantViolated {
            detail: "cannot flip a mesh-boundary edge".to_string(),
        })?;

    let tri1 = store.get_triangle(t1);
    let tri2 = store.get_triangle(t2);
    let apex1 = tri1.vertices[local as usize];
    let apex2 = tri2.vertices[local2 as usize];
    let (u, w) = tri1.edge_opposite(local);

    let a_outer = tri1.adjacent[(local as usize + 1) % 3];
    let b_outer = tri1.adjacent[(local as usize + 2) % 3];
    let c_outer = tri2.adjacent[(local2 as usize + 1) % 3];
    let d_outer = tri2.adjacent[(local2 as usize + 2) % 3];

    store.get_triangle_mut(t1).vertices = [apex1, u, apex2];
    store.get_triangle_mut(t2).vertices = [apex1, apex2, w];

    store.link(t1, 0, c_outer);
    store.link(t1, 1, Some((t2, 2)));
    store.link(t1, 2, b_outer);
    store.link(t2, 0, d_outer);
    store.link(t2, 1, a_outer);

    Ok((t1, t2))
}

/// Recovers every constraint edge currently registered on `store`, leaving
/// the mesh with each one present as a literal triangulation edge.
pub fn enforce_constraints(store: &mut MeshStore, config: &Config) -> Result<(), MeshError> {
    let edges: Vec<(usize, usize)> = store.constraints.iter().map(|e| e.key()).collect();
    for (a, b) in edges {
        recover_edge(store, a, b, config.swap_budget_factor)?;
    }
    Ok(())
}

fn recover_edge(store: &mut MeshStore, a: usize, b: usize, swap_budget_factor: usize) -> Result<(), MeshError> {
    if store.has_edge(a, b) {
        return Ok(());
    }

    let coord_a = store.point_coord(a);
    let coord_b = store.point_coord(b);

    let mut queue: VecDeque<(usize, usize)> = collect_crossed_edges(store, a, b)?;
    // Budget proportional to the initial crossing count (spec.md §4.G),
    // not a flat cap: a constraint crossing many edges needs more swaps to
    // recover than one crossing few, and at least one crossing must exist
    // here since `store.has_edge` already returned above.
    let max_iterations = queue.len().max(1) * swap_budget_factor;
    let mut iterations = 0usize;

    while let Some((u, w)) = queue.pop_front() {
        if iterations >= max_iterations {
            return Err(MeshError::EnforcementFailed { a, b });
        }
        iterations += 1;

        let Some((t, local)) = store
            .find_directed_edge(u, w)
            .or_else(|| store.find_directed_edge(w, u))
        else {
            continue; // already resolved by an earlier flip in this pass
        };

        let cu = store.point_coord(u);
        let cw = store.point_coord(w);
        if !segments_properly_intersect(coord_a, coord_b, cu, cw) {
            continue;
        }

        let tri1 = store.get_triangle(t);
        let Some((t2, local2)) = tri1.adjacent[local as usize] else {
            return Err(MeshError::EnforcementFailed { a, b });
        };
        let apex1 = tri1.vertices[local as usize];
        let apex2 = store.get_triangle(t2).vertices[local2 as usize];

        if !is_quadrilateral_convex(
            store.point_coord(apex1),
            cu,
            store.point_coord(apex2),
            cw,
        ) {
            queue.push_back((u, w));
            continue;
        }

        flip_edge(store, t, local)?;

        if segments_properly_intersect(
            coord_a,
            coord_b,
            store.point_coord(apex1),
            store.point_coord(apex2),
        ) {
            queue.push_back((apex1, apex2));
        }
    }

    if !store.has_edge(a, b) {
        return Err(MeshError::EnforcementFailed { a, b });
    }
    Ok(())
}

/// Walks from `a` towards `b`, collecting the undirected vertex pairs of
/// every triangulation edge the segment `(a, b)` properly crosses.
fn collect_crossed_edges(
    store: &MeshStore,
    a: usize,
    b: usize,
) -> Result<VecDeque<(usize, usize)>, MeshError> {
    let coord_a = store.point_coord(a);
    let coord_b = store.point_coord(b);

    let (mut t, mut local) = find_wedge_triangle(store, a, b, coord_a, coord_b)
        .ok_or(MeshError::EnforcementFailed { a, b })?;

    let mut crossed = VecDeque::new();
    loop {
        let tri = store.get_triangle(t);
        let (u, w) = tri.edge_opposite(local);
        crossed.push_back((u, w));

        let (nt, nlocal) = tri.adjacent[local as usize].ok_or(MeshError::EnforcementFailed { a, b })?;
        let ntri = store.get_triangle(nt);
        let apex = ntri.vertices[nlocal as usize];
        if apex == b {
            break;
        }

        let i1 = (nlocal as usize + 1) % 3;
        let i2 = (nlocal as usize + 2) % 3;
        let (u1, w1) = ntri.edge_opposite(i1 as u8);
        if segments_properly_intersect(coord_a, coord_b, store.point_coord(u1), store.point_coord(w1)) {
            t = nt;
            local = i1 as u8;
        } else {
            t = nt;
            local = i2 as u8;
        }
    }

    Ok(crossed)
}

/// Finds the triangle incident to `a` whose angular wedge (the two edges
/// meeting at `a`) contains the direction towards `b`.
fn find_wedge_triangle(
    store: &MeshStore,
    a: usize,
    b: usize,
    coord_a: crate::data_structures::point::Vec2,
    coord_b: crate::data_structures::point::Vec2,
) -> Option<(usize, u8)> {
    let _ = b;
    for t in store.triangles_with_vertex(a) {
        let tri = store.get_triangle(t);
        let local_a = tri.local_index_of(a)?;
        let (u, w) = tri.edge_opposite(local_a);
        let cu = store.point_coord(u);
        let cw = store.point_coord(w);
        if is_point_to_the_left_of_edge(coord_a, cu, coord_b)
            && is_point_to_the_right_of_edge(coord_a, cw, coord_b)
        {
            return Some((t, local_a));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::edge::ConstraintEdge;
    use crate::data_structures::point::Vec2;

    /// Two triangles split along the "wrong" diagonal of a unit square;
    /// recovering the other diagonal as a constraint must flip it back.
    #[test]
    fn recovers_missing_diagonal_by_flipping() {
        let mut store = MeshStore::new(8, 8);
        let p0 = store.new_pt(Vec2::new(0.0, 0.0)).unwrap(); // bottom-left
        let p1 = store.new_pt(Vec2::new(1.0, 0.0)).unwrap(); // bottom-right
        let p2 = store.new_pt(Vec2::new(1.0, 1.0)).unwrap(); // top-right
        let p3 = store.new_pt(Vec2::new(0.0, 1.0)).unwrap(); // top-left

        // Split along p1-p3 (the "wrong" diagonal from the perspective of
        // the p0-p2 constraint this test will recover).
        let t0 = store.new_elt([p0, p1, p3]).unwrap();
        let t1 = store.new_elt([p1, p2, p3]).unwrap();
        store.link(t0, 1, Some((t1, 2)));

        store.constraints.insert(ConstraintEdge::new(p0, p2, 0));
        let config = Config::default();
        enforce_constraints(&mut store, &config).unwrap();

        assert!(store.has_edge(p0, p2));
        #[cfg(debug_assertions)]
        store.assert_reciprocity();
    }

    #[test]
    fn no_op_when_edge_already_present() {
        let mut store = MeshStore::new(8, 8);
        let p0 = store.new_pt(Vec2::new(0.0, 0.0)).unwrap();
        let p1 = store.new_pt(Vec2::new(1.0, 0.0)).unwrap();
        let p2 = store.new_pt(Vec2::new(1.0, 1.0)).unwrap();
        let t0 = store.new_elt([p0, p1, p2]).unwrap();
        let _ = t0;
        store.constraints.insert(ConstraintEdge::new(p0, p1, 0));
        let config = Config::default();
        enforce_constraints(&mut store, &config).unwrap();
        assert!(store.has_edge(p0, p1));
    }
}
