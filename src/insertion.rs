//! Point insertion: cavity builder and cavity retriangulator.
//!
//! This is a deliberate departure from the more familiar `triangulate_point`
//! approach, which splits the single containing triangle into three and
//! restores the Delaunay property with a stack of pairwise diagonal swaps
//! (Sloan's algorithm). The kernel instead excavates the full cavity of
//! circumcircle-violating triangles and re-fans it from the new point in one
//! pass (Bowyer-Watson), matching the original `_MMG2_cavity`/`_MMG2_delone`
//! driver behind `MMG2_insertpointdelone`. The diagonal-swap idiom survives
//! instead in `boundary.rs`, where swapping (not cavity excavation) is in
//! fact what constraint recovery calls for.

use std::collections::HashMap;

use crate::config::{Config, RenumMode};
use crate::data_structures::mesh::MeshStore;
use crate::data_structures::point::Vec2;
use crate::data_structures::triangle::AdjacentRef;
use crate::error::MeshError;
use crate::math_utils::{is_point_inside_circumcircle, is_point_to_the_left_of_edge};
use crate::point_location;

struct Cavity {
    triangles: Vec<usize>,
    /// Ordered boundary cycle: `(u_k, w_k, outer_neighbor)` with
    /// `w_k == u_{k+1}`.
    boundary: Vec<(usize, usize, AdjacentRef)>,
}

/// Locates the triangle containing `point`, inserts it, and restores the
/// Delaunay property by cavity excavation. `hint` is any live triangle to
/// start the point-location walk from (typically the triangle the previous
/// insertion landed in). `point_index` is the caller's input-point index,
/// carried only for error diagnostics.
pub fn insert_point(
    store: &mut MeshStore,
    config: &Config,
    point: Vec2,
    hint: usize,
    point_index: usize,
) -> Result<(usize, usize), MeshError> {
    let seed = point_location::locate(store, hint, point, point_index)?;
    check_not_coincident(store, seed, point, config)?;
    let cavity = collect_cavity(store, point, seed, point_index)?;

    let new_index = store.new_pt(point)?;

    for &t in &cavity.triangles {
        store.del_elt(t);
    }

    let fan = retriangulate_cavity(store, new_index, &cavity.boundary)?;
    let landing_triangle = *fan.last().ok_or(MeshError::InternalInvariantViolated {
        detail: "cavity retriangulation produced no triangles".to_string(),
    })?;

    Ok((new_index, landing_triangle))
}

/// Near-coincidence tolerance matching the original's `numper` merge check
/// in `MMG2_mmg2d2` (squared distance `< 1e-6`).
const NEAR_COINCIDENT_SQUARED: f32 = 1e-6;

/// Rejects a point that nearly coincides with an existing vertex of its
/// containing triangle. Under `RenumMode::MergePeriodic` this is downgraded
/// from a hard error to a diagnostic, matching the original's `numper`
/// array being built but never consulted to actually merge anything (see
/// DESIGN.md): the point is still inserted as-is.
fn check_not_coincident(
    store: &MeshStore,
    seed: usize,
    point: Vec2,
    config: &Config,
) -> Result<(), MeshError> {
    let tri = store.get_triangle(seed);
    for &v in &tri.vertices {
        let existing = store.point_coord(v);
        let dx = existing.x - point.x;
        let dy = existing.y - point.y;
        if dx * dx + dy * dy < NEAR_COINCIDENT_SQUARED {
            if config.renum == RenumMode::MergePeriodic {
                log::warn!("point nearly coincides with existing point {v}; inserting anyway (renum=MergePeriodic)");
                return Ok(());
            }
            return Err(MeshError::CoincidentPoint { index: v });
        }
    }
    Ok(())
}

/// Flood-fills the in-circle cavity starting from `seed`, then audits the
/// boundary for star-shapedness from `point`: any boundary edge not seen
/// from the left by `point` means the triangle exposing that edge must be
/// evicted back out of the cavity. Repeats until the boundary is stable.
///
/// Unlike a version that protects `seed` unconditionally, any cavity
/// triangle — `seed` included — can be evicted here, matching spec.md
/// §4.D's repair rule exactly ("the offending interior triangle is
/// removed"). In the ordinary case `point` lies strictly inside `seed` by
/// construction of the point-location walk, so `seed` is never actually the
/// offender; but if eviction would ever empty the cavity (`_MMG2_cavity`
/// returning size < 1, spec.md §7's "Cavity failure" row), that is reported
/// as [`MeshError::CavityFailed`] instead of looping or underflowing.
fn collect_cavity(
    store: &MeshStore,
    point: Vec2,
    seed: usize,
    point_index: usize,
) -> Result<Cavity, MeshError> {
    let mut in_cavity = std::collections::HashSet::new();
    in_cavity.insert(seed);
    let mut stack = vec![seed];
    while let Some(t) = stack.pop() {
        let tri = store.get_triangle(t);
        for slot in tri.adjacent {
            if let Some((n, _)) = slot {
                if !in_cavity.contains(&n) {
                    let [a, b, c] = store.triangle_points(n);
                    if is_point_inside_circumcircle(a, b, c, point) {
                        in_cavity.insert(n);
                        stack.push(n);
                    }
                }
            }
        }
    }

    loop {
        let boundary = raw_boundary(store, &in_cavity);
        if boundary.is_empty() {
            return Err(MeshError::CavityFailed { point_index });
        }
        let offender = boundary.iter().find_map(|&(u, w, _, owner)| {
            let left = is_point_to_the_left_of_edge(store.point_coord(u), store.point_coord(w), point);
            if left {
                None
            } else {
                Some(owner)
            }
        });
        match offender {
            Some(owner) => {
                if in_cavity.len() == 1 {
                    return Err(MeshError::CavityFailed { point_index });
                }
                in_cavity.remove(&owner);
            }
            None => {
                let ordered = order_boundary_cycle(&boundary);
                let triangles = in_cavity.into_iter().collect();
                return Ok(Cavity {
                    triangles,
                    boundary: ordered,
                });
            }
        }
    }
}

/// Un-ordered boundary edges of the current cavity membership: one entry
/// per edge of a cavity triangle whose opposite side is outside the
/// cavity, tagged with the owning (inside) triangle.
fn raw_boundary(
    store: &MeshStore,
    in_cavity: &std::collections::HashSet<usize>,
) -> Vec<(usize, usize, AdjacentRef, usize)> {
    let mut boundary = Vec::new();
    for &t in in_cavity {
        let tri = store.get_triangle(t);
        for i in 0..3u8 {
            let outside = match tri.adjacent[i as usize] {
                Some((n, _)) => !in_cavity.contains(&n),
                None => true,
            };
            if outside {
                let (u, w) = tri.edge_opposite(i);
                boundary.push((u, w, tri.adjacent[i as usize], t));
            }
        }
    }
    boundary
}

/// Chains unordered boundary edges into the single cycle the fan builder
/// needs, by following each edge's start vertex to the next edge starting
/// where it ends.
fn order_boundary_cycle(
    boundary: &[(usize, usize, AdjacentRef, usize)],
) -> Vec<(usize, usize, AdjacentRef)> {
    let mut by_start: HashMap<usize, (usize, AdjacentRef)> = HashMap::new();
    for &(u, w, outer, _) in boundary {
        by_start.insert(u, (w, outer));
    }

    let mut ordered = Vec::with_capacity(boundary.len());
    if boundary.is_empty() {
        return ordered;
    }
    let start = boundary[0].0;
    let mut cursor = start;
    loop {
        let (w, outer) = by_start[&cursor];
        ordered.push((cursor, w, outer));
        cursor = w;
        if cursor == start {
            break;
        }
    }
    ordered
}

/// Fans `point` to every edge of the ordered cavity boundary, wiring each
/// new triangle's outward edge to the recorded outer neighbor and its two
/// inward edges to its fan siblings.
fn retriangulate_cavity(
    store: &mut MeshStore,
    point: usize,
    boundary: &[(usize, usize, AdjacentRef)],
) -> Result<Vec<usize>, MeshError> {
    let n = boundary.len();
    let mut triangles = Vec::with_capacity(n);
    for &(u, w, _) in boundary {
        triangles.push(store.new_elt([point, u, w])?);
    }

    for k in 0..n {
        let t = triangles[k];
        let next = triangles[(k + 1) % n];
        // vertices [point, u_k, w_k]: local 1 (opposite u_k) is edge
        // (w_k, point), shared with triangle_{k+1}'s local 2 (opposite
        // w_{k+1}, i.e. edge (point, u_{k+1}) = (point, w_k)).
        store.link(t, 1, Some((next, 2)));
        let (_, _, outer) = boundary[k];
        store.link(t, 0, outer);
    }

    Ok(triangles)
}
