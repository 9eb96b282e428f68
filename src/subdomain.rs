//! Subdomain classification.
//!
//! Grounded directly in `MMG2_markSD`'s flood fill: a worklist walk over
//! triangle adjacency that stops at constraint edges and stamps each
//! connected component with an increasing `reference`. The original's
//! membership test for "is this edge a constraint" is flagged
//! `WARNING: exhaustive search among edges, to be optimized with a hashing
//! structure`; here it is the `HashSet`-backed `ConstraintSet::contains`
//! from `data_structures/edge.rs`.
//!
//! When no constraint edges exist at all, `MMG2_mmg2d2` instead calls
//! `MMG2_settagtriangles`/`MMG2_findtrianglestate`, which tags every
//! triangle inside/outside by bounding-box-corner incidence rather than by
//! flood fill. That alternate path is `tag_by_bbox_incidence` below,
//! selected automatically by `classify` when there are no constraints.

use std::collections::HashSet;

use crate::data_structures::mesh::MeshStore;
use crate::data_structures::triangle::TriangleTag;

/// Matches the original's `findtrianglestate` retry count: triangles left
/// undetermined after this many propagation passes are logged and folded
/// into the interior.
const MAX_ITER: usize = 3;

/// Classifies every live triangle, choosing the flood-fill path when
/// constraints are present and the bounding-box-incidence path otherwise.
pub fn classify(store: &mut MeshStore, bbox_corners: [usize; 4]) {
    if store.constraints.is_empty() {
        tag_by_bbox_incidence(store, bbox_corners);
    } else {
        flood_fill_subdomains(store);
    }
}

/// Assigns an increasing `reference` to each maximal region of triangles
/// reachable from one another without crossing a constraint edge.
pub fn flood_fill_subdomains(store: &mut MeshStore) {
    let mut visited: HashSet<usize> = HashSet::new();
    let mut next_reference = 1i32;

    let all: Vec<usize> = store.live_triangle_indices().collect();
    for start in all {
        if visited.contains(&start) {
            continue;
        }
        visited.insert(start);
        let mut stack = vec![start];
        while let Some(t) = stack.pop() {
            store.get_triangle_mut(t).reference = next_reference;
            let tri = store.get_triangle(t);
            for i in 0..3u8 {
                let Some((n, _)) = tri.adjacent[i as usize] else {
                    continue;
                };
                if visited.contains(&n) {
                    continue;
                }
                let (u, w) = tri.edge_opposite(i);
                if store.constraints.contains(u, w) {
                    continue;
                }
                visited.insert(n);
                stack.push(n);
            }
        }
        next_reference += 1;
    }

    log::debug!("subdomain flood fill produced {} region(s)", next_reference - 1);
}

/// Tags every triangle touching a bounding-box corner as `Outside`, then
/// propagates the classification inward for up to `MAX_ITER` passes,
/// copying a resolved neighbor's tag onto each still-`Undetermined`
/// triangle. Anything left undetermined after `MAX_ITER` passes is folded
/// into `Inside` with a warning, matching the original's behavior of
/// proceeding rather than failing outright.
pub fn tag_by_bbox_incidence(store: &mut MeshStore, corners: [usize; 4]) {
    let corner_set: HashSet<usize> = corners.into_iter().collect();

    let all: Vec<usize> = store.live_triangle_indices().collect();
    for &t in &all {
        let touches_corner = store
            .get_triangle(t)
            .vertices
            .iter()
            .any(|v| corner_set.contains(v));
        store.get_triangle_mut(t).tag = if touches_corner {
            TriangleTag::Outside
        } else {
            TriangleTag::Undetermined
        };
    }

    for _ in 0..MAX_ITER {
        let mut remaining = 0usize;
        for &t in &all {
            if store.get_triangle(t).tag != TriangleTag::Undetermined {
                continue;
            }
            let tri = store.get_triangle(t);
            let resolved_neighbor_tag = tri.adjacent.iter().find_map(|slot| {
                let (n, _) = (*slot)?;
                let ntag = store.get_triangle(n).tag;
                (ntag != TriangleTag::Undetermined).then_some(ntag)
            });
            match resolved_neighbor_tag {
                Some(TriangleTag::Outside) => {
                    store.get_triangle_mut(t).tag = TriangleTag::Inside;
                }
                Some(TriangleTag::Inside) => {
                    store.get_triangle_mut(t).tag = TriangleTag::Inside;
                }
                _ => remaining += 1,
            }
        }
        if remaining == 0 {
            break;
        }
    }

    for &t in &all {
        if store.get_triangle(t).tag == TriangleTag::Undetermined {
            log::warn!("triangle {t} remained undetermined after {MAX_ITER} passes; defaulting to inside");
            store.get_triangle_mut(t).tag = TriangleTag::Inside;
        }
    }

    // Every triangle must carry a positive `reference` after subdomain
    // marking (spec.md §3). The bbox-incidence path only ever produces a
    // single interior subdomain, so every `Inside` triangle gets `ref = 1`;
    // `Outside` (bounding-box layer) triangles are removed by `cleanup`
    // regardless, so their `reference` is left at the `Triangle::new`
    // default.
    for &t in &all {
        if store.get_triangle(t).tag == TriangleTag::Inside {
            store.get_triangle_mut(t).reference = 1;
        }
    }
}
