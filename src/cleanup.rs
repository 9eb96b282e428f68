//! Final cleanup pass (spec.md 4.I).
//!
//! Grounded in `MMG2_removeBBtriangles` (deleting every triangle incident
//! to a bounding-box corner, together with the corners themselves) and the
//! tail of `MMG2_markSD` (pruning vertices and edges the removal orphaned,
//! plus the optional single-subdomain retention driven by `renum`).

use std::collections::HashSet;

use crate::config::{Config, RenumMode};
use crate::data_structures::mesh::MeshStore;

pub fn cleanup(store: &mut MeshStore, bbox_corners: [usize; 4], config: &Config) {
    remove_bbox_triangles(store, bbox_corners);
    if let RenumMode::Retain(keep_id) = config.renum {
        retain_subdomain(store, keep_id);
    }
    prune_orphan_points(store);
    prune_dead_constraints(store);
}

/// Deletes every triangle touching one of the four bounding-box corners,
/// then the corners themselves. Neighbors of a doomed triangle that
/// survive have their adjacency slot cleared to `None`, becoming the
/// mesh's true outer boundary.
fn remove_bbox_triangles(store: &mut MeshStore, corners: [usize; 4]) {
    let corner_set: HashSet<usize> = corners.into_iter().collect();
    let doomed: Vec<usize> = store
        .live_triangle_indices()
        .filter(|&t| {
            store
                .get_triangle(t)
                .vertices
                .iter()
                .any(|v| corner_set.contains(v))
        })
        .collect();

    unlink_and_delete(store, &doomed);

    for corner in corners {
        store.del_pt(corner);
    }

    log::debug!("cleanup removed {} bounding-box triangle(s)", doomed.len());
}

/// Keeps only the triangles whose `reference`, decremented by one, equals
/// `keep_id` (`MMG2_markSD`'s behavior for a positive `renum`), deleting
/// the rest.
fn retain_subdomain(store: &mut MeshStore, keep_id: i32) {
    let doomed: Vec<usize> = store
        .live_triangle_indices()
        .filter(|&t| store.get_triangle(t).reference - 1 != keep_id)
        .collect();
    unlink_and_delete(store, &doomed);
}

fn unlink_and_delete(store: &mut MeshStore, doomed: &[usize]) {
    for &t in doomed {
        let tri = store.get_triangle(t);
        for i in 0..3u8 {
            if let Some((n, ni)) = tri.adjacent[i as usize] {
                if store.is_triangle_live(n) {
                    store.unlink_one_side(n, ni);
                }
            }
        }
        store.del_elt(t);
    }
}

/// Deletes any point no longer referenced by a live triangle.
fn prune_orphan_points(store: &mut MeshStore) {
    let mut referenced = vec![false; store.point_count()];
    for t in store.live_triangle_indices() {
        for v in store.get_triangle(t).vertices {
            referenced[v] = true;
        }
    }
    for i in 0..store.point_count() {
        if store.is_point_live(i) && !referenced[i] {
            store.del_pt(i);
        }
    }
}

/// Drops constraint edges incident to a now-deleted vertex.
fn prune_dead_constraints(store: &mut MeshStore) {
    let alive: Vec<bool> = (0..store.point_count()).map(|i| store.is_point_live(i)).collect();
    store.constraints.retain_live(move |v| alive[v]);
}
