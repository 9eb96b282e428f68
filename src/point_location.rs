//! Point location: find the triangle containing a query point, starting
//! from a hint triangle and walking across adjacency.
//!
//! Generalizes `TriangleSet::find_triangle_that_contains_point`, which
//! walks the same way but has no cycle detection and simply trusts the
//! walk terminates. Here each walk stamps visited triangles with a
//! generation counter (`Triangle::flag`) and falls back to an exhaustive
//! scan if it revisits a triangle, guarding against a walk that never
//! terminates.

use crate::data_structures::mesh::MeshStore;
use crate::data_structures::point::Vec2;
use crate::error::MeshError;
use crate::math_utils::is_point_to_the_right_of_edge;

/// Walks from `start` towards `target`, stepping across whichever edge
/// `target` lies on the far side of. Returns the index of the triangle
/// containing (or bordering) `target`.
pub fn locate(
    store: &mut MeshStore,
    start: usize,
    target: Vec2,
    point_index: usize,
) -> Result<usize, MeshError> {
    let generation = store.next_walk_generation();
    let mut current = start;

    loop {
        store.get_triangle_mut(current).flag = generation;
        let tri = store.get_triangle(current);
        let [a, b, c] = [
            store.point_coord(tri.vertices[0]),
            store.point_coord(tri.vertices[1]),
            store.point_coord(tri.vertices[2]),
        ];

        let edges = [(a, b, 2u8), (b, c, 0u8), (c, a, 1u8)];
        let mut stepped = false;
        for (p, q, opposite_local) in edges {
            if is_point_to_the_right_of_edge(p, q, target) {
                match tri.adjacent[opposite_local as usize] {
                    Some((neighbor, _)) => {
                        if store.get_triangle(neighbor).flag == generation {
                            return exhaustive_locate(store, target)
                                .ok_or(MeshError::PointLocationFailed { point_index });
                        }
                        current = neighbor;
                        stepped = true;
                        break;
                    }
                    None => {
                        return exhaustive_locate(store, target)
                            .ok_or(MeshError::PointLocationFailed { point_index });
                    }
                }
            }
        }

        if !stepped {
            return Ok(current);
        }
    }
}

/// Linear scan over every live triangle, used when the directed walk
/// cycles or falls off the mesh. O(n) but only ever invoked as a recovery
/// path, never on the hot path.
pub fn exhaustive_locate(store: &MeshStore, target: Vec2) -> Option<usize> {
    use crate::math_utils::is_point_inside_or_on_triangle;

    store.live_triangle_indices().find(|&t| {
        let [a, b, c] = store.triangle_points(t);
        is_point_inside_or_on_triangle(a, b, c, target)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::point::Vec2;

    fn two_triangle_square(store: &mut MeshStore) -> (usize, usize) {
        let p0 = store.new_pt(Vec2::new(0.0, 0.0)).unwrap();
        let p1 = store.new_pt(Vec2::new(1.0, 0.0)).unwrap();
        let p2 = store.new_pt(Vec2::new(1.0, 1.0)).unwrap();
        let p3 = store.new_pt(Vec2::new(0.0, 1.0)).unwrap();

        let t0 = store.new_elt([p0, p1, p2]).unwrap();
        let t1 = store.new_elt([p0, p2, p3]).unwrap();
        store.link(t0, 0, Some((t1, 1)));
        (t0, t1)
    }

    #[test]
    fn locate_finds_point_in_starting_triangle() {
        let mut store = MeshStore::new(8, 8);
        let (t0, _t1) = two_triangle_square(&mut store);
        let found = locate(&mut store, t0, Vec2::new(0.75, 0.25), 0).unwrap();
        assert_eq!(found, t0);
    }

    #[test]
    fn locate_steps_across_shared_edge() {
        let mut store = MeshStore::new(8, 8);
        let (t0, t1) = two_triangle_square(&mut store);
        let found = locate(&mut store, t0, Vec2::new(0.25, 0.75), 0).unwrap();
        assert_eq!(found, t1);
    }
}
