//! The mesh store: dense arenas with free-lists for points and triangles,
//! plus the one routine allowed to mutate adjacency.
//!
//! Generalizes a plain append-only triangle `Vec` with no deletion into an
//! arena with `new_pt`/`del_pt`/`new_elt`/`del_elt`, each maintaining a
//! free-list, with geometric growth when the free-list is empty (mirroring
//! `mesh->gap` in the original `_MMG2D_POINT_REALLOC`/`_MMG2D_TRIA_REALLOC`
//! macros). Backing `Vec` growth never invalidates an index: there are no
//! direct pointers here to invalidate in the first place, only indices.

use crate::data_structures::edge::ConstraintSet;
use crate::data_structures::point::{Point, Vec2};
use crate::data_structures::triangle::{AdjacentRef, Triangle};
use crate::error::MeshError;

const GROWTH_GAP: usize = 2;

pub struct MeshStore {
    points: Vec<Point>,
    point_free: Vec<usize>,
    triangles: Vec<Option<Triangle>>,
    triangle_free: Vec<usize>,
    pub constraints: ConstraintSet,
    max_points: Option<usize>,
    max_triangles: Option<usize>,
    walk_generation: i32,
}

impl MeshStore {
    pub fn new(expected_points: usize, expected_triangles: usize) -> Self {
        MeshStore {
            points: Vec::with_capacity(expected_points),
            point_free: Vec::new(),
            triangles: Vec::with_capacity(expected_triangles),
            triangle_free: Vec::new(),
            constraints: ConstraintSet::new(),
            max_points: None,
            max_triangles: None,
            walk_generation: 0,
        }
    }

    pub fn with_memory_cap(mut self, max_points: Option<usize>, max_triangles: Option<usize>) -> Self {
        self.max_points = max_points;
        self.max_triangles = max_triangles;
        self
    }

    // ---- points ---------------------------------------------------------

    pub fn new_pt(&mut self, coord: Vec2) -> Result<usize, MeshError> {
        if let Some(idx) = self.point_free.pop() {
            self.points[idx] = Point::new(coord);
            return Ok(idx);
        }
        if let Some(cap) = self.max_points {
            if self.points.len() >= cap {
                return Err(MeshError::AllocationFailed {
                    detail: format!("point arena exhausted at capacity {cap}"),
                });
            }
        }
        if self.points.len() == self.points.capacity() {
            self.points.reserve(self.points.capacity() * GROWTH_GAP + 1);
        }
        self.points.push(Point::new(coord));
        Ok(self.points.len() - 1)
    }

    pub fn del_pt(&mut self, idx: usize) {
        self.points[idx].set_null(true);
        self.point_free.push(idx);
    }

    pub fn get_point(&self, idx: usize) -> Point {
        self.points[idx]
    }

    pub fn point_coord(&self, idx: usize) -> Vec2 {
        self.points[idx].coord
    }

    pub fn set_point_coord(&mut self, idx: usize, coord: Vec2) {
        self.points[idx].coord = coord;
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn is_point_live(&self, idx: usize) -> bool {
        !self.points[idx].is_null()
    }

    pub fn clear_null_tag(&mut self, idx: usize) {
        self.points[idx].set_null(false);
    }

    pub fn live_point_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.points.len()).filter(move |&i| self.is_point_live(i))
    }

    pub fn point_scratch(&self, idx: usize) -> Option<i32> {
        self.points[idx].scratch
    }

    pub fn set_point_scratch(&mut self, idx: usize, value: Option<i32>) {
        self.points[idx].scratch = value;
    }

    // ---- triangles --------------------------------------------------------

    pub fn new_elt(&mut self, vertices: [usize; 3]) -> Result<usize, MeshError> {
        let triangle = Triangle::new(vertices);
        if let Some(idx) = self.triangle_free.pop() {
            self.triangles[idx] = Some(triangle);
            return Ok(idx);
        }
        if let Some(cap) = self.max_triangles {
            if self.triangles.len() >= cap {
                return Err(MeshError::AllocationFailed {
                    detail: format!("triangle arena exhausted at capacity {cap}"),
                });
            }
        }
        if self.triangles.len() == self.triangles.capacity() {
            self.triangles
                .reserve(self.triangles.capacity() * GROWTH_GAP + 1);
        }
        self.triangles.push(Some(triangle));
        Ok(self.triangles.len() - 1)
    }

    pub fn del_elt(&mut self, idx: usize) {
        self.triangles[idx] = None;
        self.triangle_free.push(idx);
    }

    pub fn get_triangle(&self, idx: usize) -> Triangle {
        self.triangles[idx].expect("access to a deleted triangle slot")
    }

    pub fn get_triangle_mut(&mut self, idx: usize) -> &mut Triangle {
        self.triangles[idx]
            .as_mut()
            .expect("access to a deleted triangle slot")
    }

    pub fn is_triangle_live(&self, idx: usize) -> bool {
        self.triangles[idx].is_some()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn live_triangle_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.triangles.len()).filter(move |&i| self.is_triangle_live(i))
    }

    pub fn triangle_points(&self, idx: usize) -> [Vec2; 3] {
        let t = self.get_triangle(idx);
        [
            self.point_coord(t.vertices[0]),
            self.point_coord(t.vertices[1]),
            self.point_coord(t.vertices[2]),
        ]
    }

    /// Next walk-generation stamp, used by point location to detect cycles
    /// without overloading the inside/outside `TriangleTag`.
    pub fn next_walk_generation(&mut self) -> i32 {
        self.walk_generation += 1;
        self.walk_generation
    }

    // ---- adjacency --------------------------------------------------------

    /// The one routine allowed to mutate adjacency; it always restores
    /// reciprocity by writing both sides of the link in one call.
    pub fn link(&mut self, triangle: usize, local: u8, other: AdjacentRef) {
        self.get_triangle_mut(triangle).adjacent[local as usize] = other;
        if let Some((other_t, other_i)) = other {
            self.get_triangle_mut(other_t).adjacent[other_i as usize] = Some((triangle, local));
        }
    }

    /// Marks local edge `local` of `triangle` as a mesh boundary (no
    /// neighbor), without touching whatever used to be on the other side.
    pub fn unlink_one_side(&mut self, triangle: usize, local: u8) {
        self.get_triangle_mut(triangle).adjacent[local as usize] = None;
    }

    /// Finds the triangle holding directed edge `(a, b)` (i.e. `a` followed
    /// by `b` in CCW order) and the opposite local vertex index, if any.
    /// Mirrors `TriangleSet::find_triangle_that_contains_edge`.
    pub fn find_directed_edge(&self, a: usize, b: usize) -> Option<(usize, u8)> {
        for t in self.live_triangle_indices() {
            let tri = self.get_triangle(t);
            for i in 0..3u8 {
                let vi = tri.vertices[i as usize];
                let vj = tri.vertices[(i as usize + 1) % 3];
                if vi == a && vj == b {
                    return Some((t, (i + 2) % 3));
                }
            }
        }
        None
    }

    /// True if `(a, b)` appears as a triangle edge in either direction.
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.find_directed_edge(a, b).is_some() || self.find_directed_edge(b, a).is_some()
    }

    pub fn triangles_with_vertex(&self, vertex: usize) -> Vec<usize> {
        self.live_triangle_indices()
            .filter(|&t| self.get_triangle(t).vertices.contains(&vertex))
            .collect()
    }

    /// Debug-only invariant check, catching any adjacency or orientation
    /// violation as early as possible. Mirrors the original's `chkmsh`.
    #[cfg(debug_assertions)]
    pub fn assert_reciprocity(&self) {
        for t in self.live_triangle_indices() {
            let tri = self.get_triangle(t);
            for i in 0..3u8 {
                if let Some((nt, ni)) = tri.adjacent[i as usize] {
                    assert!(self.is_triangle_live(nt), "adjacency points at a dead triangle");
                    let neighbor = self.get_triangle(nt);
                    assert_eq!(
                        neighbor.adjacent[ni as usize],
                        Some((t, i)),
                        "adjacency reciprocity violated between {t} and {nt}"
                    );
                    let (u, w) = tri.edge_opposite(i);
                    let (nu, nw) = neighbor.edge_opposite(ni);
                    assert!(
                        (u == nu && w == nw) || (u == nw && w == nu),
                        "shared edge vertex sets disagree between {t} and {nt}"
                    );
                }
            }
        }
    }
}
