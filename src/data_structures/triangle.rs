//! The triangle record stored in the mesh arena.
//!
//! Slot `i` holds the neighbor across the edge opposite local vertex `i`
//! (the edge between `v[(i+1)%3]` and `v[(i+2)%3]`), together with the
//! neighbor's own local index for that shared edge, so reciprocity updates
//! are O(1) instead of scanning the neighbor's three slots for a match.

/// A neighbor reference: the adjacent triangle's index and which of its
/// three local edges is the shared one.
pub type AdjacentRef = Option<(usize, u8)>;

/// `base` in the original mmg2d source was overloaded: its sign meant
/// inside/outside/undetermined, and it doubled as a visitation stamp for
/// point location. That overload is untangled here: `TriangleTag` is the
/// inside/outside/undetermined classification, and the walk's visitation
/// stamp lives in `Triangle::flag`, a plain scratch slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangleTag {
    Undetermined,
    Inside,
    Outside,
}

#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// Vertex indices, counter-clockwise.
    pub vertices: [usize; 3],
    pub adjacent: [AdjacentRef; 3],
    /// Subdomain label, assigned by the subdomain marker.
    pub reference: i32,
    /// Inside/outside classification used by the unconstrained cleanup path.
    pub tag: TriangleTag,
    /// Scratch slot: a walk-generation stamp during point location, a
    /// cavity-membership marker during insertion. Never both at once.
    pub flag: i32,
}

impl Triangle {
    pub fn new(vertices: [usize; 3]) -> Self {
        Triangle {
            vertices,
            adjacent: [None, None, None],
            reference: 0,
            tag: TriangleTag::Undetermined,
            flag: 0,
        }
    }

    pub fn with_adjacent(mut self, adjacent: [AdjacentRef; 3]) -> Self {
        self.adjacent = adjacent;
        self
    }

    /// Local index (0..3) of `vertex` in this triangle, if present.
    pub fn local_index_of(&self, vertex: usize) -> Option<u8> {
        self.vertices
            .iter()
            .position(|&v| v == vertex)
            .map(|i| i as u8)
    }

    /// The two vertices of the edge opposite local vertex `i`, in
    /// `(v[(i+1)%3], v[(i+2)%3])` order.
    pub fn edge_opposite(&self, i: u8) -> (usize, usize) {
        let i = i as usize;
        (self.vertices[(i + 1) % 3], self.vertices[(i + 2) % 3])
    }
}
