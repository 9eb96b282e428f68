//! Bounding-box seed (spec.md 4.F).
//!
//! Grounded in `MMG2_mmg2d2`'s four corner-point creation calls and the two
//! seed triangles sharing the box diagonal. The corners sit half a unit
//! outside the normalized point cloud so that every input point, after
//! normalization, is strictly interior to the seed quadrilateral.

use crate::data_structures::mesh::MeshStore;
use crate::data_structures::point::Vec2;
use crate::error::MeshError;

const MARGIN: f32 = 0.5;

/// The four bounding-box corner point indices, in insertion order:
/// bottom-left, bottom-right, top-right, top-left.
pub struct BoundingBox {
    pub corners: [usize; 4],
    pub triangles: [usize; 2],
}

/// Seeds `store` with a bounding quadrilateral enclosing `[0, width] x
/// [0, height]` (the normalized working box) and two triangles sharing its
/// diagonal, matching the original's `(-0.5,-0.5)`, `(-0.5, H+0.5)`,
/// `(W+0.5, -0.5)`, `(W+0.5, H+0.5)` corners.
pub fn seed(store: &mut MeshStore, width: f32, height: f32) -> Result<BoundingBox, MeshError> {
    let bl = store.new_pt(Vec2::new(-MARGIN, -MARGIN))?;
    let br = store.new_pt(Vec2::new(width + MARGIN, -MARGIN))?;
    let tr = store.new_pt(Vec2::new(width + MARGIN, height + MARGIN))?;
    let tl = store.new_pt(Vec2::new(-MARGIN, height + MARGIN))?;

    // Diagonal bl-tr splits the box into two counter-clockwise triangles.
    let t0 = store.new_elt([bl, br, tr])?;
    let t1 = store.new_elt([bl, tr, tl])?;

    // t0's edge opposite bl (local 0) is br-tr, a true mesh boundary.
    // t0's edge opposite tr (local 2) is bl-br, a true mesh boundary.
    // t0's edge opposite br (local 1) is tr-bl, shared with t1's bl-tr edge
    // (t1's edge opposite tl, local 2).
    store.link(t0, 1, Some((t1, 2)));

    Ok(BoundingBox {
        corners: [bl, br, tr, tl],
        triangles: [t0, t1],
    })
}
