//! Geometric predicates.
//!
//! Generalizes a `math_utils.rs` that worked in `bevy::prelude::Vec2` and
//! returned plain `bool`s, onto this crate's own `Vec2` with an explicit
//! `Orientation` tri-state so callers doing a fixed lexicographic tie-break
//! on vertex index have a degenerate case to match instead of a bool with a
//! baked-in epsilon.

use crate::data_structures::point::Vec2;

/// Below this magnitude a signed area/determinant is treated as exactly
/// zero. Chosen to match the `f32::EPSILON`-scaled tolerances used
/// throughout this module.
pub const EPSILON: f32 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

/// Twice the signed area of triangle `(a, b, c)`. Positive when `a, b, c`
/// run counter-clockwise, matching `calculate_matrix3x3_determinant`.
#[inline]
pub fn signed_area2(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).cross_product(c - a)
}

pub fn orient2d(a: Vec2, b: Vec2, c: Vec2) -> Orientation {
    let area = signed_area2(a, b, c);
    if area > EPSILON {
        Orientation::CounterClockwise
    } else if area < -EPSILON {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// True if `point` lies strictly to the right of directed edge `a -> b`.
pub fn is_point_to_the_right_of_edge(a: Vec2, b: Vec2, point: Vec2) -> bool {
    orient2d(a, b, point) == Orientation::Clockwise
}

/// True if `point` lies strictly to the left of directed edge `a -> b`.
pub fn is_point_to_the_left_of_edge(a: Vec2, b: Vec2, point: Vec2) -> bool {
    orient2d(a, b, point) == Orientation::CounterClockwise
}

/// True if `point` lies strictly inside triangle `(a, b, c)`, assumed
/// counter-clockwise. Degenerate (on-edge) points return `false`.
pub fn is_point_inside_triangle(a: Vec2, b: Vec2, c: Vec2, point: Vec2) -> bool {
    is_point_to_the_left_of_edge(a, b, point)
        && is_point_to_the_left_of_edge(b, c, point)
        && is_point_to_the_left_of_edge(c, a, point)
}

/// Like [`is_point_inside_triangle`] but also returns `true` for points
/// exactly on an edge (used by the point-location walk to decide which
/// side to step onto).
pub fn is_point_inside_or_on_triangle(a: Vec2, b: Vec2, c: Vec2, point: Vec2) -> bool {
    !is_point_to_the_right_of_edge(a, b, point)
        && !is_point_to_the_right_of_edge(b, c, point)
        && !is_point_to_the_right_of_edge(c, a, point)
}

/// In-circle test: true if `d` lies strictly inside the circumcircle of
/// counter-clockwise triangle `(a, b, c)`. Uses the standard 4x4 lifted
/// determinant (Guibas & Stolfi), matching `is_point_inside_circumcircle`
/// in spirit, generalized past `f32` cancellation by accumulating in `f64`.
pub fn is_point_inside_circumcircle(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (bx, by) = (b.x as f64, b.y as f64);
    let (cx, cy) = (c.x as f64, c.y as f64);
    let (dx, dy) = (d.x as f64, d.y as f64);

    let ax_ = ax - dx;
    let ay_ = ay - dy;
    let bx_ = bx - dx;
    let by_ = by - dy;
    let cx_ = cx - dx;
    let cy_ = cy - dy;

    let det = (ax_ * ax_ + ay_ * ay_) * (bx_ * cy_ - cx_ * by_)
        - (bx_ * bx_ + by_ * by_) * (ax_ * cy_ - cx_ * ay_)
        + (cx_ * cx_ + cy_ * cy_) * (ax_ * by_ - bx_ * ay_);

    det > EPSILON as f64
}

/// True if the quadrilateral formed by `a, b, c, d` (where `a, c` are the
/// two apex points opposite the shared diagonal `b, d`) is convex, i.e. the
/// diagonal swap `b-d` -> `a-c` is geometrically legal. Mirrors
/// `is_quadrilateral_convex`.
pub fn is_quadrilateral_convex(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    is_point_to_the_left_of_edge(a, b, c)
        && is_point_to_the_left_of_edge(b, c, d)
        && is_point_to_the_left_of_edge(c, d, a)
        && is_point_to_the_left_of_edge(d, a, b)
}

pub fn calculate_triangle_area(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    signed_area2(a, b, c).abs() * 0.5
}

/// True if segments `(p1, p2)` and `(p3, p4)` cross at an interior point of
/// both (a "proper" intersection, excluding shared endpoints and
/// collinear overlap). Used by boundary recovery to decide whether an
/// existing triangulation edge must be swapped out of the way of a
/// constraint.
pub fn segments_properly_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> bool {
    let o1 = orient2d(p1, p2, p3);
    let o2 = orient2d(p1, p2, p4);
    let o3 = orient2d(p3, p4, p1);
    let o4 = orient2d(p3, p4, p2);

    o1 != Orientation::Collinear
        && o2 != Orientation::Collinear
        && o3 != Orientation::Collinear
        && o4 != Orientation::Collinear
        && o1 != o2
        && o3 != o4
}

/// Intersection point of infinite lines through `(p1, p2)` and `(p3, p4)`,
/// or `None` if parallel.
pub fn intersection_between_lines(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<Vec2> {
    let d1 = p2 - p1;
    let d2 = p4 - p3;
    let denom = d1.cross_product(d2);
    if denom.abs() < EPSILON {
        return None;
    }
    let t = (p3 - p1).cross_product(d2) / denom;
    Some(p1 + d1 * t)
}

/// Fixed tie-break rule for degenerate predicates: lower vertex index wins.
pub fn lexicographic_tiebreak(a_index: usize, b_index: usize) -> std::cmp::Ordering {
    a_index.cmp(&b_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_of_ccw_triangle() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(1.0, 0.0);
        let c = Vec2::new(0.0, 1.0);
        assert_eq!(orient2d(a, b, c), Orientation::CounterClockwise);
        assert_eq!(orient2d(a, c, b), Orientation::Clockwise);
    }

    #[test]
    fn collinear_points_are_collinear() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(1.0, 0.0);
        let c = Vec2::new(2.0, 0.0);
        assert_eq!(orient2d(a, b, c), Orientation::Collinear);
    }

    #[test]
    fn point_inside_unit_triangle() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(4.0, 0.0);
        let c = Vec2::new(0.0, 4.0);
        assert!(is_point_inside_triangle(a, b, c, Vec2::new(1.0, 1.0)));
        assert!(!is_point_inside_triangle(a, b, c, Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn circumcircle_test_matches_unit_circle() {
        let a = Vec2::new(1.0, 0.0);
        let b = Vec2::new(-1.0, 0.0);
        let c = Vec2::new(0.0, 1.0);
        assert!(is_point_inside_circumcircle(a, b, c, Vec2::new(0.0, 0.0)));
        assert!(!is_point_inside_circumcircle(a, b, c, Vec2::new(0.0, 5.0)));
    }

    #[test]
    fn convex_quad_accepts_unit_square_split() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(1.0, 0.0);
        let c = Vec2::new(1.0, 1.0);
        let d = Vec2::new(0.0, 1.0);
        assert!(is_quadrilateral_convex(a, b, c, d));
    }

    #[test]
    fn proper_intersection_detects_crossing_diagonals() {
        let p1 = Vec2::new(0.0, 0.0);
        let p2 = Vec2::new(1.0, 1.0);
        let p3 = Vec2::new(0.0, 1.0);
        let p4 = Vec2::new(1.0, 0.0);
        assert!(segments_properly_intersect(p1, p2, p3, p4));

        let p5 = Vec2::new(2.0, 2.0);
        let p6 = Vec2::new(3.0, 3.0);
        assert!(!segments_properly_intersect(p1, p2, p5, p6));
    }
}
