//! Point normalization: scale input coordinates into a canonical working
//! box before triangulating, then map the mesh back to the caller's
//! original coordinate space. Keeps geometric predicates working at a
//! consistent scale regardless of the input's absolute magnitude, mirroring
//! the teacher's `normalize.rs` (`Bounds { min, max }` + `normalize_points`).

use crate::data_structures::point::Vec2;

#[derive(Debug, Clone, Copy)]
pub struct Normalization {
    min: Vec2,
    scale: f32,
    pub working_width: f32,
    pub working_height: f32,
}

/// Scales `points` so the larger of the input's width/height maps to 1.0,
/// preserving aspect ratio, with the smaller dimension scaled proportionally.
pub fn normalize(points: &[Vec2]) -> (Vec<Vec2>, Normalization) {
    let mut min_x = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    let span_x = max_x - min_x;
    let span_y = max_y - min_y;
    let scale = span_x.max(span_y).max(f32::EPSILON);
    let min = Vec2::new(min_x, min_y);

    let normalized = points
        .iter()
        .map(|&p| (p - min) / scale)
        .collect();

    let normalization = Normalization {
        min,
        scale,
        working_width: span_x / scale,
        working_height: span_y / scale,
    };

    (normalized, normalization)
}

pub fn denormalize(point: Vec2, normalization: &Normalization) -> Vec2 {
    point * normalization.scale + normalization.min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_normalize_and_denormalize() {
        let points = vec![
            Vec2::new(10.0, 20.0),
            Vec2::new(110.0, 20.0),
            Vec2::new(60.0, 120.0),
        ];
        let (normalized, normalization) = normalize(&points);
        for (original, n) in points.iter().zip(normalized.iter()) {
            let back = denormalize(*n, &normalization);
            assert!((back.x - original.x).abs() < 1e-3);
            assert!((back.y - original.y).abs() < 1e-3);
        }
    }

    #[test]
    fn working_box_has_unit_longest_side() {
        let points = vec![Vec2::new(0.0, 0.0), Vec2::new(200.0, 50.0)];
        let (_normalized, normalization) = normalize(&points);
        assert!((normalization.working_width - 1.0).abs() < 1e-6);
        assert!(normalization.working_height < 1.0);
    }
}
