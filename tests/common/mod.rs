//! Shared assertions for the universal mesh invariants of spec.md §8, used
//! by both `tests/invariants.rs` and `tests/scenarios.rs`.

use cdt::math_utils::{is_point_inside_circumcircle, orient2d, signed_area2, Orientation};
use cdt::MeshOutput;

pub fn assert_mesh_invariants(mesh: &MeshOutput) {
    for (t, vertices) in mesh.triangles.iter().enumerate() {
        for &v in vertices {
            assert!(
                v < mesh.points.len(),
                "triangle {t} references out-of-range point {v}"
            );
        }

        let [a, b, c] = vertices.map(|v| mesh.points[v]);
        assert_ne!(
            orient2d(a, b, c),
            Orientation::Clockwise,
            "triangle {t} is not counter-clockwise"
        );
        assert!(
            signed_area2(a, b, c).abs() > 0.0,
            "triangle {t} is degenerate (zero area)"
        );
    }

    for (t, adj) in mesh.adjacency.iter().enumerate() {
        for (local, slot) in adj.iter().enumerate() {
            if let Some((n, n_local)) = *slot {
                assert!(
                    n < mesh.triangles.len(),
                    "triangle {t} links to out-of-range triangle {n}"
                );
                let back = mesh.adjacency[n][n_local as usize];
                assert_eq!(
                    back,
                    Some((t, local as u8)),
                    "adjacency not reciprocal between triangle {t} and {n}"
                );
            }
        }
    }

    for &(a, b, _reference) in &mesh.edges {
        let present = mesh.triangles.iter().any(|t| t.contains(&a) && t.contains(&b));
        assert!(present, "constraint edge ({a}, {b}) missing from triangulation");
    }
}

/// Empty-circumcircle check (spec.md §8: "for every live triangle `t` and
/// every other point `p`..., `inCircle(...) <= 0`"). Only valid for a mesh
/// with no constraint edges: spec.md §4.G is explicit that boundary
/// recovery "breaks the Delaunay property locally along constraints; that
/// is expected for constrained Delaunay triangulations," so callers must
/// not use this on a mesh built with constraints.
pub fn assert_delaunay_property(mesh: &MeshOutput) {
    assert!(
        mesh.edges.is_empty(),
        "assert_delaunay_property only applies to unconstrained meshes"
    );
    for (t, vertices) in mesh.triangles.iter().enumerate() {
        let [a, b, c] = vertices.map(|v| mesh.points[v]);
        for (p_index, &p) in mesh.points.iter().enumerate() {
            if vertices.contains(&p_index) {
                continue;
            }
            assert!(
                !is_point_inside_circumcircle(a, b, c, p),
                "point {p_index} lies inside the circumcircle of triangle {t}"
            );
        }
    }
}
