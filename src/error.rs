//! Kernel error type: one variant per failure mode.
//!
//! `CustomError` in the original `data_structures/error.rs` was a single
//! unit struct with a `String` message, raised from half a dozen unrelated
//! call sites. This replaces it with one variant per failure mode so
//! callers can match on the kind rather than parse a message.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    #[error("no input points supplied")]
    EmptyInput,

    #[error("all input points are collinear; no triangle can be formed")]
    DegenerateInput,

    #[error("incoming point coincides exactly with existing point {index}")]
    CoincidentPoint { index: usize },

    #[error("constraint edge {edge_index} references out-of-range point {point_index}")]
    InvalidEdgeReference { edge_index: usize, point_index: usize },

    #[error("input constraint edges ({a0}, {a1}) and ({b0}, {b1}) cross properly")]
    CrossingConstraints {
        a0: usize,
        a1: usize,
        b0: usize,
        b1: usize,
    },

    #[error("point location for input point {point_index} did not converge to a containing triangle")]
    PointLocationFailed { point_index: usize },

    #[error("cavity for input point {point_index} collapsed to empty before a star-shaped boundary could be found")]
    CavityFailed { point_index: usize },

    #[error("could not recover constraint edge ({a}, {b}) within the swap budget")]
    EnforcementFailed { a: usize, b: usize },

    #[error("{detail}")]
    AllocationFailed { detail: String },

    #[error("internal invariant violated: {detail}")]
    InternalInvariantViolated { detail: String },
}
