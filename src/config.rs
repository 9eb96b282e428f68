//! Kernel configuration.
//!
//! CLI parsing that would populate this struct is out of scope; callers
//! build one directly.

/// What to do with triangle subdomain references during cleanup, mirroring
/// `mesh->info.renum` in the original driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenumMode {
    /// Keep every subdomain (the original's `renum == 0`).
    #[default]
    None,
    /// Retain only the triangles belonging to the given subdomain id after
    /// classification, discarding the rest (`MMG2_markSD`'s `renum - 1`
    /// decrement-and-filter behavior for a positive `renum`).
    Retain(i32),
    /// The original's `renum == -10` periodic-merge path: near-coincident
    /// points (squared distance `< 1e-6`) are detected and logged as a
    /// diagnostic but the mesh is not altered, matching the original's
    /// `numper` array being built but never consulted. See DESIGN.md.
    MergePeriodic,
}

#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub renum: RenumMode,
    /// Enables verbose `log::debug!`/`log::trace!` output from the kernel.
    /// Does not itself install a logger; pair with `env_logger` or similar.
    pub ddebug: bool,
    /// Hard cap on the point arena. `None` means unbounded (growth limited
    /// only by available memory).
    pub max_points: Option<usize>,
    /// Hard cap on the triangle arena.
    pub max_triangles: Option<usize>,
    /// The boundary enforcer's swap budget for a single constraint edge is
    /// this many swaps per initial crossing, not a flat cap — spec.md §4.G
    /// requires the budget be "proportional to the initial number of
    /// crossings." `recover_edge` multiplies this by the crossing count it
    /// computes for that specific edge.
    pub swap_budget_factor: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            renum: RenumMode::None,
            ddebug: false,
            max_points: None,
            max_triangles: None,
            swap_budget_factor: 8,
        }
    }
}
