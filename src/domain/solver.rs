use crate::domain::error::SolveError;
use crate::models::{Edge, Parameters, SolveReport, Vertex};

/// Common interface for vertex-cover solvers.
///
/// Both the exact MIP backend and the greedy fallback implement this; the
/// orchestrator picks one and normalizes errors into the report schema.
pub trait CoverSolver: Send + Sync {
    /// Solve one cover instance.
    ///
    /// # Arguments
    /// * `vertices` - Vertex records with cost and selection constraint
    /// * `edges` - Edge records, endpoints referencing vertex ids
    /// * `parameters` - Budget and advanced options
    ///
    /// # Returns
    /// A terminal report (optimal/suboptimal/infeasible/time_limit), or a
    /// `SolveError` when no report can be produced at all.
    fn solve(
        &self,
        vertices: &[Vertex],
        edges: &[Edge],
        parameters: &Parameters,
    ) -> Result<SolveReport, SolveError>;

    /// Solver name for logging/debugging.
    fn name(&self) -> &str;
}
