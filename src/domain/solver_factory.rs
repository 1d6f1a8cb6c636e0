use crate::domain::solver::CoverSolver;
use crate::domain::solvers::GreedySolver;

#[cfg(feature = "highs-solver")]
use crate::domain::solvers::HighsSolver;

/// Explicit engine-availability check: `Some` when an exact MIP backend is
/// compiled in, `None` otherwise. The orchestrator substitutes the greedy
/// strategy on `None`; any fault from a constructed solver is a different
/// failure and is not retried.
pub fn exact_solver() -> Option<Box<dyn CoverSolver>> {
    #[cfg(feature = "highs-solver")]
    {
        Some(Box::new(HighsSolver::new()))
    }
    #[cfg(not(feature = "highs-solver"))]
    {
        None
    }
}

/// The always-available fallback strategy.
pub fn fallback_solver() -> Box<dyn CoverSolver> {
    Box::new(GreedySolver::new())
}
