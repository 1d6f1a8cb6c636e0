pub mod greedy_solver;

#[cfg(feature = "highs-solver")]
pub mod highs_solver;

pub use greedy_solver::GreedySolver;

#[cfg(feature = "highs-solver")]
pub use highs_solver::HighsSolver;
