use thiserror::Error;

/// Faults a solver can raise past its modeling code. Infeasibility and time
/// limits are terminal report statuses, not errors; these variants cover the
/// cases where no meaningful report can be built.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The exact engine is not compiled in. The orchestrator treats this as
    /// a signal to fall back to the greedy solver, not as a user-facing
    /// failure.
    #[error("exact engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The engine is present but failed internally (model load, solve
    /// fault). Surfaced as an `error` report; falling back would hide a
    /// configuration problem.
    #[error("exact engine fault: {0}")]
    EngineFault(String),

    /// Malformed input reached the solver despite upstream validation.
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    /// Unexpected fault in the solver's own logic (including a caught
    /// panic).
    #[error("internal solver fault: {0}")]
    InternalFault(String),
}
