use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use crate::domain::error::SolveError;
use crate::domain::solver::CoverSolver;
use crate::domain::solver_factory::{exact_solver, fallback_solver};
use crate::models::{Edge, GraphInstance, Parameters, SolveReport, Vertex};

/// Coarse progress milestones, matching the percentages the display layer
/// animates. Purely informational; solvers never depend on the callback.
const PROGRESS_INIT: u8 = 10;
const PROGRESS_MODELING: u8 = 30;
const PROGRESS_SOLVED: u8 = 90;
const PROGRESS_DONE: u8 = 100;

/// Run one solver with a panic barrier. A panic inside solver logic is an
/// internal fault, reported like any other error rather than unwinding into
/// the caller.
fn run_guarded(
    solver: &dyn CoverSolver,
    vertices: &[Vertex],
    edges: &[Edge],
    parameters: &Parameters,
) -> Result<SolveReport, SolveError> {
    match catch_unwind(AssertUnwindSafe(|| {
        solver.solve(vertices, edges, parameters)
    })) {
        Ok(result) => result,
        Err(payload) => {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(SolveError::InternalFault(format!(
                "{} solver panicked: {}",
                solver.name(),
                detail
            )))
        }
    }
}

/// Solve one instance, preferring the exact engine and falling back to the
/// greedy heuristic when no engine is compiled in. Every outcome, including
/// engine faults and panics, comes back as a `SolveReport`; nothing
/// propagates to the caller.
pub fn solve_instance(
    vertices: &[Vertex],
    edges: &[Edge],
    parameters: &Parameters,
    mut progress: impl FnMut(u8, &str),
) -> SolveReport {
    let start = Instant::now();
    progress(PROGRESS_INIT, "Initializing");

    let outcome = match exact_solver() {
        Some(solver) => {
            progress(
                PROGRESS_MODELING,
                &format!("Building exact model ({})", solver.name()),
            );
            log::info!("solving with exact backend {}", solver.name());
            match run_guarded(solver.as_ref(), vertices, edges, parameters) {
                Err(SolveError::EngineUnavailable(reason)) => {
                    // Availability failure, not a solve failure: substitute
                    // the fallback strategy and disclose it.
                    log::warn!("exact engine unavailable ({}), falling back", reason);
                    progress(PROGRESS_MODELING, "Exact engine unavailable; using greedy fallback");
                    run_fallback(vertices, edges, parameters)
                }
                other => other,
            }
        }
        None => {
            progress(
                PROGRESS_MODELING,
                "Exact engine not built in; using greedy fallback",
            );
            log::info!("no exact backend compiled in, using greedy fallback");
            run_fallback(vertices, edges, parameters)
        }
    };

    let report = match outcome {
        Ok(report) => report,
        Err(error) => {
            log::error!("solve failed: {}", error);
            SolveReport::error(error.to_string(), start.elapsed().as_secs_f64())
        }
    };

    progress(PROGRESS_SOLVED, "Solve finished");
    progress(PROGRESS_DONE, "Done");
    report
}

fn run_fallback(
    vertices: &[Vertex],
    edges: &[Edge],
    parameters: &Parameters,
) -> Result<SolveReport, SolveError> {
    let solver = fallback_solver();
    let mut report = run_guarded(solver.as_ref(), vertices, edges, parameters)?;
    report
        .message
        .push_str(" - exact engine unavailable, greedy fallback used");
    Ok(report)
}

/// Convenience wrapper for callers without a progress sink.
pub fn solve(instance: &GraphInstance, parameters: &Parameters) -> SolveReport {
    solve_instance(&instance.vertices, &instance.edges, parameters, |_, _| {})
}
