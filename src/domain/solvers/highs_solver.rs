use std::collections::HashSet;
use std::time::Instant;

use highs::{ColProblem, HighsModelStatus, Sense};

use crate::domain::error::SolveError;
use crate::domain::report::assemble_report;
use crate::domain::solver::CoverSolver;
use crate::domain::validate::{validate_instance, validate_parameters};
use crate::models::{Edge, Parameters, SolveReport, SolveStatus, Vertex, VertexKind};

/// Wall-clock limit on the branch-and-bound search, in seconds.
const DEFAULT_TIME_LIMIT: f64 = 30.0;

/// Binary variables are reported with floating noise; anything past this
/// threshold counts as selected.
const SELECTION_THRESHOLD: f64 = 0.5;

const BUDGET_TOLERANCE: f64 = 1e-6;

/// Exact 0/1 integer-programming backend on the HiGHS engine.
///
/// One binary column per vertex (mandatory fixed to 1, forbidden to 0), one
/// covering row per edge (`>= 2` when critical), plus optional budget and
/// redundancy rows.
pub struct HighsSolver {
    time_limit: f64,
}

impl HighsSolver {
    pub fn new() -> Self {
        HighsSolver {
            time_limit: DEFAULT_TIME_LIMIT,
        }
    }

    pub fn with_time_limit(time_limit: f64) -> Self {
        HighsSolver { time_limit }
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        HighsSolver::new()
    }
}

/// Map solved column values back to vertex ids, tolerant of binary rounding
/// noise.
fn selected_from_values(vertices: &[Vertex], values: &[f64]) -> HashSet<String> {
    let mut selected = HashSet::new();
    for (vi, vertex) in vertices.iter().enumerate() {
        let value = values.get(vi).copied().unwrap_or(0.0);
        if value > SELECTION_THRESHOLD {
            selected.insert(vertex.id.clone());
        }
    }
    selected
}

/// Hard-constraint check for a candidate selection. Used to decide whether a
/// time-limited solve produced a usable incumbent: the safe engine API hands
/// back column values for any terminal status, so the values are only
/// trusted after passing this.
fn selection_satisfies(
    vertices: &[Vertex],
    edges: &[Edge],
    parameters: &Parameters,
    selected: &HashSet<String>,
) -> bool {
    for vertex in vertices {
        let picked = selected.contains(&vertex.id);
        match vertex.kind {
            VertexKind::Mandatory if !picked => return false,
            VertexKind::Forbidden if picked => return false,
            _ => {}
        }
    }

    let redundancy = if parameters.advanced.min_cover {
        parameters.advanced.redundancy as usize
    } else {
        1
    };
    for edge in edges {
        let endpoints_in = usize::from(selected.contains(&edge.from))
            + usize::from(selected.contains(&edge.to));
        let required = if edge.critical {
            redundancy.max(2)
        } else {
            redundancy.max(1)
        };
        if endpoints_in < required {
            return false;
        }
    }

    if let Some(budget) = parameters.effective_budget() {
        let total: f64 = vertices
            .iter()
            .filter(|v| selected.contains(&v.id))
            .map(|v| v.cost)
            .sum();
        if total > budget + BUDGET_TOLERANCE {
            return false;
        }
    }

    true
}

impl CoverSolver for HighsSolver {
    fn solve(
        &self,
        vertices: &[Vertex],
        edges: &[Edge],
        parameters: &Parameters,
    ) -> Result<SolveReport, SolveError> {
        let start = Instant::now();
        validate_instance(vertices, edges)?;
        validate_parameters(parameters)?;

        if vertices.is_empty() {
            return Ok(assemble_report(
                vertices,
                edges,
                &HashSet::new(),
                SolveStatus::Optimal,
                Some(0.0),
                start.elapsed().as_secs_f64(),
                "Empty instance; nothing to select".to_string(),
            ));
        }

        let mut problem = ColProblem::new();

        // Rows first (ColProblem convention), columns reference them below.
        // One covering row per edge: >= 1 ordinary, >= 2 critical.
        let mut edge_rows = Vec::with_capacity(edges.len());
        for edge in edges {
            let required = if edge.critical { 2.0 } else { 1.0 };
            edge_rows.push(problem.add_row(required..));
        }

        // Redundancy rows apply to every edge, critical or not. Redundancy
        // above 2 cannot be met by two endpoints and solves to infeasible.
        let mut redundancy_rows = Vec::new();
        if parameters.advanced.min_cover {
            let redundancy = parameters.advanced.redundancy as f64;
            for _ in edges {
                redundancy_rows.push(problem.add_row(redundancy..));
            }
        }

        let budget_row = parameters.effective_budget().map(|b| problem.add_row(..=b));

        // Collect each column's row entries in one pass over the edges.
        let index: std::collections::HashMap<&str, usize> = vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (v.id.as_str(), i))
            .collect();
        let mut col_factors: Vec<Vec<(highs::Row, f64)>> = vec![Vec::new(); vertices.len()];
        for (ei, edge) in edges.iter().enumerate() {
            for endpoint in [&edge.from, &edge.to] {
                let vi = index[endpoint.as_str()];
                col_factors[vi].push((edge_rows[ei], 1.0));
                if let Some(row) = redundancy_rows.get(ei) {
                    col_factors[vi].push((*row, 1.0));
                }
            }
        }

        // One binary column per vertex; kind is encoded in the bounds.
        for (vi, vertex) in vertices.iter().enumerate() {
            let (lower, upper) = match vertex.kind {
                VertexKind::Normal => (0.0, 1.0),
                VertexKind::Mandatory => (1.0, 1.0),
                VertexKind::Forbidden => (0.0, 0.0),
            };
            if let Some(row) = budget_row {
                col_factors[vi].push((row, vertex.cost));
            }
            problem.add_integer_column(vertex.cost, lower..=upper, &col_factors[vi]);
        }

        log::debug!(
            "exact model: {} columns, {} edge rows, budget row: {}",
            vertices.len(),
            edges.len(),
            budget_row.is_some()
        );

        let mut model = problem.optimise(Sense::Minimise);
        model.set_option("output_flag", false);
        model.set_option("time_limit", self.time_limit);

        let solved = model.solve();
        let solve_time = start.elapsed().as_secs_f64();

        match solved.status() {
            HighsModelStatus::Optimal => {
                let solution = solved.get_solution();
                let selected = selected_from_values(vertices, solution.columns());
                Ok(assemble_report(
                    vertices,
                    edges,
                    &selected,
                    SolveStatus::Optimal,
                    Some(0.0),
                    solve_time,
                    "Optimal solution found by HiGHS (gap: 0.00%)".to_string(),
                ))
            }
            HighsModelStatus::Infeasible => Ok(SolveReport::empty(
                SolveStatus::Infeasible,
                "No selection satisfies the given constraints. \
                 Try raising the budget or relaxing mandatory/forbidden vertices.",
                solve_time,
            )),
            HighsModelStatus::ReachedTimeLimit => {
                let solution = solved.get_solution();
                let selected = selected_from_values(vertices, solution.columns());
                if selection_satisfies(vertices, edges, parameters, &selected) {
                    Ok(assemble_report(
                        vertices,
                        edges,
                        &selected,
                        SolveStatus::Suboptimal,
                        None,
                        solve_time,
                        "Feasible solution found (time limit reached); \
                         optimality not proven"
                            .to_string(),
                    ))
                } else {
                    Ok(SolveReport::empty(
                        SolveStatus::TimeLimit,
                        "Time limit reached with no feasible solution",
                        solve_time,
                    ))
                }
            }
            status => Err(SolveError::EngineFault(format!(
                "HiGHS terminated with unexpected status {:?}",
                status
            ))),
        }
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}
