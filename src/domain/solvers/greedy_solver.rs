use std::cmp::Ordering;
use std::collections::HashSet;
use std::time::Instant;

use crate::domain::error::SolveError;
use crate::domain::report::assemble_report;
use crate::domain::solver::CoverSolver;
use crate::domain::validate::{validate_instance, validate_parameters};
use crate::models::{Edge, Parameters, SolveReport, SolveStatus, Vertex, VertexKind};

/// Weighted greedy cover heuristic, used when no exact engine is compiled
/// in. Deterministic for a given input ordering and free of any engine
/// dependency.
///
/// Pipeline: mandatory seed, benefit/cost greedy loop, single-pass budget
/// trim, critical-edge repair. Critical coverage outranks the budget: the
/// repair step may push the final cost back over a budget the trim step just
/// enforced.
pub struct GreedySolver;

impl GreedySolver {
    pub fn new() -> Self {
        GreedySolver
    }
}

impl Default for GreedySolver {
    fn default() -> Self {
        GreedySolver::new()
    }
}

/// Edge weight in the benefit score; critical edges count double.
fn edge_weight(edge: &Edge) -> u64 {
    if edge.critical {
        2
    } else {
        1
    }
}

impl CoverSolver for GreedySolver {
    fn solve(
        &self,
        vertices: &[Vertex],
        edges: &[Edge],
        parameters: &Parameters,
    ) -> Result<SolveReport, SolveError> {
        let start = Instant::now();
        validate_instance(vertices, edges)?;
        validate_parameters(parameters)?;

        let kind_of = |id: &str| -> VertexKind {
            vertices
                .iter()
                .find(|v| v.id == id)
                .map(|v| v.kind)
                .unwrap_or(VertexKind::Normal)
        };

        // Seed with mandatory vertices; forbidden ones never enter.
        let mut selected: HashSet<String> = vertices
            .iter()
            .filter(|v| v.kind == VertexKind::Mandatory)
            .map(|v| v.id.clone())
            .collect();

        // Edges not yet covered by the seed, by index into `edges`.
        let mut uncovered: Vec<usize> = edges
            .iter()
            .enumerate()
            .filter(|(_, e)| !selected.contains(&e.from) && !selected.contains(&e.to))
            .map(|(i, _)| i)
            .collect();

        // Greedy loop: pick the best benefit/cost vertex until everything is
        // covered or nothing selectable touches an uncovered edge. Ties go
        // to the vertex appearing first in the instance (strictly greater
        // score required to displace the incumbent).
        while !uncovered.is_empty() {
            let mut best: Option<(f64, usize)> = None;
            for (vi, vertex) in vertices.iter().enumerate() {
                if vertex.kind == VertexKind::Forbidden || selected.contains(&vertex.id) {
                    continue;
                }
                let benefit: u64 = uncovered
                    .iter()
                    .map(|&ei| &edges[ei])
                    .filter(|e| e.from == vertex.id || e.to == vertex.id)
                    .map(edge_weight)
                    .sum();
                if benefit == 0 {
                    continue;
                }
                // Zero cost is infinitely cost-effective; no division fault.
                let score = if vertex.cost > 0.0 {
                    benefit as f64 / vertex.cost
                } else {
                    f64::INFINITY
                };
                if best.map_or(true, |(best_score, _)| score > best_score) {
                    best = Some((score, vi));
                }
            }

            let Some((_, vi)) = best else {
                // Remaining edges only touch forbidden/selected vertices;
                // genuinely uncoverable under the constraints, not an error.
                break;
            };
            let picked = &vertices[vi];
            selected.insert(picked.id.clone());
            uncovered.retain(|&ei| edges[ei].from != picked.id && edges[ei].to != picked.id);
        }
        let residual_uncovered = uncovered.len();

        // Budget trim: drop the most expensive non-mandatory picks until
        // within budget. Single pass; the greedy loop is not re-run, so this
        // can uncover edges again.
        if let Some(budget) = parameters.effective_budget() {
            let mut total: f64 = vertices
                .iter()
                .filter(|v| selected.contains(&v.id))
                .map(|v| v.cost)
                .sum();
            if total > budget {
                let mut removable: Vec<usize> = vertices
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| selected.contains(&v.id) && v.kind != VertexKind::Mandatory)
                    .map(|(i, _)| i)
                    .collect();
                // Stable sort: equal costs keep instance order.
                removable.sort_by(|&a, &b| {
                    vertices[b]
                        .cost
                        .partial_cmp(&vertices[a].cost)
                        .unwrap_or(Ordering::Equal)
                });
                for vi in removable {
                    if total <= budget {
                        break;
                    }
                    selected.remove(&vertices[vi].id);
                    total -= vertices[vi].cost;
                }
            }
        }

        // Critical repair: both endpoints of every critical edge, budget or
        // not. Critical coverage is the higher-priority constraint class.
        let mut forced_forbidden: Vec<String> = Vec::new();
        for edge in edges.iter().filter(|e| e.critical) {
            if !selected.contains(&edge.from) || !selected.contains(&edge.to) {
                for endpoint in [&edge.from, &edge.to] {
                    if selected.insert(endpoint.clone())
                        && kind_of(endpoint) == VertexKind::Forbidden
                    {
                        forced_forbidden.push(endpoint.clone());
                    }
                }
            }
        }

        let mut message = String::from("Greedy solution found (approximate)");
        if residual_uncovered > 0 {
            message.push_str(&format!(
                "; {} edge(s) left uncovered: every unselected endpoint is forbidden",
                residual_uncovered
            ));
        }
        if !forced_forbidden.is_empty() {
            message.push_str(&format!(
                "; critical edges contradict forbidden vertices {:?}, which were selected anyway",
                forced_forbidden
            ));
        }
        if let Some(budget) = parameters.effective_budget() {
            let total: f64 = vertices
                .iter()
                .filter(|v| selected.contains(&v.id))
                .map(|v| v.cost)
                .sum();
            if total > budget {
                message.push_str(&format!(
                    "; budget {} exceeded (total {}) to preserve critical coverage",
                    budget, total
                ));
            }
        }

        log::debug!(
            "greedy cover: {} selected, {} residual uncovered",
            selected.len(),
            residual_uncovered
        );

        // The heuristic keeps the exact path's status vocabulary: `optimal`
        // with a message flagging the result as approximate.
        Ok(assemble_report(
            vertices,
            edges,
            &selected,
            SolveStatus::Optimal,
            Some(0.0),
            start.elapsed().as_secs_f64(),
            message,
        ))
    }

    fn name(&self) -> &str {
        "Greedy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(vertices: &[Vertex], edges: &[Edge], parameters: &Parameters) -> SolveReport {
        GreedySolver::new()
            .solve(vertices, edges, parameters)
            .expect("greedy solver should not fault on a valid instance")
    }

    #[test]
    fn single_edge_selects_one_endpoint() {
        let vertices = vec![Vertex::normal("a", 1.0), Vertex::normal("b", 1.0)];
        let edges = vec![Edge::new("a", "b", false)];
        let report = solve(&vertices, &edges, &Parameters::default());
        assert_eq!(report.status, SolveStatus::Optimal);
        assert_eq!(report.num_selected, 1);
        assert_eq!(report.total_cost, Some(1.0));
    }

    #[test]
    fn critical_edge_selects_both_endpoints() {
        let vertices = vec![Vertex::normal("a", 1.0), Vertex::normal("b", 1.0)];
        let edges = vec![Edge::new("a", "b", true)];
        let report = solve(&vertices, &edges, &Parameters::default());
        assert_eq!(report.selected_vertices, vec!["a", "b"]);
        assert_eq!(report.total_cost, Some(2.0));
    }

    #[test]
    fn cheap_endpoints_beat_expensive_hub() {
        let vertices = vec![
            Vertex::normal("a", 1.0),
            Vertex::normal("b", 5.0),
            Vertex::normal("c", 1.0),
        ];
        let edges = vec![Edge::new("a", "b", false), Edge::new("b", "c", false)];
        let parameters = Parameters {
            budget: Some(2.0),
            ..Parameters::default()
        };
        let report = solve(&vertices, &edges, &parameters);
        assert_eq!(report.selected_vertices, vec!["a", "c"]);
        assert_eq!(report.total_cost, Some(2.0));
    }

    #[test]
    fn forbidden_vertex_is_never_picked() {
        let vertices = vec![
            Vertex::new("a", 0.5, VertexKind::Forbidden),
            Vertex::normal("b", 100.0),
        ];
        let edges = vec![Edge::new("a", "b", false)];
        let report = solve(&vertices, &edges, &Parameters::default());
        assert_eq!(report.selected_vertices, vec!["b"]);
    }

    #[test]
    fn zero_cost_vertex_wins_without_division_fault() {
        let vertices = vec![Vertex::normal("a", 0.0), Vertex::normal("b", 1.0)];
        let edges = vec![Edge::new("a", "b", false)];
        let report = solve(&vertices, &edges, &Parameters::default());
        assert_eq!(report.selected_vertices, vec!["a"]);
        assert_eq!(report.total_cost, Some(0.0));
    }

    #[test]
    fn critical_repair_overrides_budget_trim() {
        // Budget of 1 cannot hold both endpoints of a critical edge; repair
        // adds them back regardless.
        let vertices = vec![Vertex::normal("a", 3.0), Vertex::normal("b", 3.0)];
        let edges = vec![Edge::new("a", "b", true)];
        let parameters = Parameters {
            budget: Some(1.0),
            ..Parameters::default()
        };
        let report = solve(&vertices, &edges, &parameters);
        assert_eq!(report.selected_vertices, vec!["a", "b"]);
        assert_eq!(report.total_cost, Some(6.0));
        assert!(report.message.contains("budget"));
    }

    #[test]
    fn mandatory_vertices_survive_budget_trim() {
        let vertices = vec![
            Vertex::new("m", 10.0, VertexKind::Mandatory),
            Vertex::normal("a", 2.0),
            Vertex::normal("b", 1.0),
        ];
        let edges = vec![Edge::new("a", "b", false)];
        let parameters = Parameters {
            budget: Some(10.0),
            ..Parameters::default()
        };
        let report = solve(&vertices, &edges, &parameters);
        assert!(report.selected_vertices.contains(&"m".to_string()));
    }

    #[test]
    fn critical_edge_with_forbidden_endpoint_reports_contradiction() {
        let vertices = vec![
            Vertex::new("m", 100.0, VertexKind::Mandatory),
            Vertex::new("f", 0.0, VertexKind::Forbidden),
        ];
        let edges = vec![Edge::new("m", "f", true)];
        let report = solve(&vertices, &edges, &Parameters::default());
        assert_eq!(report.selected_vertices, vec!["m", "f"]);
        assert!(report.message.contains("contradict"));
    }

    #[test]
    fn uncoverable_residual_is_disclosed_not_fatal() {
        // Both endpoints forbidden: the edge cannot be covered at all.
        let vertices = vec![
            Vertex::new("a", 1.0, VertexKind::Forbidden),
            Vertex::new("b", 1.0, VertexKind::Forbidden),
        ];
        let edges = vec![Edge::new("a", "b", false)];
        let report = solve(&vertices, &edges, &Parameters::default());
        assert_eq!(report.status, SolveStatus::Optimal);
        assert!(report.selected_vertices.is_empty());
        assert!(report.message.contains("uncovered"));
    }

    #[test]
    fn identical_inputs_give_identical_output() {
        let vertices = vec![
            Vertex::normal("a", 1.0),
            Vertex::normal("b", 1.0),
            Vertex::normal("c", 1.0),
        ];
        let edges = vec![
            Edge::new("a", "b", false),
            Edge::new("b", "c", false),
            Edge::new("a", "c", false),
        ];
        let first = solve(&vertices, &edges, &Parameters::default());
        let second = solve(&vertices, &edges, &Parameters::default());
        assert_eq!(first.selected_vertices, second.selected_vertices);
        assert_eq!(first.total_cost, second.total_cost);
    }

    #[test]
    fn invalid_instance_is_rejected() {
        let vertices = vec![Vertex::normal("a", 1.0)];
        let edges = vec![Edge::new("a", "ghost", false)];
        let result = GreedySolver::new().solve(&vertices, &edges, &Parameters::default());
        assert!(matches!(result, Err(SolveError::InvalidInstance(_))));
    }
}
