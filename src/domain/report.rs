use std::collections::{BTreeMap, HashSet};

use crate::models::{Edge, SolveReport, SolveStatus, Vertex};

/// Assemble the unified report schema from a final selection. Shared by both
/// backends so cost accounting and cover details stay byte-identical between
/// the exact and greedy paths.
///
/// `selected` holds vertex ids; `selected_vertices` comes out in instance
/// order, which keeps the report deterministic for a given input ordering.
pub fn assemble_report(
    vertices: &[Vertex],
    edges: &[Edge],
    selected: &HashSet<String>,
    status: SolveStatus,
    gap: Option<f64>,
    solve_time: f64,
    message: String,
) -> SolveReport {
    let mut selected_vertices = Vec::with_capacity(selected.len());
    let mut detailed_costs = BTreeMap::new();
    let mut total_cost = 0.0;

    for vertex in vertices {
        if selected.contains(&vertex.id) {
            selected_vertices.push(vertex.id.clone());
            detailed_costs.insert(vertex.id.clone(), vertex.cost);
            total_cost += vertex.cost;
        }
    }

    let mut cover_details = BTreeMap::new();
    for edge in edges {
        let mut covering = Vec::new();
        if selected.contains(&edge.from) {
            covering.push(edge.from.clone());
        }
        if selected.contains(&edge.to) {
            covering.push(edge.to.clone());
        }
        cover_details.insert(edge.label(), covering);
    }

    SolveReport {
        status,
        total_cost: Some(total_cost),
        num_selected: selected_vertices.len(),
        selected_vertices,
        cover_details,
        solve_time,
        gap,
        detailed_costs,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_orders_selection_by_instance_order() {
        let vertices = vec![
            Vertex::normal("b", 2.0),
            Vertex::normal("a", 1.0),
            Vertex::normal("c", 4.0),
        ];
        let edges = vec![Edge::new("b", "a", false), Edge::new("a", "c", false)];
        let selected: HashSet<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();

        let report = assemble_report(
            &vertices,
            &edges,
            &selected,
            SolveStatus::Optimal,
            Some(0.0),
            0.01,
            "test".to_string(),
        );

        assert_eq!(report.selected_vertices, vec!["b", "a"]);
        assert_eq!(report.total_cost, Some(3.0));
        assert_eq!(report.num_selected, 2);
        assert_eq!(report.cover_details["b-a"], vec!["b", "a"]);
        assert_eq!(report.cover_details["a-c"], vec!["a"]);
        assert_eq!(report.detailed_costs["a"], 1.0);
    }
}
