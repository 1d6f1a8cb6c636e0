use std::collections::HashSet;

use crate::domain::error::SolveError;
use crate::models::{Edge, Parameters, Vertex};

/// Structural checks run by both solvers before modeling. Referential
/// integrity is the data-loading collaborator's job; anything caught here is
/// malformed input that slipped past it and is reported as a fault rather
/// than allowed to panic mid-solve.
pub fn validate_instance(vertices: &[Vertex], edges: &[Edge]) -> Result<(), SolveError> {
    let mut ids: HashSet<&str> = HashSet::with_capacity(vertices.len());
    for vertex in vertices {
        if !ids.insert(vertex.id.as_str()) {
            return Err(SolveError::InvalidInstance(format!(
                "duplicate vertex id {}",
                vertex.id
            )));
        }
        if !vertex.cost.is_finite() || vertex.cost < 0.0 {
            return Err(SolveError::InvalidInstance(format!(
                "vertex {} has invalid cost {}",
                vertex.id, vertex.cost
            )));
        }
    }

    for edge in edges {
        if edge.from == edge.to {
            return Err(SolveError::InvalidInstance(format!(
                "self-loop on vertex {}",
                edge.from
            )));
        }
        for endpoint in [&edge.from, &edge.to] {
            if !ids.contains(endpoint.as_str()) {
                return Err(SolveError::InvalidInstance(format!(
                    "edge {} references unknown vertex {}",
                    edge.label(),
                    endpoint
                )));
            }
        }
    }

    Ok(())
}

pub fn validate_parameters(parameters: &Parameters) -> Result<(), SolveError> {
    if let Some(budget) = parameters.budget {
        if !budget.is_finite() || budget < 0.0 {
            return Err(SolveError::InvalidInstance(format!(
                "budget must be non-negative, got {}",
                budget
            )));
        }
    }
    if parameters.advanced.redundancy == 0 {
        return Err(SolveError::InvalidInstance(
            "redundancy must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AdvancedParameters, VertexKind};

    #[test]
    fn test_validate_instance_given_valid_instance_should_return_ok() {
        let vertices = vec![Vertex::normal("a", 1.0), Vertex::normal("b", 2.0)];
        let edges = vec![Edge::new("a", "b", false)];
        assert!(validate_instance(&vertices, &edges).is_ok());
    }

    #[test]
    fn test_validate_instance_given_duplicate_id_should_return_error() {
        let vertices = vec![Vertex::normal("a", 1.0), Vertex::normal("a", 2.0)];
        assert!(validate_instance(&vertices, &[]).is_err());
    }

    #[test]
    fn test_validate_instance_given_self_loop_should_return_error() {
        let vertices = vec![Vertex::normal("a", 1.0)];
        let edges = vec![Edge::new("a", "a", false)];
        assert!(validate_instance(&vertices, &edges).is_err());
    }

    #[test]
    fn test_validate_instance_given_unknown_endpoint_should_return_error() {
        let vertices = vec![Vertex::normal("a", 1.0)];
        let edges = vec![Edge::new("a", "missing", false)];
        assert!(validate_instance(&vertices, &edges).is_err());
    }

    #[test]
    fn test_validate_instance_given_negative_cost_should_return_error() {
        let vertices = vec![Vertex::new("a", -1.0, VertexKind::Normal)];
        assert!(validate_instance(&vertices, &[]).is_err());
    }

    #[test]
    fn test_validate_parameters_given_zero_redundancy_should_return_error() {
        let parameters = Parameters {
            budget: None,
            advanced: AdvancedParameters {
                min_cover: true,
                redundancy: 0,
            },
        };
        assert!(validate_parameters(&parameters).is_err());
    }

    #[test]
    fn test_validate_parameters_given_negative_budget_should_return_error() {
        let parameters = Parameters {
            budget: Some(-3.0),
            ..Parameters::default()
        };
        assert!(validate_parameters(&parameters).is_err());
    }
}
