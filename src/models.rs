use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------- Instance (wire) types: owned & serde-friendly ----------

/// Selection constraint attached to a vertex. `Mandatory` and `Forbidden`
/// are variants of one enum, so a vertex can never carry both.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VertexKind {
    #[default]
    Normal,
    Mandatory,
    Forbidden,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Vertex {
    pub id: String,
    #[serde(default = "default_cost")]
    pub cost: f64,
    #[serde(default)]
    pub kind: VertexKind,
}

fn default_cost() -> f64 {
    1.0
}

impl Vertex {
    pub fn new(id: impl Into<String>, cost: f64, kind: VertexKind) -> Self {
        Vertex {
            id: id.into(),
            cost,
            kind,
        }
    }

    pub fn normal(id: impl Into<String>, cost: f64) -> Self {
        Vertex::new(id, cost, VertexKind::Normal)
    }
}

/// Unordered link between two vertices. A critical edge requires both
/// endpoints selected, an ordinary edge at least one.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Edge {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub critical: bool,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, critical: bool) -> Self {
        Edge {
            from: from.into(),
            to: to.into(),
            critical,
        }
    }

    /// Label used as key in `SolveReport::cover_details`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.from, self.to)
    }
}

/// One solve input as delivered by the graph-editor collaborator. The
/// vertex/edge ordering is preserved; the greedy path uses it as its
/// deterministic tie-break.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct GraphInstance {
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
}

// ---------- Solve parameters ----------

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AdvancedParameters {
    #[serde(default)]
    pub min_cover: bool,
    #[serde(default = "default_redundancy")]
    pub redundancy: u32,
}

fn default_redundancy() -> u32 {
    1
}

impl Default for AdvancedParameters {
    fn default() -> Self {
        AdvancedParameters {
            min_cover: false,
            redundancy: 1,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Parameters {
    /// `None` or `Some(0.0)` means unconstrained.
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub advanced: AdvancedParameters,
}

impl Parameters {
    /// Budget constraint actually in force, if any.
    pub fn effective_budget(&self) -> Option<f64> {
        self.budget.filter(|b| *b > 0.0)
    }
}

// ---------- Report types (decoupled from any engine) ----------

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    Optimal,
    Suboptimal,
    Infeasible,
    TimeLimit,
    Error,
}

/// Unified result schema shared by both solve paths. Display/export
/// collaborators consume this as-is.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SolveReport {
    pub status: SolveStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
    pub selected_vertices: Vec<String>,
    pub cover_details: BTreeMap<String, Vec<String>>,
    pub solve_time: f64,
    /// `Some(0.0)` only when solved to proven optimality; `None` when the
    /// engine reported no bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,
    pub num_selected: usize,
    pub detailed_costs: BTreeMap<String, f64>,
    pub message: String,
}

impl SolveReport {
    /// Report with no selection, used for the infeasible/time_limit/error
    /// terminal states.
    pub fn empty(status: SolveStatus, message: impl Into<String>, solve_time: f64) -> Self {
        SolveReport {
            status,
            total_cost: None,
            selected_vertices: Vec::new(),
            cover_details: BTreeMap::new(),
            solve_time,
            gap: None,
            num_selected: 0,
            detailed_costs: BTreeMap::new(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>, solve_time: f64) -> Self {
        SolveReport::empty(SolveStatus::Error, message, solve_time)
    }
}
