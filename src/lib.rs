//! Minimum-cost weighted vertex cover for surveillance networks.
//!
//! A graph of cameras/sensors (vertices, each with a selection cost) and
//! monitored links (edges) is covered by choosing vertices so that every
//! edge has a selected endpoint. Critical edges need both endpoints,
//! vertices can be forced in or out, and a global budget and redundancy
//! level can be applied.
//!
//! Two interchangeable strategies implement [`domain::solver::CoverSolver`]:
//! an exact 0/1 integer program on the HiGHS engine (cargo feature
//! `highs-solver`) and a deterministic greedy heuristic with its own
//! feasibility repair. [`domain::solve::solve_instance`] picks the exact
//! backend when compiled in and falls back otherwise; [`worker::SolverWorker`]
//! runs one solve off-thread and streams progress events.

pub mod domain;
pub mod models;
pub mod worker;

pub use domain::solve::{solve, solve_instance};
pub use domain::solver::CoverSolver;
pub use models::{
    AdvancedParameters, Edge, GraphInstance, Parameters, SolveReport, SolveStatus, Vertex,
    VertexKind,
};
pub use worker::{SolverEvent, SolverWorker};
