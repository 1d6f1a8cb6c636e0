use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::domain::solve::solve_instance;
use crate::models::{GraphInstance, Parameters, SolveReport};

/// Events relayed to the interactive side while a solve runs off-thread.
///
/// Ordering guarantee: `Started` first, then any number of `Progress`
/// events, then exactly one terminal `Finished` or `Error`.
#[derive(Debug, Clone)]
pub enum SolverEvent {
    Started,
    Progress { percent: u8, message: String },
    Finished(SolveReport),
    Error(String),
}

/// Runs one solve on a dedicated thread and streams `SolverEvent`s back.
/// There is no cancellation: once spawned, the solve runs to a terminal
/// event; the exact engine's time limit is the only bound.
pub struct SolverWorker {
    instance: GraphInstance,
    parameters: Parameters,
}

impl SolverWorker {
    pub fn new(instance: GraphInstance, parameters: Parameters) -> Self {
        SolverWorker {
            instance,
            parameters,
        }
    }

    /// Spawn the solve. Dropping the receiver does not stop the solve; send
    /// failures after that are ignored.
    pub fn spawn(self) -> (JoinHandle<()>, Receiver<SolverEvent>) {
        let (tx, rx) = unbounded();
        let handle = thread::spawn(move || self.run(tx));
        (handle, rx)
    }

    fn run(self, tx: Sender<SolverEvent>) {
        let _ = tx.send(SolverEvent::Started);

        let progress_tx = tx.clone();
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            solve_instance(
                &self.instance.vertices,
                &self.instance.edges,
                &self.parameters,
                |percent, message| {
                    let _ = progress_tx.send(SolverEvent::Progress {
                        percent,
                        message: message.to_string(),
                    });
                },
            )
        }));

        match outcome {
            Ok(report) => {
                let _ = tx.send(SolverEvent::Finished(report));
            }
            Err(_) => {
                let _ = tx.send(SolverEvent::Error(
                    "solver worker panicked before producing a report".to_string(),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Edge, SolveStatus, Vertex};

    #[test]
    fn worker_emits_started_progress_then_finished() {
        let instance = GraphInstance {
            vertices: vec![Vertex::normal("a", 1.0), Vertex::normal("b", 1.0)],
            edges: vec![Edge::new("a", "b", false)],
        };
        let worker = SolverWorker::new(instance, Parameters::default());
        let (handle, rx) = worker.spawn();
        let events: Vec<SolverEvent> = rx.iter().collect();
        handle.join().unwrap();

        assert!(matches!(events.first(), Some(SolverEvent::Started)));
        let terminal = events.last().expect("at least one event");
        match terminal {
            SolverEvent::Finished(report) => {
                assert_eq!(report.status, SolveStatus::Optimal);
                assert_eq!(report.num_selected, 1);
            }
            other => panic!("expected Finished, got {:?}", other),
        }
        // No event after the terminal one, and progress stays in between.
        let terminal_count = events
            .iter()
            .filter(|e| matches!(e, SolverEvent::Finished(_) | SolverEvent::Error(_)))
            .count();
        assert_eq!(terminal_count, 1);
        assert!(events
            .iter()
            .skip(1)
            .take(events.len().saturating_sub(2))
            .all(|e| matches!(e, SolverEvent::Progress { .. })));
    }

    #[test]
    fn worker_reports_error_status_for_bad_instance() {
        let instance = GraphInstance {
            vertices: vec![Vertex::normal("a", 1.0)],
            edges: vec![Edge::new("a", "missing", false)],
        };
        let worker = SolverWorker::new(instance, Parameters::default());
        let (handle, rx) = worker.spawn();
        let events: Vec<SolverEvent> = rx.iter().collect();
        handle.join().unwrap();

        match events.last().expect("terminal event") {
            SolverEvent::Finished(report) => assert_eq!(report.status, SolveStatus::Error),
            other => panic!("expected Finished with error report, got {:?}", other),
        }
    }
}
