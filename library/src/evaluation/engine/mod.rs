//! Execution engine: the per-node run state machine.
//!
//! Data is pulled: a node runs the producer of each input before reading it.
//! Control flow is pushed: after computing, a node runs every node wired to
//! the next-exec socket it selected, in connection order. A failing node
//! records its fault and stops, but the run as a whole carries on.
//!
//! A node reached again while it is still on the run stack closes a cycle and
//! faults with `CycleOverflow`. Nodes pulled twice along separate paths are
//! not on the stack at the same time and simply run twice.

use log::{trace, warn};

use super::context::ComputeContext;
use crate::error::{GraphError, Result};
use crate::model::graph::Graph;
use crate::model::node::{Node, NodeId};
use crate::model::socket::{Socket, SocketAddr};
use crate::model::value::Value;
use crate::util::timing::ScopedTimer;

/// Outcome of one top-level [`Graph::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Every node execution in the order it started. A node pulled along two
    /// paths appears twice.
    pub executed: Vec<NodeId>,
    /// Nodes holding a fault once the run finished, without duplicates.
    pub faulted: Vec<NodeId>,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.faulted.is_empty()
    }

    pub fn execution_count(&self) -> usize {
        self.executed.len()
    }

    pub fn ran(&self, id: NodeId) -> bool {
        self.executed.contains(&id)
    }

    pub fn merge(&mut self, other: RunReport) {
        self.executed.extend(other.executed);
        for id in other.faulted {
            if !self.faulted.contains(&id) {
                self.faulted.push(id);
            }
        }
    }
}

struct RunState {
    stack: Vec<NodeId>,
    max_depth: usize,
    executed: Vec<NodeId>,
}

impl Graph {
    /// Runs a node: pulls its inputs, computes it, then pushes control flow on.
    ///
    /// Faults are recorded on the nodes themselves and listed in the report.
    /// The only error returned is `NodeNotFound` for `id` itself.
    pub fn run(&mut self, id: NodeId) -> Result<RunReport> {
        let label = self.nodes.get(&id).ok_or(GraphError::NodeNotFound(id))?.label();
        let _timer = ScopedTimer::debug_lazy(|| format!("Graph::run {}", label));

        let mut state = RunState {
            stack: Vec::new(),
            max_depth: self.config.max_depth,
            executed: Vec::new(),
        };
        self.run_node(id, &mut state);

        let mut faulted = Vec::new();
        for id in &state.executed {
            let failed = self.nodes.get(id).is_some_and(|n| n.error().is_some());
            if failed && !faulted.contains(id) {
                faulted.push(*id);
            }
        }
        Ok(RunReport {
            executed: state.executed,
            faulted,
        })
    }

    /// Runs every node of `class` in id order, e.g. all `event.update` entries.
    pub fn run_class(&mut self, class: &str) -> Result<RunReport> {
        let mut report = RunReport::default();
        for id in self.nodes_of_class(class) {
            report.merge(self.run(id)?);
        }
        Ok(report)
    }

    /// Runs the node and returns the fresh value of one of its outputs.
    pub fn output_value(&mut self, id: NodeId, index: usize) -> Result<Value> {
        self.run(id)?;
        let node = self.nodes.get(&id).ok_or(GraphError::NodeNotFound(id))?;
        if let Some(message) = node.error() {
            return Err(GraphError::Faulted {
                node: node.label(),
                message: message.to_string(),
            });
        }
        let socket = node
            .outputs()
            .get(index)
            .ok_or(GraphError::SocketNotFound(SocketAddr::value_output(id, index)))?;
        socket.value().cloned().ok_or_else(|| GraphError::MissingOutput {
            node: node.label(),
            socket: socket.name().to_string(),
        })
    }

    /// Value left on an output by the last run. Never runs anything.
    pub fn last_output(&self, id: NodeId, index: usize) -> Option<&Value> {
        self.nodes.get(&id).and_then(|n| n.output_value(index))
    }

    fn run_node(&mut self, id: NodeId, state: &mut RunState) {
        let depth = state.stack.len();
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };

        // Mid-run: leave its sockets alone, the outer run still owns them.
        if state.stack.contains(&id) {
            let error = GraphError::CycleOverflow {
                node: node.label(),
                depth,
            };
            self.fault(id, &error);
            return;
        }

        node.reset_for_run();
        state.executed.push(id);

        if depth >= state.max_depth {
            let error = GraphError::DepthExceeded {
                node: node.label(),
                depth,
            };
            self.fault(id, &error);
            return;
        }

        trace!("Graph: running {} at depth {}", node.label(), depth);
        state.stack.push(id);
        match self.evaluate_node(id, state) {
            Ok(()) => self.advance(id, state),
            Err(error) => self.fault(id, &error),
        }
        state.stack.pop();
    }

    /// Satisfies inputs, computes and validates outputs.
    fn evaluate_node(&mut self, id: NodeId, state: &mut RunState) -> Result<()> {
        let input_count = self.nodes.get(&id).map_or(0, |n| n.inputs().len());

        for index in 0..input_count {
            let node = self.nodes.get(&id).ok_or(GraphError::NodeNotFound(id))?;
            let socket = &node.inputs()[index];
            let producer = socket.peers().first().copied().ok_or_else(|| GraphError::MissingInput {
                node: node.label(),
                socket: socket.name().to_string(),
            })?;

            self.run_node(producer.node, state);

            let value = self
                .nodes
                .get(&producer.node)
                .and_then(|n| n.output_value(producer.index))
                .cloned();
            let node = self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))?;
            node.inputs[index].set_value(value)?;
        }

        let node = self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))?;
        let label = node.label();
        let Node {
            inputs,
            outputs,
            next_execs,
            next_exec,
            behavior,
            ..
        } = &mut *node;
        let mut ctx = ComputeContext::new(id, &label, inputs, outputs, next_execs.len(), next_exec);
        behavior.compute(&mut ctx)?;

        if let Some(empty) = node.outputs().iter().find(|s| s.value().is_none()) {
            return Err(GraphError::MissingOutput {
                node: label,
                socket: empty.name().to_string(),
            });
        }
        Ok(())
    }

    fn advance(&mut self, id: NodeId, state: &mut RunState) {
        let targets: Vec<NodeId> = match self.nodes.get(&id) {
            Some(node) => node
                .next_execs()
                .get(node.next_exec)
                .map(|socket| socket.peers().iter().map(|peer| peer.node).collect())
                .unwrap_or_default(),
            None => return,
        };
        for target in targets {
            self.run_node(target, state);
        }
    }

    /// Records the first fault of this run; later ones are only logged.
    fn fault(&mut self, id: NodeId, error: &GraphError) {
        if let Some(node) = self.nodes.get_mut(&id) {
            warn!("{} faulted: {}", node.label(), error);
            if node.error().is_none() {
                node.record_error(error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::evaluation::behavior::NodeBehavior;
    use crate::model::type_token::TypeToken;
    use crate::plugin::registry::NodeRegistry;

    struct Emit(i64);

    impl NodeBehavior for Emit {
        fn compute(&mut self, ctx: &mut ComputeContext<'_>) -> Result<()> {
            ctx.set_output(0, self.0)
        }
    }

    fn setup_graph() -> Graph {
        Graph::new(Arc::new(NodeRegistry::new()))
    }

    #[test]
    fn test_run_unknown_node() {
        let mut graph = setup_graph();
        assert!(matches!(graph.run(5), Err(GraphError::NodeNotFound(5))));
    }

    #[test]
    fn test_output_value_and_last_output() {
        let mut graph = setup_graph();
        let id = graph.add_node(Node::new("t.emit", "Emit", Box::new(Emit(9))).with_output("Out", TypeToken::Integer)).unwrap();

        assert!(graph.last_output(id, 0).is_none());
        assert_eq!(graph.output_value(id, 0).unwrap(), Value::Integer(9));
        assert_eq!(graph.last_output(id, 0), Some(&Value::Integer(9)));
        assert!(matches!(graph.output_value(id, 3), Err(GraphError::SocketNotFound(_))));
    }

    #[test]
    fn test_wrong_output_type_faults_node() {
        let mut graph = setup_graph();
        let id = graph.add_node(Node::new("t.emit", "Emit", Box::new(Emit(1))).with_output("Out", TypeToken::Text)).unwrap();

        let report = graph.run(id).unwrap();
        assert_eq!(report.faulted, vec![id]);
        assert!(matches!(graph.output_value(id, 0), Err(GraphError::Faulted { .. })));
    }

    #[test]
    fn test_depth_limit() {
        let mut graph = Graph::with_config(
            Arc::new(NodeRegistry::new()),
            crate::config::EngineConfig {
                max_depth: 3,
                ..Default::default()
            },
        );
        let mut prev = None;
        let mut ids = Vec::new();
        for _ in 0..5 {
            let id = graph
                .add_node(
                    Node::new("t.step", "Step", Box::new(crate::evaluation::behavior::NoopBehavior))
                        .with_prev_exec("")
                        .with_next_exec(""),
                )
                .unwrap();
            if let Some(prev) = prev {
                graph.connect(SocketAddr::exec_output(prev, 0), SocketAddr::exec_input(id, 0)).unwrap();
            }
            prev = Some(id);
            ids.push(id);
        }

        let report = graph.run(ids[0]).unwrap();
        // depths 0..=2 run, the fourth node is entered at depth 3 and stops there
        assert_eq!(report.executed, ids[..4].to_vec());
        assert_eq!(report.faulted, vec![ids[3]]);
        let error = graph.node(ids[3]).unwrap().error().unwrap();
        assert!(error.contains("depth 3 exceeded"), "{}", error);
        assert!(!error.contains("cycle"), "{}", error);
    }
}
