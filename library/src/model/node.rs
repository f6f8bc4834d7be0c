use std::fmt;

use serde::{Deserialize, Serialize};

use super::socket::{Direction, ExecSocket, Socket, SocketAddr, SocketCore, SocketKind, ValueSocket};
use super::type_token::TypeToken;
use super::value::Value;
use crate::evaluation::behavior::NodeBehavior;
use crate::error::GraphError;

/// Stable node identity, unique for the lifetime of a graph.
pub type NodeId = u32;

/// Placement of a node in the editor. Opaque to the engine.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Location {
    pub x: f32,
    pub y: f32,
}

impl Location {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A vertex of the graph: four socket groups plus the behavior that computes it.
///
/// Socket layout is fixed once the node is inserted into a graph.
pub struct Node {
    pub(crate) id: NodeId,
    class: String,
    display_name: String,
    pub location: Location,
    pub(crate) inputs: Vec<ValueSocket>,
    pub(crate) outputs: Vec<ValueSocket>,
    pub(crate) prev_execs: Vec<ExecSocket>,
    pub(crate) next_execs: Vec<ExecSocket>,
    pub(crate) error: Option<String>,
    pub(crate) next_exec: usize,
    pub(crate) behavior: Box<dyn NodeBehavior>,
}

impl Node {
    pub fn new(class: impl Into<String>, display_name: impl Into<String>, behavior: Box<dyn NodeBehavior>) -> Self {
        Self {
            id: 0,
            class: class.into(),
            display_name: display_name.into(),
            location: Location::default(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            prev_execs: Vec::new(),
            next_execs: Vec::new(),
            error: None,
            next_exec: 0,
            behavior,
        }
    }

    pub fn with_input(mut self, name: impl Into<String>, token: TypeToken) -> Self {
        let index = self.inputs.len();
        self.inputs.push(ValueSocket::new(name, Direction::Input, index, token));
        self
    }

    pub fn with_output(mut self, name: impl Into<String>, token: TypeToken) -> Self {
        let index = self.outputs.len();
        self.outputs.push(ValueSocket::new(name, Direction::Output, index, token));
        self
    }

    pub fn with_prev_exec(mut self, name: impl Into<String>) -> Self {
        let index = self.prev_execs.len();
        self.prev_execs.push(ExecSocket::new(name, Direction::Input, index));
        self
    }

    pub fn with_next_exec(mut self, name: impl Into<String>) -> Self {
        let index = self.next_execs.len();
        self.next_execs.push(ExecSocket::new(name, Direction::Output, index));
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Registry tag used to recreate this node on load.
    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Human readable identity used in error messages, e.g. `Increment#2`.
    pub fn label(&self) -> String {
        format!("{}#{}", self.display_name, self.id)
    }

    pub fn inputs(&self) -> &[ValueSocket] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[ValueSocket] {
        &self.outputs
    }

    pub fn prev_execs(&self) -> &[ExecSocket] {
        &self.prev_execs
    }

    pub fn next_execs(&self) -> &[ExecSocket] {
        &self.next_execs
    }

    /// Fault recorded by the last run, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn output_value(&self, index: usize) -> Option<&Value> {
        self.outputs.get(index).and_then(ValueSocket::value)
    }

    pub fn behavior(&self) -> &dyn NodeBehavior {
        self.behavior.as_ref()
    }

    pub fn behavior_mut(&mut self) -> &mut dyn NodeBehavior {
        self.behavior.as_mut()
    }

    pub fn socket_count(&self, kind: SocketKind, direction: Direction) -> usize {
        match (kind, direction) {
            (SocketKind::Value, Direction::Input) => self.inputs.len(),
            (SocketKind::Value, Direction::Output) => self.outputs.len(),
            (SocketKind::Exec, Direction::Input) => self.prev_execs.len(),
            (SocketKind::Exec, Direction::Output) => self.next_execs.len(),
        }
    }

    /// Looks up the socket named by `addr`, ignoring `addr.node`.
    pub fn socket(&self, addr: &SocketAddr) -> Option<&SocketCore> {
        match (addr.kind, addr.direction) {
            (SocketKind::Value, Direction::Input) => self.inputs.get(addr.index).map(Socket::core),
            (SocketKind::Value, Direction::Output) => self.outputs.get(addr.index).map(Socket::core),
            (SocketKind::Exec, Direction::Input) => self.prev_execs.get(addr.index).map(Socket::core),
            (SocketKind::Exec, Direction::Output) => self.next_execs.get(addr.index).map(Socket::core),
        }
    }

    pub(crate) fn socket_mut(&mut self, addr: &SocketAddr) -> Option<&mut SocketCore> {
        match (addr.kind, addr.direction) {
            (SocketKind::Value, Direction::Input) => self.inputs.get_mut(addr.index).map(Socket::core_mut),
            (SocketKind::Value, Direction::Output) => self.outputs.get_mut(addr.index).map(Socket::core_mut),
            (SocketKind::Exec, Direction::Input) => self.prev_execs.get_mut(addr.index).map(Socket::core_mut),
            (SocketKind::Exec, Direction::Output) => self.next_execs.get_mut(addr.index).map(Socket::core_mut),
        }
    }

    /// Value type of a value socket, `None` for exec sockets or bad indices.
    pub fn socket_type(&self, addr: &SocketAddr) -> Option<TypeToken> {
        match (addr.kind, addr.direction) {
            (SocketKind::Value, Direction::Input) => self.inputs.get(addr.index).map(ValueSocket::type_token),
            (SocketKind::Value, Direction::Output) => self.outputs.get(addr.index).map(ValueSocket::type_token),
            (SocketKind::Exec, _) => None,
        }
    }

    /// Addresses of every socket on this node, grouped as inputs, outputs, prev, next.
    pub fn socket_addrs(&self) -> Vec<SocketAddr> {
        let id = self.id;
        let inputs = (0..self.inputs.len()).map(|i| SocketAddr::value_input(id, i));
        let outputs = (0..self.outputs.len()).map(|i| SocketAddr::value_output(id, i));
        let prev = (0..self.prev_execs.len()).map(|i| SocketAddr::exec_input(id, i));
        let next = (0..self.next_execs.len()).map(|i| SocketAddr::exec_output(id, i));
        inputs.chain(outputs).chain(prev).chain(next).collect()
    }

    pub(crate) fn reset_for_run(&mut self) {
        self.error = None;
        self.next_exec = 0;
        for input in &mut self.inputs {
            input.clear_value();
        }
        for output in &mut self.outputs {
            output.clear_value();
        }
    }

    pub(crate) fn record_error(&mut self, error: &GraphError) {
        self.error = Some(error.to_string());
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("class", &self.class)
            .field("location", &self.location)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("prev_execs", &self.prev_execs.len())
            .field("next_execs", &self.next_execs.len())
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::behavior::NoopBehavior;

    fn setup_node() -> Node {
        Node::new("test.node", "Test", Box::new(NoopBehavior))
            .with_input("A", TypeToken::Integer)
            .with_input("B", TypeToken::Text)
            .with_output("Out", TypeToken::Integer)
            .with_prev_exec("")
            .with_next_exec("True")
            .with_next_exec("False")
    }

    #[test]
    fn test_builder_assigns_indices_per_group() {
        let node = setup_node();
        assert_eq!(node.inputs()[1].index(), 1);
        assert_eq!(node.outputs()[0].index(), 0);
        assert_eq!(node.next_execs()[1].name(), "False");
        assert_eq!(node.socket_count(SocketKind::Exec, Direction::Output), 2);
        assert_eq!(node.socket_addrs().len(), 6);
    }

    #[test]
    fn test_socket_lookup() {
        let node = setup_node();
        assert_eq!(node.socket_type(&SocketAddr::value_input(0, 1)), Some(TypeToken::Text));
        assert_eq!(node.socket_type(&SocketAddr::exec_output(0, 0)), None);
        assert!(node.socket(&SocketAddr::value_input(0, 2)).is_none());
        assert_eq!(node.socket(&SocketAddr::exec_output(0, 1)).map(|s| s.name.as_str()), Some("False"));
    }

    #[test]
    fn test_reset_for_run_clears_outputs_and_error() {
        let mut node = setup_node();
        node.outputs[0].set_value(Some(Value::from(1_i64))).unwrap();
        node.error = Some("boom".into());
        node.next_exec = 1;

        node.reset_for_run();
        assert!(node.output_value(0).is_none());
        assert!(node.error().is_none());
        assert_eq!(node.next_exec, 0);
    }
}
