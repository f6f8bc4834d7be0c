//! Node type definitions: socket layout plus a behavior factory.

use std::fmt;
use std::sync::Arc;

use crate::evaluation::behavior::{NodeBehavior, NoopBehavior};
use crate::model::node::Node;
use crate::model::type_token::TypeToken;

/// Creates a fresh behavior for each node instance.
pub type BehaviorFactory = Arc<dyn Fn() -> Box<dyn NodeBehavior> + Send + Sync>;

/// Name and type of one value socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketDefinition {
    pub name: String,
    pub data_type: TypeToken,
}

impl SocketDefinition {
    pub fn new(name: &str, data_type: TypeToken) -> Self {
        Self {
            name: name.to_string(),
            data_type,
        }
    }
}

/// How a node type was registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A behavior type with its own state.
    Class,
    /// A plain function wrapped as a node.
    Function,
}

/// Definition of a node type, registered in the [`NodeRegistry`](super::registry::NodeRegistry).
///
/// Describes what a node of this type looks like: its sockets, how to build
/// its behavior, and metadata for palettes.
#[derive(Clone)]
pub struct NodeTypeDefinition {
    /// Qualified class tag (e.g. "math.add", "flow.branch")
    pub type_id: String,
    /// Human-readable name (e.g. "Add")
    pub display_name: String,
    /// Description shown in listings
    pub description: String,
    pub inputs: Vec<SocketDefinition>,
    pub outputs: Vec<SocketDefinition>,
    /// Names of incoming control-flow sockets
    pub prev_execs: Vec<String>,
    /// Names of outgoing control-flow sockets
    pub next_execs: Vec<String>,
    pub kind: NodeKind,
    factory: BehaviorFactory,
}

impl NodeTypeDefinition {
    pub fn new(type_id: &str, display_name: &str) -> Self {
        Self {
            type_id: type_id.to_string(),
            display_name: display_name.to_string(),
            description: String::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            prev_execs: Vec::new(),
            next_execs: Vec::new(),
            kind: NodeKind::Class,
            factory: Arc::new(|| -> Box<dyn NodeBehavior> { Box::new(NoopBehavior) }),
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    pub fn with_inputs(mut self, inputs: Vec<SocketDefinition>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<SocketDefinition>) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn with_prev_execs(mut self, names: &[&str]) -> Self {
        self.prev_execs = names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_next_execs(mut self, names: &[&str]) -> Self {
        self.next_execs = names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_behavior<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn NodeBehavior> + Send + Sync + 'static,
    {
        self.factory = Arc::new(factory);
        self
    }

    /// Everything before the last `.` of the type id, empty for top-level types.
    pub fn namespace(&self) -> &str {
        self.type_id.rsplit_once('.').map_or("", |(ns, _)| ns)
    }

    /// Builds an unattached node with this layout and a fresh behavior.
    pub fn instantiate(&self) -> Node {
        let mut node = Node::new(&self.type_id, &self.display_name, (self.factory)());
        for socket in &self.inputs {
            node = node.with_input(&socket.name, socket.data_type);
        }
        for socket in &self.outputs {
            node = node.with_output(&socket.name, socket.data_type);
        }
        for name in &self.prev_execs {
            node = node.with_prev_exec(name);
        }
        for name in &self.next_execs {
            node = node.with_next_exec(name);
        }
        node
    }
}

impl fmt::Debug for NodeTypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeTypeDefinition")
            .field("type_id", &self.type_id)
            .field("display_name", &self.display_name)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("prev_execs", &self.prev_execs)
            .field("next_execs", &self.next_execs)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
