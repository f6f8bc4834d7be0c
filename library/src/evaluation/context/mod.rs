//! The view a behavior gets of its own node during a run.

use crate::error::{GraphError, Result};
use crate::model::socket::{Socket, SocketAddr, ValueSocket};
use crate::model::value::{FromValue, Value};
use crate::model::node::NodeId;

/// Borrowed access to one node's sockets while its behavior computes.
///
/// Inputs are already satisfied when the context is created. Outputs start
/// out empty.
pub struct ComputeContext<'a> {
    node: NodeId,
    label: &'a str,
    inputs: &'a [ValueSocket],
    outputs: &'a mut [ValueSocket],
    exec_count: usize,
    next_exec: &'a mut usize,
}

impl<'a> ComputeContext<'a> {
    pub(crate) fn new(
        node: NodeId,
        label: &'a str,
        inputs: &'a [ValueSocket],
        outputs: &'a mut [ValueSocket],
        exec_count: usize,
        next_exec: &'a mut usize,
    ) -> Self {
        Self {
            node,
            label,
            inputs,
            outputs,
            exec_count,
            next_exec,
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.node
    }

    /// Label of the node being computed, e.g. `Add#4`.
    pub fn node_label(&self) -> &str {
        self.label
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn input_value(&self, index: usize) -> Result<&Value> {
        let socket = self
            .inputs
            .get(index)
            .ok_or(GraphError::SocketNotFound(SocketAddr::value_input(self.node, index)))?;
        socket
            .value()
            .ok_or_else(|| GraphError::EmptyValue(socket.name().to_string()))
    }

    /// Typed read of an input. Fails loudly on a type mismatch.
    pub fn input<T: FromValue>(&self, index: usize) -> Result<T> {
        self.input_value(index)?.get::<T>()
    }

    pub fn set_output(&mut self, index: usize, value: impl Into<Value>) -> Result<()> {
        let socket = self
            .outputs
            .get_mut(index)
            .ok_or(GraphError::SocketNotFound(SocketAddr::value_output(self.node, index)))?;
        socket.set_value(Some(value.into()))
    }

    /// Chooses which next-exec socket control flow follows after this node.
    pub fn select_exec(&mut self, index: usize) -> Result<()> {
        if index >= self.exec_count {
            return Err(GraphError::SocketNotFound(SocketAddr::exec_output(self.node, index)));
        }
        *self.next_exec = index;
        Ok(())
    }
}
