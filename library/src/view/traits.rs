//! Trait definitions decoupling an editor front end from the graph.
//!
//! A front end reads through [`GraphDataSource`] and edits through
//! [`GraphMutator`]. Neither carries coordinates beyond the opaque
//! [`Location`] attached to each node.

use super::types::{NodeDisplay, NodeTypeInfo};
use crate::error::{GraphError, Result};
use crate::model::connection::Connection;
use crate::model::graph::Graph;
use crate::model::node::{Location, NodeId};
use crate::model::socket::SocketAddr;

/// Read-only data source for an editor.
pub trait GraphDataSource {
    /// All node ids in ascending order.
    fn node_ids(&self) -> Vec<NodeId>;

    /// Get display information for a node.
    fn node_display(&self, id: NodeId) -> Option<NodeDisplay>;

    /// Get all connections, output side first.
    fn connections(&self) -> Vec<Connection>;

    /// Whether a drag from `a` to `b` may be accepted.
    fn can_connect(&self, a: &SocketAddr, b: &SocketAddr) -> bool;
}

/// Mutation interface for an editor.
pub trait GraphMutator {
    /// Add a new node of a registered type.
    fn add_node(&mut self, type_id: &str, location: Location) -> Result<NodeId>;

    /// Remove a node, dropping its connections.
    fn remove_node(&mut self, id: NodeId) -> Result<()>;

    fn connect(&mut self, a: SocketAddr, b: SocketAddr) -> Result<()>;

    /// Remove one connection.
    fn disconnect(&mut self, connection: &Connection) -> Result<()>;

    fn move_node(&mut self, id: NodeId, location: Location) -> Result<()>;

    /// Get all available node types for a palette.
    fn available_node_types(&self) -> Vec<NodeTypeInfo>;
}

impl GraphDataSource for Graph {
    fn node_ids(&self) -> Vec<NodeId> {
        Graph::node_ids(self)
    }

    fn node_display(&self, id: NodeId) -> Option<NodeDisplay> {
        self.node(id).map(NodeDisplay::from_node)
    }

    fn connections(&self) -> Vec<Connection> {
        Graph::connections(self)
    }

    fn can_connect(&self, a: &SocketAddr, b: &SocketAddr) -> bool {
        Graph::can_connect(self, a, b)
    }
}

impl GraphMutator for Graph {
    fn add_node(&mut self, type_id: &str, location: Location) -> Result<NodeId> {
        self.create_node(type_id, location)
    }

    fn remove_node(&mut self, id: NodeId) -> Result<()> {
        Graph::remove_node(self, id).map(|_| ())
    }

    fn connect(&mut self, a: SocketAddr, b: SocketAddr) -> Result<()> {
        Graph::connect(self, a, b)
    }

    fn disconnect(&mut self, connection: &Connection) -> Result<()> {
        self.disconnect_between(connection.from, connection.to)
    }

    fn move_node(&mut self, id: NodeId, location: Location) -> Result<()> {
        let node = self.node_mut(id).ok_or(GraphError::NodeNotFound(id))?;
        node.location = location;
        Ok(())
    }

    fn available_node_types(&self) -> Vec<NodeTypeInfo> {
        self.registry()
            .node_types()
            .iter()
            .map(NodeTypeInfo::from)
            .collect()
    }
}
