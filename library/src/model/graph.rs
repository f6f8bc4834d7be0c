//! The graph container: node arena, identity counter and connection protocol.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;

use super::connection::Connection;
use super::node::{Location, Node, NodeId};
use super::socket::{Direction, SocketAddr, SocketCore};
use crate::config::EngineConfig;
use crate::error::{ConnectionError, GraphError, Result};
use crate::plugin::registry::NodeRegistry;

/// Owns every node and the connections between them.
///
/// Nodes are kept ordered by id. Ids are handed out from a monotonic counter
/// and never reused while the graph lives.
pub struct Graph {
    pub(crate) nodes: BTreeMap<NodeId, Node>,
    pub(crate) next_id: NodeId,
    pub(crate) registry: Arc<NodeRegistry>,
    pub(crate) config: EngineConfig,
}

impl Graph {
    pub fn new(registry: Arc<NodeRegistry>) -> Self {
        Self::with_config(registry, EngineConfig::default())
    }

    pub fn with_config(registry: Arc<NodeRegistry>, config: EngineConfig) -> Self {
        Self {
            nodes: BTreeMap::new(),
            next_id: config.first_node_id,
            registry,
            config,
        }
    }

    pub fn registry(&self) -> &Arc<NodeRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Instantiates `class` from the registry and inserts it.
    pub fn create_node(&mut self, class: &str, location: Location) -> Result<NodeId> {
        let node = self.registry.instantiate(class)?.with_location(location);
        self.add_node(node)
    }

    /// Inserts a node, assigning it the next free id.
    ///
    /// Fails with `IdsExhausted` once the counter would pass `NodeId::MAX`.
    pub fn add_node(&mut self, mut node: Node) -> Result<NodeId> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(GraphError::IdsExhausted)?;
        node.id = id;
        debug!("Graph: added {}", node.label());
        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Disconnects every socket of the node, then takes it out of the graph.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Node> {
        self.disconnect_node(id)?;
        let node = self.nodes.remove(&id).ok_or(GraphError::NodeNotFound(id))?;
        debug!("Graph: removed {}", node.label());
        Ok(node)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.next_id = self.config.first_node_id;
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    /// First node (lowest id) of the given class.
    pub fn find_by_class(&self, class: &str) -> Option<&Node> {
        self.nodes.values().find(|n| n.class() == class)
    }

    pub fn nodes_of_class(&self, class: &str) -> Vec<NodeId> {
        self.nodes
            .values()
            .filter(|n| n.class() == class)
            .map(Node::id)
            .collect()
    }

    /// Restores node specific state, the same way a document load does.
    pub fn set_node_state(&mut self, id: NodeId, state: &serde_json::Value) -> Result<()> {
        let node = self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))?;
        node.behavior.load_state(state)
    }

    /// Every edge, output side first, ordered by output socket then by
    /// connection order.
    pub fn connections(&self) -> Vec<Connection> {
        let mut out = Vec::new();
        for node in self.nodes.values() {
            for addr in node.socket_addrs() {
                if addr.direction != Direction::Output {
                    continue;
                }
                if let Some(socket) = node.socket(&addr) {
                    out.extend(socket.peers().iter().map(|peer| Connection::new(addr, *peer)));
                }
            }
        }
        out
    }

    pub fn socket(&self, addr: &SocketAddr) -> Result<&SocketCore> {
        let node = self.nodes.get(&addr.node).ok_or(GraphError::NodeNotFound(addr.node))?;
        node.socket(addr).ok_or(GraphError::SocketNotFound(*addr))
    }

    fn socket_mut(&mut self, addr: &SocketAddr) -> Result<&mut SocketCore> {
        let node = self.nodes.get_mut(&addr.node).ok_or(GraphError::NodeNotFound(addr.node))?;
        node.socket_mut(addr).ok_or(GraphError::SocketNotFound(*addr))
    }

    fn check_connection(&self, a: &SocketAddr, b: &SocketAddr) -> Result<()> {
        self.socket(a)?;
        self.socket(b)?;

        if a.direction == b.direction {
            return Err(ConnectionError::SameDirection { a: *a, b: *b }.into());
        }
        if a.kind != b.kind {
            return Err(ConnectionError::KindMismatch { a: *a, b: *b }.into());
        }

        let (output, input) = if a.direction == Direction::Output { (a, b) } else { (b, a) };
        let output_type = self.nodes.get(&output.node).and_then(|n| n.socket_type(output));
        let input_type = self.nodes.get(&input.node).and_then(|n| n.socket_type(input));
        if let (Some(output_type), Some(input_type)) = (output_type, input_type) {
            if output_type != input_type {
                return Err(ConnectionError::TypeMismatch {
                    output: *output,
                    output_type,
                    input: *input,
                    input_type,
                }
                .into());
            }
        }
        Ok(())
    }

    /// True iff the two sockets exist, face opposite directions, are of the
    /// same kind and, for value sockets, carry the same type.
    pub fn can_connect(&self, a: &SocketAddr, b: &SocketAddr) -> bool {
        self.check_connection(a, b).is_ok()
    }

    /// Joins two sockets given in either order.
    ///
    /// Connecting an already joined pair is a no-op. A single-connect endpoint
    /// loses its previous edge first. On error nothing changes.
    pub fn connect(&mut self, a: SocketAddr, b: SocketAddr) -> Result<()> {
        self.check_connection(&a, &b)?;
        let (output, input) = if a.direction == Direction::Output { (a, b) } else { (b, a) };

        if self.socket(&output)?.is_connected_to(&input) {
            return Ok(());
        }
        for endpoint in [output, input] {
            if self.socket(&endpoint)?.single_connect {
                self.disconnect(endpoint)?;
            }
        }

        self.socket_mut(&output)?.add_peer(input);
        self.socket_mut(&input)?.add_peer(output);
        debug!("Graph: connected {} -> {}", output, input);
        Ok(())
    }

    /// Drops every edge of one socket. Safe on an unconnected socket.
    pub fn disconnect(&mut self, addr: SocketAddr) -> Result<()> {
        let peers = self.socket_mut(&addr)?.take_peers();
        for peer in &peers {
            if let Ok(socket) = self.socket_mut(peer) {
                socket.remove_peer(&addr);
            }
        }
        if !peers.is_empty() {
            debug!("Graph: disconnected {} from {} peer(s)", addr, peers.len());
        }
        Ok(())
    }

    /// Drops the single edge between `a` and `b`, if present.
    pub fn disconnect_between(&mut self, a: SocketAddr, b: SocketAddr) -> Result<()> {
        self.socket(&b)?;
        self.socket_mut(&a)?.remove_peer(&b);
        self.socket_mut(&b)?.remove_peer(&a);
        Ok(())
    }

    /// Disconnects every socket of a node.
    pub fn disconnect_node(&mut self, id: NodeId) -> Result<()> {
        let addrs = self
            .nodes
            .get(&id)
            .ok_or(GraphError::NodeNotFound(id))?
            .socket_addrs();
        for addr in addrs {
            self.disconnect(addr)?;
        }
        Ok(())
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(Arc::new(NodeRegistry::with_builtin_nodes()))
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.nodes)
            .field("next_id", &self.next_id)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::type_token::TypeToken;
    use crate::evaluation::behavior::NoopBehavior;

    fn setup_pair() -> (Graph, NodeId, NodeId) {
        let mut graph = Graph::new(Arc::new(NodeRegistry::new()));
        let a = graph
            .add_node(
                Node::new("t.src", "Src", Box::new(NoopBehavior))
                    .with_output("Out", TypeToken::Integer)
                    .with_next_exec(""),
            )
            .unwrap();
        let b = graph
            .add_node(
                Node::new("t.dst", "Dst", Box::new(NoopBehavior))
                    .with_input("In", TypeToken::Integer)
                    .with_prev_exec(""),
            )
            .unwrap();
        (graph, a, b)
    }

    #[test]
    fn test_ids_start_at_one_and_are_not_reused() {
        let (mut graph, a, b) = setup_pair();
        assert_eq!((a, b), (1, 2));
        graph.remove_node(b).unwrap();
        let c = graph.add_node(Node::new("t.x", "X", Box::new(NoopBehavior))).unwrap();
        assert_eq!(c, 3);
    }

    #[test]
    fn test_graph_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Graph>();
    }

    #[test]
    fn test_add_node_stops_at_last_id() {
        let mut graph = Graph::with_config(
            Arc::new(NodeRegistry::new()),
            EngineConfig {
                first_node_id: NodeId::MAX - 1,
                ..Default::default()
            },
        );
        let last = graph.add_node(Node::new("t.x", "X", Box::new(NoopBehavior))).unwrap();
        assert_eq!(last, NodeId::MAX - 1);
        assert!(matches!(
            graph.add_node(Node::new("t.x", "X", Box::new(NoopBehavior))),
            Err(GraphError::IdsExhausted)
        ));
        assert_eq!(graph.node_ids(), vec![last]);
    }

    #[test]
    fn test_connect_is_symmetric_and_idempotent() {
        let (mut graph, a, b) = setup_pair();
        let out = SocketAddr::value_output(a, 0);
        let inp = SocketAddr::value_input(b, 0);

        graph.connect(inp, out).unwrap();
        graph.connect(out, inp).unwrap();

        assert_eq!(graph.socket(&out).unwrap().peers(), &[inp]);
        assert_eq!(graph.socket(&inp).unwrap().peers(), &[out]);
        assert_eq!(graph.connections(), vec![Connection::new(out, inp)]);
    }

    #[test]
    fn test_connect_missing_targets() {
        let (mut graph, a, _) = setup_pair();
        assert!(matches!(
            graph.connect(SocketAddr::value_output(a, 0), SocketAddr::value_input(99, 0)),
            Err(GraphError::NodeNotFound(99))
        ));
        assert!(matches!(
            graph.connect(SocketAddr::value_output(a, 5), SocketAddr::value_input(2, 0)),
            Err(GraphError::SocketNotFound(_))
        ));
    }

    #[test]
    fn test_disconnect_between_leaves_other_edges() {
        let (mut graph, a, b) = setup_pair();
        let next = SocketAddr::exec_output(a, 0);
        let prev = SocketAddr::exec_input(b, 0);
        graph.connect(next, prev).unwrap();
        graph.connect(SocketAddr::value_output(a, 0), SocketAddr::value_input(b, 0)).unwrap();

        graph.disconnect_between(prev, next).unwrap();
        assert!(!graph.socket(&next).unwrap().is_connected());
        assert_eq!(graph.connections().len(), 1);
    }

    #[test]
    fn test_find_by_class() {
        let (graph, a, _) = setup_pair();
        assert_eq!(graph.find_by_class("t.src").map(Node::id), Some(a));
        assert!(graph.find_by_class("t.none").is_none());
        assert_eq!(graph.nodes_of_class("t.dst"), vec![2]);
    }
}
