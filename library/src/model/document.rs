//! JSON document form of a graph.
//!
//! Connections are written by stable `(nodeID, socketIndex)` pairs, per
//! socket group, so a document survives across processes.

use log::debug;
use serde::{Deserialize, Serialize};

use super::graph::Graph;
use super::node::{Location, Node, NodeId};
use super::socket::{Direction, SocketAddr, SocketKind};
use crate::error::{GraphError, Result};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct GraphDocument {
    pub nodes: Vec<NodeDocument>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeDocument {
    pub id: NodeId,
    pub class: String,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub input_sockets: Vec<SocketDocument>,
    #[serde(default)]
    pub output_sockets: Vec<SocketDocument>,
    #[serde(default)]
    pub prev_exec_sockets: Vec<SocketDocument>,
    #[serde(default)]
    pub next_exec_sockets: Vec<SocketDocument>,
    /// Node specific state.
    #[serde(default)]
    pub child: serde_json::Value,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SocketDocument {
    pub index: usize,
    #[serde(default)]
    pub connected_socket: Vec<PeerDocument>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeerDocument {
    #[serde(rename = "nodeID")]
    pub node_id: NodeId,
    #[serde(rename = "socketIndex")]
    pub socket_index: usize,
}

impl NodeDocument {
    fn group(&self, kind: SocketKind, direction: Direction) -> &[SocketDocument] {
        match (kind, direction) {
            (SocketKind::Value, Direction::Input) => &self.input_sockets,
            (SocketKind::Value, Direction::Output) => &self.output_sockets,
            (SocketKind::Exec, Direction::Input) => &self.prev_exec_sockets,
            (SocketKind::Exec, Direction::Output) => &self.next_exec_sockets,
        }
    }
}

fn socket_group(node: &Node, kind: SocketKind, direction: Direction) -> Vec<SocketDocument> {
    (0..node.socket_count(kind, direction))
        .filter_map(|index| {
            let addr = SocketAddr::new(node.id(), kind, direction, index);
            node.socket(&addr).map(|socket| SocketDocument {
                index,
                connected_socket: socket
                    .peers()
                    .iter()
                    .map(|peer| PeerDocument {
                        node_id: peer.node,
                        socket_index: peer.index,
                    })
                    .collect(),
            })
        })
        .collect()
}

const OUTPUT_GROUPS: [(SocketKind, Direction); 2] = [
    (SocketKind::Value, Direction::Output),
    (SocketKind::Exec, Direction::Output),
];

const INPUT_GROUPS: [(SocketKind, Direction); 2] = [
    (SocketKind::Value, Direction::Input),
    (SocketKind::Exec, Direction::Input),
];

impl Graph {
    pub fn to_document(&self) -> GraphDocument {
        let nodes = self
            .nodes()
            .map(|node| NodeDocument {
                id: node.id(),
                class: node.class().to_string(),
                location: node.location,
                input_sockets: socket_group(node, SocketKind::Value, Direction::Input),
                output_sockets: socket_group(node, SocketKind::Value, Direction::Output),
                prev_exec_sockets: socket_group(node, SocketKind::Exec, Direction::Input),
                next_exec_sockets: socket_group(node, SocketKind::Exec, Direction::Output),
                child: node.behavior().save_state(),
            })
            .collect();
        GraphDocument { nodes }
    }

    /// Replaces the graph content with the document.
    ///
    /// All nodes are created first, then connections are made through
    /// [`Graph::connect`], so peers may be declared anywhere in the document.
    /// Output sides are wired before input sides, which keeps the order of
    /// exec fan-out. On any error the graph is left as it was.
    pub fn from_document(&mut self, doc: &GraphDocument) -> Result<()> {
        let mut staged = Graph::with_config(self.registry.clone(), self.config.clone());

        for entry in &doc.nodes {
            if staged.nodes.contains_key(&entry.id) {
                return Err(GraphError::invalid_document(format!("duplicate node id {}", entry.id)));
            }
            let mut node = self.registry.instantiate(&entry.class)?;
            node.id = entry.id;
            node.location = entry.location;
            node.behavior.load_state(&entry.child)?;
            staged.nodes.insert(entry.id, node);
        }

        let max_id = staged.nodes.keys().next_back().copied().unwrap_or(0);
        let after_max = max_id
            .checked_add(1)
            .ok_or_else(|| GraphError::invalid_document("node id space exhausted"))?;
        staged.next_id = after_max.max(self.config.first_node_id);

        for groups in [OUTPUT_GROUPS, INPUT_GROUPS] {
            for entry in &doc.nodes {
                for (kind, direction) in groups {
                    for socket in entry.group(kind, direction) {
                        staged.restore_socket(entry.id, kind, direction, socket)?;
                    }
                }
            }
        }

        debug!("Graph: loaded {} node(s)", staged.nodes.len());
        self.nodes = staged.nodes;
        self.next_id = staged.next_id;
        Ok(())
    }

    fn restore_socket(
        &mut self,
        id: NodeId,
        kind: SocketKind,
        direction: Direction,
        socket: &SocketDocument,
    ) -> Result<()> {
        let local = SocketAddr::new(id, kind, direction, socket.index);
        if self.socket(&local).is_err() {
            return Err(GraphError::invalid_document(format!("node {} has no socket {}", id, local)));
        }
        for peer in &socket.connected_socket {
            let remote = SocketAddr::new(peer.node_id, kind, direction.opposite(), peer.socket_index);
            match self.socket(&remote) {
                Ok(_) => {}
                Err(GraphError::NodeNotFound(missing)) => {
                    return Err(GraphError::invalid_document(format!(
                        "{} refers to unknown node {}",
                        local, missing
                    )));
                }
                Err(_) => {
                    return Err(GraphError::invalid_document(format!(
                        "{} refers to missing socket {}",
                        local, remote
                    )));
                }
            }
            self.connect(local, remote)?;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    pub fn load(&mut self, json: &str) -> Result<()> {
        let doc: GraphDocument = serde_json::from_str(json)?;
        self.from_document(&doc)
    }
}
