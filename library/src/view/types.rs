//! Lightweight data types handed to an editor front end.

use crate::model::node::{Location, Node, NodeId};
use crate::model::socket::SocketAddr;
use crate::model::type_token::TypeToken;
use crate::plugin::node_types::NodeTypeDefinition;

/// Information about a socket for display.
#[derive(Clone, Debug, PartialEq)]
pub struct SocketInfo {
    pub addr: SocketAddr,
    pub name: String,
    /// `None` for exec sockets.
    pub data_type: Option<TypeToken>,
    pub connection_count: usize,
}

/// How a node should be displayed.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDisplay {
    pub id: NodeId,
    pub type_id: String,
    pub display_name: String,
    pub location: Location,
    pub sockets: Vec<SocketInfo>,
    /// Fault recorded by the last run.
    pub error: Option<String>,
}

impl NodeDisplay {
    pub(crate) fn from_node(node: &Node) -> Self {
        let sockets = node
            .socket_addrs()
            .into_iter()
            .filter_map(|addr| {
                node.socket(&addr).map(|core| SocketInfo {
                    addr,
                    name: core.name.clone(),
                    data_type: node.socket_type(&addr),
                    connection_count: core.peers().len(),
                })
            })
            .collect();
        Self {
            id: node.id(),
            type_id: node.class().to_string(),
            display_name: node.display_name().to_string(),
            location: node.location,
            sockets,
            error: node.error().map(str::to_string),
        }
    }

    pub fn socket(&self, addr: &SocketAddr) -> Option<&SocketInfo> {
        self.sockets.iter().find(|s| s.addr == *addr)
    }
}

/// Node type information for a palette.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeTypeInfo {
    pub type_id: String,
    pub display_name: String,
    pub namespace: String,
}

impl From<&NodeTypeDefinition> for NodeTypeInfo {
    fn from(def: &NodeTypeDefinition) -> Self {
        Self {
            type_id: def.type_id.clone(),
            display_name: def.display_name.clone(),
            namespace: def.namespace().to_string(),
        }
    }
}
