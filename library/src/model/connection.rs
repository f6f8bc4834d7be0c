use serde::{Deserialize, Serialize};

use super::socket::{SocketAddr, SocketKind};

/// One edge, always stored output side first.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Connection {
    pub from: SocketAddr,
    pub to: SocketAddr,
}

impl Connection {
    pub fn new(from: SocketAddr, to: SocketAddr) -> Self {
        Self { from, to }
    }

    pub fn kind(&self) -> SocketKind {
        self.from.kind
    }

    pub fn is_exec(&self) -> bool {
        self.kind() == SocketKind::Exec
    }
}
