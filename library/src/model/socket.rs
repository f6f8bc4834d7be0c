//! Sockets: typed connection points owned by a node.
//!
//! A socket never holds a reference to its peers. Peers are addressed by
//! [`SocketAddr`], so the arena in [`Graph`](super::graph::Graph) stays the
//! single owner of every node.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::node::NodeId;
use super::type_token::TypeToken;
use super::value::Value;
use crate::error::{GraphError, Result};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Input => Direction::Output,
            Direction::Output => Direction::Input,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SocketKind {
    /// Carries a [`Value`].
    Value,
    /// Carries control flow only.
    Exec,
}

/// Stable address of a socket inside a graph.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SocketAddr {
    pub node: NodeId,
    pub kind: SocketKind,
    pub direction: Direction,
    pub index: usize,
}

impl SocketAddr {
    pub fn new(node: NodeId, kind: SocketKind, direction: Direction, index: usize) -> Self {
        Self {
            node,
            kind,
            direction,
            index,
        }
    }

    pub fn value_input(node: NodeId, index: usize) -> Self {
        Self::new(node, SocketKind::Value, Direction::Input, index)
    }

    pub fn value_output(node: NodeId, index: usize) -> Self {
        Self::new(node, SocketKind::Value, Direction::Output, index)
    }

    /// Incoming control flow ("prev exec").
    pub fn exec_input(node: NodeId, index: usize) -> Self {
        Self::new(node, SocketKind::Exec, Direction::Input, index)
    }

    /// Outgoing control flow ("next exec").
    pub fn exec_output(node: NodeId, index: usize) -> Self {
        Self::new(node, SocketKind::Exec, Direction::Output, index)
    }
}

impl fmt::Display for SocketAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let group = match (self.kind, self.direction) {
            (SocketKind::Value, Direction::Input) => "in",
            (SocketKind::Value, Direction::Output) => "out",
            (SocketKind::Exec, Direction::Input) => "prev",
            (SocketKind::Exec, Direction::Output) => "next",
        };
        write!(f, "#{}.{}[{}]", self.node, group, self.index)
    }
}

/// State shared by both socket kinds.
#[derive(Debug, Clone, PartialEq)]
pub struct SocketCore {
    pub name: String,
    pub direction: Direction,
    pub index: usize,
    /// At most one peer when set.
    pub single_connect: bool,
    peers: Vec<SocketAddr>,
}

impl SocketCore {
    pub fn new(name: impl Into<String>, direction: Direction, index: usize, single_connect: bool) -> Self {
        Self {
            name: name.into(),
            direction,
            index,
            single_connect,
            peers: Vec::new(),
        }
    }

    /// Peers in the order their connections were established.
    pub fn peers(&self) -> &[SocketAddr] {
        &self.peers
    }

    pub fn is_connected(&self) -> bool {
        !self.peers.is_empty()
    }

    pub fn is_connected_to(&self, peer: &SocketAddr) -> bool {
        self.peers.contains(peer)
    }

    pub(crate) fn add_peer(&mut self, peer: SocketAddr) {
        if !self.is_connected_to(&peer) {
            self.peers.push(peer);
        }
    }

    pub(crate) fn remove_peer(&mut self, peer: &SocketAddr) {
        self.peers.retain(|p| p != peer);
    }

    pub(crate) fn take_peers(&mut self) -> Vec<SocketAddr> {
        std::mem::take(&mut self.peers)
    }
}

/// Common read access to sockets of either kind.
pub trait Socket {
    fn core(&self) -> &SocketCore;

    fn core_mut(&mut self) -> &mut SocketCore;

    fn kind(&self) -> SocketKind;

    fn name(&self) -> &str {
        &self.core().name
    }

    fn direction(&self) -> Direction {
        self.core().direction
    }

    fn index(&self) -> usize {
        self.core().index
    }

    fn peers(&self) -> &[SocketAddr] {
        self.core().peers()
    }

    fn is_connected(&self) -> bool {
        self.core().is_connected()
    }
}

/// A socket carrying a value of one fixed [`TypeToken`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSocket {
    core: SocketCore,
    token: TypeToken,
    value: Option<Value>,
}

impl ValueSocket {
    /// Inputs accept a single producer; outputs may feed many consumers.
    pub fn new(name: impl Into<String>, direction: Direction, index: usize, token: TypeToken) -> Self {
        let single_connect = direction == Direction::Input;
        Self {
            core: SocketCore::new(name, direction, index, single_connect),
            token,
            value: None,
        }
    }

    pub fn type_token(&self) -> TypeToken {
        self.token
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Assigns a value, rejecting an absent value or one of another type.
    /// On failure the previous value is left untouched.
    pub fn set_value(&mut self, value: Option<Value>) -> Result<()> {
        let value = value.ok_or_else(|| GraphError::EmptyValue(self.core.name.clone()))?;
        if value.type_token() != self.token {
            return Err(GraphError::TypeMismatch {
                expected: self.token,
                found: value.type_token(),
            });
        }
        self.value = Some(value);
        Ok(())
    }

    pub fn clear_value(&mut self) {
        self.value = None;
    }
}

impl Socket for ValueSocket {
    fn core(&self) -> &SocketCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SocketCore {
        &mut self.core
    }

    fn kind(&self) -> SocketKind {
        SocketKind::Value
    }
}

/// A control-flow socket. Fan-in and fan-out are both allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecSocket {
    core: SocketCore,
}

impl ExecSocket {
    pub fn new(name: impl Into<String>, direction: Direction, index: usize) -> Self {
        Self {
            core: SocketCore::new(name, direction, index, false),
        }
    }
}

impl Socket for ExecSocket {
    fn core(&self) -> &SocketCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SocketCore {
        &mut self.core
    }

    fn kind(&self) -> SocketKind {
        SocketKind::Exec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinality_by_kind_and_direction() {
        assert!(ValueSocket::new("A", Direction::Input, 0, TypeToken::Integer).core().single_connect);
        assert!(!ValueSocket::new("A", Direction::Output, 0, TypeToken::Integer).core().single_connect);
        assert!(!ExecSocket::new("", Direction::Input, 0).core().single_connect);
        assert!(!ExecSocket::new("", Direction::Output, 0).core().single_connect);
    }

    #[test]
    fn test_set_value_checks_presence_and_type() {
        let mut socket = ValueSocket::new("A", Direction::Input, 0, TypeToken::Integer);

        assert!(matches!(socket.set_value(None), Err(GraphError::EmptyValue(name)) if name == "A"));
        assert!(matches!(
            socket.set_value(Some(Value::from("x"))),
            Err(GraphError::TypeMismatch { .. })
        ));
        assert!(socket.value().is_none());

        socket.set_value(Some(Value::from(4_i64))).unwrap();
        assert_eq!(socket.value(), Some(&Value::Integer(4)));

        // a rejected assignment keeps the old value
        assert!(socket.set_value(Some(Value::from(true))).is_err());
        assert_eq!(socket.value(), Some(&Value::Integer(4)));
    }

    #[test]
    fn test_peer_list_has_no_duplicates() {
        let mut core = SocketCore::new("x", Direction::Output, 0, false);
        let peer = SocketAddr::value_input(2, 0);
        core.add_peer(peer);
        core.add_peer(peer);
        assert_eq!(core.peers(), &[peer]);

        core.remove_peer(&peer);
        assert!(!core.is_connected());
    }

    #[test]
    fn test_addr_display() {
        assert_eq!(SocketAddr::value_input(3, 1).to_string(), "#3.in[1]");
        assert_eq!(SocketAddr::exec_output(7, 0).to_string(), "#7.next[0]");
    }
}
