use thiserror::Error;

use crate::model::node::NodeId;
use crate::model::socket::SocketAddr;
use crate::model::type_token::TypeToken;

pub type Result<T> = std::result::Result<T, GraphError>;

/// Why two sockets may not be joined.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("{a} and {b} have the same direction")]
    SameDirection { a: SocketAddr, b: SocketAddr },
    #[error("{a} and {b} are of different socket kinds")]
    KindMismatch { a: SocketAddr, b: SocketAddr },
    #[error("cannot connect {output} ({output_type}) to {input} ({input_type})")]
    TypeMismatch {
        output: SocketAddr,
        output_type: TypeToken,
        input: SocketAddr,
        input_type: TypeToken,
    },
}

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("node {node}: input socket \"{socket}\" has no connected producer")]
    MissingInput { node: String, socket: String },
    #[error("node {node}: output socket \"{socket}\" was not assigned a value")]
    MissingOutput { node: String, socket: String },
    #[error("Unknown node class: {0}")]
    UnknownClass(String),
    #[error("node {node}: re-entered at run depth {depth}, the graph contains a cycle")]
    CycleOverflow { node: String, depth: usize },
    #[error("node {node}: run depth {depth} exceeded the configured limit")]
    DepthExceeded { node: String, depth: usize },
    #[error("expected a value of type {expected}, found {found}")]
    TypeMismatch { expected: TypeToken, found: TypeToken },
    #[error("socket \"{0}\" holds no value")]
    EmptyValue(String),
    #[error("Compute error: {0}")]
    Compute(String),
    #[error("node {node} is faulted: {message}")]
    Faulted { node: String, message: String },
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),
    #[error("Socket not found: {0}")]
    SocketNotFound(SocketAddr),
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    #[error("node id space exhausted")]
    IdsExhausted,
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GraphError {
    pub fn compute(msg: impl Into<String>) -> Self {
        GraphError::Compute(msg.into())
    }

    pub fn invalid_document(msg: impl Into<String>) -> Self {
        GraphError::InvalidDocument(msg.into())
    }
}
