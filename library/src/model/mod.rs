pub mod connection;
pub mod document;
pub mod graph;
pub mod node;
pub mod socket;
pub mod type_token;
pub mod value;

pub use connection::Connection;
pub use document::{GraphDocument, NodeDocument, PeerDocument, SocketDocument};
pub use graph::Graph;
pub use node::{Location, Node, NodeId};
pub use socket::{Direction, ExecSocket, Socket, SocketAddr, SocketCore, SocketKind, ValueSocket};
pub use type_token::TypeToken;
pub use value::{FromValue, Point, Value};
