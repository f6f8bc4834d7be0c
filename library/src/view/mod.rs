//! Boundary between the graph and an editor front end.

pub mod traits;
pub mod types;

pub use traits::{GraphDataSource, GraphMutator};
pub use types::{NodeDisplay, NodeTypeInfo, SocketInfo};
