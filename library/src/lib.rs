//! nodegraph: a visual-scripting execution graph.
//!
//! Nodes are wired together through typed value sockets (data flow, pulled)
//! and exec sockets (control flow, pushed). A [`Graph`] owns the nodes,
//! enforces the connection rules, runs nodes and saves to a JSON document.
//!
//! ```
//! use nodegraph::{Graph, Location, SocketAddr, Value};
//!
//! let mut graph = Graph::default();
//! let five = graph.create_node("value.integer", Location::default()).unwrap();
//! graph.set_node_state(five, &serde_json::json!({ "value": 5 })).unwrap();
//! let inc = graph.create_node("math.increment", Location::default()).unwrap();
//! graph.connect(SocketAddr::value_output(five, 0), SocketAddr::value_input(inc, 0)).unwrap();
//!
//! assert_eq!(graph.output_value(inc, 0).unwrap(), Value::Integer(6));
//! ```

pub mod config;
pub mod error;
pub mod evaluation;
pub mod model;
pub mod plugin;
pub mod util;
pub mod view;

pub use config::EngineConfig;
pub use error::{ConnectionError, GraphError, Result};
pub use evaluation::{ComputeContext, NodeBehavior, RunReport};
pub use model::{
    Connection, Direction, Graph, GraphDocument, Location, Node, NodeId, Point, SocketAddr, SocketKind, TypeToken,
    Value,
};
pub use plugin::{FunctionSignature, NodeRegistry, NodeTypeDefinition, SocketDefinition};
