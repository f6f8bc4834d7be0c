//! Node types: registry, definitions and the built-in node set.

pub mod function_node;
pub mod namespace;
pub(crate) mod node_definitions;
pub mod node_types;
pub mod registry;

pub use function_node::{FunctionSignature, function_definition};
pub use namespace::NamespaceTree;
pub use node_types::{NodeKind, NodeTypeDefinition, SocketDefinition};
pub use registry::NodeRegistry;
