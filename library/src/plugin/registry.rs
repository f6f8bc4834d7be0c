//! Node registry: class tag → node type definition.

use std::collections::BTreeMap;
use std::sync::RwLock;

use log::{debug, warn};

use super::function_node::{function_definition, FunctionSignature};
use super::namespace::NamespaceTree;
use super::node_types::NodeTypeDefinition;
use crate::error::{GraphError, Result};
use crate::model::node::Node;
use crate::model::value::Value;

struct RegistryInner {
    node_types: BTreeMap<String, NodeTypeDefinition>,
}

/// Registry of node types, shared between graphs.
pub struct NodeRegistry {
    inner: RwLock<RegistryInner>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(RegistryInner {
                node_types: BTreeMap::new(),
            }),
        }
    }

    /// A registry holding every built-in node type.
    pub fn with_builtin_nodes() -> Self {
        let registry = Self::new();
        super::node_definitions::register_all_node_types(&registry);
        registry
    }

    /// Registers a node type. A definition with the same type id is replaced.
    pub fn register(&self, definition: NodeTypeDefinition) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        debug!("NodeRegistry: registering '{}'", definition.type_id);
        if let Some(old) = inner.node_types.insert(definition.type_id.clone(), definition) {
            warn!("NodeRegistry: node type '{}' was registered twice", old.type_id);
        }
    }

    /// Registers a plain function as a node type.
    pub fn register_function<F>(&self, type_id: &str, signature: FunctionSignature, function: F)
    where
        F: Fn(&[Value]) -> std::result::Result<Option<Value>, String> + Send + Sync + 'static,
    {
        self.register(function_definition(type_id, signature, function));
    }

    pub fn contains(&self, type_id: &str) -> bool {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.node_types.contains_key(type_id)
    }

    pub fn definition(&self, type_id: &str) -> Option<NodeTypeDefinition> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.node_types.get(type_id).cloned()
    }

    /// Builds a fresh, unattached node of the given class.
    pub fn instantiate(&self, type_id: &str) -> Result<Node> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner
            .node_types
            .get(type_id)
            .map(NodeTypeDefinition::instantiate)
            .ok_or_else(|| GraphError::UnknownClass(type_id.to_string()))
    }

    /// All definitions, ordered by type id.
    pub fn node_types(&self) -> Vec<NodeTypeDefinition> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.node_types.values().cloned().collect()
    }

    pub fn namespace_tree(&self) -> NamespaceTree {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let mut tree = NamespaceTree::new();
        for definition in inner.node_types.values() {
            tree.insert(&definition.type_id, &definition.display_name);
        }
        tree
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::type_token::TypeToken;

    #[test]
    fn test_instantiate_unknown_class() {
        let registry = NodeRegistry::new();
        match registry.instantiate("nope.missing") {
            Err(GraphError::UnknownClass(tag)) => assert_eq!(tag, "nope.missing"),
            other => panic!("expected UnknownClass, got {:?}", other),
        }
    }

    #[test]
    fn test_register_replaces_same_id() {
        let registry = NodeRegistry::new();
        registry.register(NodeTypeDefinition::new("a.x", "First"));
        registry.register(NodeTypeDefinition::new("a.x", "Second"));
        assert_eq!(registry.node_types().len(), 1);
        assert_eq!(registry.definition("a.x").unwrap().display_name, "Second");
    }

    #[test]
    fn test_register_function() {
        let registry = NodeRegistry::new();
        registry.register_function(
            "str.len",
            FunctionSignature::new()
                .param("s", TypeToken::Text)
                .returns("n", TypeToken::Integer),
            |args| {
                let s = args[0].as_text().unwrap_or_default();
                Ok(Some(Value::from(s.len() as i64)))
            },
        );
        assert!(registry.contains("str.len"));
        let node = registry.instantiate("str.len").unwrap();
        assert_eq!(node.inputs().len(), 1);
        assert_eq!(node.outputs()[0].type_token(), TypeToken::Integer);
    }

    #[test]
    fn test_builtin_namespaces() {
        let registry = NodeRegistry::with_builtin_nodes();
        let tree = registry.namespace_tree();
        assert!(tree.child("math").is_some());
        assert!(tree.child("flow").is_some());
        assert_eq!(tree.len(), registry.node_types().len());
    }
}
