//! Built-in node types.

mod data;
mod debug;
mod events;
mod flow;
mod math;
mod values;

use crate::model::type_token::TypeToken;
use crate::plugin::node_types::{NodeTypeDefinition, SocketDefinition};
use crate::plugin::registry::NodeRegistry;

/// Register all built-in node type definitions.
pub(crate) fn register_all_node_types(registry: &NodeRegistry) {
    for def in all_node_definitions() {
        registry.register(def);
    }
}

// ---------------------------------------------------------------------------
// Socket helpers
// ---------------------------------------------------------------------------

/// Direction comes from the list the socket is placed in.
fn sock(name: &str, dt: TypeToken) -> SocketDefinition {
    SocketDefinition::new(name, dt)
}

fn node(type_id: &str, name: &str) -> NodeTypeDefinition {
    NodeTypeDefinition::new(type_id, name)
}

/// Binary integer operator: A, B → Result.
fn binary_int(type_id: &str, name: &str) -> NodeTypeDefinition {
    use TypeToken::*;
    node(type_id, name)
        .with_inputs(vec![sock("A", Integer), sock("B", Integer)])
        .with_outputs(vec![sock("Result", Integer)])
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

fn all_node_definitions() -> Vec<NodeTypeDefinition> {
    [
        events::event_nodes(),
        flow::flow_nodes(),
        values::value_nodes(),
        math::math_nodes(),
        data::data_nodes(),
        debug::debug_nodes(),
    ]
    .concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_int_layout() {
        let def = binary_int("math.sub", "Subtract");
        let inputs: Vec<_> = def.inputs.iter().map(|s| s.name.as_str()).collect();
        let outputs: Vec<_> = def.outputs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(inputs, ["A", "B"]);
        assert_eq!(outputs, ["Result"]);
        assert!(def.outputs.iter().all(|s| s.data_type == TypeToken::Integer));
    }
}
