use super::node;
use crate::plugin::node_types::NodeTypeDefinition;

pub(super) fn event_nodes() -> Vec<NodeTypeDefinition> {
    vec![
        node("event.update", "Update")
            .with_description("Entry point. Starts control flow when run")
            .with_next_execs(&[""]),
    ]
}
