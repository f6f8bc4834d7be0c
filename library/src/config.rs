//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::model::node::NodeId;

/// Tunables of a [`Graph`](crate::Graph).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Deepest allowed nesting of `run` calls (data pulls plus exec pushes).
    /// Bounds stack use on long acyclic chains; a node entered at this depth
    /// fails with `DepthExceeded`.
    pub max_depth: usize,
    /// Identity handed to the first node inserted into an empty graph.
    pub first_node_id: NodeId,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: 512,
            first_node_id: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{ "max_depth": 16 }"#).unwrap();
        assert_eq!(config.max_depth, 16);
        assert_eq!(config.first_node_id, 1);
    }
}
