//! The per-class capability that computes a node.

use super::context::ComputeContext;
use crate::error::Result;

/// Computation and persistent state of one node.
///
/// The registry creates one boxed behavior per node instance, so a behavior
/// may keep private state between runs.
pub trait NodeBehavior: Send + Sync {
    /// Reads inputs and assigns every output through `ctx`.
    ///
    /// Returning an error faults the node. Nodes with more than one next-exec
    /// socket pick the one to follow with [`ComputeContext::select_exec`].
    fn compute(&mut self, _ctx: &mut ComputeContext<'_>) -> Result<()> {
        Ok(())
    }

    /// State written to the `child` field of the node's document entry.
    fn save_state(&self) -> serde_json::Value {
        serde_json::Value::Object(serde_json::Map::new())
    }

    /// Restores what [`save_state`](Self::save_state) wrote. `state` may be
    /// `null` or an empty object for documents that carry no state.
    fn load_state(&mut self, _state: &serde_json::Value) -> Result<()> {
        Ok(())
    }
}

/// A behavior that computes nothing. Used by pure control-flow nodes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBehavior;

impl NodeBehavior for NoopBehavior {}
