use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use super::{node, sock};
use crate::error::{GraphError, Result};
use crate::evaluation::behavior::NodeBehavior;
use crate::evaluation::context::ComputeContext;
use crate::model::value::{FromValue, Value};
use crate::plugin::node_types::NodeTypeDefinition;

/// A node emitting one stored value, persisted as `{ "value": ... }`.
#[derive(Debug, Default)]
pub(super) struct Constant<T> {
    value: T,
}

impl<T> NodeBehavior for Constant<T>
where
    T: FromValue + Into<Value> + Serialize + DeserializeOwned + Clone + Send + Sync,
{
    fn compute(&mut self, ctx: &mut ComputeContext<'_>) -> Result<()> {
        ctx.set_output(0, self.value.clone())
    }

    fn save_state(&self) -> serde_json::Value {
        json!({ "value": self.value })
    }

    fn load_state(&mut self, state: &serde_json::Value) -> Result<()> {
        if let Some(value) = state.get("value") {
            self.value = serde_json::from_value(value.clone()).map_err(|e| {
                GraphError::invalid_document(format!("bad {} constant: {}", T::TOKEN, e))
            })?;
        }
        Ok(())
    }
}

fn constant<T>(type_id: &str, name: &str) -> NodeTypeDefinition
where
    T: FromValue + Into<Value> + Serialize + DeserializeOwned + Clone + Default + Send + Sync + 'static,
{
    node(type_id, name)
        .with_outputs(vec![sock("Val", T::TOKEN)])
        .with_behavior(|| -> Box<dyn NodeBehavior> { Box::new(Constant::<T>::default()) })
}

pub(super) fn value_nodes() -> Vec<NodeTypeDefinition> {
    vec![
        constant::<i64>("value.integer", "Integer"),
        constant::<bool>("value.boolean", "Boolean"),
        constant::<f64>("value.float", "Float"),
        constant::<String>("value.text", "Text"),
    ]
}
