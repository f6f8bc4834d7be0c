use log::info;
use serde_json::json;

use super::{node, sock};
use crate::error::Result;
use crate::evaluation::behavior::NodeBehavior;
use crate::evaluation::context::ComputeContext;
use crate::model::type_token::TypeToken;
use crate::plugin::node_types::NodeTypeDefinition;

/// Logs its input and remembers the last message.
#[derive(Default)]
struct DebugLog {
    last_message: Option<String>,
}

impl NodeBehavior for DebugLog {
    fn compute(&mut self, ctx: &mut ComputeContext<'_>) -> Result<()> {
        let text = ctx.input::<String>(0)?;
        info!("[{}] {}", ctx.node_label(), text);
        self.last_message = Some(text);
        Ok(())
    }

    fn save_state(&self) -> serde_json::Value {
        json!({ "lastMessage": self.last_message })
    }

    fn load_state(&mut self, state: &serde_json::Value) -> Result<()> {
        self.last_message = state
            .get("lastMessage")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);
        Ok(())
    }
}

pub(super) fn debug_nodes() -> Vec<NodeTypeDefinition> {
    vec![
        node("debug.log", "Log")
            .with_inputs(vec![sock("Text", TypeToken::Text)])
            .with_prev_execs(&[""])
            .with_next_execs(&[""])
            .with_behavior(|| -> Box<dyn NodeBehavior> { Box::new(DebugLog::default()) }),
    ]
}
