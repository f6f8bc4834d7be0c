use super::{node, sock};
use crate::error::Result;
use crate::evaluation::behavior::NodeBehavior;
use crate::evaluation::context::ComputeContext;
use crate::model::type_token::TypeToken;
use crate::plugin::node_types::NodeTypeDefinition;

struct Branch;

impl NodeBehavior for Branch {
    fn compute(&mut self, ctx: &mut ComputeContext<'_>) -> Result<()> {
        let cond = ctx.input::<bool>(0)?;
        ctx.select_exec(if cond { 0 } else { 1 })
    }
}

pub(super) fn flow_nodes() -> Vec<NodeTypeDefinition> {
    vec![
        node("flow.branch", "Branch")
            .with_description("Continues on True or False depending on Cond")
            .with_inputs(vec![sock("Cond", TypeToken::Boolean)])
            .with_prev_execs(&[""])
            .with_next_execs(&["True", "False"])
            .with_behavior(|| -> Box<dyn NodeBehavior> { Box::new(Branch) }),
    ]
}
