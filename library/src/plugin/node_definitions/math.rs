use super::{binary_int, node, sock};
use crate::error::{GraphError, Result};
use crate::evaluation::behavior::NodeBehavior;
use crate::evaluation::context::ComputeContext;
use crate::model::type_token::TypeToken;
use crate::plugin::node_types::NodeTypeDefinition;

struct Increment;

impl NodeBehavior for Increment {
    fn compute(&mut self, ctx: &mut ComputeContext<'_>) -> Result<()> {
        let a = ctx.input::<i64>(0)?;
        let result = a
            .checked_add(1)
            .ok_or_else(|| GraphError::compute("integer overflow"))?;
        ctx.set_output(0, result)
    }
}

struct Add;

impl NodeBehavior for Add {
    fn compute(&mut self, ctx: &mut ComputeContext<'_>) -> Result<()> {
        let (a, b) = (ctx.input::<i64>(0)?, ctx.input::<i64>(1)?);
        let result = a
            .checked_add(b)
            .ok_or_else(|| GraphError::compute(format!("{} + {} overflows", a, b)))?;
        ctx.set_output(0, result)
    }
}

struct Divide;

impl NodeBehavior for Divide {
    fn compute(&mut self, ctx: &mut ComputeContext<'_>) -> Result<()> {
        let (a, b) = (ctx.input::<i64>(0)?, ctx.input::<i64>(1)?);
        if b == 0 {
            return Err(GraphError::compute("division by zero"));
        }
        let result = a
            .checked_div(b)
            .ok_or_else(|| GraphError::compute(format!("{} / {} overflows", a, b)))?;
        ctx.set_output(0, result)
    }
}

pub(super) fn math_nodes() -> Vec<NodeTypeDefinition> {
    use TypeToken::*;
    vec![
        node("math.increment", "Increment")
            .with_inputs(vec![sock("A", Integer)])
            .with_outputs(vec![sock("Result", Integer)])
            .with_behavior(|| -> Box<dyn NodeBehavior> { Box::new(Increment) }),
        binary_int("math.add", "Add").with_behavior(|| -> Box<dyn NodeBehavior> { Box::new(Add) }),
        binary_int("math.divide", "Divide")
            .with_description("Integer division, truncating toward zero")
            .with_behavior(|| -> Box<dyn NodeBehavior> { Box::new(Divide) }),
    ]
}
