use super::{node, sock};
use crate::error::Result;
use crate::evaluation::behavior::NodeBehavior;
use crate::evaluation::context::ComputeContext;
use crate::model::type_token::TypeToken;
use crate::model::value::Point;
use crate::plugin::node_types::NodeTypeDefinition;

struct MakePoint;

impl NodeBehavior for MakePoint {
    fn compute(&mut self, ctx: &mut ComputeContext<'_>) -> Result<()> {
        let point = Point::new(ctx.input::<i64>(0)?, ctx.input::<i64>(1)?);
        ctx.set_output(0, point)
    }
}

struct FormatInteger;

impl NodeBehavior for FormatInteger {
    fn compute(&mut self, ctx: &mut ComputeContext<'_>) -> Result<()> {
        let value = ctx.input::<i64>(0)?;
        ctx.set_output(0, value.to_string())
    }
}

pub(super) fn data_nodes() -> Vec<NodeTypeDefinition> {
    vec![
        node("point.make", "Make Point")
            .with_inputs(vec![sock("x", TypeToken::Integer), sock("y", TypeToken::Integer)])
            .with_outputs(vec![sock("Point", TypeToken::Point)])
            .with_behavior(|| -> Box<dyn NodeBehavior> { Box::new(MakePoint) }),
        node("text.format", "Format")
            .with_description("Decimal text of an integer")
            .with_inputs(vec![sock("Value", TypeToken::Integer)])
            .with_outputs(vec![sock("Text", TypeToken::Text)])
            .with_behavior(|| -> Box<dyn NodeBehavior> { Box::new(FormatInteger) }),
    ]
}
