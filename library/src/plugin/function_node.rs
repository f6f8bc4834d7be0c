//! Plain functions wrapped as nodes.
//!
//! A function node gets one input socket per parameter, an optional result
//! output, and a single prev/next exec pair so it can sit in a control-flow
//! chain.

use std::sync::Arc;

use super::node_types::{NodeKind, NodeTypeDefinition, SocketDefinition};
use crate::error::{GraphError, Result};
use crate::evaluation::behavior::NodeBehavior;
use crate::evaluation::context::ComputeContext;
use crate::model::type_token::TypeToken;
use crate::model::value::Value;

pub type NodeFunction = dyn Fn(&[Value]) -> std::result::Result<Option<Value>, String> + Send + Sync;

/// Parameter and result layout of a function node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionSignature {
    pub params: Vec<(String, TypeToken)>,
    pub result: Option<(String, TypeToken)>,
}

impl FunctionSignature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, name: &str, token: TypeToken) -> Self {
        self.params.push((name.to_string(), token));
        self
    }

    pub fn returns(mut self, name: &str, token: TypeToken) -> Self {
        self.result = Some((name.to_string(), token));
        self
    }
}

struct FunctionNode {
    function: Arc<NodeFunction>,
    has_result: bool,
}

impl NodeBehavior for FunctionNode {
    fn compute(&mut self, ctx: &mut ComputeContext<'_>) -> Result<()> {
        let args = (0..ctx.input_count())
            .map(|i| ctx.input_value(i).cloned())
            .collect::<Result<Vec<_>>>()?;

        match (self.function)(&args).map_err(GraphError::Compute)? {
            Some(value) if self.has_result => ctx.set_output(0, value),
            Some(_) => Err(GraphError::compute(format!(
                "{} returned a value but declares no result",
                ctx.node_label()
            ))),
            // a declared but unassigned result is reported as a missing output
            None => Ok(()),
        }
    }
}

/// Builds the definition of a function node. The display name is the last
/// segment of `type_id`.
pub fn function_definition<F>(type_id: &str, signature: FunctionSignature, function: F) -> NodeTypeDefinition
where
    F: Fn(&[Value]) -> std::result::Result<Option<Value>, String> + Send + Sync + 'static,
{
    let display_name = type_id.rsplit('.').next().unwrap_or(type_id);
    let function: Arc<NodeFunction> = Arc::new(function);
    let has_result = signature.result.is_some();

    let inputs = signature
        .params
        .iter()
        .map(|(name, token)| SocketDefinition::new(name, *token))
        .collect();
    let outputs = signature
        .result
        .iter()
        .map(|(name, token)| SocketDefinition::new(name, *token))
        .collect();

    NodeTypeDefinition::new(type_id, display_name)
        .with_kind(NodeKind::Function)
        .with_inputs(inputs)
        .with_outputs(outputs)
        .with_prev_execs(&[""])
        .with_next_execs(&[""])
        .with_behavior(move || -> Box<dyn NodeBehavior> {
            Box::new(FunctionNode {
                function: function.clone(),
                has_result,
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::graph::Graph;
    use crate::model::socket::SocketAddr;
    use crate::model::node::Node;

    struct Const(i64);

    impl NodeBehavior for Const {
        fn compute(&mut self, ctx: &mut ComputeContext<'_>) -> Result<()> {
            ctx.set_output(0, self.0)
        }
    }

    fn setup_square() -> (Graph, u32) {
        let def = function_definition(
            "math.square",
            FunctionSignature::new()
                .param("x", TypeToken::Integer)
                .returns("y", TypeToken::Integer),
            |args| {
                let x = args[0].get::<i64>().map_err(|e| e.to_string())?;
                x.checked_mul(x).map(|v| Some(Value::from(v))).ok_or_else(|| "overflow".to_string())
            },
        );
        let mut graph = Graph::default();
        let square = graph.add_node(def.instantiate()).unwrap();
        (graph, square)
    }

    #[test]
    fn test_function_node_layout() {
        let def = function_definition("io.print", FunctionSignature::new().param("text", TypeToken::Text), |_| Ok(None));
        assert_eq!(def.display_name, "print");
        assert_eq!(def.kind, NodeKind::Function);
        assert!(def.outputs.is_empty());
        assert_eq!(def.prev_execs.len(), 1);
        assert_eq!(def.next_execs.len(), 1);
    }

    #[test]
    fn test_function_node_computes() {
        let (mut graph, square) = setup_square();
        let c = graph.add_node(Node::new("t.const", "Const", Box::new(Const(7))).with_output("v", TypeToken::Integer)).unwrap();
        graph.connect(SocketAddr::value_output(c, 0), SocketAddr::value_input(square, 0)).unwrap();

        assert_eq!(graph.output_value(square, 0).unwrap(), Value::Integer(49));
    }

    #[test]
    fn test_function_error_faults_node() {
        let (mut graph, square) = setup_square();
        let c = graph.add_node(Node::new("t.const", "Const", Box::new(Const(i64::MAX))).with_output("v", TypeToken::Integer)).unwrap();
        graph.connect(SocketAddr::value_output(c, 0), SocketAddr::value_input(square, 0)).unwrap();

        graph.run(square).unwrap();
        assert_eq!(graph.node(square).unwrap().error(), Some("Compute error: overflow"));
    }
}
