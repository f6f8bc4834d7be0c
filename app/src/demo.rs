//! App-level node types and the demo document.

use anyhow::{Context, Result};
use nodegraph::{FunctionSignature, Graph, Location, NodeRegistry, SocketAddr, TypeToken};
use serde_json::json;

/// Registers node types that only make sense in a terminal.
pub fn register_app_nodes(registry: &NodeRegistry) {
    registry.register_function(
        "console.print",
        FunctionSignature::new().param("text", TypeToken::Text),
        |args| {
            let text = args
                .first()
                .and_then(|v| v.as_text())
                .ok_or_else(|| "print expects one text argument".to_string())?;
            println!("{}", text);
            Ok(None)
        },
    );
}

/// update → branch(true) → print(format(increment(5)))
pub fn build_demo(graph: &mut Graph) -> Result<()> {
    let mut at = {
        let mut x = 0.0;
        move || {
            x += 160.0;
            Location::new(x, 80.0)
        }
    };

    let update = graph.create_node("event.update", at())?;
    let branch = graph.create_node("flow.branch", at())?;
    let cond = graph.create_node("value.boolean", at())?;
    let five = graph.create_node("value.integer", at())?;
    let inc = graph.create_node("math.increment", at())?;
    let format = graph.create_node("text.format", at())?;
    let print = graph
        .create_node("console.print", at())
        .context("console.print is not registered")?;

    graph.set_node_state(cond, &json!({ "value": true }))?;
    graph.set_node_state(five, &json!({ "value": 5 }))?;

    graph.connect(SocketAddr::exec_output(update, 0), SocketAddr::exec_input(branch, 0))?;
    graph.connect(SocketAddr::value_output(cond, 0), SocketAddr::value_input(branch, 0))?;
    graph.connect(SocketAddr::exec_output(branch, 0), SocketAddr::exec_input(print, 0))?;
    graph.connect(SocketAddr::value_output(five, 0), SocketAddr::value_input(inc, 0))?;
    graph.connect(SocketAddr::value_output(inc, 0), SocketAddr::value_input(format, 0))?;
    graph.connect(SocketAddr::value_output(format, 0), SocketAddr::value_input(print, 0))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_demo_runs_clean() {
        let registry = NodeRegistry::with_builtin_nodes();
        register_app_nodes(&registry);
        let mut graph = Graph::new(Arc::new(registry));
        build_demo(&mut graph).unwrap();

        let report = graph.run_class("event.update").unwrap();
        assert!(report.is_clean());
        assert_eq!(graph.last_output(6, 0), Some(&nodegraph::Value::Text("6".into())));
        assert!(report.ran(7));
    }

    #[test]
    fn test_demo_needs_app_nodes() {
        let mut graph = Graph::default();
        assert!(build_demo(&mut graph).is_err());
    }
}
