use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use log::{info, warn};
use nodegraph::util::timing::measure;
use nodegraph::{Graph, NodeRegistry};

use crate::config::{self, AppConfig};
use crate::demo;

pub fn build_registry() -> Arc<NodeRegistry> {
    let registry = NodeRegistry::with_builtin_nodes();
    demo::register_app_nodes(&registry);
    Arc::new(registry)
}

fn load_graph(path: &Path, config: &AppConfig) -> Result<Graph> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let mut graph = Graph::with_config(build_registry(), config.engine.clone());
    measure(format!("Loading {}", path.display()), log::Level::Debug, || graph.load(&json))
        .with_context(|| format!("Failed to load {}", path.display()))?;
    Ok(graph)
}

pub fn run(path: &Path, entry: Option<&str>, times: usize, config: &AppConfig) -> Result<()> {
    let mut graph = load_graph(path, config)?;
    let entry = entry.unwrap_or(&config.entry_class);
    if graph.nodes_of_class(entry).is_empty() {
        bail!("{} has no '{}' node to start from", path.display(), entry);
    }

    for pass in 1..=times {
        let report = graph.run_class(entry)?;
        info!(
            "Pass {}: {} node execution(s), {} fault(s)",
            pass,
            report.execution_count(),
            report.faulted.len()
        );
        for id in &report.faulted {
            if let Some(node) = graph.node(*id) {
                let message = node.error().unwrap_or_default();
                warn!("{}: {}", node.label(), message);
                println!("fault {}: {}", node.label(), message);
            }
        }
    }
    Ok(())
}

pub fn nodes() -> Result<()> {
    print!("{}", build_registry().namespace_tree());
    Ok(())
}

pub fn demo(path: &Path) -> Result<()> {
    let mut graph = Graph::new(build_registry());
    demo::build_demo(&mut graph)?;
    fs::write(path, graph.save()?).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote demo graph with {} nodes to {}", graph.len(), path.display());
    Ok(())
}

pub fn validate(path: &Path, config: &AppConfig) -> Result<()> {
    let graph = load_graph(path, config)?;
    let connections = graph.connections();
    let exec = connections.iter().filter(|c| c.is_exec()).count();
    println!(
        "{}: {} node(s), {} data connection(s), {} exec connection(s)",
        path.display(),
        graph.len(),
        connections.len() - exec,
        exec
    );
    Ok(())
}

pub fn show_config(config: &AppConfig, path: Option<&Path>, write: bool) -> Result<()> {
    print!("{}", toml::to_string_pretty(config).context("Failed to serialize config")?);
    if write {
        let written = config::save_config(config, path)?;
        println!("# written to {}", written.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_file_validates_and_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.json");
        let config = AppConfig::default();

        demo(&path).unwrap();
        validate(&path, &config).unwrap();
        run(&path, None, 2, &config).unwrap();

        let graph = load_graph(&path, &config).unwrap();
        assert_eq!(graph.len(), 7);
        assert_eq!(graph.connections().len(), 6);
    }

    #[test]
    fn test_run_without_entry_node_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, r#"{ "nodes": [] }"#).unwrap();
        assert!(run(&path, None, 1, &AppConfig::default()).is_err());
    }

    #[test]
    fn test_unknown_class_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{ "nodes": [ { "id": 1, "class": "gui.button" } ] }"#).unwrap();
        let err = validate(&path, &AppConfig::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("Unknown node class: gui.button"));
    }
}
