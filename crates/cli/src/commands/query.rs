use anyhow::{Context, Result};
use bazel_bridge_core::bazel::{ActionGraphContainer, ActionGraphParser};
use std::fs;
use std::path::Path;
use tracing::debug;

fn load_parser(action_graph: &Path) -> Result<ActionGraphParser> {
    debug!("Reading action graph from {}", action_graph.display());
    let json = fs::read_to_string(action_graph)
        .with_context(|| format!("Failed to read {}", action_graph.display()))?;
    let graph = ActionGraphContainer::from_json(&json)
        .with_context(|| format!("Failed to parse {}", action_graph.display()))?;
    Ok(ActionGraphParser::new(graph))
}

pub fn inputs_command(
    target: &str,
    action_graph: &Path,
    suffixes: &[String],
    exec_root: Option<&Path>,
) -> Result<()> {
    let parser = load_parser(action_graph)?;

    if let Some(exec_root) = exec_root {
        for path in parser.inputs_as_paths(target, exec_root)? {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let suffixes: Vec<&str> = suffixes.iter().map(String::as_str).collect();
    for input in parser.get_inputs(target, &suffixes)? {
        println!("{input}");
    }
    Ok(())
}

pub fn outputs_command(target: &str, action_graph: &Path, suffixes: &[String]) -> Result<()> {
    let parser = load_parser(action_graph)?;
    let suffixes: Vec<&str> = suffixes.iter().map(String::as_str).collect();
    for output in parser.get_outputs(target, &suffixes)? {
        println!("{output}");
    }
    Ok(())
}
