use anyhow::Context;
use netweave_topo::TopologyGraph;
use std::path::{Path, PathBuf};

/// Resolve the declaration path: an explicit --file wins, otherwise the
/// standard discovery order applies.
pub fn resolve_declaration(file: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match file {
        Some(path) => Ok(path),
        None => Ok(netweave_config::find_topology_file()?),
    }
}

/// Parse and evaluate a declaration file
pub fn evaluate(path: &Path) -> anyhow::Result<TopologyGraph> {
    tracing::debug!(path = %path.display(), "evaluating declaration");
    let topology = netweave_atom::parse_kdl_file(path)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let graph = TopologyGraph::evaluate(&topology)
        .with_context(|| format!("failed to evaluate {}", path.display()))?;
    Ok(graph)
}
