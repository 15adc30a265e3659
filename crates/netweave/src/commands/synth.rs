use crate::utils;
use std::path::PathBuf;

pub fn handle(file: Option<PathBuf>) -> anyhow::Result<()> {
    let path = utils::resolve_declaration(file)?;
    let graph = utils::evaluate(&path)?;
    let set = netweave_cloud::compile(&graph)?;

    println!("{}", serde_json::to_string_pretty(&set)?);
    Ok(())
}
