use crate::utils;
use colored::Colorize;
use std::path::PathBuf;

pub fn handle(file: Option<PathBuf>) -> anyhow::Result<()> {
    let path = utils::resolve_declaration(file)?;
    let graph = utils::evaluate(&path)?;

    for output in netweave_cloud::outputs(&graph) {
        println!("{} = {}", output.name.cyan(), output.value);
    }
    Ok(())
}
