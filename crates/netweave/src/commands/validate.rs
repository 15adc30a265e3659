use crate::utils;
use colored::Colorize;
use std::path::PathBuf;

pub fn handle(file: Option<PathBuf>) -> anyhow::Result<()> {
    println!("{}", "Validating topology declaration...".blue());

    let path = match utils::resolve_declaration(file) {
        Ok(path) => path,
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ no topology declaration found".red().bold());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };
    println!("Declaration: {}", path.display().to_string().cyan());

    match utils::evaluate(&path) {
        Ok(graph) => {
            println!("{}", "✓ topology is valid".green().bold());
            println!();
            println!("Summary:");
            println!("  networks: {}", graph.networks.len());
            for network in &graph.networks {
                println!(
                    "    - {} ({}, {} subnets)",
                    network.name.cyan(),
                    network.cidr,
                    network.subnets.len()
                );
            }
            if !graph.peerings.is_empty() {
                println!("  peerings: {}", graph.peerings.len());
                for peering in &graph.peerings {
                    println!(
                        "    - {} ({} <-> {})",
                        peering.name.cyan(),
                        peering.requester,
                        peering.accepter
                    );
                }
            }
            if !graph.security_groups.is_empty() {
                println!("  security groups: {}", graph.security_groups.len());
                for group in &graph.security_groups {
                    println!(
                        "    - {} ({} ingress, {} egress)",
                        group.name.cyan(),
                        group.ingress.len(),
                        group.egress.len()
                    );
                }
            }
            if !graph.roles.is_empty() {
                println!("  roles: {}", graph.roles.len());
                for role in &graph.roles {
                    println!("    - {} ({})", role.name.cyan(), role.assumed_by);
                }
            }
            if !graph.instances.is_empty() {
                println!("  instances: {}", graph.instances.len());
                for instance in &graph.instances {
                    println!(
                        "    - {} ({} in {})",
                        instance.name.cyan(),
                        instance.size,
                        instance.subnet
                    );
                }
            }
        }
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ invalid topology".red().bold());
            eprintln!("  {:#}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
