//! KDL parser
//!
//! Parses Netweave topology declarations. Parsing for each node type lives
//! in its own module.

mod instance;
mod network;
mod peering;
mod role;
mod security;

use instance::parse_instance;
use network::parse_network;
use peering::parse_peering;
use role::parse_role;
use security::parse_security_group;

use crate::error::{AtomError, Result};
use crate::model::Topology;
use kdl::KdlDocument;
use std::fs;
use std::path::Path;

/// Parse a KDL file into a Topology
pub fn parse_kdl_file<P: AsRef<Path>>(path: P) -> Result<Topology> {
    let content = fs::read_to_string(path.as_ref())?;
    let name = path
        .as_ref()
        .file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or("unnamed")
        .to_string();
    parse_kdl_string(&content, name)
}

/// Parse a KDL string
pub fn parse_kdl_string(content: &str, default_name: String) -> Result<Topology> {
    let doc: KdlDocument = content.parse()?;

    let mut topology = Topology {
        name: default_name,
        ..Default::default()
    };

    for node in doc.nodes() {
        match node.name().value() {
            "topology" => {
                if let Some(topology_name) =
                    node.entries().first().and_then(|e| e.value().as_string())
                {
                    topology.name = topology_name.to_string();
                }
            }
            "network" => {
                let (network_name, network) = parse_network(node)?;
                if topology.networks.contains_key(&network_name) {
                    return Err(AtomError::Duplicate {
                        kind: "network",
                        name: network_name,
                    });
                }
                topology.networks.insert(network_name, network);
            }
            "peering" => {
                let peering = parse_peering(node)?;
                if topology.peerings.iter().any(|p| p.name == peering.name) {
                    return Err(AtomError::Duplicate {
                        kind: "peering",
                        name: peering.name,
                    });
                }
                topology.peerings.push(peering);
            }
            "security-group" => {
                let (group_name, group) = parse_security_group(node)?;
                if topology.security_groups.contains_key(&group_name) {
                    return Err(AtomError::Duplicate {
                        kind: "security-group",
                        name: group_name,
                    });
                }
                topology.security_groups.insert(group_name, group);
            }
            "role" => {
                let (role_name, role) = parse_role(node)?;
                if topology.roles.contains_key(&role_name) {
                    return Err(AtomError::Duplicate {
                        kind: "role",
                        name: role_name,
                    });
                }
                topology.roles.insert(role_name, role);
            }
            "instance" => {
                let instance = parse_instance(node)?;
                if topology.instances.iter().any(|i| i.name == instance.name) {
                    return Err(AtomError::Duplicate {
                        kind: "instance",
                        name: instance.name,
                    });
                }
                topology.instances.push(instance);
            }
            _ => {
                // Unknown nodes are skipped
            }
        }
    }

    // Validate once the whole document has been read
    for (network_name, network) in &topology.networks {
        if network.cidr.is_empty() {
            return Err(AtomError::InvalidDeclaration(format!(
                "network \"{}\" has no cidr",
                network_name
            )));
        }
    }

    tracing::debug!(
        networks = topology.networks.len(),
        peerings = topology.peerings.len(),
        instances = topology.instances.len(),
        "parsed topology declaration"
    );

    Ok(topology)
}
