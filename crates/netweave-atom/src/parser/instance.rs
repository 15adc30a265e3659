//! Instance node parsing

use crate::error::{AtomError, Result};
use crate::model::{InstanceSpec, SubnetTier};
use kdl::KdlNode;

/// Parse an `instance` node
pub fn parse_instance(node: &KdlNode) -> Result<InstanceSpec> {
    let name = node
        .entries()
        .first()
        .and_then(|e| e.value().as_string())
        .ok_or_else(|| AtomError::InvalidDeclaration("instance requires a name".to_string()))?
        .to_string();

    let mut network = None;
    let mut subnets = None;
    let mut security_group = None;
    let mut role = None;
    let mut size = None;
    let mut image = None;

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "network" => {
                    network = child
                        .entries()
                        .first()
                        .and_then(|e| e.value().as_string())
                        .map(|s| s.to_string());
                }
                "subnets" => {
                    let raw = child
                        .entries()
                        .first()
                        .and_then(|e| e.value().as_string())
                        .unwrap_or("");
                    subnets = Some(SubnetTier::from_str(raw).ok_or_else(|| {
                        AtomError::InvalidDeclaration(format!(
                            "instance \"{}\" has unknown subnet tier \"{}\"",
                            name, raw
                        ))
                    })?);
                }
                "security-group" | "security_group" => {
                    security_group = child
                        .entries()
                        .first()
                        .and_then(|e| e.value().as_string())
                        .map(|s| s.to_string());
                }
                "role" => {
                    role = child
                        .entries()
                        .first()
                        .and_then(|e| e.value().as_string())
                        .map(|s| s.to_string());
                }
                "size" => {
                    size = child
                        .entries()
                        .first()
                        .and_then(|e| e.value().as_string())
                        .map(|s| s.to_string());
                }
                "image" => {
                    image = child
                        .entries()
                        .first()
                        .and_then(|e| e.value().as_string())
                        .map(|s| s.to_string());
                }
                _ => {}
            }
        }
    }

    let missing = |field: &str| {
        AtomError::InvalidDeclaration(format!("instance \"{}\" requires a {}", name, field))
    };

    Ok(InstanceSpec {
        network: network.ok_or_else(|| missing("network"))?,
        subnets: subnets.ok_or_else(|| missing("subnets tier"))?,
        security_group: security_group.ok_or_else(|| missing("security-group"))?,
        role: role.ok_or_else(|| missing("role"))?,
        size: size.ok_or_else(|| missing("size"))?,
        image: image.ok_or_else(|| missing("image"))?,
        name,
    })
}
