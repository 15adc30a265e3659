//! Security group node parsing

use crate::error::{AtomError, Result};
use crate::model::{Protocol, RuleSpec, SecurityGroupSpec};
use kdl::KdlNode;

/// Parse a `security-group` node
pub fn parse_security_group(node: &KdlNode) -> Result<(String, SecurityGroupSpec)> {
    let name = node
        .entries()
        .first()
        .and_then(|e| e.value().as_string())
        .ok_or_else(|| {
            AtomError::InvalidDeclaration("security-group requires a name".to_string())
        })?
        .to_string();

    let mut group = SecurityGroupSpec::default();

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "network" => {
                    group.network = child
                        .entries()
                        .first()
                        .and_then(|e| e.value().as_string())
                        .unwrap_or("")
                        .to_string();
                }
                "description" => {
                    group.description = child
                        .entries()
                        .first()
                        .and_then(|e| e.value().as_string())
                        .map(|s| s.to_string());
                }
                "ingress" => {
                    group.ingress.push(parse_rule(child, &name)?);
                }
                "egress" => {
                    group.egress.push(parse_rule(child, &name)?);
                }
                _ => {}
            }
        }
    }

    if group.network.is_empty() {
        return Err(AtomError::InvalidDeclaration(format!(
            "security-group \"{}\" requires a network",
            name
        )));
    }

    Ok((name, group))
}

/// Parse an `ingress` or `egress` rule node
fn parse_rule(node: &KdlNode, group: &str) -> Result<RuleSpec> {
    let mut protocol = None;
    let mut from_port = -1;
    let mut to_port = -1;
    let mut peer = "any".to_string();

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "protocol" => {
                    let raw = child
                        .entries()
                        .first()
                        .and_then(|e| e.value().as_string())
                        .unwrap_or("");
                    protocol = Some(Protocol::from_str(raw).ok_or_else(|| {
                        AtomError::InvalidDeclaration(format!(
                            "security-group \"{}\" has unknown protocol \"{}\"",
                            group, raw
                        ))
                    })?);
                }
                "from" | "from-port" => {
                    if let Some(value) = child.entries().first().and_then(|e| e.value().as_integer())
                    {
                        from_port = value as i32;
                    }
                }
                "to" | "to-port" => {
                    if let Some(value) = child.entries().first().and_then(|e| e.value().as_integer())
                    {
                        to_port = value as i32;
                    }
                }
                "port" => {
                    // Single port shorthand
                    if let Some(value) = child.entries().first().and_then(|e| e.value().as_integer())
                    {
                        from_port = value as i32;
                        to_port = value as i32;
                    }
                }
                "peer" => {
                    peer = child
                        .entries()
                        .first()
                        .and_then(|e| e.value().as_string())
                        .unwrap_or("any")
                        .to_string();
                }
                _ => {}
            }
        }
    }

    let protocol = protocol.ok_or_else(|| {
        AtomError::InvalidDeclaration(format!(
            "security-group \"{}\" has a rule without a protocol",
            group
        ))
    })?;

    Ok(RuleSpec {
        protocol,
        from_port,
        to_port,
        peer,
    })
}
