//! Network and subnet node parsing

use crate::error::{AtomError, Result};
use crate::model::{NetworkSpec, SubnetSpec, SubnetTier};
use kdl::KdlNode;

/// Parse a `network` node
pub fn parse_network(node: &KdlNode) -> Result<(String, NetworkSpec)> {
    let name = node
        .entries()
        .first()
        .and_then(|e| e.value().as_string())
        .ok_or_else(|| AtomError::InvalidDeclaration("network requires a name".to_string()))?
        .to_string();

    let mut network = NetworkSpec::default();

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "cidr" => {
                    network.cidr = child
                        .entries()
                        .first()
                        .and_then(|e| e.value().as_string())
                        .unwrap_or("")
                        .to_string();
                }
                "max-azs" | "max_azs" => {
                    if let Some(value) = child.entries().first().and_then(|e| e.value().as_integer())
                    {
                        network.max_azs = value as usize;
                    }
                }
                "dns-hostnames" | "dns_hostnames" => {
                    if let Some(value) = child.entries().first().and_then(|e| e.value().as_bool()) {
                        network.dns_hostnames = value;
                    }
                }
                "dns-support" | "dns_support" => {
                    if let Some(value) = child.entries().first().and_then(|e| e.value().as_bool()) {
                        network.dns_support = value;
                    }
                }
                "subnet" => {
                    network.subnets.push(parse_subnet(child)?);
                }
                _ => {
                    // Unknown settings are skipped
                }
            }
        }
    }

    Ok((name, network))
}

/// Parse a `subnet` node inside a network
fn parse_subnet(node: &KdlNode) -> Result<SubnetSpec> {
    let name = node
        .entries()
        .first()
        .and_then(|e| e.value().as_string())
        .ok_or_else(|| AtomError::InvalidDeclaration("subnet requires a name".to_string()))?
        .to_string();

    let mut tier = None;
    let mut cidr_mask = None;
    let mut reserved = false;

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "tier" | "type" => {
                    let raw = child
                        .entries()
                        .first()
                        .and_then(|e| e.value().as_string())
                        .unwrap_or("");
                    tier = Some(SubnetTier::from_str(raw).ok_or_else(|| {
                        AtomError::InvalidDeclaration(format!(
                            "subnet \"{}\" has unknown tier \"{}\"",
                            name, raw
                        ))
                    })?);
                }
                "mask" | "cidr-mask" => {
                    cidr_mask = child
                        .entries()
                        .first()
                        .and_then(|e| e.value().as_integer())
                        .map(|v| v as u8);
                }
                "reserved" => {
                    reserved = child
                        .entries()
                        .first()
                        .and_then(|e| e.value().as_bool())
                        .unwrap_or(true);
                }
                _ => {}
            }
        }
    }

    let tier = tier.ok_or_else(|| {
        AtomError::InvalidDeclaration(format!("subnet \"{}\" requires a tier", name))
    })?;
    let cidr_mask = cidr_mask.ok_or_else(|| {
        AtomError::InvalidDeclaration(format!("subnet \"{}\" requires a mask", name))
    })?;

    Ok(SubnetSpec {
        name,
        tier,
        cidr_mask,
        reserved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_network() {
        let kdl = r#"
            network "app" {
                cidr "10.102.0.0/16"
                max-azs 2
                dns-hostnames #true
                dns-support #true
                subnet "public" {
                    tier "public"
                    mask 24
                }
                subnet "private" {
                    tier "private-isolated"
                    mask 24
                }
            }
        "#;
        let doc: kdl::KdlDocument = kdl.parse().unwrap();
        let node = doc.nodes().first().unwrap();

        let (name, network) = parse_network(node).unwrap();
        assert_eq!(name, "app");
        assert_eq!(network.cidr, "10.102.0.0/16");
        assert_eq!(network.max_azs, 2);
        assert!(network.dns_hostnames);
        assert_eq!(network.subnets.len(), 2);
        assert_eq!(network.subnets[0].tier, SubnetTier::Public);
        assert_eq!(network.subnets[1].tier, SubnetTier::PrivateIsolated);
        assert_eq!(network.subnets[1].cidr_mask, 24);
    }

    #[test]
    fn test_parse_network_defaults() {
        let kdl = r#"
            network "edge" {
                cidr "10.101.0.0/16"
            }
        "#;
        let doc: kdl::KdlDocument = kdl.parse().unwrap();
        let node = doc.nodes().first().unwrap();

        let (_, network) = parse_network(node).unwrap();
        assert_eq!(network.max_azs, 2);
        assert!(network.dns_hostnames);
        assert!(network.dns_support);
        assert!(network.subnets.is_empty());
    }

    #[test]
    fn test_subnet_requires_tier() {
        let kdl = r#"
            network "app" {
                cidr "10.102.0.0/16"
                subnet "public" {
                    mask 24
                }
            }
        "#;
        let doc: kdl::KdlDocument = kdl.parse().unwrap();
        let node = doc.nodes().first().unwrap();

        let result = parse_network(node);
        assert!(matches!(result, Err(AtomError::InvalidDeclaration(_))));
    }

    #[test]
    fn test_subnet_unknown_tier() {
        let kdl = r#"
            network "app" {
                cidr "10.102.0.0/16"
                subnet "public" {
                    tier "semi-public"
                    mask 24
                }
            }
        "#;
        let doc: kdl::KdlDocument = kdl.parse().unwrap();
        let node = doc.nodes().first().unwrap();

        let result = parse_network(node);
        assert!(matches!(result, Err(AtomError::InvalidDeclaration(_))));
    }

    #[test]
    fn test_reserved_subnet() {
        let kdl = r#"
            network "app" {
                cidr "10.102.0.0/16"
                subnet "spare" {
                    tier "private-isolated"
                    mask 24
                    reserved
                }
            }
        "#;
        let doc: kdl::KdlDocument = kdl.parse().unwrap();
        let node = doc.nodes().first().unwrap();

        let (_, network) = parse_network(node).unwrap();
        assert!(network.subnets[0].reserved);
    }
}
