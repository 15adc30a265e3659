//! Peering node parsing

use crate::error::{AtomError, Result};
use crate::model::PeeringSpec;
use kdl::KdlNode;

/// Parse a `peering` node
pub fn parse_peering(node: &KdlNode) -> Result<PeeringSpec> {
    let name = node
        .entries()
        .first()
        .and_then(|e| e.value().as_string())
        .ok_or_else(|| AtomError::InvalidDeclaration("peering requires a name".to_string()))?
        .to_string();

    let mut requester = None;
    let mut accepter = None;

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "requester" => {
                    requester = child
                        .entries()
                        .first()
                        .and_then(|e| e.value().as_string())
                        .map(|s| s.to_string());
                }
                "accepter" => {
                    accepter = child
                        .entries()
                        .first()
                        .and_then(|e| e.value().as_string())
                        .map(|s| s.to_string());
                }
                _ => {}
            }
        }
    }

    let requester = requester.ok_or_else(|| {
        AtomError::InvalidDeclaration(format!("peering \"{}\" requires a requester", name))
    })?;
    let accepter = accepter.ok_or_else(|| {
        AtomError::InvalidDeclaration(format!("peering \"{}\" requires an accepter", name))
    })?;

    if requester == accepter {
        return Err(AtomError::InvalidDeclaration(format!(
            "peering \"{}\" links network \"{}\" to itself",
            name, requester
        )));
    }

    Ok(PeeringSpec {
        name,
        requester,
        accepter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_peering() {
        let kdl = r#"
            peering "app-to-edge" {
                requester "app"
                accepter "edge"
            }
        "#;
        let doc: kdl::KdlDocument = kdl.parse().unwrap();
        let node = doc.nodes().first().unwrap();

        let peering = parse_peering(node).unwrap();
        assert_eq!(peering.name, "app-to-edge");
        assert_eq!(peering.requester, "app");
        assert_eq!(peering.accepter, "edge");
    }

    #[test]
    fn test_peering_requires_both_sides() {
        let kdl = r#"
            peering "half" {
                requester "app"
            }
        "#;
        let doc: kdl::KdlDocument = kdl.parse().unwrap();
        let node = doc.nodes().first().unwrap();

        assert!(parse_peering(node).is_err());
    }

    #[test]
    fn test_self_peering_is_rejected() {
        let kdl = r#"
            peering "loop" {
                requester "app"
                accepter "app"
            }
        "#;
        let doc: kdl::KdlDocument = kdl.parse().unwrap();
        let node = doc.nodes().first().unwrap();

        assert!(parse_peering(node).is_err());
    }
}
