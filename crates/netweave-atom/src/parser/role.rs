//! Role node parsing

use crate::error::{AtomError, Result};
use crate::model::RoleSpec;
use kdl::KdlNode;

/// Parse a `role` node
pub fn parse_role(node: &KdlNode) -> Result<(String, RoleSpec)> {
    let name = node
        .entries()
        .first()
        .and_then(|e| e.value().as_string())
        .ok_or_else(|| AtomError::InvalidDeclaration("role requires a name".to_string()))?
        .to_string();

    let mut role = RoleSpec::default();

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "assumed-by" | "assumed_by" => {
                    role.assumed_by = child
                        .entries()
                        .first()
                        .and_then(|e| e.value().as_string())
                        .unwrap_or("")
                        .to_string();
                }
                "managed-policy" | "managed-policies" => {
                    // One or more policy names as arguments
                    role.managed_policies.extend(
                        child
                            .entries()
                            .iter()
                            .filter_map(|e| e.value().as_string().map(|s| s.to_string())),
                    );
                }
                "description" => {
                    role.description = child
                        .entries()
                        .first()
                        .and_then(|e| e.value().as_string())
                        .map(|s| s.to_string());
                }
                _ => {}
            }
        }
    }

    if role.assumed_by.is_empty() {
        return Err(AtomError::InvalidDeclaration(format!(
            "role \"{}\" requires a trusted principal (assumed-by)",
            name
        )));
    }

    Ok((name, role))
}
