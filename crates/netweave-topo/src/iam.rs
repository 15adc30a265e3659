//! Evaluated roles

use netweave_atom::RoleSpec;
use serde::{Deserialize, Serialize};

/// An evaluated role: a trust policy plus attached permission policies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// Stable logical id, e.g. "role-instance-role"
    pub id: String,
    pub name: String,
    /// Trusted principal allowed to assume the role
    pub assumed_by: String,
    pub managed_policies: Vec<String>,
    pub description: Option<String>,
}

impl Role {
    pub fn evaluate(name: &str, spec: &RoleSpec) -> Self {
        Role {
            id: format!("role-{}", name),
            name: name.to_string(),
            assumed_by: spec.assumed_by.clone(),
            managed_policies: spec.managed_policies.clone(),
            description: spec.description.clone(),
        }
    }
}
