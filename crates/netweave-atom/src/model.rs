use serde::{Deserialize, Serialize};
use std::collections::HashMap;

mod instance;
mod network;
mod peering;
mod role;
mod security;

pub use instance::InstanceSpec;
pub use network::{NetworkSpec, SubnetSpec, SubnetTier};
pub use peering::PeeringSpec;
pub use role::RoleSpec;
pub use security::{Protocol, RuleSpec, SecurityGroupSpec};

/// Topology - the root declaration.
///
/// A topology names a set of networks, the peering connections between them,
/// and the security groups, roles, and instances that live inside them. It is
/// built once from a KDL document and never mutated afterwards; evaluation
/// into a resource graph happens in `netweave-topo`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Topology {
    /// Topology name (project name)
    pub name: String,
    /// Networks keyed by logical name
    pub networks: HashMap<String, NetworkSpec>,
    /// Peering connections, in declaration order
    #[serde(default)]
    pub peerings: Vec<PeeringSpec>,
    /// Security groups keyed by logical name
    #[serde(default)]
    pub security_groups: HashMap<String, SecurityGroupSpec>,
    /// Roles keyed by logical name
    #[serde(default)]
    pub roles: HashMap<String, RoleSpec>,
    /// Instances in declaration order; order drives subnet placement
    #[serde(default)]
    pub instances: Vec<InstanceSpec>,
}

impl Topology {
    pub fn network(&self, name: &str) -> Option<&NetworkSpec> {
        self.networks.get(name)
    }

    pub fn instance(&self, name: &str) -> Option<&InstanceSpec> {
        self.instances.iter().find(|i| i.name == name)
    }
}
