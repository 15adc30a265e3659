//! Network and subnet declarations

use serde::{Deserialize, Serialize};

/// Network declaration
///
/// A network owns an address block and a list of subnet groups. Each group is
/// fanned out to one subnet per availability zone (up to `max_azs`) at
/// evaluation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Address block in CIDR notation, e.g. "10.102.0.0/16"
    pub cidr: String,

    /// Number of availability zones to fan subnets out across
    #[serde(default = "default_max_azs")]
    pub max_azs: usize,

    /// Resolve instance hostnames inside the network
    #[serde(default = "default_true")]
    pub dns_hostnames: bool,

    /// Enable DNS resolution inside the network
    #[serde(default = "default_true")]
    pub dns_support: bool,

    /// Subnet groups, in declaration order
    #[serde(default)]
    pub subnets: Vec<SubnetSpec>,
}

impl Default for NetworkSpec {
    fn default() -> Self {
        Self {
            cidr: String::new(),
            max_azs: default_max_azs(),
            dns_hostnames: true,
            dns_support: true,
            subnets: Vec::new(),
        }
    }
}

fn default_max_azs() -> usize {
    2
}

fn default_true() -> bool {
    true
}

/// Subnet group declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubnetSpec {
    /// Group name, e.g. "public"
    pub name: String,

    /// Visibility tier
    pub tier: SubnetTier,

    /// Prefix length of each carved subnet, e.g. 24
    pub cidr_mask: u8,

    /// Reserve the address space without creating subnets
    #[serde(default)]
    pub reserved: bool,
}

/// Subnet visibility tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubnetTier {
    /// Routable from outside the network
    Public,
    /// Outbound-only through a NAT gateway
    PrivateWithEgress,
    /// No route in or out of the network
    PrivateIsolated,
}

impl SubnetTier {
    /// Parse from the declaration string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "public" => Some(Self::Public),
            "private-with-egress" | "private_with_egress" => Some(Self::PrivateWithEgress),
            "private-isolated" | "private_isolated" => Some(Self::PrivateIsolated),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::PrivateWithEgress => "private-with-egress",
            Self::PrivateIsolated => "private-isolated",
        }
    }
}

impl std::fmt::Display for SubnetTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
