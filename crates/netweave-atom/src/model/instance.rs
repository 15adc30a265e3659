//! Instance declaration

use super::network::SubnetTier;
use serde::{Deserialize, Serialize};

/// Instance declaration
///
/// Placed in exactly one subnet of its network, bound to one security group
/// and one role. The subnet is chosen at evaluation time from the subnets of
/// the declared tier; there is no fallback to another tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceSpec {
    /// Instance name
    pub name: String,

    /// Owning network name
    pub network: String,

    /// Tier the instance's subnet is selected from
    pub subnets: SubnetTier,

    /// Security group name
    pub security_group: String,

    /// Role name
    pub role: String,

    /// Size class, e.g. "t2.micro"
    pub size: String,

    /// Machine image selector, e.g. "amazon-linux-2023"
    pub image: String,
}
