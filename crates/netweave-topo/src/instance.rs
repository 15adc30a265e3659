//! Evaluated instances

use netweave_atom::SubnetTier;
use serde::{Deserialize, Serialize};

/// An evaluated instance, placed on one concrete subnet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    /// Stable logical id, e.g. "i-web-1"
    pub id: String,
    pub name: String,
    /// Owning network name
    pub network: String,
    /// Id of the subnet the instance was placed in
    pub subnet: String,
    /// Tier the subnet was selected from
    pub tier: SubnetTier,
    /// Security group id
    pub security_group: String,
    /// Role id
    pub role: String,
    /// Size class, e.g. "t2.micro"
    pub size: String,
    /// Machine image selector
    pub image: String,
    /// Availability zone of the chosen subnet
    pub az: String,
}
