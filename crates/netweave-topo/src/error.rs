//! Topology evaluation error types

use thiserror::Error;

/// Topology evaluation errors
///
/// These cover declaration shape only. Anything the graph can represent but
/// the cloud might still reject (zone capacity, image validity, policy names)
/// is deferred to the provisioning engine.
#[derive(Error, Debug)]
pub enum TopoError {
    #[error("invalid CIDR \"{0}\"")]
    InvalidCidr(String),

    #[error("subnet mask /{mask} does not fit inside {cidr}")]
    InvalidSubnetMask { cidr: String, mask: u8 },

    #[error("network \"{network}\" has no address space left for a /{mask} subnet")]
    CidrExhausted { network: String, mask: u8 },

    #[error("network \"{0}\" declares no availability zones")]
    NoAvailabilityZones(String),

    #[error(
        "network \"{0}\" declares private-with-egress subnets but no public subnets to host NAT gateways"
    )]
    EgressWithoutPublic(String),

    #[error("unknown network \"{0}\"")]
    UnknownNetwork(String),

    #[error("unknown security group \"{0}\"")]
    UnknownSecurityGroup(String),

    #[error("unknown role \"{0}\"")]
    UnknownRole(String),

    #[error("network \"{network}\" has no {tier} subnets for instance \"{instance}\"")]
    NoMatchingSubnets {
        network: String,
        tier: String,
        instance: String,
    },

    #[error(
        "security group \"{group}\" is scoped to network \"{group_network}\" but instance \"{instance}\" is in network \"{instance_network}\""
    )]
    SecurityGroupNetworkMismatch {
        group: String,
        group_network: String,
        instance: String,
        instance_network: String,
    },

    #[error("peered networks \"{requester}\" and \"{accepter}\" have overlapping CIDRs")]
    PeeredNetworksOverlap { requester: String, accepter: String },
}

pub type Result<T> = std::result::Result<T, TopoError>;
