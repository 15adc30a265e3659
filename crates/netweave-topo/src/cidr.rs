//! CIDR address blocks
//!
//! Thin wrapper over `ipnetwork::Ipv4Network` with the operations evaluation
//! needs: containment, overlap, and carving fixed-size child blocks out of a
//! parent block.

use crate::error::{Result, TopoError};
use ipnetwork::Ipv4Network;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// An IPv4 address block in CIDR notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cidr(Ipv4Network);

impl Cidr {
    /// Parse a CIDR string. The address must be the network address itself
    /// (host bits zero), so "10.0.1.0/16" is rejected.
    pub fn parse(s: &str) -> Result<Self> {
        let network: Ipv4Network = s
            .parse()
            .map_err(|_| TopoError::InvalidCidr(s.to_string()))?;
        if network.ip() != network.network() {
            return Err(TopoError::InvalidCidr(s.to_string()));
        }
        Ok(Self(network))
    }

    /// The 0.0.0.0/0 block
    pub fn any() -> Self {
        Self(Ipv4Network::new(Ipv4Addr::UNSPECIFIED, 0).expect("/0 is always valid"))
    }

    pub fn prefix(&self) -> u8 {
        self.0.prefix()
    }

    pub fn network_address(&self) -> Ipv4Addr {
        self.0.network()
    }

    /// Number of addresses in the block
    pub fn size(&self) -> u64 {
        1u64 << (32 - self.0.prefix())
    }

    /// Whether `other` lies entirely inside this block
    pub fn contains(&self, other: &Cidr) -> bool {
        self.0.prefix() <= other.0.prefix() && self.0.contains(other.0.network())
    }

    /// Whether the two blocks share any address
    pub fn overlaps(&self, other: &Cidr) -> bool {
        self.0.contains(other.0.network()) || other.0.contains(self.0.network())
    }

    /// The `index`-th child block of the given prefix length, counted from
    /// this block's network address. Fails when the mask is wider than the
    /// parent or the child would run past the end of the parent.
    pub fn carve(&self, mask: u8, index: usize) -> Result<Cidr> {
        if mask < self.0.prefix() || mask > 32 {
            return Err(TopoError::InvalidSubnetMask {
                cidr: self.to_string(),
                mask,
            });
        }

        let child_size = 1u64 << (32 - mask);
        let base = u64::from(u32::from(self.0.network())) + index as u64 * child_size;
        let parent_end = u64::from(u32::from(self.0.network())) + self.size();
        if base + child_size > parent_end {
            return Err(TopoError::CidrExhausted {
                network: self.to_string(),
                mask,
            });
        }

        let address = Ipv4Addr::from(base as u32);
        let network = Ipv4Network::new(address, mask)
            .map_err(|_| TopoError::InvalidCidr(format!("{}/{}", address, mask)))?;
        Ok(Self(network))
    }
}

impl FromStr for Cidr {
    type Err = TopoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Cidr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let cidr = Cidr::parse("10.102.0.0/16").unwrap();
        assert_eq!(cidr.prefix(), 16);
        assert_eq!(cidr.to_string(), "10.102.0.0/16");
    }

    #[test]
    fn test_parse_rejects_host_bits() {
        assert!(Cidr::parse("10.102.0.1/16").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Cidr::parse("not-a-cidr").is_err());
        assert!(Cidr::parse("10.0.0.0/33").is_err());
    }

    #[test]
    fn test_contains() {
        let parent = Cidr::parse("10.102.0.0/16").unwrap();
        let child = Cidr::parse("10.102.3.0/24").unwrap();
        let outside = Cidr::parse("10.103.0.0/24").unwrap();
        assert!(parent.contains(&child));
        assert!(!parent.contains(&outside));
        assert!(!child.contains(&parent));
    }

    #[test]
    fn test_overlaps() {
        let a = Cidr::parse("10.102.0.0/16").unwrap();
        let b = Cidr::parse("10.102.128.0/17").unwrap();
        let c = Cidr::parse("10.101.0.0/16").unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_carve_sequential_blocks() {
        let parent = Cidr::parse("10.102.0.0/16").unwrap();
        assert_eq!(parent.carve(24, 0).unwrap().to_string(), "10.102.0.0/24");
        assert_eq!(parent.carve(24, 1).unwrap().to_string(), "10.102.1.0/24");
        assert_eq!(parent.carve(24, 255).unwrap().to_string(), "10.102.255.0/24");
    }

    #[test]
    fn test_carve_exhaustion() {
        let parent = Cidr::parse("10.102.0.0/16").unwrap();
        assert!(matches!(
            parent.carve(24, 256),
            Err(TopoError::CidrExhausted { .. })
        ));
    }

    #[test]
    fn test_carve_rejects_wider_mask() {
        let parent = Cidr::parse("10.102.0.0/24").unwrap();
        assert!(matches!(
            parent.carve(16, 0),
            Err(TopoError::InvalidSubnetMask { .. })
        ));
    }

    #[test]
    fn test_carved_blocks_stay_inside_parent() {
        let parent = Cidr::parse("192.168.0.0/20").unwrap();
        for index in 0..16 {
            let child = parent.carve(24, index).unwrap();
            assert!(parent.contains(&child));
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let cidr = Cidr::parse("10.0.0.0/16").unwrap();
        let json = serde_json::to_string(&cidr).unwrap();
        assert_eq!(json, "\"10.0.0.0/16\"");
        let back: Cidr = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cidr);
    }
}
