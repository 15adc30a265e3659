//! Peering connections and route injection

use crate::cidr::Cidr;
use crate::error::{Result, TopoError};
use crate::network::{Network, RouteTarget};
use netweave_atom::{PeeringSpec, SubnetTier};
use serde::{Deserialize, Serialize};

/// An evaluated peering connection between two networks
///
/// Peering is not transitive. The connection alone carries no traffic: both
/// networks need a route whose destination is the other side's CIDR, which
/// [`PeeringConnection::connect`] installs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeeringConnection {
    /// Stable logical id, e.g. "pcx-app-to-edge"
    pub id: String,
    pub name: String,
    pub requester: String,
    pub accepter: String,
}

impl PeeringConnection {
    /// Evaluate a peering declaration against the two resolved networks and
    /// inject the routes that make it usable.
    ///
    /// Route injection walks BOTH networks' subnet lists: every public subnet
    /// of the requester gets a route to the accepter's full CIDR and every
    /// public subnet of the accepter gets a route back to the requester's.
    /// A route in only one direction leaves the link one-directional.
    pub fn connect(
        spec: &PeeringSpec,
        requester: &mut Network,
        accepter: &mut Network,
    ) -> Result<Self> {
        if requester.cidr.overlaps(&accepter.cidr) {
            return Err(TopoError::PeeredNetworksOverlap {
                requester: requester.name.clone(),
                accepter: accepter.name.clone(),
            });
        }

        let connection = PeeringConnection {
            id: format!("pcx-{}", spec.name),
            name: spec.name.clone(),
            requester: requester.name.clone(),
            accepter: accepter.name.clone(),
        };

        let accepter_cidr = accepter.cidr;
        let requester_cidr = requester.cidr;
        connection.route_towards(requester, accepter_cidr);
        connection.route_towards(accepter, requester_cidr);

        tracing::debug!(
            peering = connection.name,
            requester = connection.requester,
            accepter = connection.accepter,
            "connected networks"
        );
        Ok(connection)
    }

    /// Route `destination` through this connection from every public subnet
    /// of `network`.
    fn route_towards(&self, network: &mut Network, destination: Cidr) {
        for subnet in &mut network.subnets {
            if subnet.tier == SubnetTier::Public {
                subnet
                    .route_table
                    .add_route(destination, RouteTarget::PeeringConnection(self.id.clone()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Network;
    use netweave_atom::{NetworkSpec, SubnetSpec};

    fn network(name: &str, cidr: &str) -> Network {
        Network::evaluate(
            name,
            &NetworkSpec {
                cidr: cidr.to_string(),
                max_azs: 1,
                subnets: vec![SubnetSpec {
                    name: "public".to_string(),
                    tier: SubnetTier::Public,
                    cidr_mask: 24,
                    reserved: false,
                }],
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn peering_routes(net: &Network) -> Vec<(String, String)> {
        net.subnets
            .iter()
            .flat_map(|s| s.route_table.routes.iter())
            .filter_map(|r| match &r.target {
                RouteTarget::PeeringConnection(id) => {
                    Some((r.destination.to_string(), id.clone()))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_routes_are_injected_in_both_directions() {
        let mut a = network("a", "10.0.0.0/16");
        let mut b = network("b", "10.101.0.0/16");

        let spec = PeeringSpec {
            name: "a-to-b".to_string(),
            requester: "a".to_string(),
            accepter: "b".to_string(),
        };
        let connection = PeeringConnection::connect(&spec, &mut a, &mut b).unwrap();

        // Exactly one route on each side, pointing at the other network's
        // full CIDR through the connection
        assert_eq!(
            peering_routes(&a),
            vec![("10.101.0.0/16".to_string(), connection.id.clone())]
        );
        assert_eq!(
            peering_routes(&b),
            vec![("10.0.0.0/16".to_string(), connection.id.clone())]
        );
    }

    #[test]
    fn test_every_public_subnet_gets_a_route() {
        let mut a = Network::evaluate(
            "a",
            &NetworkSpec {
                cidr: "10.0.0.0/16".to_string(),
                max_azs: 3,
                subnets: vec![
                    SubnetSpec {
                        name: "public".to_string(),
                        tier: SubnetTier::Public,
                        cidr_mask: 24,
                        reserved: false,
                    },
                    SubnetSpec {
                        name: "vault".to_string(),
                        tier: SubnetTier::PrivateIsolated,
                        cidr_mask: 24,
                        reserved: false,
                    },
                ],
                ..Default::default()
            },
        )
        .unwrap();
        let mut b = network("b", "10.101.0.0/16");

        let spec = PeeringSpec {
            name: "a-to-b".to_string(),
            requester: "a".to_string(),
            accepter: "b".to_string(),
        };
        PeeringConnection::connect(&spec, &mut a, &mut b).unwrap();

        assert_eq!(peering_routes(&a).len(), 3);
        // Isolated subnets stay untouched
        for subnet in a.subnets_by_tier(SubnetTier::PrivateIsolated) {
            assert!(subnet.route_table.routes.is_empty());
        }
    }

    #[test]
    fn test_overlapping_networks_cannot_peer() {
        let mut a = network("a", "10.0.0.0/16");
        let mut b = network("b", "10.0.128.0/17");

        let spec = PeeringSpec {
            name: "bad".to_string(),
            requester: "a".to_string(),
            accepter: "b".to_string(),
        };
        let result = PeeringConnection::connect(&spec, &mut a, &mut b);
        assert!(matches!(
            result,
            Err(TopoError::PeeredNetworksOverlap { .. })
        ));
    }
}
