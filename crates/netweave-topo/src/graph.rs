//! Declaration to resource-graph evaluation

use crate::error::{Result, TopoError};
use crate::iam::Role;
use crate::instance::Instance;
use crate::network::{Network, Subnet};
use crate::peering::PeeringConnection;
use crate::security::SecurityGroup;
use netweave_atom::{SubnetTier, Topology};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The evaluated resource graph
///
/// Built in one synchronous pass over the declaration and immutable
/// afterwards. Networks, groups, and roles are ordered by name; instances
/// keep declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyGraph {
    pub name: String,
    pub networks: Vec<Network>,
    pub peerings: Vec<PeeringConnection>,
    pub security_groups: Vec<SecurityGroup>,
    pub roles: Vec<Role>,
    pub instances: Vec<Instance>,
}

impl TopologyGraph {
    /// Evaluate a topology declaration into a resource graph.
    ///
    /// Order of evaluation: networks first (subnet carving and gateway
    /// routes), then peering connections (route injection into both sides),
    /// then security groups, roles, and finally instances, which resolve
    /// their subnet against their own network only.
    pub fn evaluate(topology: &Topology) -> Result<Self> {
        // Networks, ordered by name so ids and output are stable
        let mut network_names: Vec<&String> = topology.networks.keys().collect();
        network_names.sort();
        let mut networks = network_names
            .iter()
            .map(|name| Network::evaluate(name, &topology.networks[*name]))
            .collect::<Result<Vec<_>>>()?;

        // Peering connections inject routes into both networks
        let mut peerings = Vec::new();
        for spec in &topology.peerings {
            let requester = networks
                .iter()
                .position(|n| n.name == spec.requester)
                .ok_or_else(|| TopoError::UnknownNetwork(spec.requester.clone()))?;
            let accepter = networks
                .iter()
                .position(|n| n.name == spec.accepter)
                .ok_or_else(|| TopoError::UnknownNetwork(spec.accepter.clone()))?;
            if requester == accepter {
                return Err(TopoError::PeeredNetworksOverlap {
                    requester: spec.requester.clone(),
                    accepter: spec.accepter.clone(),
                });
            }
            let (requester, accepter) = two_mut(&mut networks, requester, accepter);
            peerings.push(PeeringConnection::connect(spec, requester, accepter)?);
        }

        let mut group_names: Vec<&String> = topology.security_groups.keys().collect();
        group_names.sort();
        let mut security_groups = Vec::new();
        for name in group_names {
            let spec = &topology.security_groups[name];
            if !networks.iter().any(|n| n.name == spec.network) {
                return Err(TopoError::UnknownNetwork(spec.network.clone()));
            }
            security_groups.push(SecurityGroup::evaluate(name, spec)?);
        }

        let mut role_names: Vec<&String> = topology.roles.keys().collect();
        role_names.sort();
        let roles: Vec<Role> = role_names
            .iter()
            .map(|name| Role::evaluate(name, &topology.roles[*name]))
            .collect();

        // Instances resolve against their own network; placement is
        // round-robin over the matching subnets in declaration order
        let mut placement: HashMap<(String, SubnetTier), usize> = HashMap::new();
        let mut instances = Vec::new();
        for spec in &topology.instances {
            let network = networks
                .iter()
                .find(|n| n.name == spec.network)
                .ok_or_else(|| TopoError::UnknownNetwork(spec.network.clone()))?;
            let group = security_groups
                .iter()
                .find(|g| g.name == spec.security_group)
                .ok_or_else(|| TopoError::UnknownSecurityGroup(spec.security_group.clone()))?;
            if group.network != network.name {
                return Err(TopoError::SecurityGroupNetworkMismatch {
                    group: group.name.clone(),
                    group_network: group.network.clone(),
                    instance: spec.name.clone(),
                    instance_network: network.name.clone(),
                });
            }
            let role = roles
                .iter()
                .find(|r| r.name == spec.role)
                .ok_or_else(|| TopoError::UnknownRole(spec.role.clone()))?;

            let candidates = network.subnets_by_tier(spec.subnets);
            if candidates.is_empty() {
                // No fallback to another tier
                return Err(TopoError::NoMatchingSubnets {
                    network: network.name.clone(),
                    tier: spec.subnets.to_string(),
                    instance: spec.name.clone(),
                });
            }
            let counter = placement
                .entry((network.name.clone(), spec.subnets))
                .or_insert(0);
            let subnet = candidates[*counter % candidates.len()];
            *counter += 1;

            instances.push(Instance {
                id: format!("i-{}", spec.name),
                name: spec.name.clone(),
                network: network.name.clone(),
                subnet: subnet.id.clone(),
                tier: spec.subnets,
                security_group: group.id.clone(),
                role: role.id.clone(),
                size: spec.size.clone(),
                image: spec.image.clone(),
                az: subnet.az.clone(),
            });
        }

        tracing::info!(
            topology = topology.name,
            networks = networks.len(),
            peerings = peerings.len(),
            instances = instances.len(),
            "evaluated topology"
        );

        Ok(TopologyGraph {
            name: topology.name.clone(),
            networks,
            peerings,
            security_groups,
            roles,
            instances,
        })
    }

    pub fn network(&self, name: &str) -> Option<&Network> {
        self.networks.iter().find(|n| n.name == name)
    }

    pub fn security_group(&self, name: &str) -> Option<&SecurityGroup> {
        self.security_groups.iter().find(|g| g.name == name)
    }

    /// Look a subnet up by id across all networks
    pub fn subnet(&self, id: &str) -> Option<&Subnet> {
        self.networks.iter().find_map(|n| n.subnet(id))
    }

    /// Total number of subnets across all networks
    pub fn subnet_count(&self) -> usize {
        self.networks.iter().map(|n| n.subnets.len()).sum()
    }
}

/// Mutable references to two distinct slice elements
fn two_mut<T>(slice: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = slice.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = slice.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::RouteTarget;
    use netweave_atom::parse_kdl_string;

    const PEERED: &str = r#"
        topology "peered"

        network "app" {
            cidr "10.0.0.0/16"
            max-azs 1
            subnet "public" {
                tier "public"
                mask 24
            }
        }

        network "edge" {
            cidr "10.101.0.0/16"
            max-azs 1
            subnet "public" {
                tier "public"
                mask 24
            }
        }

        peering "link" {
            requester "app"
            accepter "edge"
        }
    "#;

    fn evaluate(kdl: &str) -> Result<TopologyGraph> {
        let topology = parse_kdl_string(kdl, "test".to_string()).unwrap();
        TopologyGraph::evaluate(&topology)
    }

    #[test]
    fn test_peered_pair_yields_exactly_two_routes() {
        let graph = evaluate(PEERED).unwrap();
        assert_eq!(graph.peerings.len(), 1);
        let connection = &graph.peerings[0];

        let peering_routes: Vec<(String, String)> = graph
            .networks
            .iter()
            .flat_map(|n| n.subnets.iter())
            .flat_map(|s| s.route_table.routes.iter())
            .filter_map(|r| match &r.target {
                RouteTarget::PeeringConnection(id) => {
                    Some((r.destination.to_string(), id.clone()))
                }
                _ => None,
            })
            .collect();

        // One route per public subnet per side, each pointing at the other
        // network's full CIDR
        assert_eq!(
            peering_routes,
            vec![
                ("10.101.0.0/16".to_string(), connection.id.clone()),
                ("10.0.0.0/16".to_string(), connection.id.clone()),
            ]
        );
    }

    #[test]
    fn test_unknown_peering_network() {
        let kdl = r#"
            network "app" {
                cidr "10.0.0.0/16"
            }
            peering "link" {
                requester "app"
                accepter "phantom"
            }
        "#;
        assert!(matches!(
            evaluate(kdl),
            Err(TopoError::UnknownNetwork(name)) if name == "phantom"
        ));
    }

    #[test]
    fn test_instance_lands_in_its_own_network() {
        let kdl = r#"
            network "app" {
                cidr "10.102.0.0/16"
                max-azs 2
                subnet "public" {
                    tier "public"
                    mask 24
                }
            }
            network "other" {
                cidr "10.103.0.0/16"
                max-azs 2
                subnet "public" {
                    tier "public"
                    mask 24
                }
            }
            security-group "base" {
                network "app"
                ingress {
                    protocol "icmp"
                }
            }
            role "instance-role" {
                assumed-by "ec2.amazonaws.com"
            }
            instance "web-1" {
                network "app"
                subnets "public"
                security-group "base"
                role "instance-role"
                size "t2.micro"
                image "amazon-linux-2023"
            }
        "#;
        let graph = evaluate(kdl).unwrap();
        let instance = &graph.instances[0];
        let subnet = graph.subnet(&instance.subnet).unwrap();
        assert_eq!(subnet.network, "app");
        assert_eq!(instance.network, "app");
    }

    #[test]
    fn test_instances_round_robin_across_zones() {
        let kdl = r#"
            network "app" {
                cidr "10.102.0.0/16"
                max-azs 2
                subnet "public" {
                    tier "public"
                    mask 24
                }
            }
            security-group "base" {
                network "app"
                ingress {
                    protocol "icmp"
                }
            }
            role "r" {
                assumed-by "ec2.amazonaws.com"
            }
            instance "web-1" {
                network "app"
                subnets "public"
                security-group "base"
                role "r"
                size "t2.micro"
                image "amazon-linux-2023"
            }
            instance "web-2" {
                network "app"
                subnets "public"
                security-group "base"
                role "r"
                size "t2.micro"
                image "amazon-linux-2023"
            }
            instance "web-3" {
                network "app"
                subnets "public"
                security-group "base"
                role "r"
                size "t2.micro"
                image "amazon-linux-2023"
            }
        "#;
        let graph = evaluate(kdl).unwrap();
        let azs: Vec<&str> = graph.instances.iter().map(|i| i.az.as_str()).collect();
        assert_eq!(azs, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_missing_tier_fails_without_fallback() {
        let kdl = r#"
            network "app" {
                cidr "10.102.0.0/16"
                max-azs 2
                subnet "public" {
                    tier "public"
                    mask 24
                }
            }
            security-group "base" {
                network "app"
                ingress {
                    protocol "icmp"
                }
            }
            role "r" {
                assumed-by "ec2.amazonaws.com"
            }
            instance "db-1" {
                network "app"
                subnets "private-isolated"
                security-group "base"
                role "r"
                size "t2.micro"
                image "amazon-linux-2023"
            }
        "#;
        assert!(matches!(
            evaluate(kdl),
            Err(TopoError::NoMatchingSubnets { instance, .. }) if instance == "db-1"
        ));
    }

    #[test]
    fn test_security_group_must_match_instance_network() {
        let kdl = r#"
            network "app" {
                cidr "10.102.0.0/16"
                max-azs 1
                subnet "public" {
                    tier "public"
                    mask 24
                }
            }
            network "edge" {
                cidr "10.101.0.0/16"
                max-azs 1
                subnet "public" {
                    tier "public"
                    mask 24
                }
            }
            security-group "app-only" {
                network "app"
                ingress {
                    protocol "icmp"
                }
            }
            role "r" {
                assumed-by "ec2.amazonaws.com"
            }
            instance "edge-1" {
                network "edge"
                subnets "public"
                security-group "app-only"
                role "r"
                size "t2.micro"
                image "amazon-linux-2023"
            }
        "#;
        assert!(matches!(
            evaluate(kdl),
            Err(TopoError::SecurityGroupNetworkMismatch { .. })
        ));
    }

    #[test]
    fn test_security_group_scoped_to_unknown_network() {
        let kdl = r#"
            network "app" {
                cidr "10.102.0.0/16"
            }
            security-group "orphan" {
                network "phantom"
                ingress {
                    protocol "icmp"
                }
            }
        "#;
        assert!(matches!(evaluate(kdl), Err(TopoError::UnknownNetwork(_))));
    }

    #[test]
    fn test_subnet_containment_holds_across_the_graph() {
        let graph = evaluate(PEERED).unwrap();
        for network in &graph.networks {
            for subnet in &network.subnets {
                assert!(network.cidr.contains(&subnet.cidr));
            }
        }
    }
}
