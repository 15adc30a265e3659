//! Resource-graph compilation
//!
//! Flattens an evaluated [`TopologyGraph`] into the [`ResourceSet`] handed to
//! the provisioning engine. Each graph entity becomes exactly one resource;
//! `depends_on` edges carry the creation order the engine needs.

use crate::error::Result;
use crate::provider::{ResourceConfig, ResourceKind, ResourceSet};
use netweave_topo::{Network, RouteTarget, TopologyGraph};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// A named output exposed for downstream consumption
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub name: String,
    pub value: String,
}

/// Compile a topology graph into the resource set submitted to the engine
pub fn compile(graph: &TopologyGraph) -> Result<ResourceSet> {
    let mut set = ResourceSet::new();

    for network in &graph.networks {
        compile_network(&mut set, network)?;
    }

    for peering in &graph.peerings {
        let requester_id = network_id(graph, &peering.requester);
        let accepter_id = network_id(graph, &peering.accepter);
        set.add(
            ResourceConfig::new(
                ResourceKind::PeeringConnection,
                &peering.id,
                json!({
                    "name": peering.name,
                    "requester": peering.requester,
                    "accepter": peering.accepter,
                }),
            )
            .with_depends_on([requester_id, accepter_id]),
        );
    }

    for group in &graph.security_groups {
        set.add(
            ResourceConfig::new(
                ResourceKind::SecurityGroup,
                &group.id,
                json!({
                    "name": group.name,
                    "network": group.network,
                    "ingress": serde_json::to_value(&group.ingress)?,
                    "egress": serde_json::to_value(&group.egress)?,
                    "description": group.description,
                }),
            )
            .with_depends_on([network_id(graph, &group.network)]),
        );
    }

    for role in &graph.roles {
        set.add(ResourceConfig::new(
            ResourceKind::Role,
            &role.id,
            json!({
                "name": role.name,
                "assumed_by": role.assumed_by,
                "managed_policies": role.managed_policies,
                "description": role.description,
            }),
        ));
    }

    for instance in &graph.instances {
        set.add(
            ResourceConfig::new(
                ResourceKind::Instance,
                &instance.id,
                json!({
                    "name": instance.name,
                    "network": instance.network,
                    "subnet": instance.subnet,
                    "tier": instance.tier,
                    "size": instance.size,
                    "image": instance.image,
                    "az": instance.az,
                }),
            )
            .with_depends_on([
                instance.subnet.clone(),
                instance.security_group.clone(),
                instance.role.clone(),
            ]),
        );
    }

    tracing::debug!(resources = set.len(), "compiled resource set");
    Ok(set)
}

fn compile_network(set: &mut ResourceSet, network: &Network) -> Result<()> {
    set.add(ResourceConfig::new(
        ResourceKind::Network,
        &network.id,
        json!({
            "name": network.name,
            "cidr": network.cidr,
            "dns_hostnames": network.dns_hostnames,
            "dns_support": network.dns_support,
        }),
    ));

    if let Some(igw) = &network.internet_gateway {
        set.add(
            ResourceConfig::new(
                ResourceKind::InternetGateway,
                &igw.id,
                json!({"network": network.name}),
            )
            .with_depends_on([network.id.clone()]),
        );
    }

    for nat in &network.nat_gateways {
        set.add(
            ResourceConfig::new(
                ResourceKind::NatGateway,
                &nat.id,
                json!({
                    "network": network.name,
                    "subnet": nat.subnet,
                    "az": nat.az,
                }),
            )
            .with_depends_on([nat.subnet.clone()]),
        );
    }

    for subnet in &network.subnets {
        set.add(
            ResourceConfig::new(
                ResourceKind::Subnet,
                &subnet.id,
                json!({
                    "name": subnet.name,
                    "network": subnet.network,
                    "tier": subnet.tier,
                    "cidr": subnet.cidr,
                    "az": subnet.az,
                }),
            )
            .with_depends_on([network.id.clone()]),
        );

        // The route table trails its subnet and every route target
        let mut depends = vec![subnet.id.clone()];
        for route in &subnet.route_table.routes {
            let target_id = match &route.target {
                RouteTarget::InternetGateway(id)
                | RouteTarget::NatGateway(id)
                | RouteTarget::PeeringConnection(id) => id.clone(),
            };
            if !depends.contains(&target_id) {
                depends.push(target_id);
            }
        }
        set.add(
            ResourceConfig::new(
                ResourceKind::RouteTable,
                &subnet.route_table.id,
                json!({
                    "subnet": subnet.id,
                    "routes": serde_json::to_value(&subnet.route_table.routes)?,
                }),
            )
            .with_depends_on(depends),
        );
    }

    Ok(())
}

/// Named outputs for the graph: network ids, security-group ids, instance ids
pub fn outputs(graph: &TopologyGraph) -> Vec<Output> {
    let mut outputs = Vec::new();
    for network in &graph.networks {
        outputs.push(Output {
            name: format!("{}-network-id", network.name),
            value: network.id.clone(),
        });
    }
    for group in &graph.security_groups {
        outputs.push(Output {
            name: format!("{}-security-group-id", group.name),
            value: group.id.clone(),
        });
    }
    for instance in &graph.instances {
        outputs.push(Output {
            name: format!("{}-instance-id", instance.name),
            value: instance.id.clone(),
        });
    }
    outputs
}

fn network_id(graph: &TopologyGraph, name: &str) -> String {
    graph
        .network(name)
        .map(|n| n.id.clone())
        .unwrap_or_else(|| format!("net-{}", name))
}
