//! Evaluated networks, subnets, and route tables

use crate::cidr::Cidr;
use crate::error::{Result, TopoError};
use netweave_atom::{NetworkSpec, SubnetTier};
use serde::{Deserialize, Serialize};

/// An evaluated network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    /// Stable logical id, e.g. "net-app"
    pub id: String,
    pub name: String,
    pub cidr: Cidr,
    pub dns_hostnames: bool,
    pub dns_support: bool,
    /// Subnets in carve order
    pub subnets: Vec<Subnet>,
    pub internet_gateway: Option<InternetGateway>,
    #[serde(default)]
    pub nat_gateways: Vec<NatGateway>,
}

/// An evaluated subnet; owns exactly one route table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subnet {
    /// Stable logical id, e.g. "app-public-a"
    pub id: String,
    /// Subnet group name from the declaration
    pub name: String,
    /// Owning network name
    pub network: String,
    pub tier: SubnetTier,
    pub cidr: Cidr,
    /// Availability zone suffix, e.g. "a"
    pub az: String,
    pub route_table: RouteTable,
}

/// A route table; owned one-per-subnet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteTable {
    /// Stable logical id, e.g. "rtb-app-public-a"
    pub id: String,
    pub routes: Vec<Route>,
}

impl RouteTable {
    pub fn add_route(&mut self, destination: Cidr, target: RouteTarget) {
        self.routes.push(Route {
            destination,
            target,
        });
    }
}

/// A single route: destination block to next hop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub destination: Cidr,
    pub target: RouteTarget,
}

/// Next hop of a route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "id")]
pub enum RouteTarget {
    InternetGateway(String),
    NatGateway(String),
    PeeringConnection(String),
}

/// Internet gateway for a network's public subnets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternetGateway {
    pub id: String,
}

/// NAT gateway giving private-with-egress subnets outbound reach
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NatGateway {
    pub id: String,
    /// Public subnet hosting the gateway
    pub subnet: String,
    pub az: String,
}

impl Network {
    /// Evaluate a network declaration.
    ///
    /// Each subnet group is fanned out to one subnet per availability zone,
    /// blocks allocated sequentially from the network CIDR in declaration
    /// order. Reserved groups consume address space without producing
    /// subnets. Public subnets route 0.0.0.0/0 to an internet gateway;
    /// private-with-egress subnets route it to a NAT gateway in their zone.
    pub fn evaluate(name: &str, spec: &NetworkSpec) -> Result<Self> {
        let cidr = Cidr::parse(&spec.cidr)?;

        if spec.max_azs == 0 {
            return Err(TopoError::NoAvailabilityZones(name.to_string()));
        }
        let azs: Vec<String> = (0..spec.max_azs).map(az_name).collect();

        let mut subnets = Vec::new();
        let mut block_index = 0usize;
        for group in &spec.subnets {
            for az in &azs {
                let subnet_cidr = cidr.carve(group.cidr_mask, block_index)?;
                block_index += 1;
                if group.reserved {
                    continue;
                }
                let id = format!("{}-{}-{}", name, group.name, az);
                subnets.push(Subnet {
                    route_table: RouteTable {
                        id: format!("rtb-{}", id),
                        routes: Vec::new(),
                    },
                    id,
                    name: group.name.clone(),
                    network: name.to_string(),
                    tier: group.tier,
                    cidr: subnet_cidr,
                    az: az.clone(),
                });
            }
        }

        let mut network = Network {
            id: format!("net-{}", name),
            name: name.to_string(),
            cidr,
            dns_hostnames: spec.dns_hostnames,
            dns_support: spec.dns_support,
            subnets,
            internet_gateway: None,
            nat_gateways: Vec::new(),
        };
        network.attach_gateways()?;

        tracing::debug!(
            network = name,
            subnets = network.subnets.len(),
            "evaluated network"
        );
        Ok(network)
    }

    /// Create the internet and NAT gateways the subnet tiers call for, and
    /// install their default routes.
    fn attach_gateways(&mut self) -> Result<()> {
        let has_public = self.subnets.iter().any(|s| s.tier == SubnetTier::Public);
        let has_egress = self
            .subnets
            .iter()
            .any(|s| s.tier == SubnetTier::PrivateWithEgress);

        if has_egress && !has_public {
            return Err(TopoError::EgressWithoutPublic(self.name.clone()));
        }

        if has_public {
            let igw = InternetGateway {
                id: format!("igw-{}", self.name),
            };
            for subnet in &mut self.subnets {
                if subnet.tier == SubnetTier::Public {
                    subnet
                        .route_table
                        .add_route(Cidr::any(), RouteTarget::InternetGateway(igw.id.clone()));
                }
            }
            self.internet_gateway = Some(igw);
        }

        if has_egress {
            // One NAT gateway per zone, hosted in that zone's public subnet
            let hosts: Vec<(String, String)> = self
                .subnets
                .iter()
                .filter(|s| s.tier == SubnetTier::Public)
                .map(|s| (s.az.clone(), s.id.clone()))
                .collect();
            let mut gateways = Vec::new();
            for (az, subnet_id) in hosts {
                if gateways.iter().any(|g: &NatGateway| g.az == az) {
                    continue;
                }
                gateways.push(NatGateway {
                    id: format!("nat-{}-{}", self.name, az),
                    subnet: subnet_id,
                    az,
                });
            }

            for subnet in &mut self.subnets {
                if subnet.tier != SubnetTier::PrivateWithEgress {
                    continue;
                }
                // Prefer the same-zone gateway, fall back to the first
                let gateway = gateways
                    .iter()
                    .find(|g| g.az == subnet.az)
                    .or_else(|| gateways.first())
                    .expect("has_public guarantees at least one NAT gateway");
                subnet
                    .route_table
                    .add_route(Cidr::any(), RouteTarget::NatGateway(gateway.id.clone()));
            }
            self.nat_gateways = gateways;
        }

        Ok(())
    }

    /// Subnets of the given tier, in carve order
    pub fn subnets_by_tier(&self, tier: SubnetTier) -> Vec<&Subnet> {
        self.subnets.iter().filter(|s| s.tier == tier).collect()
    }

    pub fn subnet(&self, id: &str) -> Option<&Subnet> {
        self.subnets.iter().find(|s| s.id == id)
    }
}

/// Zone suffix for the index-th availability zone: "a", "b", ...
fn az_name(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => ((b'a' + i) as char).to_string(),
        _ => format!("az{}", index + 1),
    }
}
