//! Evaluated security groups

use crate::cidr::Cidr;
use crate::error::Result;
use netweave_atom::{Protocol, RuleSpec, SecurityGroupSpec};
use serde::{Deserialize, Serialize};

/// An evaluated security group
///
/// Scoped to one network; traffic is default-deny and only the listed rules
/// are open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityGroup {
    /// Stable logical id, e.g. "sg-base"
    pub id: String,
    pub name: String,
    /// Owning network name
    pub network: String,
    pub ingress: Vec<Rule>,
    pub egress: Vec<Rule>,
    pub description: Option<String>,
}

/// An evaluated allow rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub protocol: Protocol,
    pub from_port: i32,
    pub to_port: i32,
    pub peer: RulePeer,
}

/// Rule peer: the whole address space or one block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RulePeer {
    Any,
    Cidr(Cidr),
}

impl SecurityGroup {
    /// Evaluate a security group declaration. The owning network is resolved
    /// by the graph; only rule shape is checked here.
    pub fn evaluate(name: &str, spec: &SecurityGroupSpec) -> Result<Self> {
        Ok(SecurityGroup {
            id: format!("sg-{}", name),
            name: name.to_string(),
            network: spec.network.clone(),
            ingress: evaluate_rules(&spec.ingress)?,
            egress: evaluate_rules(&spec.egress)?,
            description: spec.description.clone(),
        })
    }
}

fn evaluate_rules(specs: &[RuleSpec]) -> Result<Vec<Rule>> {
    specs
        .iter()
        .map(|spec| {
            let peer = if spec.peer == "any" {
                RulePeer::Any
            } else {
                RulePeer::Cidr(Cidr::parse(&spec.peer)?)
            };
            Ok(Rule {
                protocol: spec.protocol,
                from_port: spec.from_port,
                to_port: spec.to_port,
                peer,
            })
        })
        .collect()
}
