//! Provisioning-engine trait and resource-set types

use crate::action::{ApplyResult, Plan};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Provisioning-engine abstraction
///
/// An engine receives the desired [`ResourceSet`], diffs it against whatever
/// is live, and applies the difference. Netweave never looks behind this
/// trait; validation the graph cannot express (zone capacity, image and
/// policy validity) surfaces from `plan` as a [`crate::CloudError`], reported
/// verbatim.
#[async_trait]
pub trait CloudProvider: Send + Sync {
    /// Engine name, e.g. "aws"
    fn name(&self) -> &str;

    /// Display name for UI
    fn display_name(&self) -> &str;

    /// Check the engine is configured and authenticated
    async fn check_auth(&self) -> Result<AuthStatus>;

    /// Diff the desired resource set against live infrastructure
    async fn plan(&self, desired: &ResourceSet) -> Result<Plan>;

    /// Apply a previously computed plan
    async fn apply(&self, plan: &Plan) -> Result<ApplyResult>;

    /// Tear down everything the engine manages for this topology
    async fn destroy_all(&self) -> Result<ApplyResult>;
}

/// Authentication status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    /// Account information if available
    pub account_info: Option<String>,
    /// Error message if not authenticated
    pub error: Option<String>,
}

impl AuthStatus {
    pub fn ok(account_info: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            account_info: Some(account_info.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            authenticated: false,
            account_info: None,
            error: Some(error.into()),
        }
    }
}

/// Kind of a declared resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Network,
    Subnet,
    RouteTable,
    InternetGateway,
    NatGateway,
    PeeringConnection,
    SecurityGroup,
    Role,
    Instance,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Network => "network",
            ResourceKind::Subnet => "subnet",
            ResourceKind::RouteTable => "route-table",
            ResourceKind::InternetGateway => "internet-gateway",
            ResourceKind::NatGateway => "nat-gateway",
            ResourceKind::PeeringConnection => "peering-connection",
            ResourceKind::SecurityGroup => "security-group",
            ResourceKind::Role => "role",
            ResourceKind::Instance => "instance",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One declared resource, ready for submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    pub kind: ResourceKind,

    /// Stable logical id
    pub id: String,

    /// Ids of resources that must exist before this one
    #[serde(default)]
    pub depends_on: Vec<String>,

    /// Kind-specific configuration
    pub config: serde_json::Value,
}

impl ResourceConfig {
    pub fn new(kind: ResourceKind, id: impl Into<String>, config: serde_json::Value) -> Self {
        Self {
            kind,
            id: id.into(),
            depends_on: Vec::new(),
            config,
        }
    }

    pub fn with_depends_on(mut self, ids: impl IntoIterator<Item = String>) -> Self {
        self.depends_on.extend(ids);
        self
    }

    /// Full resource key (kind:id)
    pub fn key(&self) -> String {
        format!("{}:{}", self.kind, self.id)
    }

    /// A configuration value as a concrete type
    pub fn get_config<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.config
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

/// Desired set of resources, keyed by kind:id
///
/// Keys are ordered so submission and output are deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceSet {
    pub resources: BTreeMap<String, ResourceConfig>,
}

impl ResourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, resource: ResourceConfig) {
        self.resources.insert(resource.key(), resource);
    }

    pub fn get(&self, kind: ResourceKind, id: &str) -> Option<&ResourceConfig> {
        self.resources.get(&format!("{}:{}", kind, id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceConfig> {
        self.resources.values()
    }

    pub fn by_kind(&self, kind: ResourceKind) -> Vec<&ResourceConfig> {
        self.resources.values().filter(|r| r.kind == kind).collect()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
