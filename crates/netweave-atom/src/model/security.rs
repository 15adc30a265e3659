//! Security group declaration

use serde::{Deserialize, Serialize};

/// Security group declaration
///
/// Scoped to one network. Traffic is default-deny; only the declared ingress
/// and egress rules are opened.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityGroupSpec {
    /// Owning network name
    pub network: String,

    /// Ingress rules
    #[serde(default)]
    pub ingress: Vec<RuleSpec>,

    /// Egress rules
    #[serde(default)]
    pub egress: Vec<RuleSpec>,

    /// Free-form description
    pub description: Option<String>,
}

/// A single allow rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSpec {
    pub protocol: Protocol,

    /// First port of the range; -1 means protocol-defined (e.g. all ICMP)
    #[serde(default = "default_port")]
    pub from_port: i32,

    /// Last port of the range; -1 means protocol-defined
    #[serde(default = "default_port")]
    pub to_port: i32,

    /// Peer selector: "any" or a CIDR block
    #[serde(default = "default_peer")]
    pub peer: String,
}

fn default_port() -> i32 {
    -1
}

fn default_peer() -> String {
    "any".to_string()
}

/// Rule protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Udp,
    Icmp,
    /// Every protocol
    All,
}

impl Protocol {
    /// Parse from the declaration string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tcp" => Some(Self::Tcp),
            "udp" => Some(Self::Udp),
            "icmp" => Some(Self::Icmp),
            "all" | "-1" => Some(Self::All),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Udp => "udp",
            Self::Icmp => "icmp",
            Self::All => "all",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
