//! Peering connection declaration

use serde::{Deserialize, Serialize};

/// Peering connection declaration
///
/// Links exactly two networks. Peering is not transitive; routes through the
/// connection are injected into both networks' public route tables at
/// evaluation time so that traffic flows in both directions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeeringSpec {
    /// Connection name
    pub name: String,

    /// Network that requests the connection
    pub requester: String,

    /// Network that accepts the connection
    pub accepter: String,
}
