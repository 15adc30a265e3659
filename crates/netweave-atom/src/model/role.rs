//! Role declaration

use serde::{Deserialize, Serialize};

/// Role declaration
///
/// An identity assumable by instances: a trust policy (who may assume it)
/// plus a set of attached managed permission policies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleSpec {
    /// Trusted principal, e.g. "ec2.amazonaws.com"
    pub assumed_by: String,

    /// Attached managed policy names
    #[serde(default)]
    pub managed_policies: Vec<String>,

    /// Free-form description
    pub description: Option<String>,
}
