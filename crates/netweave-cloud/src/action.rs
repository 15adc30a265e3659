//! Plan and apply types for the submission interface

use crate::provider::ResourceKind;
use serde::{Deserialize, Serialize};

/// One planned change to a declared resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    /// Action id, unique within the plan
    pub id: String,
    pub action_type: ActionType,
    pub kind: ResourceKind,
    pub resource_id: String,
    /// Human-readable description
    pub description: String,
}

/// Type of change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Create,
    Update,
    Delete,
    NoOp,
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionType::Create => write!(f, "create"),
            ActionType::Update => write!(f, "update"),
            ActionType::Delete => write!(f, "delete"),
            ActionType::NoOp => write!(f, "no-op"),
        }
    }
}

/// A plan computed by the provisioning engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub actions: Vec<Action>,
    pub has_changes: bool,
}

impl Plan {
    pub fn new(actions: Vec<Action>) -> Self {
        let has_changes = actions.iter().any(|a| a.action_type != ActionType::NoOp);
        Self {
            actions,
            has_changes,
        }
    }

    pub fn empty() -> Self {
        Self {
            actions: Vec::new(),
            has_changes: false,
        }
    }

    pub fn actions_by_type(&self, action_type: ActionType) -> Vec<&Action> {
        self.actions
            .iter()
            .filter(|a| a.action_type == action_type)
            .collect()
    }

    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            create: self.actions_by_type(ActionType::Create).len(),
            update: self.actions_by_type(ActionType::Update).len(),
            delete: self.actions_by_type(ActionType::Delete).len(),
            no_change: self.actions_by_type(ActionType::NoOp).len(),
        }
    }
}

/// Counts of planned changes
#[derive(Debug, Clone)]
pub struct PlanSummary {
    pub create: usize,
    pub update: usize,
    pub delete: usize,
    pub no_change: usize,
}

impl std::fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to create, {} to update, {} to delete, {} unchanged",
            self.create, self.update, self.delete, self.no_change
        )
    }
}

/// Result of applying a plan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplyResult {
    pub succeeded: Vec<ActionResult>,
    pub failed: Vec<ActionResult>,
    pub duration_ms: u64,
}

impl ApplyResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn add_success(&mut self, action_id: String, message: String) {
        self.succeeded.push(ActionResult {
            action_id,
            success: true,
            message,
            error: None,
        });
    }

    pub fn add_failure(&mut self, action_id: String, error: String) {
        self.failed.push(ActionResult {
            action_id,
            success: false,
            message: String::new(),
            error: Some(error),
        });
    }
}

/// Result of one action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    pub action_id: String,
    pub success: bool,
    pub message: String,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(id: &str, action_type: ActionType) -> Action {
        Action {
            id: id.to_string(),
            action_type,
            kind: ResourceKind::Network,
            resource_id: format!("net-{}", id),
            description: String::new(),
        }
    }

    #[test]
    fn test_plan_change_detection() {
        let plan = Plan::new(vec![action("a", ActionType::NoOp)]);
        assert!(!plan.has_changes);

        let plan = Plan::new(vec![
            action("a", ActionType::NoOp),
            action("b", ActionType::Create),
        ]);
        assert!(plan.has_changes);
    }

    #[test]
    fn test_plan_summary() {
        let plan = Plan::new(vec![
            action("a", ActionType::Create),
            action("b", ActionType::Create),
            action("c", ActionType::Delete),
            action("d", ActionType::NoOp),
        ]);
        let summary = plan.summary();
        assert_eq!(summary.create, 2);
        assert_eq!(summary.delete, 1);
        assert_eq!(summary.no_change, 1);
        assert_eq!(
            summary.to_string(),
            "2 to create, 0 to update, 1 to delete, 1 unchanged"
        );
    }

    #[test]
    fn test_apply_result() {
        let mut result = ApplyResult::new();
        result.add_success("create-net-app".to_string(), "created".to_string());
        assert!(result.is_success());
        result.add_failure("create-net-edge".to_string(), "quota exceeded".to_string());
        assert!(!result.is_success());
    }
}
