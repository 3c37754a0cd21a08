//! # Permissions
//!
//! Subscription-tier gate for question creation. The billing provider lives
//! outside this crate; callers wire in whatever implementation their identity
//! stack provides.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Subscription plans recognized by the creation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    Free,
    Pro,
    Max,
}

impl SubscriptionPlan {
    /// Whether this plan includes question generation.
    pub fn allows_question_generation(self) -> bool {
        !matches!(self, SubscriptionPlan::Free)
    }
}

/// Decides whether a user may create a new practice question.
#[async_trait]
pub trait QuestionPermissions: Send + Sync {
    async fn can_create_question(&self, user_id: &str) -> bool;
}

/// Plan-table-backed permission check. Users without a recorded plan are
/// treated as free tier.
#[derive(Debug, Default)]
pub struct PlanPermissions {
    plans: DashMap<String, SubscriptionPlan>,
}

impl PlanPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_plan(&self, user_id: impl Into<String>, plan: SubscriptionPlan) {
        self.plans.insert(user_id.into(), plan);
    }

    pub fn plan_of(&self, user_id: &str) -> SubscriptionPlan {
        self.plans
            .get(user_id)
            .map(|p| *p)
            .unwrap_or(SubscriptionPlan::Free)
    }
}

#[async_trait]
impl QuestionPermissions for PlanPermissions {
    async fn can_create_question(&self, user_id: &str) -> bool {
        self.plan_of(user_id).allows_question_generation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_user_defaults_to_free() {
        let permissions = PlanPermissions::new();
        assert!(!permissions.can_create_question("u-unknown").await);
    }

    #[tokio::test]
    async fn test_paid_plans_allow_creation() {
        let permissions = PlanPermissions::new();
        permissions.set_plan("u1", SubscriptionPlan::Pro);
        permissions.set_plan("u2", SubscriptionPlan::Max);
        permissions.set_plan("u3", SubscriptionPlan::Free);

        assert!(permissions.can_create_question("u1").await);
        assert!(permissions.can_create_question("u2").await);
        assert!(!permissions.can_create_question("u3").await);
    }
}
