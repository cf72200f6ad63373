use crate::elb::model::{Listener, LoadBalancer, RuleRecord};
use crate::error::AuditError;
use crate::fetch::Page;
use std::collections::HashMap;

/// Resolves a target group ARN to its display name
#[async_trait::async_trait]
pub trait TargetGroupLookup: Send + Sync {
    async fn target_group_name(&self, target_group_arn: &str) -> Result<String, AuditError>;
}

/// Read-only view of the load balancer API used by the rule report.
///
/// Implementations are handed over already authenticated.
#[async_trait::async_trait]
pub trait ElbClient: TargetGroupLookup {
    async fn list_load_balancers(
        &self,
        marker: Option<String>,
    ) -> Result<Page<LoadBalancer>, AuditError>;

    async fn list_listeners(&self, load_balancer_arn: &str) -> Result<Vec<Listener>, AuditError>;

    async fn list_rules(
        &self,
        listener_arn: &str,
        marker: Option<String>,
    ) -> Result<Page<RuleRecord>, AuditError>;
}

#[async_trait::async_trait]
impl TargetGroupLookup for HashMap<String, String> {
    async fn target_group_name(&self, target_group_arn: &str) -> Result<String, AuditError> {
        self.get(target_group_arn)
            .cloned()
            .ok_or_else(|| AuditError::not_found("target group", target_group_arn))
    }
}
