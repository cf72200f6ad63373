//! Load balancer client backed by a describe-output snapshot on disk

use crate::elb::client::{ElbClient, TargetGroupLookup};
use crate::elb::model::{Listener, LoadBalancer, RuleRecord};
use crate::elb::wire::{RawListener, RawLoadBalancer, RawRule, RawTargetGroup};
use crate::error::AuditError;
use crate::fetch::Page;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

/// Snapshot document layout, one section per describe call
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ElbSnapshot {
    #[serde(default)]
    pub load_balancers: Vec<RawLoadBalancer>,
    #[serde(default)]
    pub listeners: Vec<RawListener>,
    /// Rules keyed by listener ARN
    #[serde(default)]
    pub rules: HashMap<String, Vec<RawRule>>,
    #[serde(default)]
    pub target_groups: Vec<RawTargetGroup>,
}

/// Serves a snapshot through `ElbClient`, splitting load balancer and rule
/// listings into pages of `page_size` the way the live API does.
pub struct SnapshotElbClient {
    snapshot: ElbSnapshot,
    page_size: usize,
}

impl SnapshotElbClient {
    pub fn new(snapshot: ElbSnapshot, page_size: usize) -> Self {
        Self {
            snapshot,
            page_size: page_size.max(1),
        }
    }

    pub fn from_json(json: &str, page_size: usize) -> Result<Self, AuditError> {
        let snapshot: ElbSnapshot = serde_json::from_str(json)?;
        Ok(Self::new(snapshot, page_size))
    }

    pub async fn load(path: &Path, page_size: usize) -> Result<Self, AuditError> {
        debug!("Loading load balancer snapshot from: {}", path.display());
        let contents = fs::read_to_string(path).await?;
        let client = Self::from_json(&contents, page_size)?;
        info!(
            "Loaded load balancer snapshot: {} load balancers, {} listeners, {} target groups",
            client.snapshot.load_balancers.len(),
            client.snapshot.listeners.len(),
            client.snapshot.target_groups.len()
        );
        Ok(client)
    }

    fn page_of<T: Clone>(
        &self,
        items: &[T],
        marker: Option<String>,
    ) -> Result<Page<T>, AuditError> {
        let start = match marker {
            Some(marker) => marker
                .parse::<usize>()
                .ok()
                .filter(|offset| *offset <= items.len())
                .ok_or(AuditError::InvalidMarker(marker))?,
            None => 0,
        };
        let end = (start + self.page_size).min(items.len());
        let chunk = items[start..end].to_vec();

        if end < items.len() {
            Ok(Page::with_marker(chunk, end.to_string()))
        } else {
            Ok(Page::last(chunk))
        }
    }
}

#[async_trait::async_trait]
impl TargetGroupLookup for SnapshotElbClient {
    async fn target_group_name(&self, target_group_arn: &str) -> Result<String, AuditError> {
        self.snapshot
            .target_groups
            .iter()
            .find(|tg| tg.target_group_arn == target_group_arn)
            .map(|tg| tg.target_group_name.clone())
            .ok_or_else(|| AuditError::not_found("target group", target_group_arn))
    }
}

#[async_trait::async_trait]
impl ElbClient for SnapshotElbClient {
    async fn list_load_balancers(
        &self,
        marker: Option<String>,
    ) -> Result<Page<LoadBalancer>, AuditError> {
        let page = self.page_of(&self.snapshot.load_balancers, marker)?;
        Ok(Page {
            items: page.items.into_iter().map(LoadBalancer::from).collect(),
            next_marker: page.next_marker,
        })
    }

    async fn list_listeners(&self, load_balancer_arn: &str) -> Result<Vec<Listener>, AuditError> {
        let known = self
            .snapshot
            .load_balancers
            .iter()
            .any(|lb| lb.load_balancer_arn == load_balancer_arn);
        if !known {
            return Err(AuditError::not_found("load balancer", load_balancer_arn));
        }

        Ok(self
            .snapshot
            .listeners
            .iter()
            .filter(|listener| listener.load_balancer_arn == load_balancer_arn)
            .cloned()
            .map(Listener::from)
            .collect())
    }

    async fn list_rules(
        &self,
        listener_arn: &str,
        marker: Option<String>,
    ) -> Result<Page<RuleRecord>, AuditError> {
        let rules = match self.snapshot.rules.get(listener_arn) {
            Some(rules) => rules,
            None if self
                .snapshot
                .listeners
                .iter()
                .any(|listener| listener.listener_arn == listener_arn) =>
            {
                // A listener with no recorded rules still answers with an empty page
                return Ok(Page::last(Vec::new()));
            }
            None => return Err(AuditError::not_found("listener", listener_arn)),
        };

        let page = self.page_of(rules, marker)?;
        Ok(Page {
            items: page.items.into_iter().map(RuleRecord::from).collect(),
            next_marker: page.next_marker,
        })
    }
}
