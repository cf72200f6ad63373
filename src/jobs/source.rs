//! Job listing collaborators

use crate::error::AuditError;
use crate::jobs::model::{JobNode, RawJob};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

/// Read-only view of the CI server's job listing.
///
/// Like the server's client library, `list_all_jobs` returns a flattened
/// listing: every folder keeps its children, and each nested job is also
/// listed on its own. `max_depth` of `None` lists every level.
#[async_trait::async_trait]
pub trait JobSource: Send + Sync {
    async fn list_all_jobs(&self, max_depth: Option<usize>) -> Result<Vec<JobNode>, AuditError>;
}

/// Top-level `api/json` document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobListing {
    #[serde(default)]
    pub jobs: Vec<RawJob>,
}

pub struct SnapshotJobSource {
    listing: JobListing,
}

impl SnapshotJobSource {
    pub fn new(listing: JobListing) -> Self {
        Self { listing }
    }

    pub fn from_json(json: &str) -> Result<Self, AuditError> {
        let listing: JobListing = serde_json::from_str(json)?;
        Ok(Self::new(listing))
    }

    pub async fn load(path: &Path) -> Result<Self, AuditError> {
        debug!("Loading job snapshot from: {}", path.display());
        let contents = fs::read_to_string(path).await?;
        let source = Self::from_json(&contents)?;
        info!(
            "Loaded job snapshot with {} top-level entries",
            source.listing.jobs.len()
        );
        Ok(source)
    }
}

#[async_trait::async_trait]
impl JobSource for SnapshotJobSource {
    async fn list_all_jobs(&self, max_depth: Option<usize>) -> Result<Vec<JobNode>, AuditError> {
        let roots: Vec<JobNode> = self
            .listing
            .jobs
            .iter()
            .cloned()
            .filter_map(|raw| raw.into_node(None, 0, max_depth))
            .collect();
        Ok(flatten(&roots))
    }
}

/// Pre-order listing of `roots` and all their descendants
pub fn flatten(roots: &[JobNode]) -> Vec<JobNode> {
    let mut listing = Vec::new();
    let mut stack: Vec<&JobNode> = roots.iter().rev().collect();

    while let Some(node) = stack.pop() {
        listing.push(node.clone());
        stack.extend(node.children.iter().rev());
    }

    listing
}
