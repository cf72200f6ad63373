//! Load balancer listener rule audit
//!
//! This module provides:
//! - Report models for load balancers, listeners and rules
//! - Normalization of describe-output records into those models
//! - A rule interpreter turning conditions and actions into text
//! - The listener rule report and a snapshot-backed client

pub mod client;
pub mod interpreter;
pub mod model;
pub mod report;
pub mod snapshot;
pub mod wire;

pub use client::{ElbClient, TargetGroupLookup};
pub use interpreter::{describe_actions, describe_conditions, DEFAULT_RULE_DESCRIPTION};
pub use model::{Action, Condition, Listener, LoadBalancer, Priority, RuleRecord};
pub use report::{ElbReport, LoadBalancerFilter, ReportSummary};
pub use snapshot::SnapshotElbClient;
