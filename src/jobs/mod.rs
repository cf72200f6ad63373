//! CI job hierarchy audit
//!
//! This module provides:
//! - Job models and normalization of `api/json` records
//! - A job listing collaborator and a snapshot-backed implementation
//! - The deduplicating tree walker
//! - The job tree report with optional colors

pub mod model;
pub mod report;
pub mod source;
pub mod tree;

pub use model::JobNode;
pub use report::{ColorMode, JobTreeReport};
pub use source::{JobSource, SnapshotJobSource};
pub use tree::{compute_child_prefixes, render, LineStyle, RenderLine, TreeWalker};
