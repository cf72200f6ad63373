//! Deduplicating depth-first walk over a job listing
//!
//! Listings from the CI server contain every nested job twice: once inside
//! its folder and once as a standalone entry. The walk starts from top-level
//! entries only and skips any path it has already rendered, together with
//! that path's subtree.

use crate::jobs::model::JobNode;
use std::collections::HashSet;

pub const TEE: &str = "├── ";
pub const ELBOW: &str = "└── ";
pub const BAR: &str = "│   ";
pub const BLANK: &str = "    ";

/// Suffix appended to the name of a disabled job
pub const DISABLED_SUFFIX: &str = " *JOB DISABLED*";

/// Names highlighted when no list is configured
pub const DEFAULT_HIGHLIGHTS: [&str; 2] = ["test", "production"];

/// Presentation hint for one rendered line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Disabled,
    /// A nested folder
    Service,
    Highlighted,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderLine {
    pub prefix: String,
    pub text: String,
    /// Last entry within its sibling group
    pub is_last: bool,
    pub style: LineStyle,
}

impl RenderLine {
    pub fn plain_text(&self) -> String {
        format!("{}{}", self.prefix, self.text)
    }
}

/// Prefix for child `index` of `count` and the continuation its own
/// children extend.
pub fn compute_child_prefixes(
    parent_continuation: &str,
    index: usize,
    count: usize,
) -> (String, String) {
    if index + 1 == count {
        (
            format!("{}{}", parent_continuation, ELBOW),
            format!("{}{}", parent_continuation, BLANK),
        )
    } else {
        (
            format!("{}{}", parent_continuation, TEE),
            format!("{}{}", parent_continuation, BAR),
        )
    }
}

pub struct TreeWalker {
    highlights: Vec<String>,
}

impl Default for TreeWalker {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHLIGHTS.iter().map(|name| name.to_string()).collect())
    }
}

impl TreeWalker {
    pub fn new(highlights: Vec<String>) -> Self {
        Self { highlights }
    }

    /// Render every top-level entry of `nodes` as one sibling group
    pub fn render(&self, nodes: &[JobNode]) -> Vec<RenderLine> {
        let top_level: Vec<&JobNode> = nodes.iter().filter(|node| node.is_top_level()).collect();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut lines = Vec::new();

        let count = top_level.len();
        for (index, node) in top_level.into_iter().enumerate() {
            let (prefix, continuation) = compute_child_prefixes("", index, count);
            self.visit(node, prefix, &continuation, index + 1 == count, &mut visited, &mut lines);
        }

        tracing::debug!(
            "Rendered {} lines from {} listed jobs",
            lines.len(),
            nodes.len()
        );
        lines
    }

    fn visit<'a>(
        &self,
        node: &'a JobNode,
        prefix: String,
        continuation: &str,
        is_last: bool,
        visited: &mut HashSet<&'a str>,
        lines: &mut Vec<RenderLine>,
    ) {
        if !visited.insert(node.full_path.as_str()) {
            tracing::trace!("Skipping already rendered job: {}", node.full_path);
            return;
        }

        let text = if node.is_disabled {
            format!("{}{}", node.display_name, DISABLED_SUFFIX)
        } else {
            node.display_name.clone()
        };
        lines.push(RenderLine {
            prefix,
            text,
            is_last,
            style: self.style_of(node),
        });

        let count = node.children.len();
        for (index, child) in node.children.iter().enumerate() {
            let (child_prefix, child_continuation) =
                compute_child_prefixes(continuation, index, count);
            self.visit(
                child,
                child_prefix,
                &child_continuation,
                index + 1 == count,
                visited,
                lines,
            );
        }
    }

    fn style_of(&self, node: &JobNode) -> LineStyle {
        if node.is_disabled {
            LineStyle::Disabled
        } else if node.is_folder && !node.is_top_level() {
            LineStyle::Service
        } else if self.highlights.iter().any(|name| *name == node.display_name) {
            LineStyle::Highlighted
        } else {
            LineStyle::Plain
        }
    }
}

/// Render with the default highlight names
pub fn render(nodes: &[JobNode]) -> Vec<RenderLine> {
    TreeWalker::default().render(nodes)
}
