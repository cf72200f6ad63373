use serde::Deserialize;
use tracing::warn;

/// Status colors the CI server reports for disabled jobs
pub const DISABLED_COLORS: [&str; 2] = ["disabled", "disabled-anime"];

/// A job or folder in the CI hierarchy
#[derive(Debug, Clone, PartialEq)]
pub struct JobNode {
    /// Slash-delimited path, unique within one listing
    pub full_path: String,
    pub display_name: String,
    pub is_disabled: bool,
    /// Whether the record carried a child list at all, even an empty one
    pub is_folder: bool,
    pub children: Vec<JobNode>,
}

impl JobNode {
    pub fn job(full_path: impl Into<String>) -> Self {
        let full_path = full_path.into();
        Self {
            display_name: display_name_of(&full_path).to_string(),
            full_path,
            is_disabled: false,
            is_folder: false,
            children: Vec::new(),
        }
    }

    pub fn folder(full_path: impl Into<String>, children: Vec<JobNode>) -> Self {
        Self {
            is_folder: true,
            children,
            ..Self::job(full_path)
        }
    }

    pub fn disabled(mut self) -> Self {
        self.is_disabled = true;
        self
    }

    pub fn is_top_level(&self) -> bool {
        !self.full_path.contains('/')
    }
}

pub fn display_name_of(full_path: &str) -> &str {
    full_path.rsplit('/').next().unwrap_or(full_path)
}

pub fn is_disabled_color(color: Option<&str>) -> bool {
    color.is_some_and(|c| DISABLED_COLORS.contains(&c))
}

/// A job record as returned by the CI server's `api/json` listing
#[derive(Debug, Clone, Deserialize)]
pub struct RawJob {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "fullName", alias = "fullname")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub jobs: Option<Vec<RawJob>>,
}

impl RawJob {
    /// Normalize this record and its descendants.
    ///
    /// `depth` is 0 for top-level entries. Children below `max_depth` are not
    /// kept, but the folder itself still reports `is_folder`. Records with
    /// neither a name nor a full name are dropped.
    pub fn into_node(
        self,
        parent: Option<&str>,
        depth: usize,
        max_depth: Option<usize>,
    ) -> Option<JobNode> {
        let full_path = match (self.full_name, self.name, parent) {
            (Some(full_name), _, _) => full_name,
            (None, Some(name), Some(parent)) => format!("{}/{}", parent, name),
            (None, Some(name), None) => name,
            (None, None, _) => {
                warn!(
                    "Skipping job record without a name under {}",
                    parent.unwrap_or("<root>")
                );
                return None;
            }
        };

        let is_disabled = is_disabled_color(self.color.as_deref());
        let is_folder = self.jobs.is_some();
        let descend = max_depth.map_or(true, |max| depth < max);

        let children = match self.jobs {
            Some(jobs) if descend => jobs
                .into_iter()
                .filter_map(|job| job.into_node(Some(&full_path), depth + 1, max_depth))
                .collect(),
            _ => Vec::new(),
        };

        Some(JobNode {
            display_name: display_name_of(&full_path).to_string(),
            full_path,
            is_disabled,
            is_folder,
            children,
        })
    }
}
