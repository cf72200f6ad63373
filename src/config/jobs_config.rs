use crate::jobs::tree::DEFAULT_HIGHLIGHTS;
use crate::jobs::ColorMode;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct JobsConfig {
    /// `api/json` job listing served in place of the live server
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
    /// Folder levels below the top level to list; unlimited when absent
    #[serde(default)]
    pub max_depth: Option<usize>,
    #[serde(default = "default_highlight")]
    pub highlight: Vec<String>,
    #[serde(default)]
    pub color: ColorMode,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            snapshot: None,
            max_depth: None,
            highlight: default_highlight(),
            color: ColorMode::default(),
        }
    }
}

fn default_highlight() -> Vec<String> {
    DEFAULT_HIGHLIGHTS.iter().map(|name| name.to_string()).collect()
}
