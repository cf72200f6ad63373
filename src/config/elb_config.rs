use crate::elb::LoadBalancerFilter;
use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct ElbConfig {
    /// Describe-output snapshot served in place of the live API
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_load_balancer_types")]
    pub load_balancer_types: Vec<String>,
    /// Regex on load balancer names
    #[serde(default)]
    pub name_filter: Option<String>,
}

impl Default for ElbConfig {
    fn default() -> Self {
        Self {
            snapshot: None,
            page_size: default_page_size(),
            load_balancer_types: default_load_balancer_types(),
            name_filter: None,
        }
    }
}

impl ElbConfig {
    pub fn filter(&self) -> Result<LoadBalancerFilter> {
        let name = match &self.name_filter {
            Some(pattern) => Some(
                Regex::new(pattern)
                    .with_context(|| format!("Failed to compile name filter: {}", pattern))?,
            ),
            None => None,
        };

        Ok(LoadBalancerFilter {
            types: self.load_balancer_types.clone(),
            name,
        })
    }
}

fn default_page_size() -> usize {
    100
}

fn default_load_balancer_types() -> Vec<String> {
    vec!["application".to_string()]
}
