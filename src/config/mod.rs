pub mod elb_config;
pub mod jobs_config;

use crate::config::elb_config::ElbConfig;
use crate::config::jobs_config::JobsConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const PROFILE_ENV: &str = "INFRA_AUDIT_PROFILE";
pub const ENDPOINT_ENV: &str = "INFRA_AUDIT_ENDPOINT";

/// Main configuration structure matching config.yaml format
#[derive(Debug, Deserialize, Clone)]
pub struct AuditConfig {
    /// Credential profile handed to the API client
    #[serde(default = "default_profile")]
    pub profile: String,
    /// Remote API URL
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub elb: ElbConfig,
    #[serde(default)]
    pub jobs: JobsConfig,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            endpoint: None,
            elb: ElbConfig::default(),
            jobs: JobsConfig::default(),
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

impl AuditConfig {
    /// `$CONFIG_DIR/infra-audit/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("infra-audit").join("config.yaml"))
    }

    /// Load configuration from a YAML file.
    ///
    /// Relative snapshot paths are resolved against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: AuditConfig =
            serde_yaml::from_str(&content).with_context(|| "Failed to parse YAML config file")?;

        if let Some(base) = path.parent() {
            config.elb.snapshot = config.elb.snapshot.map(|p| base.join(p));
            config.jobs.snapshot = config.jobs.snapshot.map(|p| base.join(p));
        }

        if config.elb.page_size == 0 {
            anyhow::bail!("elb.page_size must be at least 1");
        }

        Ok(config)
    }

    /// Load an explicitly requested file, or the default file when it exists,
    /// or fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path().filter(|path| path.exists()) {
                Some(path) => {
                    tracing::debug!("Using default config file: {}", path.display());
                    Self::from_file(&path)
                }
                None => {
                    tracing::debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Apply `INFRA_AUDIT_PROFILE` / `INFRA_AUDIT_ENDPOINT` style overrides
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(profile) = lookup(PROFILE_ENV).filter(|v| !v.is_empty()) {
            self.profile = profile;
        }
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.is_empty()) {
            self.endpoint = Some(endpoint);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_default_config() {
        let config = AuditConfig::default();
        assert_eq!(config.profile, "default");
        assert!(config.endpoint.is_none());
        assert_eq!(config.elb.page_size, 100);
        assert!(config.jobs.max_depth.is_none());
    }

    #[test]
    fn test_config_from_file_resolves_snapshots() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            r#"
profile: audit
endpoint: http://ci.internal:8080
elb:
  snapshot: snapshots/elb.json
  page_size: 20
jobs:
  snapshot: /abs/jobs.json
  max_depth: 3
"#,
        )
        .unwrap();

        let config = AuditConfig::from_file(&path).unwrap();
        assert_eq!(config.profile, "audit");
        assert_eq!(config.endpoint.as_deref(), Some("http://ci.internal:8080"));
        assert_eq!(
            config.elb.snapshot,
            Some(dir.path().join("snapshots/elb.json"))
        );
        assert_eq!(config.elb.page_size, 20);
        assert_eq!(config.jobs.snapshot, Some(PathBuf::from("/abs/jobs.json")));
        assert_eq!(config.jobs.max_depth, Some(3));
    }

    #[test]
    fn test_invalid_yaml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "invalid yaml content [").unwrap();

        let result = AuditConfig::from_file(temp_file.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("parse"));
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "elb:\n  page_size: 0\n").unwrap();

        let err = AuditConfig::from_file(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("page_size"));
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let result = AuditConfig::load(Some(Path::new("/nonexistent/config.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut env = HashMap::new();
        env.insert(PROFILE_ENV, "prod".to_string());
        env.insert(ENDPOINT_ENV, String::new());

        let config = AuditConfig::default().with_env(|key| env.get(key).cloned());
        assert_eq!(config.profile, "prod");
        assert!(config.endpoint.is_none());
    }
}
