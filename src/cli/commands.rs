use crate::cli::args::{AlbRulesArgs, JobsArgs};
use anyhow::{Context, Result};
use infra_audit::config::AuditConfig;
use infra_audit::elb::{ElbReport, SnapshotElbClient};
use infra_audit::jobs::{JobTreeReport, SnapshotJobSource, TreeWalker};
use std::io;
use tracing::info;

/// Fold `alb-rules` flags into the loaded configuration
pub fn apply_alb_overrides(mut config: AuditConfig, args: &AlbRulesArgs) -> Result<AuditConfig> {
    if let Some(snapshot) = &args.snapshot {
        config.elb.snapshot = Some(snapshot.clone());
    }
    if let Some(page_size) = args.page_size {
        if page_size == 0 {
            anyhow::bail!("--page-size must be at least 1");
        }
        config.elb.page_size = page_size;
    }
    if args.all_types {
        config.elb.load_balancer_types.clear();
    }
    if let Some(name) = &args.name {
        config.elb.name_filter = Some(name.clone());
    }
    Ok(config)
}

/// Apply the global `--profile` and `--endpoint` flags, which win over the
/// environment and the config file
pub fn apply_connection_overrides(
    mut config: AuditConfig,
    profile: Option<&str>,
    endpoint: Option<&str>,
) -> AuditConfig {
    if let Some(profile) = profile {
        config.profile = profile.to_string();
    }
    if let Some(endpoint) = endpoint {
        config.endpoint = Some(endpoint.to_string());
    }
    config
}

/// Fold `jobs` flags into the loaded configuration
pub fn apply_jobs_overrides(mut config: AuditConfig, args: &JobsArgs) -> AuditConfig {
    if let Some(snapshot) = &args.snapshot {
        config.jobs.snapshot = Some(snapshot.clone());
    }
    if args.max_depth.is_some() {
        config.jobs.max_depth = args.max_depth;
    }
    if let Some(color) = args.color {
        config.jobs.color = color;
    }
    if !args.highlight.is_empty() {
        config.jobs.highlight = args.highlight.clone();
    }
    config
}

/// Handle alb-rules command
pub async fn handle_alb_rules(config: AuditConfig, args: &AlbRulesArgs) -> Result<()> {
    let config = apply_alb_overrides(config, args)?;
    let snapshot = config
        .elb
        .snapshot
        .as_deref()
        .context("No load balancer snapshot configured (set elb.snapshot or pass --snapshot)")?;
    let filter = config.elb.filter()?;

    info!(
        "Auditing load balancer rules with profile '{}' from {}",
        config.profile,
        snapshot.display()
    );

    let client = SnapshotElbClient::load(snapshot, config.elb.page_size)
        .await
        .with_context(|| format!("Failed to load snapshot: {}", snapshot.display()))?;

    let mut out = io::stdout().lock();
    ElbReport::new(&client, filter).write_to(&mut out).await?;
    Ok(())
}

/// Handle jobs command
pub async fn handle_jobs(config: AuditConfig, args: &JobsArgs) -> Result<()> {
    let config = apply_jobs_overrides(config, args);
    let snapshot = config
        .jobs
        .snapshot
        .as_deref()
        .context("No job snapshot configured (set jobs.snapshot or pass --snapshot)")?;

    info!(
        "Auditing jobs of {} from {}",
        config.endpoint.as_deref().unwrap_or("<unset endpoint>"),
        snapshot.display()
    );

    let source = SnapshotJobSource::load(snapshot)
        .await
        .with_context(|| format!("Failed to load snapshot: {}", snapshot.display()))?;

    let walker = TreeWalker::new(config.jobs.highlight.clone());
    let report = JobTreeReport::new(&source, walker, config.jobs.max_depth);

    let colored = config.jobs.color.enabled();
    let mut out = io::stdout().lock();
    report.write_to(&mut out, colored).await?;
    Ok(())
}

/// Handle show command
pub fn handle_show(config: &AuditConfig) {
    let display_path = |path: &Option<std::path::PathBuf>| {
        path.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<unset>".to_string())
    };

    println!("profile: {}", config.profile);
    println!(
        "endpoint: {}",
        config.endpoint.as_deref().unwrap_or("<unset>")
    );
    println!("\nLoad balancer config:");
    println!("  snapshot: {}", display_path(&config.elb.snapshot));
    println!("  page_size: {}", config.elb.page_size);
    println!("  types: {:?}", config.elb.load_balancer_types);
    println!(
        "  name_filter: {}",
        config.elb.name_filter.as_deref().unwrap_or("<none>")
    );
    println!("\nJobs config:");
    println!("  snapshot: {}", display_path(&config.jobs.snapshot));
    match config.jobs.max_depth {
        Some(depth) => println!("  max_depth: {}", depth),
        None => println!("  max_depth: unlimited"),
    }
    println!("  highlight: {:?}", config.jobs.highlight);
    println!("  color: {:?}", config.jobs.color);
}
