//! Listener rule report
//!
//! Walks load balancers → listeners → rules in API order and writes one
//! section per listener. Each section is flushed before the next one is
//! fetched so that a failing call leaves everything before it on screen.

use crate::elb::client::{ElbClient, TargetGroupLookup};
use crate::elb::interpreter::{describe_actions, describe_conditions};
use crate::elb::model::{Listener, LoadBalancer, RuleRecord};
use crate::fetch::{fetch_all, Paginator};
use anyhow::{Context, Result};
use regex::Regex;
use std::io::Write;
use tracing::{debug, info};

const SECTION_WIDTH: usize = 40;
const RULE_WIDTH: usize = 30;

/// Which load balancers take part in the report
#[derive(Debug, Clone, Default)]
pub struct LoadBalancerFilter {
    /// Accepted load balancer types; empty accepts every type
    pub types: Vec<String>,
    pub name: Option<Regex>,
}

impl LoadBalancerFilter {
    pub fn application_only() -> Self {
        Self {
            types: vec!["application".to_string()],
            name: None,
        }
    }

    pub fn matches(&self, load_balancer: &LoadBalancer) -> bool {
        let type_ok = self.types.is_empty()
            || self
                .types
                .iter()
                .any(|t| t.eq_ignore_ascii_case(&load_balancer.kind));
        let name_ok = self
            .name
            .as_ref()
            .map_or(true, |re| re.is_match(&load_balancer.name));
        type_ok && name_ok
    }
}

/// Counts of what a report run covered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub load_balancers: usize,
    pub listeners: usize,
    pub rules: usize,
}

pub fn listener_header(load_balancer: &LoadBalancer, listener: &Listener) -> String {
    let rule = "=".repeat(SECTION_WIDTH);
    format!(
        "{rule}\nALB Name: {}\nListener ARN: {}\nListener Port: {}\n{rule}",
        load_balancer.name,
        listener.arn,
        listener.port_info(),
        rule = rule
    )
}

pub async fn rule_block<L>(rule: &RuleRecord, lookup: &L) -> Result<String>
where
    L: TargetGroupLookup + ?Sized,
{
    let conditions = describe_conditions(&rule.conditions);
    let actions = describe_actions(&rule.actions, lookup)
        .await
        .with_context(|| format!("Failed to describe actions of rule {}", rule.arn))?;

    Ok(format!(
        "Rule ARN: {}\nPriority: {}\nConditions (IF) | {}\nActions (THEN) | {}\n{}",
        rule.arn,
        rule.priority,
        conditions,
        actions,
        "=".repeat(RULE_WIDTH)
    ))
}

pub struct ElbReport<'a, C: ?Sized> {
    client: &'a C,
    filter: LoadBalancerFilter,
}

impl<'a, C> ElbReport<'a, C>
where
    C: ElbClient + ?Sized,
{
    pub fn new(client: &'a C, filter: LoadBalancerFilter) -> Self {
        Self { client, filter }
    }

    /// Write the full report to `out`, one load balancer page at a time
    pub async fn write_to<W: Write>(&self, out: &mut W) -> Result<ReportSummary> {
        let mut summary = ReportSummary::default();

        let mut pages = Paginator::new(|marker| self.client.list_load_balancers(marker));
        while let Some(load_balancers) = pages
            .next_page()
            .await
            .context("Failed to list load balancers")?
        {
            for load_balancer in &load_balancers {
                if !self.filter.matches(load_balancer) {
                    debug!(
                        "Skipping load balancer {} ({})",
                        load_balancer.name, load_balancer.kind
                    );
                    continue;
                }
                summary.load_balancers += 1;
                self.write_load_balancer(load_balancer, out, &mut summary).await?;
            }
        }

        info!(
            "Reported {} rules across {} listeners on {} load balancers",
            summary.rules, summary.listeners, summary.load_balancers
        );
        Ok(summary)
    }

    async fn write_load_balancer<W: Write>(
        &self,
        load_balancer: &LoadBalancer,
        out: &mut W,
        summary: &mut ReportSummary,
    ) -> Result<()> {
        let listeners = self
            .client
            .list_listeners(&load_balancer.arn)
            .await
            .with_context(|| format!("Failed to list listeners of {}", load_balancer.name))?;

        for listener in &listeners {
            summary.listeners += 1;
            writeln!(out, "{}", listener_header(load_balancer, listener))?;

            let rules = fetch_all(|marker| self.client.list_rules(&listener.arn, marker))
                .await
                .with_context(|| format!("Failed to list rules of listener {}", listener.arn))?;
            debug!("Listener {} has {} rules", listener.arn, rules.len());

            for rule in &rules {
                writeln!(out, "{}", rule_block(rule, self.client).await?)?;
                summary.rules += 1;
            }
            out.flush()?;
        }
        Ok(())
    }
}
