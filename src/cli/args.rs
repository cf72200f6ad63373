use clap::{Args, Parser, Subcommand};
use infra_audit::jobs::ColorMode;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config YAML file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging for internal details
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Credential profile; overrides INFRA_AUDIT_PROFILE and the config file
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Service endpoint; overrides INFRA_AUDIT_ENDPOINT and the config file
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the listener rules of every application load balancer
    AlbRules(AlbRulesArgs),
    /// Print the CI job hierarchy as a tree
    Jobs(JobsArgs),
    /// Show the resolved configuration
    Show,
}

#[derive(Args, Debug, Default)]
pub struct AlbRulesArgs {
    /// Describe-output snapshot to audit
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Rules requested per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Include network and gateway load balancers
    #[arg(long)]
    pub all_types: bool,

    /// Only load balancers whose name matches this regex
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct JobsArgs {
    /// Job listing snapshot to audit
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Folder levels below the top level to list
    #[arg(long)]
    pub max_depth: Option<usize>,

    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,

    /// Job names to highlight (repeatable); replaces the configured list
    #[arg(long)]
    pub highlight: Vec<String>,
}
