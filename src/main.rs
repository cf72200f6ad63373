mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{
    apply_connection_overrides, handle_alb_rules, handle_jobs, handle_show, Cli, Commands,
};
use infra_audit::config::AuditConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments first to get debug flag
    let cli = Cli::parse();

    // Report output owns stdout; logs go to stderr
    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config =
        AuditConfig::load(cli.config.as_deref())?.with_env(|key| std::env::var(key).ok());
    let config =
        apply_connection_overrides(config, cli.profile.as_deref(), cli.endpoint.as_deref());

    match cli.command {
        Commands::AlbRules(args) => handle_alb_rules(config, &args).await?,
        Commands::Jobs(args) => handle_jobs(config, &args).await?,
        Commands::Show => handle_show(&config),
    }

    Ok(())
}
