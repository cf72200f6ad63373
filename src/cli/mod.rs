pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
pub use commands::{apply_connection_overrides, handle_alb_rules, handle_jobs, handle_show};
