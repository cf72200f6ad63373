pub mod config;
pub mod elb;
pub mod error;
pub mod fetch;
pub mod jobs;

// Public API
pub use config::AuditConfig;
pub use error::AuditError;
pub use fetch::{fetch_all, Page, Paginator};
