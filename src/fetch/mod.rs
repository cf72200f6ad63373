//! Marker-based pagination over remote list operations
//!
//! This module provides:
//! - A `Page` shape shared by every paginated collaborator call
//! - A lazy `Paginator` that walks pages one at a time
//! - `fetch_all` which drains every page into one ordered list

pub mod paginator;

pub use paginator::{fetch_all, Page, Paginator};
