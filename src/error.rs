use thiserror::Error;

/// Errors raised while talking to a remote source or walking its listings.
///
/// Unrecognized condition, action, or job kinds are not errors; they are
/// dropped from the report with a warning.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("Invalid continuation marker: {0}")]
    InvalidMarker(String),
    #[error("Pagination stalled: source returned marker {0} again")]
    StalledPagination(String),
    #[error("Snapshot parse error: {0}")]
    Snapshot(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuditError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}
