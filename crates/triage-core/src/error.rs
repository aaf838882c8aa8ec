use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("failed to load rule catalog from {path}: {reason}")]
    CatalogLoad { path: PathBuf, reason: String },

    #[error("invalid rule catalog: {0}")]
    CatalogInvalid(String),

    #[error("invalid symptom record: {0}")]
    InvalidRecord(String),

    #[error("unknown rule '{0}'")]
    UnknownRule(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
