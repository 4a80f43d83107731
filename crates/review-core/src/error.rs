use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("not initialized: run 'review init'")]
    NotInitialized,

    #[error("proposal not found: {0}")]
    ProposalNotFound(String),

    #[error("invalid proposal id '{0}': must be alphanumeric with hyphens or underscores")]
    InvalidProposalId(String),

    #[error("no viewer identity: pass --user or set the identity header")]
    MissingIdentity,

    #[error("record carries no rating, comment, or delete action")]
    EmptyRecord,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReviewError>;
