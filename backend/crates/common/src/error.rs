use thiserror::Error;

#[derive(Debug, Error)]
pub enum SprintcovError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type SprintcovResult<T> = Result<T, SprintcovError>;
