use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Target not found: {0}")]
    TargetNotFound(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<anyhow::Error> for MonitorError {
    fn from(error: anyhow::Error) -> Self {
        MonitorError::Unexpected(error.to_string())
    }
}

pub type MonitorResult<T> = std::result::Result<T, MonitorError>;
