use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown task id: {0}")]
    TaskNotFound(u32),

    #[error("Data file not found: {0}")]
    DataNotFound(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Load error: {0}")]
    Load(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Resource limit exceeded: {0}")]
    ResourceExceeded(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Internal(err.to_string())
    }
}
