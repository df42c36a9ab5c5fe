use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario parse error: {0}")]
    Parse(String),

    #[error("scenario validation error: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;
