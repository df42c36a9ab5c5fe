use thiserror::Error;

use xw_agents::StoreError;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("record store error: {0}")]
    Store(#[from] StoreError),
}

pub type PolicyResult<T> = Result<T, PolicyError>;
