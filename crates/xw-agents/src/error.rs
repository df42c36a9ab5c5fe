use thiserror::Error;

use xw_core::AgentId;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record for agent {0} already exists")]
    DuplicateAgent(AgentId),
}

pub type StoreResult<T> = Result<T, StoreError>;
