//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert into `XwError`
//! via `From` impls or wrap it as one variant.  Both patterns are acceptable;
//! prefer whichever keeps error sites clean.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `xw-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum XwError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `xw-*` crates.
pub type XwResult<T> = Result<T, XwError>;
