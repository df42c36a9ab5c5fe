use thiserror::Error;
use xw_policy::PolicyError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("engine time step {engine} does not match config time step {config}")]
    TimeStepMismatch { config: f32, engine: f32 },

    #[error(transparent)]
    Policy(#[from] PolicyError),
}

pub type SimResult<T> = Result<T, SimError>;
