use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine configuration error: {0}")]
    Config(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

impl crate::AgentDefaults {
    /// Reject parameter blocks no backend could run with.
    pub fn validate(&self) -> EngineResult<()> {
        if !(self.time_step > 0.0) {
            return Err(EngineError::Config(format!(
                "time_step must be positive, got {}",
                self.time_step
            )));
        }
        if !(self.radius > 0.0) {
            return Err(EngineError::Config(format!(
                "radius must be positive, got {}",
                self.radius
            )));
        }
        if self.max_speed < 0.0 {
            return Err(EngineError::Config(format!(
                "max_speed must be non-negative, got {}",
                self.max_speed
            )));
        }
        Ok(())
    }
}
