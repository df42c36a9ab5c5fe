//! Fluent builder for constructing a [`CrossingSim`].

use xw_core::SimConfig;
use xw_engine::MovementEngine;
use xw_scenario::Scenario;

use crate::{CrossingSim, SimError, SimResult};

/// Fluent builder for [`CrossingSim<E>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — horizon, seed, time step, trace interval
/// - [`Scenario`] — arrivals, slot tables, thresholds, phases, buffer
/// - `E: MovementEngine` — the movement backend, already configured with the
///   same time step and not yet holding any agents
///
/// # Example
///
/// ```rust,ignore
/// let engine = KinematicEngine::new(AgentDefaults::default());
/// let mut sim = SimBuilder::new(config, scenario, engine).build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<E: MovementEngine> {
    config:   SimConfig,
    scenario: Scenario,
    engine:   E,
}

impl<E: MovementEngine> SimBuilder<E> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, scenario: Scenario, engine: E) -> Self {
        Self { config, scenario, engine }
    }

    /// Validate inputs and return a ready-to-run [`CrossingSim`].
    ///
    /// # Errors
    ///
    /// - [`SimError::TimeStepMismatch`] if the engine's step size differs
    ///   from `config.time_step` — the sim derives its tick windows from the
    ///   config, so a mismatch would drop or duplicate scheduled arrivals.
    /// - [`SimError::Config`] if the engine already holds agents, the time
    ///   step is not positive, or the horizon is not positive.
    pub fn build(self) -> SimResult<CrossingSim<E>> {
        if !(self.config.time_step > 0.0) {
            return Err(SimError::Config(format!(
                "time step must be positive, got {}",
                self.config.time_step
            )));
        }
        if !(self.config.horizon_secs > 0.0) {
            return Err(SimError::Config(format!(
                "horizon must be positive, got {}",
                self.config.horizon_secs
            )));
        }
        if self.engine.time_step() != self.config.time_step {
            return Err(SimError::TimeStepMismatch {
                config: self.config.time_step,
                engine: self.engine.time_step(),
            });
        }
        if self.engine.num_agents() != 0 {
            return Err(SimError::Config(format!(
                "engine must start empty, holds {} agents",
                self.engine.num_agents()
            )));
        }

        Ok(CrossingSim::new(self.config, self.scenario, self.engine))
    }
}
