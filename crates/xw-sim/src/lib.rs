//! `xw-sim` — tick loop orchestrator for the rust_xwalk framework.
//!
//! # Tick pipeline
//!
//! ```text
//! while !config.time_up(engine.global_time()):
//!   ① Spawn     — due arrivals become engine agents + records
//!                 (deferred arrivals retried first).
//!   ② Decide    — gap-acceptance releases, forced-release override.
//!   ③ Repair    — buffer congestion resolver rewrites contested goals.
//!   ④ Steer     — preferred velocity toward each record's goal
//!                 (parallel with the `parallel` feature).
//!   ⑤ Trace     — observer snapshot every `trace_interval_ticks`.
//!   ⑥ Step      — one movement-engine integration step.
//!   ⑦ Complete  — proximity arrivals, counter decrements, parking.
//! ```
//!
//! Every pass runs to completion before the next starts, and each pass
//! visits records in store insertion order, so a run is a pure function of
//! the scenario and the seed.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                              |
//! |------------|-----------------------------------------------------|
//! | `parallel` | Runs the steering pass on Rayon's thread pool.      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use xw_core::SimConfig;
//! use xw_engine::{AgentDefaults, KinematicEngine};
//! use xw_sim::{NoopObserver, SimBuilder};
//!
//! let engine = KinematicEngine::new(AgentDefaults::default());
//! let mut sim = SimBuilder::new(SimConfig::default(), scenario, engine).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickStats};
pub use sim::CrossingSim;
