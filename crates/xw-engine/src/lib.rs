//! `xw-engine` — the movement engine's surface, as consumed by the core.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`engine`]    | `MovementEngine` — the trait the core drives                  |
//! | [`defaults`]  | `AgentDefaults` — per-agent parameter block                   |
//! | [`kinematic`] | `KinematicEngine` — collision-unaware reference backend       |
//! | [`error`]     | `EngineError`, `EngineResult<T>`                              |
//!
//! # Position-update model
//!
//! The crossing core treats the movement engine as an opaque collaborator:
//! it registers circular agents, writes one preferred velocity per live agent
//! per tick, calls `step()`, and reads back positions.  How the engine turns
//! preferred velocities into collision-aware actual velocities is entirely
//! its own business — production runs bind an ORCA-family backend behind
//! [`MovementEngine`]; tests and demos use [`KinematicEngine`], which simply
//! integrates the preferred velocity clamped to the agent's max speed.

pub mod defaults;
pub mod engine;
pub mod error;
pub mod kinematic;

#[cfg(test)]
mod tests;

pub use defaults::AgentDefaults;
pub use engine::MovementEngine;
pub use error::{EngineError, EngineResult};
pub use kinematic::KinematicEngine;
