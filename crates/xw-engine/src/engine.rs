//! The `MovementEngine` trait — the seam between the crossing core and the
//! local collision-avoidance backend.

use xw_core::{AgentId, Vec2};

/// The request/query interface of a continuous-space movement backend.
///
/// Implementations hold circular agents with position, preferred velocity,
/// radius, and max speed, and advance a global clock by a fixed step on every
/// [`step`][MovementEngine::step].  Swap the backend at compile time via the
/// type parameter on `CrossingSim<E>` — the core never looks behind this
/// trait.
///
/// # Identity contract
///
/// `add_agent` returns a stable [`AgentId`] that remains valid (and is never
/// reassigned) for the lifetime of the engine.  Agents are never removed;
/// "despawned" pedestrians are parked off-map at zero max speed by the
/// lifecycle manager and stay registered as inert bodies.
///
/// # Accessor panics
///
/// Position/radius accessors take ids previously returned by `add_agent`;
/// passing a foreign id is a caller bug.  Implementations are free to panic
/// on out-of-range ids (the reference backend indexes `Vec`s directly).
pub trait MovementEngine {
    /// Register a circular agent at `position` with the engine's configured
    /// per-agent defaults.  Returns the agent's stable identity.
    fn add_agent(&mut self, position: Vec2) -> AgentId;

    /// Advance the global clock by one time step and recompute every agent's
    /// position from the preferred velocities written since the last step.
    fn step(&mut self);

    /// Current global simulation time in seconds.
    fn global_time(&self) -> f32;

    /// The fixed clock increment applied by each [`step`][Self::step].
    fn time_step(&self) -> f32;

    /// Number of registered agents (including parked ones).
    fn num_agents(&self) -> usize;

    fn position(&self, agent: AgentId) -> Vec2;

    fn radius(&self, agent: AgentId) -> f32;

    /// Teleport `agent` (used only to park arrived pedestrians off-map).
    fn set_position(&mut self, agent: AgentId, position: Vec2);

    /// Cap `agent`'s speed; 0 freezes it in place.
    fn set_max_speed(&mut self, agent: AgentId, speed: f32);

    /// Write `agent`'s preferred velocity for the next [`step`][Self::step].
    fn set_pref_velocity(&mut self, agent: AgentId, velocity: Vec2);
}
