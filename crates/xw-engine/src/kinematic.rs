//! Collision-unaware reference backend.
//!
//! Integrates each agent's preferred velocity, clamped to its max speed, by
//! one time step.  Agents pass straight through each other — local avoidance
//! is the production backend's concern, and nothing in the crossing core
//! depends on it.  What the core *does* depend on (stable ids, fixed-step
//! clock, per-agent radius/speed caps) is all here, which makes this backend
//! sufficient for every test and demo in the workspace.

use xw_core::{AgentId, Vec2};

use crate::{AgentDefaults, MovementEngine};

/// SoA storage + fixed-step integrator implementing [`MovementEngine`].
///
/// Every `Vec` field has one element per registered agent; the `AgentId`
/// value is the index into all of them.
pub struct KinematicEngine {
    defaults: AgentDefaults,
    time:     f32,

    positions:  Vec<Vec2>,
    pref_vels:  Vec<Vec2>,
    radii:      Vec<f32>,
    max_speeds: Vec<f32>,
}

impl KinematicEngine {
    pub fn new(defaults: AgentDefaults) -> Self {
        Self {
            defaults,
            time:       0.0,
            positions:  Vec::new(),
            pref_vels:  Vec::new(),
            radii:      Vec::new(),
            max_speeds: Vec::new(),
        }
    }

    /// The defaults applied to newly added agents.
    pub fn defaults(&self) -> &AgentDefaults {
        &self.defaults
    }
}

impl MovementEngine for KinematicEngine {
    fn add_agent(&mut self, position: Vec2) -> AgentId {
        let id = AgentId(self.positions.len() as u32);
        self.positions.push(position);
        self.pref_vels.push(Vec2::ZERO);
        self.radii.push(self.defaults.radius);
        self.max_speeds.push(self.defaults.max_speed);
        id
    }

    fn step(&mut self) {
        let dt = self.defaults.time_step;
        for i in 0..self.positions.len() {
            let pref = self.pref_vels[i];
            let cap = self.max_speeds[i];
            // Clamp the preferred speed to the agent's cap, keep direction.
            let speed = pref.length();
            let vel = if speed > cap && speed > 0.0 {
                pref * (cap / speed)
            } else {
                pref
            };
            self.positions[i] = self.positions[i] + vel * dt;
        }
        self.time += dt;
    }

    #[inline]
    fn global_time(&self) -> f32 {
        self.time
    }

    #[inline]
    fn time_step(&self) -> f32 {
        self.defaults.time_step
    }

    #[inline]
    fn num_agents(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    fn position(&self, agent: AgentId) -> Vec2 {
        self.positions[agent.index()]
    }

    #[inline]
    fn radius(&self, agent: AgentId) -> f32 {
        self.radii[agent.index()]
    }

    fn set_position(&mut self, agent: AgentId, position: Vec2) {
        self.positions[agent.index()] = position;
    }

    fn set_max_speed(&mut self, agent: AgentId, speed: f32) {
        self.max_speeds[agent.index()] = speed;
    }

    fn set_pref_velocity(&mut self, agent: AgentId, velocity: Vec2) {
        self.pref_vels[agent.index()] = velocity;
    }
}
