//! One pedestrian's crossing state and its lifecycle state machine.

use xw_core::{AgentId, Side, Vec2};

// ── Stage ─────────────────────────────────────────────────────────────────────

/// Lifecycle stage of one pedestrian.
///
/// Strictly ordered:
///
/// ```text
/// WaitingAtOrigin → CrossingToBuffer → WaitingAtBuffer
///                 → CrossingToDestination → Arrived
/// ```
///
/// The decision engine drives Waiting → Crossing (threshold/phase gated, or
/// forced by the always-open override); the lifecycle manager drives
/// Crossing → Waiting/Arrived (proximity gated).  No stage is ever skipped
/// and `Arrived` is terminal.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    WaitingAtOrigin,
    CrossingToBuffer,
    WaitingAtBuffer,
    CrossingToDestination,
    Arrived,
}

impl Stage {
    /// The next stage in lifecycle order.  `Arrived` has no successor.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::WaitingAtOrigin       => Some(Stage::CrossingToBuffer),
            Stage::CrossingToBuffer      => Some(Stage::WaitingAtBuffer),
            Stage::WaitingAtBuffer       => Some(Stage::CrossingToDestination),
            Stage::CrossingToDestination => Some(Stage::Arrived),
            Stage::Arrived               => None,
        }
    }

    /// `true` for either waiting stage (the decision engine's domain).
    #[inline]
    pub fn is_waiting(self) -> bool {
        matches!(self, Stage::WaitingAtOrigin | Stage::WaitingAtBuffer)
    }

    /// `true` for either crossing stage (the lifecycle manager's domain).
    #[inline]
    pub fn is_crossing(self) -> bool {
        matches!(self, Stage::CrossingToBuffer | Stage::CrossingToDestination)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::WaitingAtOrigin       => "waiting-at-origin",
            Stage::CrossingToBuffer      => "crossing-to-buffer",
            Stage::WaitingAtBuffer       => "waiting-at-buffer",
            Stage::CrossingToDestination => "crossing-to-destination",
            Stage::Arrived               => "arrived",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── PedestrianRecord ──────────────────────────────────────────────────────────

/// All per-pedestrian crossing state, one record per spawned agent.
///
/// The movement-engine identity is assigned at spawn and immutable; every
/// coordinate except `goal` is precomputed at spawn.  `goal` is the only
/// coordinate the engine steers toward, and the only one the decision engine
/// and congestion resolver rewrite.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PedestrianRecord {
    /// Stable movement-engine identity.
    pub agent: AgentId,
    /// Origin curb.
    pub side: Side,
    /// Impatience level, 0–10.
    pub hurry: u8,
    /// Simulated time of the spawn.
    pub arrival_time: f32,

    /// Queueing slot on the origin curb — spawn position and initial goal.
    pub slot: Vec2,
    /// Assigned median-refuge slot (rewritable by the congestion resolver).
    pub buffer_goal: Vec2,
    /// Final goal on the far curb.
    pub destination: Vec2,
    /// Current steering goal.
    pub goal: Vec2,

    /// Current lifecycle stage.
    pub stage: Stage,
    /// Simulated time the current stage was entered.  Reset on every
    /// transition; elapsed wait is measured from it.
    pub stage_entered: f32,
}

impl PedestrianRecord {
    /// A freshly spawned record waiting at its origin slot.
    pub fn new(
        agent: AgentId,
        side: Side,
        hurry: u8,
        now: f32,
        slot: Vec2,
        buffer_goal: Vec2,
        destination: Vec2,
    ) -> Self {
        Self {
            agent,
            side,
            hurry,
            arrival_time: now,
            slot,
            buffer_goal,
            destination,
            goal: slot,
            stage: Stage::WaitingAtOrigin,
            stage_entered: now,
        }
    }

    /// Advance to the next lifecycle stage at time `now`.
    ///
    /// Callers decide *when*; this only enforces *order*.
    ///
    /// # Panics
    /// Debug-asserts that a next stage exists (`Arrived` is terminal).
    pub fn advance_stage(&mut self, now: f32) {
        debug_assert!(self.stage.next().is_some(), "advance past Arrived");
        if let Some(next) = self.stage.next() {
            self.stage = next;
            self.stage_entered = now;
        }
    }

    /// Elapsed time in the current stage.
    #[inline]
    pub fn stage_elapsed(&self, now: f32) -> f32 {
        now - self.stage_entered
    }

    /// `true` once the pedestrian has reached its final destination and been
    /// frozen.
    #[inline]
    pub fn is_arrived(&self) -> bool {
        self.stage == Stage::Arrived
    }
}
