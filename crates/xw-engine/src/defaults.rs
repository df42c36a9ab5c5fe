//! Per-agent parameter block applied to every agent the engine registers.

/// Defaults applied by the engine to each newly added agent.
///
/// The field set mirrors what ORCA-style backends configure per agent
/// (neighbor search range, planning horizons, body radius, speed cap).  The
/// reference backend only consumes `radius`, `max_speed`, and `time_step`;
/// the neighbor/horizon fields are carried through so a real backend can be
/// slotted in without touching scenario code.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentDefaults {
    /// Neighbor search distance, metres.
    pub neighbor_dist: f32,
    /// Maximum number of neighbors considered for avoidance.
    pub max_neighbors: usize,
    /// Collision-avoidance planning horizon vs. other agents, seconds.
    pub time_horizon: f32,
    /// Collision-avoidance planning horizon vs. static obstacles, seconds.
    pub time_horizon_obst: f32,
    /// Body radius, metres.
    pub radius: f32,
    /// Speed cap, metres/second.
    pub max_speed: f32,
    /// Global clock increment per `step()`, seconds.
    pub time_step: f32,
}

impl Default for AgentDefaults {
    /// Pedestrian-scale defaults: 0.3 m bodies at a slow crossing shuffle
    /// with a 1 s step.
    fn default() -> Self {
        Self {
            neighbor_dist:     10.0,
            max_neighbors:     5,
            time_horizon:      0.1,
            time_horizon_obst: 0.1,
            radius:            0.3,
            max_speed:         0.09,
            time_step:         1.0,
        }
    }
}
