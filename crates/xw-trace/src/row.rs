//! Plain data row types written by trace backends.

/// One pedestrian's position at a trace snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionRow {
    pub time:     f32,
    pub agent_id: u32,
    pub x:        f32,
    pub y:        f32,
}

/// Crossing-state summary at a trace snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub time: f32,
    /// Not-yet-arrived pedestrians at snapshot time.
    pub live: u64,
    /// Concurrent violations on the left roadway segment.
    pub left_violations: u32,
    /// Concurrent violations on the right roadway segment.
    pub right_violations: u32,
}
