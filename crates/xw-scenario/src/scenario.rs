//! The assembled crossing configuration handed to `SimBuilder`.

use xw_core::{Side, Vec2};

use crate::{ArrivalSchedule, BufferRanking, PhasePolicy, SlotTable, ThresholdTable};

// ── SideConfig ────────────────────────────────────────────────────────────────

/// Everything specific to one curb: its queue slots, its threshold table,
/// and the far-curb destination its pedestrians head for.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideConfig {
    pub slots:       SlotTable,
    pub thresholds:  ThresholdTable,
    /// Final goal on the far curb, shared by every pedestrian from this side.
    pub destination: Vec2,
}

// ── Scenario ──────────────────────────────────────────────────────────────────

/// The full static configuration of one crossing experiment.
///
/// Fixed two-origin / one-buffer geometry: two [`SideConfig`]s, one shared
/// median [`BufferRanking`], one [`PhasePolicy`], one arrival schedule.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub arrivals: ArrivalSchedule,
    pub left:     SideConfig,
    pub right:    SideConfig,
    pub buffer:   BufferRanking,
    pub phases:   PhasePolicy,

    /// Off-map coordinate where arrived pedestrians are parked.  Each parked
    /// agent is offset by `park_spacing` along x so inert bodies never stack.
    pub park:         Vec2,
    pub park_spacing: f32,
}

impl Scenario {
    /// Per-side configuration.
    #[inline]
    pub fn side(&self, side: Side) -> &SideConfig {
        match side {
            Side::Left  => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Park coordinate for the n-th arrived pedestrian.
    #[inline]
    pub fn park_position(&self, n: usize) -> Vec2 {
        Vec2::new(self.park.x + n as f32 * self.park_spacing, self.park.y)
    }
}
