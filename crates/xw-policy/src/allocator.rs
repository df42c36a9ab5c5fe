//! Queue-slot selection for newly arriving pedestrians.
//!
//! A slot is *occupied* while any live same-side record holds its coordinate
//! as current goal.  Selection prefers the primary pool and falls back to
//! the secondary pool only once every primary slot is occupied; within the
//! active pool, candidates are drawn uniformly at random and occupied ones
//! rejected.
//!
//! Draws are bounded: after [`MAX_DRAWS`] rejections — or immediately, when
//! the active pool has no free slot at all — allocation fails and the caller
//! defers the arrival to the next tick.  (An unbounded rejection loop would
//! turn a crowded curb into a hang.)

use xw_agents::RecordStore;
use xw_core::{Side, SimRng, Vec2};
use xw_scenario::SlotTable;

/// Random draws attempted before giving up for this tick.
pub const MAX_DRAWS: usize = 64;

/// Pick an unoccupied slot for a `side` arrival, or `None` to defer.
///
/// The returned coordinate is both the spawn position and the initial
/// (stationary) goal of the new pedestrian.
pub fn allocate_slot(
    table: &SlotTable,
    side:  Side,
    store: &RecordStore,
    rng:   &mut SimRng,
) -> Option<Vec2> {
    let primary_full = table
        .primary()
        .iter()
        .all(|&slot| store.goal_occupied(side, slot));

    let pool = if primary_full { table.secondary() } else { table.primary() };
    if pool.is_empty() || pool.iter().all(|&slot| store.goal_occupied(side, slot)) {
        return None;
    }

    for _ in 0..MAX_DRAWS {
        let candidate = pool[rng.gen_range(0..pool.len())];
        if !store.goal_occupied(side, candidate) {
            return Some(candidate);
        }
    }
    None
}
