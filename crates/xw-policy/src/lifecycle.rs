//! Stage-completion detection and final despawn.
//!
//! Runs after the engine step, in store insertion order.  A crossing record
//! completes its stage when it is within its own body radius of its goal
//! (squared-distance comparison, no square roots):
//!
//! - `CrossingToBuffer` → `WaitingAtBuffer`: the origin-segment counter
//!   drops and the stage clock resets — buffer waiting time starts now.
//! - `CrossingToDestination` → `Arrived`: requires the current goal to
//!   *exactly* equal the precomputed destination, so a buffer slot that
//!   merely sits near the far curb can never trigger a false arrival.  The
//!   far-segment counter drops, and the agent is parked off-map at zero max
//!   speed — its engine identity stays registered but inert.

use xw_agents::{RecordStore, Stage, ViolationCounters};
use xw_engine::MovementEngine;
use xw_scenario::Scenario;

/// Per-tick completion tallies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LifecycleOutcome {
    /// Records that reached the median this tick.
    pub reached_buffer: usize,
    /// Records that reached their destination and were parked this tick.
    pub arrived: usize,
}

/// Detect completions for one tick at time `now`.
pub fn advance_completions<E: MovementEngine>(
    now:      f32,
    scenario: &Scenario,
    counters: &mut ViolationCounters,
    store:    &mut RecordStore,
    engine:   &mut E,
) -> LifecycleOutcome {
    let mut outcome = LifecycleOutcome::default();
    // Park offsets continue past previously arrived pedestrians.
    let mut parked = store.iter().filter(|r| r.is_arrived()).count();

    for record in store.iter_mut() {
        if !record.stage.is_crossing() {
            continue;
        }

        let position = engine.position(record.agent);
        let radius = engine.radius(record.agent);
        if position.dist_sq(record.goal) > radius * radius {
            continue;
        }

        match record.stage {
            Stage::CrossingToBuffer => {
                record.advance_stage(now);
                counters.decrement(record.side.origin_segment());
                outcome.reached_buffer += 1;
            }
            Stage::CrossingToDestination => {
                if record.goal != record.destination {
                    continue;
                }
                record.advance_stage(now);
                counters.decrement(record.side.far_segment());

                let park = scenario.park_position(parked);
                parked += 1;
                engine.set_position(record.agent, park);
                engine.set_max_speed(record.agent, 0.0);
                record.goal = park;
                outcome.arrived += 1;
            }
            _ => unreachable!("non-crossing stage filtered above"),
        }
    }

    outcome
}
