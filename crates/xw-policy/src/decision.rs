//! The gap-acceptance decision pass.
//!
//! One sequential sweep per tick over all waiting records, in store
//! insertion order.  Counter mutations made by an earlier record in the
//! sweep are visible to later ones — a release can tip the next waiter over
//! its own threshold within the same tick.
//!
//! # Release rule
//!
//! A waiter is *considered* only while a phase window for its side is open
//! (or unconditionally, past the policy's always-open cutoff).  Its elapsed
//! wait — stage time minus the window's correction, clamped at zero — picks
//! a threshold bracket; the relevant violation count is the combined total
//! for origin-stage decisions and the far-segment count for buffer-stage
//! decisions.  Release fires when count ≥ threshold.
//!
//! On release the goal advances one stage (buffer slot, then destination),
//! the segment being entered is incremented, and the stage clock resets.

use xw_agents::{PedestrianRecord, RecordStore, Stage, ViolationCounters};
use xw_scenario::Scenario;

/// Per-tick decision tallies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DecisionOutcome {
    /// Threshold-gated releases.
    pub released: usize,
    /// Unconditional releases past the always-open cutoff.
    pub forced: usize,
}

/// Run the decision pass for one tick at time `now`.
pub fn run_decisions(
    now:      f32,
    scenario: &Scenario,
    counters: &mut ViolationCounters,
    store:    &mut RecordStore,
) -> DecisionOutcome {
    let mut outcome = DecisionOutcome::default();
    let always_open = scenario.phases.always_open(now);

    for record in store.iter_mut() {
        if !record.stage.is_waiting() {
            continue;
        }

        if always_open {
            release(record, counters, now);
            outcome.forced += 1;
            continue;
        }

        let Some(correction) = scenario.phases.window_for(record.side, now) else {
            continue;
        };

        let elapsed = (record.stage_elapsed(now) - correction).max(0.0);
        let threshold = scenario
            .side(record.side)
            .thresholds
            .lookup(elapsed, record.hurry);

        let relevant = match record.stage {
            Stage::WaitingAtOrigin => counters.combined(),
            Stage::WaitingAtBuffer => counters.segment(record.side.far_segment()),
            _ => unreachable!("non-waiting stage filtered above"),
        };

        if relevant >= threshold {
            release(record, counters, now);
            outcome.released += 1;
        }
    }

    outcome
}

/// Advance a waiting record into its next crossing stage.
fn release(record: &mut PedestrianRecord, counters: &mut ViolationCounters, now: f32) {
    match record.stage {
        Stage::WaitingAtOrigin => {
            record.goal = record.buffer_goal;
            counters.increment(record.side.origin_segment());
        }
        Stage::WaitingAtBuffer => {
            record.goal = record.destination;
            counters.increment(record.side.far_segment());
        }
        _ => unreachable!("release of a non-waiting record"),
    }
    record.advance_stage(now);
}
