//! Scheduled arrivals → engine agents + pedestrian records.
//!
//! The spawner keeps one cursor per side into the ascending arrival list and
//! drains every event whose scheduled time falls before the current tick
//! window's end — half-open containment, so no arrival is silently dropped
//! when the engine step does not align with schedule granularity.
//!
//! Arrivals that cannot get a queue slot this tick (allocator deferral) are
//! parked in a FIFO and retried at the start of every subsequent tick,
//! before new arrivals.  Pass order is: deferred, then left cursor, then
//! right cursor — fixed, so spawn order (and thus store order) is identical
//! on every run.

use std::collections::VecDeque;

use xw_agents::{PedestrianRecord, RecordStore};
use xw_core::{Side, SimRng, TickWindow};
use xw_engine::MovementEngine;
use xw_scenario::{ArrivalEvent, ArrivalSchedule, Scenario};

use crate::{allocate_slot, PolicyResult};

/// Per-tick spawn tallies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SpawnOutcome {
    /// Records created this tick.
    pub spawned: usize,
    /// Arrivals pushed (or re-pushed) to the deferral queue this tick.
    pub deferred: usize,
}

/// Drains the arrival schedule into the movement engine and record store.
#[derive(Default)]
pub struct ArrivalSpawner {
    left_cursor:  usize,
    right_cursor: usize,
    deferred:     VecDeque<(Side, ArrivalEvent)>,
}

impl ArrivalSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arrivals currently waiting for a free slot.
    pub fn deferred_len(&self) -> usize {
        self.deferred.len()
    }

    /// `true` once both cursors have drained their side's schedule and no
    /// arrival is waiting in the deferral queue.
    pub fn exhausted(&self, arrivals: &ArrivalSchedule) -> bool {
        self.deferred.is_empty()
            && self.left_cursor >= arrivals.side(Side::Left).len()
            && self.right_cursor >= arrivals.side(Side::Right).len()
    }

    /// Spawn every due arrival for the tick window.
    ///
    /// Deferred arrivals are retried first (FIFO), then each side's cursor
    /// advances over newly due events.  An arrival that still gets no slot
    /// goes (back) to the deferral queue.
    pub fn spawn_due<E: MovementEngine>(
        &mut self,
        window:   TickWindow,
        scenario: &Scenario,
        engine:   &mut E,
        store:    &mut RecordStore,
        rng:      &mut SimRng,
    ) -> PolicyResult<SpawnOutcome> {
        let mut outcome = SpawnOutcome::default();

        // ── Retry deferred arrivals ───────────────────────────────────────
        for (side, event) in std::mem::take(&mut self.deferred) {
            self.spawn_one(side, event, window, scenario, engine, store, rng, &mut outcome)?;
        }

        // ── Drain newly due events per side ───────────────────────────────
        for side in Side::BOTH {
            loop {
                let cursor = match side {
                    Side::Left  => &mut self.left_cursor,
                    Side::Right => &mut self.right_cursor,
                };
                let events = scenario.arrivals.side(side);
                match events.get(*cursor) {
                    Some(&event) if window.is_due(event.time) => {
                        *cursor += 1;
                        self.spawn_one(
                            side, event, window, scenario, engine, store, rng, &mut outcome,
                        )?;
                    }
                    _ => break,
                }
            }
        }

        Ok(outcome)
    }

    #[allow(clippy::too_many_arguments)]
    fn spawn_one<E: MovementEngine>(
        &mut self,
        side:     Side,
        event:    ArrivalEvent,
        window:   TickWindow,
        scenario: &Scenario,
        engine:   &mut E,
        store:    &mut RecordStore,
        rng:      &mut SimRng,
        outcome:  &mut SpawnOutcome,
    ) -> PolicyResult<()> {
        let side_cfg = scenario.side(side);
        let Some(slot) = allocate_slot(&side_cfg.slots, side, store, rng) else {
            self.deferred.push_back((side, event));
            outcome.deferred += 1;
            return Ok(());
        };

        let agent = engine.add_agent(slot);
        let buffer_goal = scenario.buffer.get(rng.gen_range(0..scenario.buffer.len()));
        store.insert(PedestrianRecord::new(
            agent,
            side,
            event.hurry,
            window.start,
            slot,
            buffer_goal,
            side_cfg.destination,
        ))?;
        outcome.spawned += 1;
        Ok(())
    }
}
