//! The `CrossingSim` struct and its tick loop.

use xw_agents::{RecordStore, ViolationCounters};
use xw_core::{AgentId, SimConfig, SimRng, TickWindow, Vec2};
use xw_engine::MovementEngine;
use xw_policy::{
    advance_completions, resolve_buffer_congestion, run_decisions, ArrivalSpawner,
};
use xw_scenario::Scenario;

use crate::{SimObserver, SimResult, TickStats};

/// The main simulation runner.
///
/// `CrossingSim<E>` holds all simulation state and drives the seven-pass tick
/// pipeline documented on the [crate root](crate).  The movement engine is
/// generic: production runs plug in an external collision-avoidance backend,
/// tests and demos use [`xw_engine::KinematicEngine`].
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct CrossingSim<E: MovementEngine> {
    /// Global configuration (horizon, seed, trace interval, …).
    pub config: SimConfig,

    /// Immutable world description: arrivals, slot tables, thresholds,
    /// phase windows, buffer ranking.
    pub scenario: Scenario,

    /// The movement backend.  Owns global time and all agent positions.
    pub engine: E,

    /// Per-pedestrian crossing state, keyed by engine `AgentId`.
    pub store: RecordStore,

    /// Violation counts per roadway segment.
    pub counters: ViolationCounters,

    /// Master RNG.  Slot draws, buffer assignments, and resolver shifts all
    /// draw from it, in fixed pass order, so runs are seed-deterministic.
    pub rng: SimRng,

    /// Arrival cursors and the deferral queue.
    pub spawner: ArrivalSpawner,

    /// Ticks completed so far.  Drives the trace-interval gate.
    pub tick_index: u64,

    /// Steering scratch, reused across ticks.
    pref_vels: Vec<(AgentId, Vec2)>,
}

impl<E: MovementEngine> CrossingSim<E> {
    // ── Public API ────────────────────────────────────────────────────────

    pub(crate) fn new(config: SimConfig, scenario: Scenario, engine: E) -> Self {
        let rng = SimRng::new(config.seed);
        Self {
            config,
            scenario,
            engine,
            store:      RecordStore::new(),
            counters:   ViolationCounters::new(),
            rng,
            spawner:    ArrivalSpawner::new(),
            tick_index: 0,
            pref_vels:  Vec::new(),
        }
    }

    /// Run the simulation until the engine clock passes `config.horizon_secs`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while !self.config.time_up(self.engine.global_time()) {
            self.tick(observer)?;
        }
        observer.on_sim_end(self.engine.global_time());
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores the horizon).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.tick(observer)?;
        }
        Ok(())
    }

    /// `true` once every scheduled arrival has spawned and arrived.
    pub fn all_arrived(&self) -> bool {
        self.spawner.exhausted(&self.scenario.arrivals)
            && self.store.len() == self.scenario.arrivals.len()
            && self.store.live_count() == 0
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn tick<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickStats> {
        let window = TickWindow::new(self.engine.global_time(), self.engine.time_step());
        observer.on_tick_start(window.start);
        let mut stats = TickStats::default();

        // ── Pass ①: spawn due arrivals ────────────────────────────────────
        let spawn = self.spawner.spawn_due(
            window,
            &self.scenario,
            &mut self.engine,
            &mut self.store,
            &mut self.rng,
        )?;
        stats.spawned = spawn.spawned;
        stats.deferred = spawn.deferred;

        // ── Pass ②: gap-acceptance decisions ──────────────────────────────
        let decisions =
            run_decisions(window.start, &self.scenario, &mut self.counters, &mut self.store);
        stats.released = decisions.released;
        stats.forced = decisions.forced;

        // ── Pass ③: buffer congestion repair ──────────────────────────────
        stats.repaired = resolve_buffer_congestion(
            &self.scenario.buffer,
            &mut self.store,
            &self.engine,
            &mut self.rng,
        );

        // ── Pass ④: steering (compute, then apply) ────────────────────────
        self.compute_pref_velocities();
        for &(agent, vel) in &self.pref_vels {
            self.engine.set_pref_velocity(agent, vel);
        }

        // ── Pass ⑤: trace hook ────────────────────────────────────────────
        if self.config.trace_interval_ticks > 0
            && self.tick_index.is_multiple_of(self.config.trace_interval_ticks)
        {
            let positions: Vec<(AgentId, Vec2)> = self
                .store
                .iter()
                .filter(|r| !r.is_arrived())
                .map(|r| (r.agent, self.engine.position(r.agent)))
                .collect();
            observer.on_trace(window.start, &positions, &self.counters);
        }

        // ── Pass ⑥: engine step ───────────────────────────────────────────
        self.engine.step();

        // ── Pass ⑦: completions ───────────────────────────────────────────
        let lifecycle = advance_completions(
            self.engine.global_time(),
            &self.scenario,
            &mut self.counters,
            &mut self.store,
            &mut self.engine,
        );
        stats.reached_buffer = lifecycle.reached_buffer;
        stats.arrived = lifecycle.arrived;
        stats.live = self.store.live_count();

        self.tick_index += 1;
        observer.on_tick_end(window.start, &stats);
        Ok(stats)
    }

    /// Fill `pref_vels` with `(agent, velocity)` pairs for every live record.
    ///
    /// The preferred velocity points at the record's current goal: the full
    /// goal vector when already within one metre, a unit vector otherwise.
    /// The engine clamps the magnitude to each agent's speed cap, so this
    /// encodes direction plus terminal slow-down, not speed.
    ///
    /// Reads only; all writes happen in the sequential apply loop above.
    fn compute_pref_velocities(&mut self) {
        let engine = &self.engine;

        #[cfg(not(feature = "parallel"))]
        {
            self.pref_vels.clear();
            self.pref_vels.extend(
                self.store
                    .iter()
                    .filter(|r| !r.is_arrived())
                    .map(|r| (r.agent, steer(engine.position(r.agent), r.goal))),
            );
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            // Positions are read sequentially first so the parallel map only
            // touches owned data and the engine needs no Sync bound.
            let inputs: Vec<(AgentId, Vec2, Vec2)> = self
                .store
                .iter()
                .filter(|r| !r.is_arrived())
                .map(|r| (r.agent, engine.position(r.agent), r.goal))
                .collect();
            self.pref_vels = inputs
                .into_par_iter()
                .map(|(agent, position, goal)| (agent, steer(position, goal)))
                .collect();
        }
    }
}

/// Goal vector, normalized once it is longer than one metre.
#[inline]
fn steer(position: Vec2, goal: Vec2) -> Vec2 {
    let v = goal - position;
    if v.abs_sq() > 1.0 { v.normalized() } else { v }
}
