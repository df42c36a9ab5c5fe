//! signalized — jaywalking at a two-sided signalized crossing.
//!
//! Ten pedestrians per curb arrive over five minutes, queue at ranked curb
//! slots, and defect across the roadway once enough concurrent violations
//! erode their patience (threshold = f(wait bracket, hurry)).  A median
//! refuge splits the crossing into two legs; after 16 minutes the signal is
//! abandoned and everyone still waiting is let through.
//!
//! Positions and per-tick violation counts are traced to CSV under
//! `output/signalized/`.

mod tables;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use xw_agents::Stage;
use xw_core::SimConfig;
use xw_engine::{AgentDefaults, KinematicEngine};
use xw_scenario::{Scenario, SideConfig};
use xw_sim::{SimBuilder, SimObserver, TickStats};
use xw_trace::{CsvTraceWriter, TraceObserver, TraceSink};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                 u64 = 42;
const TIME_STEP_SECS:       f32 = 1.0;
const HORIZON_SECS:         f32 = 1_000.0;
const TRACE_INTERVAL_TICKS: u64 = 1;

// ── Observer: trace + running tallies ─────────────────────────────────────────

struct TallyObserver<S: TraceSink> {
    trace:    TraceObserver<S>,
    released: usize,
    forced:   usize,
    deferred: usize,
    repaired: usize,
}

impl<S: TraceSink> TallyObserver<S> {
    fn new(trace: TraceObserver<S>) -> Self {
        Self { trace, released: 0, forced: 0, deferred: 0, repaired: 0 }
    }
}

impl<S: TraceSink> SimObserver for TallyObserver<S> {
    fn on_tick_end(&mut self, time: f32, stats: &TickStats) {
        self.released += stats.released;
        self.forced += stats.forced;
        self.deferred += stats.deferred;
        self.repaired += stats.repaired;
        self.trace.on_tick_end(time, stats);
    }

    fn on_trace(
        &mut self,
        time:      f32,
        positions: &[(xw_core::AgentId, xw_core::Vec2)],
        counters:  &xw_agents::ViolationCounters,
    ) {
        self.trace.on_trace(time, positions, counters);
    }

    fn on_sim_end(&mut self, final_time: f32) {
        self.trace.on_sim_end(final_time);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== signalized — rust_xwalk crossing sim ===");
    println!(
        "Arrivals: {} per side  |  Horizon: {HORIZON_SECS} s  |  Seed: {SEED}",
        tables::ARRIVALS.len()
    );
    println!();

    // 1. Assemble the scenario from the literal tables.
    let scenario = Scenario {
        arrivals: tables::arrival_schedule()?,
        left: SideConfig {
            slots:       tables::left_slot_table()?,
            thresholds:  tables::left_thresholds()?,
            destination: tables::LEFT_DESTINATION,
        },
        right: SideConfig {
            slots:       tables::right_slot_table()?,
            thresholds:  tables::right_thresholds()?,
            destination: -tables::LEFT_DESTINATION,
        },
        buffer:       tables::buffer_ranking()?,
        phases:       tables::phase_policy()?,
        park:         tables::PARK,
        park_spacing: tables::PARK_SPACING,
    };
    println!(
        "Scenario: {} queue slots/side ({} primary), {} buffer slots, {} s signal cycle",
        tables::LEFT_SLOTS.len(),
        tables::PRIMARY_SLOTS,
        scenario.buffer.len(),
        tables::CYCLE_SECS,
    );

    // 2. Movement backend with the RVO parameter block.
    //    Swap in an ORCA-backed MovementEngine for collision-aware runs.
    let engine = KinematicEngine::new(AgentDefaults {
        neighbor_dist:     10.0,
        max_neighbors:     5,
        time_horizon:      0.1,
        time_horizon_obst: 0.1,
        radius:            0.3,
        max_speed:         0.09,
        time_step:         TIME_STEP_SECS,
    });

    // 3. Sim config.
    let config = SimConfig {
        time_step:            TIME_STEP_SECS,
        horizon_secs:         HORIZON_SECS,
        seed:                 SEED,
        trace_interval_ticks: TRACE_INTERVAL_TICKS,
    };

    let mut sim = SimBuilder::new(config, scenario, engine).build()?;

    // 4. Trace output.
    std::fs::create_dir_all("output/signalized")?;
    let writer = CsvTraceWriter::new(Path::new("output/signalized"))?;
    let mut obs = TallyObserver::new(TraceObserver::new(writer));

    // 5. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.trace.take_error() {
        eprintln!("trace error: {e}");
    }

    // 6. Summary.
    println!();
    println!("Simulation complete in {:.3} s wall time", elapsed.as_secs_f64());
    println!("  released by threshold : {}", obs.released);
    println!("  forced past cutoff    : {}", obs.forced);
    println!("  arrivals deferred     : {}", obs.deferred);
    println!("  buffer goals repaired : {}", obs.repaired);
    println!(
        "  arrived               : {} / {}",
        sim.store.iter().filter(|r| r.is_arrived()).count(),
        sim.store.len(),
    );
    println!("  open violations       : {}", sim.counters.combined());
    println!();

    // 7. Final per-pedestrian table.
    println!("{:<10} {:<6} {:<6} {:<10} {:<22}", "Agent", "Side", "Hurry", "Arrived@", "Stage");
    println!("{}", "-".repeat(56));
    for record in sim.store.iter() {
        println!(
            "{:<10} {:<6} {:<6} {:<10} {:<22}",
            record.agent.0,
            record.side.as_str(),
            record.hurry,
            record.arrival_time,
            record.stage.as_str(),
        );
    }
    if sim.store.iter().any(|r| r.stage != Stage::Arrived) {
        println!();
        println!("(not everyone made it across before the horizon)");
    }

    Ok(())
}
