//! Integration tests for xw-sim.

use xw_agents::Stage;
use xw_core::{SimConfig, Side, Vec2};
use xw_engine::{AgentDefaults, KinematicEngine, MovementEngine};
use xw_scenario::{
    ArrivalEvent, ArrivalSchedule, BufferRanking, PhasePolicy, PhaseRule, Scenario, SideConfig,
    SlotTable, ThresholdTable,
};

use crate::{NoopObserver, SimBuilder, SimError, SimObserver, TickStats};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(horizon_secs: f32) -> SimConfig {
    SimConfig { horizon_secs, ..SimConfig::default() }
}

fn engine() -> KinematicEngine {
    KinematicEngine::new(AgentDefaults::default())
}

/// Compact geometry so a crossing leg takes ~25 ticks at the default
/// 0.09 m/s speed cap: curbs at x = ±2, median refuge at x = 0.
fn small_scenario(left: Vec<ArrivalEvent>, right: Vec<ArrivalEvent>) -> Scenario {
    // Threshold 0 everywhere: waiters release on their first evaluation.
    let instant = || ThresholdTable::new(60.0, vec![vec![0; 11]]).unwrap();
    Scenario {
        arrivals: ArrivalSchedule::new(left, right).unwrap(),
        left: SideConfig {
            slots: SlotTable::new(
                vec![Vec2::new(-2.0, 0.0), Vec2::new(-2.0, 0.6), Vec2::new(-3.0, 0.0)],
                2,
            )
            .unwrap(),
            thresholds:  instant(),
            destination: Vec2::new(2.5, 0.0),
        },
        right: SideConfig {
            slots: SlotTable::new(
                vec![Vec2::new(2.0, 0.0), Vec2::new(2.0, 0.6), Vec2::new(3.0, 0.0)],
                2,
            )
            .unwrap(),
            thresholds:  instant(),
            destination: Vec2::new(-2.5, 0.0),
        },
        buffer: BufferRanking::new(vec![
            Vec2::new(0.0, -0.6),
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 0.6),
        ])
        .unwrap(),
        phases: PhasePolicy::new(
            vec![
                PhaseRule { side: Side::Left, start: 0.0, end: 500.0, wait_correction: 0.0 },
                PhaseRule { side: Side::Right, start: 0.0, end: 500.0, wait_correction: 0.0 },
            ],
            500.0,
        )
        .unwrap(),
        park:         Vec2::new(100.0, 100.0),
        park_spacing: 1.0,
    }
}

fn one_left_arrival() -> Scenario {
    small_scenario(vec![ArrivalEvent { hurry: 0, time: 2.0 }], vec![])
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_matching_time_steps() {
        let sim = SimBuilder::new(test_config(10.0), one_left_arrival(), engine())
            .build()
            .unwrap();
        assert_eq!(sim.store.len(), 0);
        assert_eq!(sim.engine.global_time(), 0.0);
    }

    #[test]
    fn time_step_mismatch_errors() {
        let slow = KinematicEngine::new(AgentDefaults {
            time_step: 0.25,
            ..AgentDefaults::default()
        });
        let result = SimBuilder::new(test_config(10.0), one_left_arrival(), slow).build();
        assert!(matches!(result, Err(SimError::TimeStepMismatch { .. })));
    }

    #[test]
    fn pre_populated_engine_errors() {
        let mut eng = engine();
        eng.add_agent(Vec2::ZERO);
        let result = SimBuilder::new(test_config(10.0), one_left_arrival(), eng).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn non_positive_horizon_errors() {
        let config = SimConfig { horizon_secs: 0.0, ..SimConfig::default() };
        let result = SimBuilder::new(config, one_left_arrival(), engine()).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }
}

// ── Basic run ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn run_stops_past_the_horizon() {
        let mut sim = SimBuilder::new(test_config(10.0), one_left_arrival(), engine())
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();
        // The tick starting at t = 10 still runs; the next would not.
        assert_eq!(sim.engine.global_time(), 11.0);
    }

    #[test]
    fn run_ticks_advances_the_clock() {
        let mut sim = SimBuilder::new(test_config(100.0), one_left_arrival(), engine())
            .build()
            .unwrap();
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(sim.engine.global_time(), 5.0);
        sim.run_ticks(3, &mut NoopObserver).unwrap();
        assert_eq!(sim.engine.global_time(), 8.0);
    }

    /// Observer that counts hook invocations.
    #[derive(Default)]
    struct HookCounter {
        starts: usize,
        ends:   usize,
        traces: usize,
        sim_ends: usize,
    }
    impl SimObserver for HookCounter {
        fn on_tick_start(&mut self, _t: f32) { self.starts += 1; }
        fn on_tick_end(&mut self, _t: f32, _s: &TickStats) { self.ends += 1; }
        fn on_trace(&mut self, _t: f32, _p: &[(xw_core::AgentId, Vec2)], _c: &xw_agents::ViolationCounters) {
            self.traces += 1;
        }
        fn on_sim_end(&mut self, _t: f32) { self.sim_ends += 1; }
    }

    #[test]
    fn observer_called_once_per_tick() {
        let mut sim = SimBuilder::new(test_config(6.0), one_left_arrival(), engine())
            .build()
            .unwrap();
        let mut obs = HookCounter::default();
        sim.run(&mut obs).unwrap();
        assert_eq!(obs.starts, 7);
        assert_eq!(obs.ends, 7);
        assert_eq!(obs.sim_ends, 1);
    }

    #[test]
    fn trace_interval_gates_the_trace_hook() {
        let config = SimConfig { trace_interval_ticks: 3, ..test_config(100.0) };
        let mut sim = SimBuilder::new(config, one_left_arrival(), engine()).build().unwrap();
        let mut obs = HookCounter::default();
        sim.run_ticks(9, &mut obs).unwrap();
        // Ticks 0, 3, 6.
        assert_eq!(obs.traces, 3);
    }

    #[test]
    fn zero_interval_disables_tracing() {
        let config = SimConfig { trace_interval_ticks: 0, ..test_config(100.0) };
        let mut sim = SimBuilder::new(config, one_left_arrival(), engine()).build().unwrap();
        let mut obs = HookCounter::default();
        sim.run_ticks(9, &mut obs).unwrap();
        assert_eq!(obs.traces, 0);
    }
}

// ── Crossing behavior ─────────────────────────────────────────────────────────

#[cfg(test)]
mod crossing_tests {
    use super::*;

    #[test]
    fn single_pedestrian_full_journey() {
        let mut sim = SimBuilder::new(test_config(300.0), one_left_arrival(), engine())
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();

        assert!(sim.all_arrived());
        assert_eq!(sim.counters.combined(), 0);

        let record = sim.store.iter().next().unwrap();
        assert_eq!(record.stage, Stage::Arrived);
        assert_eq!(sim.engine.position(record.agent), sim.scenario.park_position(0));
    }

    #[test]
    fn stages_advance_in_lifecycle_order() {
        // Left windows open at t = 6, so the spawn tick (t = 2) cannot also
        // release and the origin wait is observable between ticks.
        let mut scenario = one_left_arrival();
        scenario.phases = PhasePolicy::new(
            vec![PhaseRule { side: Side::Left, start: 6.0, end: 500.0, wait_correction: 6.0 }],
            500.0,
        )
        .unwrap();
        let mut sim = SimBuilder::new(test_config(300.0), scenario, engine())
            .build()
            .unwrap();

        let mut seen = Vec::new();
        for _ in 0..300 {
            sim.run_ticks(1, &mut NoopObserver).unwrap();
            if let Some(record) = sim.store.iter().next() {
                if seen.last() != Some(&record.stage) {
                    seen.push(record.stage);
                }
            }
        }

        // Every transition is to the successor stage, none skipped.
        for pair in seen.windows(2) {
            assert_eq!(pair[0].next(), Some(pair[1]), "stage sequence {seen:?}");
        }
        assert_eq!(seen.first(), Some(&Stage::WaitingAtOrigin));
        assert_eq!(seen.last(), Some(&Stage::Arrived));
        assert!(seen.contains(&Stage::WaitingAtBuffer));
    }

    #[test]
    fn counters_return_to_zero_after_everyone_arrives() {
        let scenario = small_scenario(
            vec![
                ArrivalEvent { hurry: 3, time: 0.0 },
                ArrivalEvent { hurry: 7, time: 4.0 },
                ArrivalEvent { hurry: 1, time: 9.0 },
            ],
            vec![
                ArrivalEvent { hurry: 5, time: 1.0 },
                ArrivalEvent { hurry: 9, time: 6.0 },
            ],
        );
        let mut sim = SimBuilder::new(test_config(400.0), scenario, engine()).build().unwrap();
        sim.run(&mut NoopObserver).unwrap();

        assert!(sim.all_arrived(), "live = {}", sim.store.live_count());
        assert_eq!(sim.counters.combined(), 0);
    }

    #[test]
    fn identical_seeds_give_identical_runs() {
        let scenario = small_scenario(
            vec![
                ArrivalEvent { hurry: 2, time: 0.0 },
                ArrivalEvent { hurry: 8, time: 0.0 },
                ArrivalEvent { hurry: 4, time: 5.0 },
            ],
            vec![
                ArrivalEvent { hurry: 6, time: 2.0 },
                ArrivalEvent { hurry: 0, time: 7.0 },
            ],
        );
        let run = || {
            let mut sim =
                SimBuilder::new(test_config(400.0), scenario.clone(), engine()).build().unwrap();
            sim.run(&mut NoopObserver).unwrap();
            let positions: Vec<Vec2> =
                sim.store.iter().map(|r| sim.engine.position(r.agent)).collect();
            let goals: Vec<Vec2> = sim.store.iter().map(|r| r.buffer_goal).collect();
            (positions, goals)
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn always_open_cutoff_forces_waiters_out() {
        // No phase windows at all: the only way across is the cutoff at t = 5.
        let mut scenario = small_scenario(vec![ArrivalEvent { hurry: 0, time: 0.0 }], vec![]);
        scenario.phases = PhasePolicy::new(vec![], 5.0).unwrap();

        let mut sim = SimBuilder::new(test_config(300.0), scenario, engine()).build().unwrap();
        sim.run_ticks(5, &mut NoopObserver).unwrap(); // ticks at t = 0..4
        assert_eq!(sim.store.iter().next().unwrap().stage, Stage::WaitingAtOrigin);

        sim.run_ticks(1, &mut NoopObserver).unwrap(); // tick at t = 5
        assert_eq!(sim.store.iter().next().unwrap().stage, Stage::CrossingToBuffer);
    }

    #[test]
    fn slotless_arrival_spawns_once_a_slot_frees() {
        // Single queue slot, two simultaneous arrivals: the second defers at
        // t = 0 and spawns at t = 1, after the first released its slot.
        let mut scenario = small_scenario(
            vec![ArrivalEvent { hurry: 0, time: 0.0 }, ArrivalEvent { hurry: 0, time: 0.0 }],
            vec![],
        );
        scenario.left.slots = SlotTable::new(vec![Vec2::new(-2.0, 0.0)], 1).unwrap();

        let mut sim = SimBuilder::new(test_config(300.0), scenario, engine()).build().unwrap();
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.store.len(), 1);
        assert_eq!(sim.spawner.deferred_len(), 1);

        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.store.len(), 2);
        assert_eq!(sim.spawner.deferred_len(), 0);
    }
}
