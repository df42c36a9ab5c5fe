//! Unit tests for the kinematic reference backend.

use xw_core::{AgentId, Vec2};

use crate::{AgentDefaults, KinematicEngine, MovementEngine};

fn engine() -> KinematicEngine {
    KinematicEngine::new(AgentDefaults::default())
}

#[test]
fn ids_are_sequential_and_stable() {
    let mut eng = engine();
    let a = eng.add_agent(Vec2::new(0.0, 0.0));
    let b = eng.add_agent(Vec2::new(1.0, 0.0));
    assert_eq!(a, AgentId(0));
    assert_eq!(b, AgentId(1));
    assert_eq!(eng.num_agents(), 2);
    eng.step();
    // Stepping never invalidates or renumbers identities.
    assert_eq!(eng.position(a), Vec2::new(0.0, 0.0));
}

#[test]
fn clock_advances_by_fixed_step() {
    let mut eng = engine();
    assert_eq!(eng.global_time(), 0.0);
    eng.step();
    eng.step();
    assert!((eng.global_time() - 2.0 * eng.time_step()).abs() < 1e-6);
}

#[test]
fn pref_velocity_is_clamped_to_max_speed() {
    let mut eng = engine();
    let a = eng.add_agent(Vec2::ZERO);
    // Unit-magnitude preferred velocity, but max_speed is 0.09.
    eng.set_pref_velocity(a, Vec2::new(1.0, 0.0));
    eng.step();
    let moved = eng.position(a).length();
    let expected = eng.defaults().max_speed * eng.time_step();
    assert!((moved - expected).abs() < 1e-6, "moved {moved}");
}

#[test]
fn slow_pref_velocity_is_not_scaled_up() {
    let mut eng = engine();
    let a = eng.add_agent(Vec2::ZERO);
    eng.set_pref_velocity(a, Vec2::new(0.01, 0.0));
    eng.step();
    assert!((eng.position(a).x - 0.01 * eng.time_step()).abs() < 1e-6);
}

#[test]
fn zero_max_speed_freezes_agent() {
    let mut eng = engine();
    let a = eng.add_agent(Vec2::new(5.0, 5.0));
    eng.set_max_speed(a, 0.0);
    eng.set_pref_velocity(a, Vec2::new(1.0, 1.0));
    eng.step();
    assert_eq!(eng.position(a), Vec2::new(5.0, 5.0));
}

#[test]
fn set_position_teleports() {
    let mut eng = engine();
    let a = eng.add_agent(Vec2::ZERO);
    eng.set_position(a, Vec2::new(100.0, -40.0));
    assert_eq!(eng.position(a), Vec2::new(100.0, -40.0));
}

#[test]
fn defaults_validation() {
    assert!(AgentDefaults::default().validate().is_ok());
    let bad = AgentDefaults { time_step: 0.0, ..AgentDefaults::default() };
    assert!(bad.validate().is_err());
    let bad = AgentDefaults { radius: -1.0, ..AgentDefaults::default() };
    assert!(bad.validate().is_err());
}
