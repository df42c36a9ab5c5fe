//! Literal scenario data for the signalized-crossing experiment.
//!
//! Coordinates are metres; the roadway runs along x with the median refuge
//! at x = 0, the left curb around x = -15, and the right curb mirrored.
//! Arrival times are simulated seconds; hurry is 0 (patient) to 10
//! (reckless).

use xw_core::{Side, Vec2};
use xw_scenario::{
    ArrivalEvent, ArrivalSchedule, BufferRanking, PhasePolicy, PhaseRule, ScenarioResult,
    SlotTable, ThresholdTable,
};

/// `(hurry, time)` arrival sequence, identical on both curbs.
pub const ARRIVALS: [(u8, f32); 10] = [
    (5, 30.0),
    (3, 60.0),
    (1, 90.0),
    (10, 120.0),
    (3, 150.0),
    (10, 180.0),
    (6, 210.0),
    (1, 240.0),
    (10, 270.0),
    (4, 300.0),
];

/// Ranked left-curb queue coordinates; the first [`PRIMARY_SLOTS`] form the
/// preferred pool, the rest are overflow.  Right-curb slots are the mirror
/// image (x negated).
pub const PRIMARY_SLOTS: usize = 30;

pub const LEFT_SLOTS: [(f32, f32); 48] = [
    (-14.6, 3.1), (-15.3, -4.0), (-15.1, 4.6), (-15.1, 1.9), (-15.0, -2.0), (-15.5, -0.7),
    (-14.4, 0.6), (-14.3, -3.2), (-15.3, 3.0), (-14.3, 2.1), (-14.8, 4.0), (-14.6, -1.0),
    (-15.4, 0.4), (-14.2, -0.1), (-16.0, 1.1), (-16.3, -2.5), (-15.6, -3.1), (-16.5, -3.1),
    (-14.7, 5.5), (-16.1, -3.7), (-15.8, 2.3), (-15.9, 4.0), (-16.2, -0.1), (-14.9, -5.5),
    (-14.7, -4.5), (-14.9, -7.1), (-15.1, 7.2), (-14.2, 5.9), (-14.4, -6.7), (-15.1, 6.1),
    (-16.6, 0.4), (-16.8, 4.3), (-15.1, -8.0), (-16.0, -6.2), (-15.6, -2.4), (-15.5, -5.4),
    (-16.7, 6.0), (-15.6, 7.9), (-16.7, -6.4), (-14.4, -8.4), (-16.8, -4.5), (-16.4, -5.3),
    (-16.3, 7.1), (-17.0, 1.7), (-14.7, 8.0), (-16.2, -8.1), (-17.4, 5.7), (-17.1, -5.2),
];

/// Wait-bracket width for both threshold tables.
pub const BRACKET_SECS: f32 = 30.0;

/// Destination on the far curb, seen from the left side.  The right side's
/// destination is the mirror image.
pub const LEFT_DESTINATION: Vec2 = Vec2::new(9.9, 0.0);

/// Off-map parking spot for arrived pedestrians.
pub const PARK: Vec2 = Vec2::new(200.0, 200.0);
pub const PARK_SPACING: f32 = 1.0;

/// Signal cycle: 90 s, each side green for its half.
pub const CYCLE_SECS: f32 = 90.0;
pub const GREEN_SECS: f32 = 45.0;

/// Everything is let through after this point, thresholds or not.
pub const OPEN_AFTER_SECS: f32 = 960.0;

pub fn arrival_schedule() -> ScenarioResult<ArrivalSchedule> {
    let events: Vec<ArrivalEvent> = ARRIVALS
        .iter()
        .map(|&(hurry, time)| ArrivalEvent { hurry, time })
        .collect();
    ArrivalSchedule::new(events.clone(), events)
}

pub fn left_slot_table() -> ScenarioResult<SlotTable> {
    SlotTable::new(
        LEFT_SLOTS.iter().map(|&(x, y)| Vec2::new(x, y)).collect(),
        PRIMARY_SLOTS,
    )
}

pub fn right_slot_table() -> ScenarioResult<SlotTable> {
    SlotTable::new(
        LEFT_SLOTS.iter().map(|&(x, y)| Vec2::new(-x, y)).collect(),
        PRIMARY_SLOTS,
    )
}

/// Median-refuge slots, ranked centre-out along the median strip.
pub fn buffer_ranking() -> ScenarioResult<BufferRanking> {
    let ys = [0.0, -1.0, 1.0, -2.0, 2.0, -3.0, 3.0, -4.0, 4.0];
    BufferRanking::new(ys.iter().map(|&y| Vec2::new(0.0, y)).collect())
}

/// Violation-tolerance table for left-side waiters.
pub fn left_thresholds() -> ScenarioResult<ThresholdTable> {
    ThresholdTable::new(
        BRACKET_SECS,
        vec![
            vec![50, 35, 25, 16, 10, 7, 4, 2, 1, 1],
            vec![35, 22, 16, 9, 6, 4, 2, 1, 1],
            vec![25, 17, 11, 7, 4, 2, 1],
            vec![22, 14, 9, 6, 2, 1],
            vec![19, 12, 7, 5, 2],
            vec![15, 9, 5, 4, 1],
            vec![12, 8, 3, 2],
            vec![10, 7, 2, 1],
        ],
    )
}

/// Violation-tolerance table for right-side waiters — slightly less
/// tolerant, reflecting the heavier traffic on that approach.
pub fn right_thresholds() -> ScenarioResult<ThresholdTable> {
    ThresholdTable::new(
        BRACKET_SECS,
        vec![
            vec![40, 25, 20, 13, 8, 5, 3, 2, 1],
            vec![30, 18, 13, 7, 5, 3, 1],
            vec![20, 13, 9, 6, 3, 2],
            vec![18, 11, 7, 4, 1],
            vec![15, 9, 5, 2],
            vec![13, 7, 4, 1],
            vec![10, 6, 2],
            vec![9, 4, 1],
        ],
    )
}

/// Alternating 45 s green windows: left takes the first half of each 90 s
/// cycle, right the second.  `wait_correction` folds out the closed time a
/// waiter accumulated before its window opened, so threshold brackets count
/// exposed wait only.
pub fn phase_policy() -> ScenarioResult<PhasePolicy> {
    let cycles = (OPEN_AFTER_SECS / CYCLE_SECS).ceil() as u32;
    let mut rules = Vec::with_capacity(2 * cycles as usize);
    for k in 0..cycles {
        let base = k as f32 * CYCLE_SECS;
        rules.push(PhaseRule {
            side:            Side::Left,
            start:           base,
            end:             base + GREEN_SECS,
            wait_correction: k as f32 * GREEN_SECS,
        });
        rules.push(PhaseRule {
            side:            Side::Right,
            start:           base + GREEN_SECS,
            end:             base + CYCLE_SECS,
            wait_correction: (k + 1) as f32 * GREEN_SECS,
        });
    }
    PhasePolicy::new(rules, OPEN_AFTER_SECS)
}
