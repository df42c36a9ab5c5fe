//! Pedestrian arrival schedules and their CSV loader.
//!
//! # CSV format
//!
//! One row per scheduled arrival:
//!
//! ```csv
//! side,hurry,time
//! left,5,30
//! left,3,60
//! right,7,45.5
//! ```
//!
//! **`side`** accepts `left`/`right` (also `L`/`R`).  **`hurry`** is the
//! impatience level 0–10.  **`time`** is the scheduled arrival in simulated
//! seconds; rows need not be pre-sorted — schedules are sorted per side after
//! loading.  Arrival *matching* against the clock is the spawner's job and is
//! always half-open interval containment, never equality.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use xw_core::Side;

use crate::{ScenarioError, ScenarioResult};

/// Highest meaningful hurry level.  Thresholds above this are all zero.
pub const MAX_HURRY: u8 = 10;

// ── ArrivalEvent ──────────────────────────────────────────────────────────────

/// One scheduled pedestrian arrival: impatience level plus arrival time.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrivalEvent {
    /// Impatience, 0–10.  Higher = tolerates fewer competing violations.
    pub hurry: u8,
    /// Scheduled arrival, simulated seconds.
    pub time: f32,
}

// ── ArrivalSchedule ───────────────────────────────────────────────────────────

/// Ascending-time arrival lists, one per side.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrivalSchedule {
    pub left:  Vec<ArrivalEvent>,
    pub right: Vec<ArrivalEvent>,
}

impl ArrivalSchedule {
    /// Build from per-side lists, sorting each by time.
    pub fn new(mut left: Vec<ArrivalEvent>, mut right: Vec<ArrivalEvent>) -> ScenarioResult<Self> {
        for events in [&mut left, &mut right] {
            events.sort_by(|a, b| a.time.total_cmp(&b.time));
            if let Some(bad) = events.iter().find(|e| e.hurry > MAX_HURRY) {
                return Err(ScenarioError::Validation(format!(
                    "hurry level {} exceeds maximum {MAX_HURRY}",
                    bad.hurry
                )));
            }
            if let Some(bad) = events.iter().find(|e| !e.time.is_finite() || e.time < 0.0) {
                return Err(ScenarioError::Validation(format!(
                    "arrival time {} is not a non-negative finite value",
                    bad.time
                )));
            }
        }
        Ok(Self { left, right })
    }

    /// The list for one side.
    #[inline]
    pub fn side(&self, side: Side) -> &[ArrivalEvent] {
        match side {
            Side::Left  => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Total arrivals across both sides.
    pub fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }
}

// ── CSV loading ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ArrivalRow {
    side:  String,
    hurry: u8,
    time:  f32,
}

/// Load an [`ArrivalSchedule`] from a CSV file.
pub fn load_arrivals_csv(path: &Path) -> ScenarioResult<ArrivalSchedule> {
    let file = std::fs::File::open(path).map_err(ScenarioError::Io)?;
    load_arrivals_reader(file)
}

/// Like [`load_arrivals_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded schedules.
pub fn load_arrivals_reader<R: Read>(reader: R) -> ScenarioResult<ArrivalSchedule> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut left = Vec::new();
    let mut right = Vec::new();

    for result in csv_reader.deserialize::<ArrivalRow>() {
        let row = result.map_err(|e| ScenarioError::Parse(e.to_string()))?;
        let side: Side = row
            .side
            .parse()
            .map_err(|e| ScenarioError::Parse(format!("{e}")))?;
        let event = ArrivalEvent { hurry: row.hurry, time: row.time };
        match side {
            Side::Left  => left.push(event),
            Side::Right => right.push(event),
        }
    }

    ArrivalSchedule::new(left, right)
}
