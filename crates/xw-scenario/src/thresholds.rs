//! The violation-tolerance threshold table.
//!
//! # Semantics
//!
//! `lookup(elapsed_wait, hurry)` bounds how many concurrent violations a
//! waiting pedestrian tolerates before defecting:
//!
//! - Elapsed wait is discretized into half-open brackets of `bracket_secs`:
//!   bracket k covers `[k·bracket_secs, (k+1)·bracket_secs)`.
//! - Within a bracket, tolerance strictly decreases as hurry increases —
//!   impatient pedestrians need fewer competing violations to defect.
//!   Hurry levels past a row's tabulated end tolerate nothing (0).
//! - Past the last tabulated bracket the table answers [`UNREACHABLE`]:
//!   without a phase-open override the pedestrian queues forever.
//!
//! The whole table is data — one `Vec<Vec<u32>>` — replacing per-bracket
//! branch logic.  Monotonicity is validated at construction, so a malformed
//! table is rejected before the simulation ever starts.
//!
//! [`UNREACHABLE`]: ThresholdTable::UNREACHABLE

use crate::{ScenarioError, ScenarioResult};

/// (elapsed-wait bracket × hurry level) → maximum tolerated violation count.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdTable {
    bracket_secs: f32,
    /// `rows[bracket][hurry]`; rows may shorten as brackets progress
    /// (longer waits leave fewer patient hurry levels).
    rows: Vec<Vec<u32>>,
}

impl ThresholdTable {
    /// Sentinel returned beyond the tabulated brackets.  No violation count
    /// ever reaches it.
    pub const UNREACHABLE: u32 = u32::MAX;

    /// Build and validate a table.
    ///
    /// Rejects empty tables, non-positive bracket widths, and any row that
    /// is not non-increasing in hurry.
    pub fn new(bracket_secs: f32, rows: Vec<Vec<u32>>) -> ScenarioResult<Self> {
        if !(bracket_secs > 0.0) {
            return Err(ScenarioError::Validation(format!(
                "bracket width must be positive, got {bracket_secs}"
            )));
        }
        if rows.is_empty() {
            return Err(ScenarioError::Validation("threshold table has no brackets".into()));
        }
        for (b, row) in rows.iter().enumerate() {
            if row.is_empty() {
                return Err(ScenarioError::Validation(format!("bracket {b} has no entries")));
            }
            if row.windows(2).any(|w| w[0] < w[1]) {
                return Err(ScenarioError::Validation(format!(
                    "bracket {b} is not non-increasing in hurry: {row:?}"
                )));
            }
        }
        Ok(Self { bracket_secs, rows })
    }

    /// Tolerated violation count for `elapsed_wait` seconds at `hurry`.
    ///
    /// Negative elapsed waits (possible transiently after a window
    /// correction) land in bracket 0.
    pub fn lookup(&self, elapsed_wait: f32, hurry: u8) -> u32 {
        let bracket = (elapsed_wait.max(0.0) / self.bracket_secs) as usize;
        match self.rows.get(bracket) {
            None      => Self::UNREACHABLE,
            Some(row) => row.get(hurry as usize).copied().unwrap_or(0),
        }
    }

    #[inline]
    pub fn bracket_secs(&self) -> f32 {
        self.bracket_secs
    }

    /// Number of tabulated brackets.
    #[inline]
    pub fn bracket_count(&self) -> usize {
        self.rows.len()
    }

    /// Raw row access, for tests and diagnostics.
    pub fn rows(&self) -> &[Vec<u32>] {
        &self.rows
    }
}
