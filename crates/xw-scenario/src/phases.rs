//! Signal-phase windows: when each side's waiters are even considered.
//!
//! A side's waiting pedestrians are evaluated for defection only while one
//! of that side's windows is open.  Outside every window nothing is
//! attempted — conceptual wait time still accrues, and the rule's
//! `wait_correction` compensates for the closed span on re-entry so the
//! threshold bracket does not jump discontinuously.
//!
//! The rules are a flat declarative list consumed uniformly by the decision
//! engine; there is no per-site conditional logic anywhere else.

use xw_core::Side;

use crate::{ScenarioError, ScenarioResult};

// ── PhaseRule ─────────────────────────────────────────────────────────────────

/// One permitted evaluation window for one side.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseRule {
    pub side: Side,
    /// Half-open window `[start, end)` in simulated seconds.
    pub start: f32,
    pub end:   f32,
    /// Seconds subtracted from a waiter's elapsed wait while this window is
    /// active — the cumulative closed duration preceding the window.
    pub wait_correction: f32,
}

impl PhaseRule {
    #[inline]
    pub fn contains(&self, t: f32) -> bool {
        self.start <= t && t < self.end
    }
}

// ── PhasePolicy ───────────────────────────────────────────────────────────────

/// The full phase schedule plus the late-simulation "always open" override.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhasePolicy {
    rules: Vec<PhaseRule>,
    /// Past this time every remaining waiter is released unconditionally.
    open_after: f32,
}

impl PhasePolicy {
    /// Build and validate a policy.
    ///
    /// Windows for the same side must be disjoint; each window must be
    /// non-empty.
    pub fn new(rules: Vec<PhaseRule>, open_after: f32) -> ScenarioResult<Self> {
        for rule in &rules {
            if !(rule.start < rule.end) {
                return Err(ScenarioError::Validation(format!(
                    "phase window [{}, {}) for {} is empty",
                    rule.start, rule.end, rule.side
                )));
            }
        }
        for side in Side::BOTH {
            let mut windows: Vec<(f32, f32)> = rules
                .iter()
                .filter(|r| r.side == side)
                .map(|r| (r.start, r.end))
                .collect();
            windows.sort_by(|a, b| a.0.total_cmp(&b.0));
            if windows.windows(2).any(|w| w[0].1 > w[1].0) {
                return Err(ScenarioError::Validation(format!(
                    "{side} phase windows overlap"
                )));
            }
        }
        Ok(Self { rules, open_after })
    }

    /// A policy with no windows: nothing is ever evaluated before
    /// `open_after`.  Useful for forced-release-only experiments and tests.
    pub fn closed_until(open_after: f32) -> Self {
        Self { rules: Vec::new(), open_after }
    }

    /// If a window for `side` is open at `now`, its wait correction.
    ///
    /// `None` means the side is not evaluated this tick.
    pub fn window_for(&self, side: Side, now: f32) -> Option<f32> {
        self.rules
            .iter()
            .find(|r| r.side == side && r.contains(now))
            .map(|r| r.wait_correction)
    }

    /// `true` once the unconditional-release override is in effect.
    #[inline]
    pub fn always_open(&self, now: f32) -> bool {
        now >= self.open_after
    }

    #[inline]
    pub fn open_after(&self) -> f32 {
        self.open_after
    }

    pub fn rules(&self) -> &[PhaseRule] {
        &self.rules
    }
}
