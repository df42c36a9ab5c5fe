//! Simulation time model.
//!
//! # Design
//!
//! The movement engine owns global time: a single `f32` scalar advanced only
//! by its `step()` in increments of the fixed `time_step`.  The core never
//! keeps its own clock — it reads `engine.global_time()` at the top of each
//! tick and derives the half-open window `[now, now + time_step)` from it.
//!
//! All schedule matching goes through [`TickWindow::contains`].  Comparing a
//! scheduled time against the clock with `==` silently drops events whenever
//! the step size does not align with schedule granularity (a 0.25 s step
//! never *equals* an arrival at t = 30.1); interval containment is the
//! corrected semantics and the only one offered here.

/// The half-open time interval `[start, end)` covered by one engine tick.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickWindow {
    pub start: f32,
    pub end:   f32,
}

impl TickWindow {
    /// Window starting at `start` and spanning one `time_step`.
    #[inline]
    pub fn new(start: f32, time_step: f32) -> Self {
        Self { start, end: start + time_step }
    }

    /// `true` if `t` falls within `[start, end)`.
    #[inline]
    pub fn contains(self, t: f32) -> bool {
        self.start <= t && t < self.end
    }

    /// `true` if `t` is already past (strictly before `end`).
    ///
    /// Used for due-event draining: an event scheduled before the window even
    /// opened (possible after a deferred spawn) is still due.
    #[inline]
    pub fn is_due(self, t: f32) -> bool {
        t < self.end
    }
}

impl std::fmt::Display for TickWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.3}, {:.3})", self.start, self.end)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically constructed by the application crate (or deserialized from a
/// config file with the `serde` feature) and handed to `SimBuilder`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Simulated seconds per engine step.  Must match the step size the
    /// movement engine was configured with.
    pub time_step: f32,

    /// Simulation-time horizon: the run terminates once the engine clock
    /// exceeds this value, whether or not every pedestrian has arrived.
    pub horizon_secs: f32,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Call the observer's trace hook every N ticks.  0 disables tracing.
    pub trace_interval_ticks: u64,
}

impl SimConfig {
    /// `true` once `now` has passed the simulation horizon.
    #[inline]
    pub fn time_up(&self, now: f32) -> bool {
        now > self.horizon_secs
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            time_step:            1.0,
            horizon_secs:         1_000.0,
            seed:                 42,
            trace_interval_ticks: 1,
        }
    }
}
