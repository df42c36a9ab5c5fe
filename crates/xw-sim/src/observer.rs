//! Simulation observer trait for progress reporting and data collection.

use xw_agents::ViolationCounters;
use xw_core::{AgentId, Vec2};

/// Per-tick pass tallies, handed to [`SimObserver::on_tick_end`].
///
/// All counts are for the tick that just finished, except `live`, which is
/// the number of not-yet-arrived records after the tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Arrivals spawned (including retried deferrals).
    pub spawned: usize,
    /// Arrivals (re-)deferred for lack of a free queue slot.
    pub deferred: usize,
    /// Threshold-gated releases.
    pub released: usize,
    /// Unconditional releases past the always-open cutoff.
    pub forced: usize,
    /// Buffer goals rewritten by the congestion resolver.
    pub repaired: usize,
    /// Records that completed their first crossing leg.
    pub reached_buffer: usize,
    /// Records that reached their final destination.
    pub arrived: usize,
    /// Not-yet-arrived records after the tick.
    pub live: usize,
}

/// Callbacks invoked by [`CrossingSim::run`][crate::CrossingSim::run] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u32 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, time: f32, stats: &TickStats) {
///         if time as u32 % self.interval == 0 {
///             println!("t = {time}: {} live", stats.live);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    ///
    /// `time` is the simulated start of the tick's window.
    fn on_tick_start(&mut self, _time: f32) {}

    /// Called at the end of each tick, after completions are processed.
    fn on_tick_end(&mut self, _time: f32, _stats: &TickStats) {}

    /// Called at trace intervals (every `config.trace_interval_ticks` ticks),
    /// after the steering pass and before the engine step.
    ///
    /// `positions` holds the current engine position of every live record in
    /// store insertion order; parked bodies are excluded.  `counters` is the
    /// violation state at trace time, so trace writers can record a summary
    /// row without the sim knowing about any specific output format.
    fn on_trace(
        &mut self,
        _time:      f32,
        _positions: &[(AgentId, Vec2)],
        _counters:  &ViolationCounters,
    ) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_time: f32) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
