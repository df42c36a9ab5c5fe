//! `TraceObserver<S>` — bridges `SimObserver` to a `TraceSink`.

use xw_agents::ViolationCounters;
use xw_core::{AgentId, Segment, Vec2};
use xw_sim::SimObserver;

use crate::row::{PositionRow, TickSummaryRow};
use crate::sink::TraceSink;
use crate::TraceError;

/// A [`SimObserver`] that writes position snapshots and summaries to any
/// [`TraceSink`] backend.
///
/// Errors from the sink are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct TraceObserver<S: TraceSink> {
    sink:       S,
    last_error: Option<TraceError>,
}

impl<S: TraceSink> TraceObserver<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<TraceError> {
        self.last_error.take()
    }

    /// Unwrap the inner sink (e.g. to inspect files after the sim).
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn store_err(&mut self, result: crate::TraceResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<S: TraceSink> SimObserver for TraceObserver<S> {
    fn on_trace(
        &mut self,
        time:      f32,
        positions: &[(AgentId, Vec2)],
        counters:  &ViolationCounters,
    ) {
        let rows: Vec<PositionRow> = positions
            .iter()
            .map(|&(agent, p)| PositionRow { time, agent_id: agent.0, x: p.x, y: p.y })
            .collect();
        if !rows.is_empty() {
            let result = self.sink.write_positions(&rows);
            self.store_err(result);
        }

        let summary = TickSummaryRow {
            time,
            live:             positions.len() as u64,
            left_violations:  counters.segment(Segment::Left),
            right_violations: counters.segment(Segment::Right),
        };
        let result = self.sink.write_summary(&summary);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_time: f32) {
        let result = self.sink.finish();
        self.store_err(result);
    }
}
