//! CSV trace backend.
//!
//! Creates two files in the configured trace directory:
//! - `positions.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::sink::TraceSink;
use crate::{PositionRow, TickSummaryRow, TraceResult};

/// Writes trace output to two CSV files.
pub struct CsvTraceWriter {
    positions: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvTraceWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> TraceResult<Self> {
        let mut positions = Writer::from_path(dir.join("positions.csv"))?;
        positions.write_record(["time", "agent_id", "x", "y"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["time", "live", "left_violations", "right_violations"])?;

        Ok(Self {
            positions,
            summaries,
            finished: false,
        })
    }
}

impl TraceSink for CsvTraceWriter {
    fn write_positions(&mut self, rows: &[PositionRow]) -> TraceResult<()> {
        for row in rows {
            self.positions.write_record(&[
                row.time.to_string(),
                row.agent_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &TickSummaryRow) -> TraceResult<()> {
        self.summaries.write_record(&[
            row.time.to_string(),
            row.live.to_string(),
            row.left_violations.to_string(),
            row.right_violations.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> TraceResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.positions.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
