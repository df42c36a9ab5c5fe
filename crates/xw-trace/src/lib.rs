//! `xw-trace` — simulation trace writers for the rust_xwalk framework.
//!
//! Records the periodic position snapshots emitted by the sim's trace hook,
//! plus a per-snapshot summary of crossing state:
//!
//! | File                 | Columns                                           |
//! |----------------------|---------------------------------------------------|
//! | `positions.csv`      | `time, agent_id, x, y`                            |
//! | `tick_summaries.csv` | `time, live, left_violations, right_violations`   |
//!
//! Backends implement [`TraceSink`] and are driven by [`TraceObserver`],
//! which implements `xw_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use xw_trace::{CsvTraceWriter, TraceObserver};
//!
//! let writer = CsvTraceWriter::new(Path::new("./trace"))?;
//! let mut obs = TraceObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("trace error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod sink;


pub use csv::CsvTraceWriter;
pub use error::{TraceError, TraceResult};
pub use observer::TraceObserver;
pub use row::{PositionRow, TickSummaryRow};
pub use sink::TraceSink;
