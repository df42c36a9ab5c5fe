//! `xw-scenario` — static crossing configuration, expressed as data.
//!
//! Everything in this crate is startup configuration: the literal values are
//! an experiment's parameters, not logic.  The policy crate consumes these
//! tables uniformly; no table value is ever hardcoded outside a scenario.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`arrivals`]   | `ArrivalEvent`, per-side schedules, CSV loader            |
//! | [`slots`]      | `SlotTable` (ranked queue slots), `BufferRanking`         |
//! | [`thresholds`] | `ThresholdTable` — (wait bracket × hurry) → tolerance     |
//! | [`phases`]     | `PhaseRule`, `PhasePolicy` — signal-phase windows         |
//! | [`scenario`]   | `Scenario`, `SideConfig` — the assembled configuration    |
//! | [`error`]      | `ScenarioError`, `ScenarioResult<T>`                      |

pub mod arrivals;
pub mod error;
pub mod phases;
pub mod scenario;
pub mod slots;
pub mod thresholds;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use arrivals::{load_arrivals_csv, load_arrivals_reader, ArrivalEvent, ArrivalSchedule};
pub use error::{ScenarioError, ScenarioResult};
pub use phases::{PhasePolicy, PhaseRule};
pub use scenario::{Scenario, SideConfig};
pub use slots::{BufferRanking, RankDirection, SlotTable};
pub use thresholds::ThresholdTable;
