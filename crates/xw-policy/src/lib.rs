//! `xw-policy` — the per-tick crossing logic.
//!
//! Everything in this crate runs between two consecutive engine steps, as
//! sequential exclusive passes over the shared [`RecordStore`] and
//! [`ViolationCounters`].  Pass order within a tick, and record order within
//! a pass (store insertion order = ascending schedule order), are both fixed
//! so that which waiter wins a scarce threshold slot is deterministic.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`allocator`] | queue-slot selection: primary pool, bounded random draws      |
//! | [`spawner`]   | scheduled arrivals → engine agents + records, deferral retry  |
//! | [`decision`]  | gap-acceptance releases and the forced-release override       |
//! | [`resolver`]  | buffer congestion repair + unique-buffer-goal enforcement     |
//! | [`lifecycle`] | proximity completions, counter decrements, park-and-freeze    |
//!
//! [`RecordStore`]: xw_agents::RecordStore
//! [`ViolationCounters`]: xw_agents::ViolationCounters

pub mod allocator;
pub mod decision;
pub mod error;
pub mod lifecycle;
pub mod resolver;
pub mod spawner;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use allocator::{allocate_slot, MAX_DRAWS};
pub use decision::{run_decisions, DecisionOutcome};
pub use error::{PolicyError, PolicyResult};
pub use lifecycle::{advance_completions, LifecycleOutcome};
pub use resolver::resolve_buffer_congestion;
pub use spawner::{ArrivalSpawner, SpawnOutcome};
