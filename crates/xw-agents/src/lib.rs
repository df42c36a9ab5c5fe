//! `xw-agents` — per-pedestrian state and the shared crossing counters.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`record`]   | `PedestrianRecord`, `Stage` — the lifecycle state machine  |
//! | [`store`]    | `RecordStore` — identity-keyed, insertion-ordered storage  |
//! | [`counters`] | `ViolationCounters` — the two shared segment counters      |
//! | [`error`]    | `StoreError`, `StoreResult<T>`                             |

pub mod counters;
pub mod error;
pub mod record;
pub mod store;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use counters::ViolationCounters;
pub use error::{StoreError, StoreResult};
pub use record::{PedestrianRecord, Stage};
pub use store::RecordStore;
