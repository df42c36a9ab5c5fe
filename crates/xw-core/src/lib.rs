//! `xw-core` — foundational types for the `rust_xwalk` crossing framework.
//!
//! This crate is a dependency of every other `xw-*` crate.  It intentionally
//! has no `xw-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                              |
//! |------------|-------------------------------------------------------|
//! | [`ids`]    | `AgentId` — stable movement-engine identity           |
//! | [`vec2`]   | `Vec2` — planar coordinate / velocity                 |
//! | [`time`]   | `TickWindow`, `SimConfig`                             |
//! | [`rng`]    | `SimRng` — injected, seedable random source           |
//! | [`side`]   | `Side`, `Segment` — crossing geometry enums           |
//! | [`error`]  | `XwError`, `XwResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod rng;
pub mod side;
pub mod time;
pub mod vec2;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{XwError, XwResult};
pub use ids::AgentId;
pub use rng::SimRng;
pub use side::{Segment, Side};
pub use time::{SimConfig, TickWindow};
pub use vec2::Vec2;
