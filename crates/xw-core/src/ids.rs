//! Strongly typed movement-engine agent identity.
//!
//! `AgentId` is the identity returned by `MovementEngine::add_agent`.  It is
//! assigned once per spawned pedestrian and never reused while the simulation
//! runs, so it is safe to use as the key of every per-agent table.  The inner
//! integer is `pub` for direct use against engine backends that index by
//! `usize`, but callers should prefer the `.index()` helper for clarity.

use std::fmt;

/// Stable identity of an agent inside the movement engine.
///
/// Max ~4.3 billion agents; the crossing scenarios in this workspace spawn a
/// few dozen.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u32);

impl AgentId {
    /// Sentinel meaning "no valid ID" — equivalent to `u32::MAX`.
    pub const INVALID: AgentId = AgentId(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for AgentId {
    /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentId({})", self.0)
    }
}

impl From<AgentId> for usize {
    #[inline(always)]
    fn from(id: AgentId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for AgentId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<AgentId, Self::Error> {
        u32::try_from(n).map(AgentId)
    }
}
