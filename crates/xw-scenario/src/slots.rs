//! Ranked coordinate tables: curb queue slots and median buffer slots.
//!
//! Both tables are *ranked*: lower indices are preferred positions (closer
//! to the curb cut / crossing line).  The allocator prefers the primary
//! prefix of a [`SlotTable`]; the congestion resolver moves along
//! [`BufferRanking`] adjacency.

use xw_core::Vec2;

use crate::{ScenarioError, ScenarioResult};

// ── SlotTable ─────────────────────────────────────────────────────────────────

/// Ranked queueing coordinates for one curb.
///
/// The first `primary_len` entries form the primary pool; the remainder is
/// the secondary (overflow) pool used only once the primary is saturated.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotTable {
    slots:       Vec<Vec2>,
    primary_len: usize,
}

impl SlotTable {
    pub fn new(slots: Vec<Vec2>, primary_len: usize) -> ScenarioResult<Self> {
        if slots.is_empty() {
            return Err(ScenarioError::Validation("slot table is empty".into()));
        }
        if primary_len == 0 || primary_len > slots.len() {
            return Err(ScenarioError::Validation(format!(
                "primary pool length {primary_len} not in 1..={}",
                slots.len()
            )));
        }
        Ok(Self { slots, primary_len })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn primary_len(&self) -> usize {
        self.primary_len
    }

    #[inline]
    pub fn get(&self, rank: usize) -> Vec2 {
        self.slots[rank]
    }

    /// The primary (preferred) pool.
    #[inline]
    pub fn primary(&self) -> &[Vec2] {
        &self.slots[..self.primary_len]
    }

    /// The secondary (overflow) pool.  May be empty.
    #[inline]
    pub fn secondary(&self) -> &[Vec2] {
        &self.slots[self.primary_len..]
    }

    pub fn all(&self) -> &[Vec2] {
        &self.slots
    }
}

// ── BufferRanking ─────────────────────────────────────────────────────────────

/// Direction of a neighbor step along the buffer ranking.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RankDirection {
    Predecessor,
    Successor,
}

/// Ordered median-refuge coordinates.
///
/// Buffer goals are always assigned *from this table*, so [`rank_of`]
/// resolves a goal back to its rank by exact coordinate match — no proximity
/// tolerance involved.
///
/// [`rank_of`]: BufferRanking::rank_of
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BufferRanking {
    slots: Vec<Vec2>,
}

impl BufferRanking {
    pub fn new(slots: Vec<Vec2>) -> ScenarioResult<Self> {
        if slots.is_empty() {
            return Err(ScenarioError::Validation("buffer ranking is empty".into()));
        }
        Ok(Self { slots })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn get(&self, rank: usize) -> Vec2 {
        self.slots[rank]
    }

    pub fn all(&self) -> &[Vec2] {
        &self.slots
    }

    /// Rank of `coord` if it is one of the ranked buffer slots.
    pub fn rank_of(&self, coord: Vec2) -> Option<usize> {
        self.slots.iter().position(|&s| s == coord)
    }

    /// The neighboring rank in `dir`, clamped at the ranking boundaries.
    ///
    /// At a boundary the only available neighbor is returned regardless of
    /// `dir` (rank 0 has no predecessor; the last rank has no successor).
    pub fn neighbor(&self, rank: usize, dir: RankDirection) -> usize {
        let last = self.slots.len() - 1;
        match dir {
            RankDirection::Predecessor if rank == 0 => (rank + 1).min(last),
            RankDirection::Predecessor => rank - 1,
            RankDirection::Successor if rank >= last => rank.saturating_sub(1),
            RankDirection::Successor => rank + 1,
        }
    }
}
