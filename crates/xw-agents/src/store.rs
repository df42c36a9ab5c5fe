//! Identity-keyed, insertion-ordered pedestrian storage.
//!
//! # Ordering contract
//!
//! `iter()`/`iter_mut()` walk records in insertion order — which equals
//! ascending schedule order, because only the arrival spawner inserts.
//! Every per-tick pass (decision engine, resolver, lifecycle manager) uses
//! this order as its documented deterministic mutation order: whichever
//! waiter scans first wins a scarce threshold slot, identically on every
//! run with the same seed.
//!
//! # Keying
//!
//! Records are looked up by stable engine [`AgentId`], never by spawn-array
//! position.  The engine may host agents this store knows nothing about
//! (e.g. legal crossers owned by other layers), so ids are not assumed
//! dense; an `FxHashMap` maps id → record index.

use rustc_hash::FxHashMap;

use xw_core::{AgentId, Side, Vec2};

use crate::{PedestrianRecord, StoreError, StoreResult};

/// Append-only collection of all spawned pedestrians, keyed by engine id.
#[derive(Default)]
pub struct RecordStore {
    records: Vec<PedestrianRecord>,
    index:   FxHashMap<AgentId, usize>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a freshly spawned record.
    ///
    /// Fails if a record for the same engine id already exists — engine
    /// identities are never reused while the simulation runs.
    pub fn insert(&mut self, record: PedestrianRecord) -> StoreResult<()> {
        let agent = record.agent;
        if self.index.contains_key(&agent) {
            return Err(StoreError::DuplicateAgent(agent));
        }
        self.index.insert(agent, self.records.len());
        self.records.push(record);
        Ok(())
    }

    #[inline]
    pub fn get(&self, agent: AgentId) -> Option<&PedestrianRecord> {
        self.index.get(&agent).map(|&i| &self.records[i])
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> Option<&mut PedestrianRecord> {
        self.index.get(&agent).copied().map(|i| &mut self.records[i])
    }

    /// Records in insertion (schedule) order.
    pub fn iter(&self) -> impl Iterator<Item = &PedestrianRecord> {
        self.records.iter()
    }

    /// Mutable records in insertion (schedule) order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PedestrianRecord> {
        self.records.iter_mut()
    }

    /// Positional access for index-driven passes (resolver pair scan).
    #[inline]
    pub fn at(&self, i: usize) -> &PedestrianRecord {
        &self.records[i]
    }

    #[inline]
    pub fn at_mut(&mut self, i: usize) -> &mut PedestrianRecord {
        &mut self.records[i]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records that have not yet arrived.
    pub fn live_count(&self) -> usize {
        self.records.iter().filter(|r| !r.is_arrived()).count()
    }

    /// `true` if any live record of `side` currently holds `coord` as its
    /// steering goal.  This is the slot-occupancy test: a slot is taken
    /// exactly while some same-side waiter still aims at it.
    pub fn goal_occupied(&self, side: Side, coord: Vec2) -> bool {
        self.records
            .iter()
            .any(|r| r.side == side && !r.is_arrived() && r.goal == coord)
    }
}
