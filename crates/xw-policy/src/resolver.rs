//! Buffer congestion repair.
//!
//! The median refuge is a handful of ranked slots; crossing pedestrians can
//! be steering toward a slot somebody else is already standing on.  This
//! pass is a heuristic local repair in two sweeps, both in store insertion
//! order:
//!
//! 1. **Collision repair** — for every ordered pair (i, j) of live records
//!    where i's current goal is a buffer slot and j is physically on it
//!    (distance² ≤ j's radius²), i's buffer goal moves to the ranking
//!    successor or predecessor, chosen uniformly at random and clamped at
//!    the ranking ends.  One shift per record per tick.
//! 2. **Goal dedup** — after the shifts, no two live records may share a
//!    buffer goal: a later record holding an already-claimed rank moves to
//!    the nearest unclaimed rank (lower neighbor probed first at each
//!    distance).  If every rank is claimed the duplicate stays put —
//!    scenarios are expected to provide at least as many buffer slots as
//!    concurrently live pedestrians.
//!
//! Neither sweep is deadlock-free; cyclic mutual displacement across ticks
//! is an accepted limitation of the model, not an error.

use std::collections::HashSet;

use xw_agents::RecordStore;
use xw_core::SimRng;
use xw_engine::MovementEngine;
use xw_scenario::{BufferRanking, RankDirection};

/// Run both repair sweeps; returns the number of reassigned goals.
pub fn resolve_buffer_congestion<E: MovementEngine>(
    ranking: &BufferRanking,
    store:   &mut RecordStore,
    engine:  &E,
    rng:     &mut SimRng,
) -> usize {
    let mut repaired = 0;

    // ── Sweep 1: goal-on-occupied-position repair ─────────────────────────
    for i in 0..store.len() {
        let (goal, arrived) = {
            let r = store.at(i);
            (r.goal, r.is_arrived())
        };
        if arrived {
            continue;
        }
        let Some(rank) = ranking.rank_of(goal) else {
            continue;
        };

        let blocked = (0..store.len()).any(|j| {
            if j == i {
                return false;
            }
            let other = store.at(j);
            if other.is_arrived() {
                return false;
            }
            let radius = engine.radius(other.agent);
            engine.position(other.agent).dist_sq(goal) <= radius * radius
        });

        if blocked {
            let dir = if rng.gen_bool(0.5) {
                RankDirection::Successor
            } else {
                RankDirection::Predecessor
            };
            let new_rank = ranking.neighbor(rank, dir);
            if new_rank != rank {
                let coord = ranking.get(new_rank);
                let record = store.at_mut(i);
                record.goal = coord;
                record.buffer_goal = coord;
                repaired += 1;
            }
        }
    }

    // ── Sweep 2: unique-buffer-goal enforcement ───────────────────────────
    let mut claimed: HashSet<usize> = HashSet::new();
    for i in 0..store.len() {
        let (goal, arrived) = {
            let r = store.at(i);
            (r.goal, r.is_arrived())
        };
        if arrived {
            continue;
        }
        let Some(rank) = ranking.rank_of(goal) else {
            continue;
        };
        if claimed.insert(rank) {
            continue;
        }

        let free_rank = (1..ranking.len()).find_map(|d| {
            let lower = rank.checked_sub(d).filter(|r| !claimed.contains(r));
            let upper = Some(rank + d)
                .filter(|&r| r < ranking.len() && !claimed.contains(&r));
            lower.or(upper)
        });

        if let Some(new_rank) = free_rank {
            claimed.insert(new_rank);
            let coord = ranking.get(new_rank);
            let record = store.at_mut(i);
            record.goal = coord;
            record.buffer_goal = coord;
            repaired += 1;
        }
    }

    repaired
}
