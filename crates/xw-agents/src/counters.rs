//! The two shared violation counters.
//!
//! One counter per road segment, counting pedestrians currently crossing
//! that segment against their right-of-way.  Incremented when a record
//! begins crossing a segment, decremented when it completes that stage —
//! so once every spawned pedestrian has arrived, both counters are back at
//! zero.

use xw_core::Segment;

/// Live violation counts per road segment.  Never negative.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViolationCounters {
    left:  u32,
    right: u32,
}

impl ViolationCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for one segment.
    #[inline]
    pub fn segment(&self, segment: Segment) -> u32 {
        match segment {
            Segment::Left  => self.left,
            Segment::Right => self.right,
        }
    }

    /// Combined count across both segments — the quantity origin-stage
    /// decisions compare against.
    #[inline]
    pub fn combined(&self) -> u32 {
        self.left + self.right
    }

    /// A pedestrian began crossing `segment`.
    pub fn increment(&mut self, segment: Segment) {
        match segment {
            Segment::Left  => self.left += 1,
            Segment::Right => self.right += 1,
        }
    }

    /// A pedestrian completed its crossing of `segment`.
    ///
    /// Saturates at zero; a decrement without a matching increment is a
    /// logic bug upstream and debug-asserted.
    pub fn decrement(&mut self, segment: Segment) {
        let count = match segment {
            Segment::Left  => &mut self.left,
            Segment::Right => &mut self.right,
        };
        debug_assert!(*count > 0, "decrement of zero {segment} counter");
        *count = count.saturating_sub(1);
    }
}

impl std::fmt::Display for ViolationCounters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "violations(left={}, right={})", self.left, self.right)
    }
}
