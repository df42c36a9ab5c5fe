//! Crossing geometry enums shared across all `xw-*` crates.
//!
//! The crossing has two origin curbs and one median refuge ("buffer")
//! between them.  `Side` names the curb a pedestrian arrives on; `Segment`
//! names one of the two road halves a crossing traverses.  A full crossing
//! from the left curb walks the *left* segment (curb → median), waits, then
//! the *right* segment (median → far curb), and vice versa.

/// The curb a pedestrian arrives on.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// The road segment crossed when leaving this side's curb for the median.
    #[inline]
    pub fn origin_segment(self) -> Segment {
        match self {
            Side::Left  => Segment::Left,
            Side::Right => Segment::Right,
        }
    }

    /// The road segment crossed when leaving the median for the far curb.
    #[inline]
    pub fn far_segment(self) -> Segment {
        match self {
            Side::Left  => Segment::Right,
            Side::Right => Segment::Left,
        }
    }

    /// Human-readable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left  => "left",
            Side::Right => "right",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Side {
    type Err = crate::XwError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" | "Left" | "L"  => Ok(Side::Left),
            "right" | "Right" | "R" => Ok(Side::Right),
            other => Err(crate::XwError::Parse(format!("unknown side {other:?}"))),
        }
    }
}

/// One of the two road halves separated by the median.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Segment {
    Left,
    Right,
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Segment::Left  => "left-segment",
            Segment::Right => "right-segment",
        })
    }
}
