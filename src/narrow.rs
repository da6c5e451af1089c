//! Range narrowing: collapse a top-2 result to its higher entry when the
//! percentage gap is large enough.

use crate::scoring::{BucketScore, TopTwo};

/// Gap (in percentage points) at or above which only the higher bucket is kept.
pub const DEFAULT_NARROW_GAP: u32 = 10;

/// One or two retained buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Narrowed {
    Single(BucketScore),
    Pair(BucketScore, BucketScore),
}

impl Narrowed {
    /// Retained pairs in order.
    pub fn scores(&self) -> Vec<BucketScore> {
        match *self {
            Narrowed::Single(a) => vec![a],
            Narrowed::Pair(a, b) => vec![a, b],
        }
    }
}

/// Keep only the higher pair when `|p1 - p2| >= gap`, otherwise keep both unchanged.
pub fn narrow(top: TopTwo, gap: u32) -> Narrowed {
    let [a, b] = top;
    if a.percentage.abs_diff(b.percentage) >= gap {
        if a.percentage >= b.percentage {
            Narrowed::Single(a)
        } else {
            Narrowed::Single(b)
        }
    } else {
        Narrowed::Pair(a, b)
    }
}
