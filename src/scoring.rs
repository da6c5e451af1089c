//! Top-2 bucket scoring.
//!
//! Both the per-keyword scorer and the cross-keyword aggregator use the same
//! running top-2 accumulator. Comparisons are `>=`, so a later value equal to
//! the current maximum takes the top slot and demotes the earlier one.
//!
//! `(0, 0)` is the "no signal" sentinel: percentage 0 at bucket 0.

use serde::Serialize;

/// A `(percentage, bucket_index)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BucketScore {
    pub percentage: u32,
    pub bucket: usize,
}

impl BucketScore {
    pub const SENTINEL: BucketScore = BucketScore {
        percentage: 0,
        bucket: 0,
    };

    pub fn new(percentage: u32, bucket: usize) -> Self {
        Self { percentage, bucket }
    }
}

/// Highest first (modulo the tie rule above).
pub type TopTwo = [BucketScore; 2];

pub const NO_SIGNAL: TopTwo = [BucketScore::SENTINEL, BucketScore::SENTINEL];

#[derive(Debug, Clone, Copy)]
struct Accumulator {
    first: BucketScore,
    second: BucketScore,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            first: BucketScore::SENTINEL,
            second: BucketScore::SENTINEL,
        }
    }

    fn offer(&mut self, candidate: BucketScore) {
        let v = candidate.percentage;
        if v >= self.first.percentage && v >= self.second.percentage {
            self.second = self.first;
            self.first = candidate;
        } else if v >= self.second.percentage {
            self.second = candidate;
        }
    }

    fn finish(self) -> TopTwo {
        [self.first, self.second]
    }
}

/// Top-2 `(percentage, bucket)` pairs of one keyword's row.
pub fn top_two(row: &[u32]) -> TopTwo {
    let mut acc = Accumulator::new();
    for (bucket, &pct) in row.iter().enumerate() {
        acc.offer(BucketScore::new(pct, bucket));
    }
    acc.finish()
}

/// Top-2 for a keyword that may be absent from the table.
pub fn top_two_or_sentinel(row: Option<&[u32]>) -> TopTwo {
    row.map(top_two).unwrap_or(NO_SIGNAL)
}

/// Combine per-keyword results into one top-2, using only each keyword's
/// highest score. Iteration order matters for ties.
pub fn aggregate<'a, I>(per_keyword: I) -> TopTwo
where
    I: IntoIterator<Item = &'a TopTwo>,
{
    let mut acc = Accumulator::new();
    for scores in per_keyword {
        acc.offer(scores[0]);
    }
    acc.finish()
}
