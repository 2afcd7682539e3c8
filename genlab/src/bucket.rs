//! Bucketing of counts into fixed-width report ranges.

use crate::{GenlabError, Result};
use std::fmt;

/// A half-open range `lower..upper` whose bounds are multiples of its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bucket {
    pub lower: i64,
    pub upper: i64,
}

impl Bucket {
    pub fn width(&self) -> i64 {
        self.upper - self.lower
    }

    pub fn contains(&self, n: i64) -> bool {
        self.lower <= n && n < self.upper
    }

    /// Report payload such as `"dupes: 0-5"`.
    pub fn label(&self, prefix: &str) -> String {
        format!("{prefix}: {self}")
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lower, self.upper)
    }
}

impl From<Bucket> for (i64, i64) {
    fn from(bucket: Bucket) -> Self {
        (bucket.lower, bucket.upper)
    }
}

/// Map `n` to the `width`-wide bucket holding it.
///
/// Uses floor division, so negative counts land in the bucket below zero
/// (`to_range(5, -1)` is `-5..0`) and `lower <= n < upper` always holds.
pub fn to_range(width: i64, n: i64) -> Result<Bucket> {
    if width <= 0 {
        return Err(GenlabError::InvalidArgument {
            message: format!("bucket width must be positive, got {width}"),
        });
    }

    let base = n.div_euclid(width);
    let overflow = || GenlabError::InvalidArgument {
        message: format!("bucket of width {width} around {n} overflows i64"),
    };
    let lower = base.checked_mul(width).ok_or_else(overflow)?;
    let upper = lower.checked_add(width).ok_or_else(overflow)?;

    Ok(Bucket { lower, upper })
}
