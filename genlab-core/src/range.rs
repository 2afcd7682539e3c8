//! Size-scaled ranges for numeric generators.

use crate::data::Size;
use crate::error::{GenlabError, Result};
use std::fmt;

/// How a range widens as the size parameter grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distribution {
    /// Full span at every size.
    Uniform,
    /// Span grows linearly with size, away from the origin.
    Linear,
    /// Span grows exponentially with size; small values dominate.
    Exponential,
}

/// Bounds, a shrink origin and a distribution.
///
/// The origin is where shrinking heads; constructors place it at zero when
/// zero lies inside the bounds, otherwise at the bound nearest zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range<T> {
    pub min: T,
    pub max: T,
    pub origin: T,
    pub distribution: Distribution,
}

impl<T> Range<T>
where
    T: Copy + PartialOrd + Default + fmt::Debug,
{
    pub fn new(min: T, max: T) -> Self {
        Self::with_distribution(min, max, Distribution::Uniform)
    }

    pub fn linear(min: T, max: T) -> Self {
        Self::with_distribution(min, max, Distribution::Linear)
    }

    pub fn exponential(min: T, max: T) -> Self {
        Self::with_distribution(min, max, Distribution::Exponential)
    }

    /// A range holding exactly one value.
    pub fn constant(value: T) -> Self {
        Range {
            min: value,
            max: value,
            origin: value,
            distribution: Distribution::Uniform,
        }
    }

    /// Uniform range that shrinks towards `origin` instead of zero.
    pub fn from_origin(origin: T, min: T, max: T) -> Self {
        Range {
            min,
            max,
            origin: clamp(origin, min, max),
            distribution: Distribution::Uniform,
        }
    }

    fn with_distribution(min: T, max: T, distribution: Distribution) -> Self {
        Range {
            min,
            max,
            origin: clamp(T::default(), min, max),
            distribution,
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        self.min <= *value && *value <= self.max
    }

    /// Reject inverted bounds or an origin outside them.
    pub fn validate(&self) -> Result<()> {
        if !(self.min <= self.max) {
            return Err(GenlabError::InvalidGenerator {
                message: format!(
                    "range minimum {:?} exceeds maximum {:?}",
                    self.min, self.max
                ),
            });
        }
        if !self.contains(&self.origin) {
            return Err(GenlabError::InvalidGenerator {
                message: format!(
                    "range origin {:?} outside {:?}..={:?}",
                    self.origin, self.min, self.max
                ),
            });
        }
        Ok(())
    }
}

fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Integer types that ranges and integer generators work over.
pub trait Integral: Copy + Ord + Default + fmt::Debug + 'static {
    const MIN: Self;
    const MAX: Self;

    fn to_i128(self) -> i128;

    /// Callers only pass values already inside `MIN..=MAX`.
    fn from_i128(value: i128) -> Self;
}

macro_rules! impl_integral {
    ($($t:ty),*) => {
        $(
            impl Integral for $t {
                const MIN: Self = <$t>::MIN;
                const MAX: Self = <$t>::MAX;

                fn to_i128(self) -> i128 {
                    self as i128
                }

                fn from_i128(value: i128) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_integral!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl<T: Integral> Range<T> {
    /// The whole domain of `T`, growing linearly with size.
    pub fn full() -> Self {
        Range::linear(T::MIN, T::MAX)
    }

    /// Bounds reachable at `size`, always within `min..=max`.
    ///
    /// Inverted ranges are read between their endpoints; `validate` is the
    /// place to reject them.
    pub fn bounds(&self, size: Size) -> (T, T) {
        let (a, b) = (self.min.to_i128(), self.max.to_i128());
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        let origin = self.origin.to_i128().clamp(min, max);

        let (lo, hi) = match self.distribution {
            Distribution::Uniform => (min, max),
            Distribution::Linear => (
                origin - scale_linear(origin - min, size),
                origin + scale_linear(max - origin, size),
            ),
            Distribution::Exponential => (
                origin - scale_exponential(origin - min, size),
                origin + scale_exponential(max - origin, size),
            ),
        };

        (
            T::from_i128(lo.clamp(min, max)),
            T::from_i128(hi.clamp(min, max)),
        )
    }

    pub(crate) fn shrink_origin(&self) -> i128 {
        let (a, b) = (self.min.to_i128(), self.max.to_i128());
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        self.origin.to_i128().clamp(min, max)
    }
}

fn scale_linear(span: i128, size: Size) -> i128 {
    (span as f64 * size.ratio()).round() as i128
}

fn scale_exponential(span: i128, size: Size) -> i128 {
    ((span as f64 + 1.0).powf(size.ratio()) - 1.0).round() as i128
}

/// Shrink candidates for `x` moving towards `destination`: the destination
/// itself, then points closing half of the remaining distance each time.
pub fn towards(destination: i128, x: i128) -> Vec<i128> {
    if destination == x {
        return Vec::new();
    }

    let diff = x / 2 - destination / 2;
    let mut result = vec![destination];
    let mut half = diff;
    while half != 0 {
        let candidate = x - half;
        if candidate != destination && result.last() != Some(&candidate) {
            result.push(candidate);
        }
        half /= 2;
    }
    result
}
