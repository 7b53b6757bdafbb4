//! Inclusive numeric ranges over IPv4 address integers.

use serde::Serialize;
use std::fmt;

/// An inclusive `[min, max]` range of `u32` values.
///
/// The constructors keep `min <= max`. Inside a [`RangeTable`](crate::RangeTable)
/// the bounds are only ever widened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Interval {
    pub(crate) min: u32,
    pub(crate) max: u32,
}

impl Interval {
    /// Create an interval, returning `None` if `min > max`.
    pub fn new(min: u32, max: u32) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    /// Interval covering a single value.
    pub fn single(value: u32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Lower bound.
    pub fn min(&self) -> u32 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// `true` if `min <= value <= max`.
    #[inline]
    pub fn contains(&self, value: u32) -> bool {
        self.min <= value && value <= self.max
    }

    /// `true` if the whole interval lies below `value`.
    #[inline]
    pub fn precedes(&self, value: u32) -> bool {
        value > self.max
    }

    /// `true` if the whole interval lies above `value`.
    #[inline]
    pub fn follows(&self, value: u32) -> bool {
        value < self.min
    }

    /// `true` if both bounds of `other` fall inside this interval.
    #[inline]
    pub fn covers(&self, other: &Interval) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}
