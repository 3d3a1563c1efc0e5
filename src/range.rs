use crate::error::{BitSetError, Result};
use core::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo};

/// A half-open interval `[start, end)` of bit indices.
///
/// A missing end means "up to the length of the bitset", so the default value
/// covers the whole set. Every range operation on [`BitSet`] accepts anything
/// that converts into a `BitRange`: the standard range types and `(start, end)`
/// pairs.
///
/// # Examples
/// ```
/// use block_bitset::{BitRange, BitSet};
///
/// let mut set = BitSet::with_capacity(10);
/// set.insert_range(2..5).unwrap();
/// set.insert_range((7, 9)).unwrap();
/// assert_eq!(set.count_ones(BitRange::full()).unwrap(), 5);
/// assert_eq!(set.count_ones(..5).unwrap(), 3);
/// ```
///
/// [`BitSet`]: crate::BitSet
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitRange {
    start: usize,
    end: Option<usize>,
}

impl BitRange {
    /// The range covering every bit of the set it is applied to.
    pub const fn full() -> Self {
        Self {
            start: 0,
            end: None,
        }
    }

    /// The range `[start, end)`.
    pub const fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// The range from `start` to the length of the set.
    pub const fn starting_at(start: usize) -> Self {
        Self { start, end: None }
    }

    /// The range from 0 to `end`.
    pub const fn up_to(end: usize) -> Self {
        Self {
            start: 0,
            end: Some(end),
        }
    }

    /// Resolves the range against a bitset of length `len`.
    ///
    /// Fails unless `start <= end <= len`.
    pub(crate) fn resolve(self, len: usize) -> Result<(usize, usize)> {
        let end = self.end.unwrap_or(len);
        if self.start > end || end > len {
            return Err(BitSetError::InvalidRange {
                start: self.start,
                end,
                len,
            });
        }
        Ok((self.start, end))
    }
}

impl From<Range<usize>> for BitRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<RangeFrom<usize>> for BitRange {
    fn from(range: RangeFrom<usize>) -> Self {
        Self::starting_at(range.start)
    }
}

impl From<RangeTo<usize>> for BitRange {
    fn from(range: RangeTo<usize>) -> Self {
        Self::up_to(range.end)
    }
}

impl From<RangeFull> for BitRange {
    fn from(_: RangeFull) -> Self {
        Self::full()
    }
}

impl From<RangeInclusive<usize>> for BitRange {
    fn from(range: RangeInclusive<usize>) -> Self {
        // An exhausted inclusive range is empty; `end + 1` would overstate it.
        if range.is_empty() {
            return Self::new(*range.start(), *range.start());
        }
        Self::new(*range.start(), range.end().saturating_add(1))
    }
}

impl From<(usize, usize)> for BitRange {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}
