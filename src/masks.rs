use crate::error::Result;
use crate::range::BitRange;
use core::cmp::Ordering;
use core::iter::FusedIterator;

/// The storage word of a [`BitSet`](crate::BitSet).
pub type Block = u32;

/// Number of bits in one [`Block`].
pub const BITS: usize = Block::BITS as usize;

/// Computes the number of blocks needed to store `bit_count` bits.
///
/// # Examples
/// ```
/// use block_bitset::block_count;
///
/// assert_eq!(block_count(0), 0);
/// assert_eq!(block_count(32), 1);
/// assert_eq!(block_count(33), 2);
/// ```
pub const fn block_count(bit_count: usize) -> usize {
    bit_count.div_ceil(BITS)
}

#[inline]
pub(crate) const fn div_rem(bit: usize) -> (usize, usize) {
    (bit / BITS, bit % BITS)
}

/// Mask of the bits of the last block that lie below `len`.
///
/// All ones when `len` ends on a block boundary.
#[inline]
pub(crate) const fn tail_mask(len: usize) -> Block {
    match len % BITS {
        0 => Block::MAX,
        rem => Block::MAX >> (BITS - rem),
    }
}

/// Yields the `(block, mask)` steps covering exactly the bits of a range.
///
/// The first block gets the bits at or above `start % BITS`, the last block the
/// bits below `end % BITS` and every block in between a full mask. A zero mask
/// ends the sequence, so a range ending on a block boundary never yields the
/// block past it.
#[derive(Debug, Clone)]
pub(crate) struct Masks {
    first_block: usize,
    first_mask: Block,
    last_block: usize,
    last_mask: Block,
}

impl Masks {
    /// Resolves `range` against `len` and builds the generator for it.
    pub(crate) fn new(range: impl Into<BitRange>, len: usize) -> Result<Self> {
        let (start, end) = range.into().resolve(len)?;
        Ok(Self::spanning(start, end))
    }

    /// Generator for `[start, end)`; the caller guarantees `start <= end`.
    pub(crate) fn spanning(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "range {start}..{end} is reversed");
        let (first_block, first_rem) = div_rem(start);
        let (last_block, last_rem) = div_rem(end);
        Self {
            first_block,
            first_mask: Block::MAX << first_rem,
            last_block,
            // `MAX >> (BITS - last_rem)` without overflowing when last_rem == 0
            last_mask: (Block::MAX >> 1) >> (BITS - last_rem - 1),
        }
    }
}

impl Iterator for Masks {
    type Item = (usize, Block);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self.first_block.cmp(&self.last_block) {
            Ordering::Less => {
                let step = (self.first_block, self.first_mask);
                self.first_block += 1;
                self.first_mask = Block::MAX;
                Some(step)
            }
            Ordering::Equal => {
                let mask = self.first_mask & self.last_mask;
                self.first_block += 1;
                if mask == 0 {
                    None
                } else {
                    Some((self.first_block - 1, mask))
                }
            }
            Ordering::Greater => None,
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        // the final step may be dropped if its mask is empty
        let upper = (self.last_block + 1).saturating_sub(self.first_block);
        (upper.saturating_sub(1), Some(upper))
    }
}

impl FusedIterator for Masks {}
