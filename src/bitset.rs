use crate::error::{BitSetError, Result};
use crate::iter::{Difference, Intersection, Ones, SymmetricDifference, Union, Zeroes};
use crate::masks::{BITS, Block, Masks, block_count, div_rem};
use crate::range::BitRange;
use core::fmt::{self, Binary, Debug, Display, Formatter, Write};
use core::hash::{Hash, Hasher};
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Index, Not};
use tracing::trace;

#[inline]
const fn bit_mask(bit_in_block: usize) -> Block {
    1 << bit_in_block
}

/// A growable set of bits packed into 32-bit [`Block`]s.
///
/// `len()` bits are addressable. Storage is `block_count(len())` blocks and the
/// padding bits of the last block always read as zero, so they never show up
/// in counts, iteration or set algebra.
///
/// Single-bit and range mutators are checked: they return a [`BitSetError`]
/// and leave the set untouched when the index or range does not fit. Lookups
/// with [`contains`] are total and read `false` past the end.
///
/// Two sets compare equal when their bits agree, with the shorter set read as
/// zero-extended to the longer length.
///
/// # Examples
/// ```
/// use block_bitset::BitSet;
///
/// let mut set = BitSet::with_capacity(10);
/// set.insert(3).unwrap();
/// set.insert_range(6..8).unwrap();
/// assert_eq!(set.ones().collect::<Vec<_>>(), [3, 6, 7]);
/// assert_eq!(format!("{set}"), "0001001100");
/// ```
///
/// [`contains`]: BitSet::contains
#[derive(Default)]
pub struct BitSet {
    pub(crate) blocks: Vec<Block>,
    pub(crate) length: usize,
}

impl BitSet {
    /// Creates an empty bitset with no addressable bits.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let set = BitSet::new();
    /// assert!(set.is_empty());
    /// assert_eq!(set.block_len(), 0);
    /// ```
    pub const fn new() -> Self {
        Self {
            blocks: Vec::new(),
            length: 0,
        }
    }

    /// Creates a bitset with `bits` addressable bits, all unset.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let set = BitSet::with_capacity(40);
    /// assert_eq!(set.len(), 40);
    /// assert_eq!(set.block_len(), 2);
    /// assert!(set.is_clear());
    /// ```
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            blocks: vec![0; block_count(bits)],
            length: bits,
        }
    }

    /// Creates a bitset with `bits` addressable bits, initialized from `blocks`.
    ///
    /// The block list is padded with zeros if it is too short and truncated if
    /// it is too long. Bits at or above `bits` in the last block are cleared.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let set = BitSet::with_capacity_and_blocks(4, [0b1_0100]);
    /// assert_eq!(format!("{set:b}"), "0010");
    /// ```
    pub fn with_capacity_and_blocks<I: IntoIterator<Item = Block>>(bits: usize, blocks: I) -> Self {
        let mut blocks: Vec<Block> = blocks.into_iter().collect();
        let wanted = block_count(bits);
        if blocks.len() != wanted {
            trace!(given = blocks.len(), wanted, "resizing adopted blocks");
            blocks.resize(wanted, 0);
        }
        let mut set = Self {
            blocks,
            length: bits,
        };
        set.clean_unused_bits();
        set
    }

    /// Creates the smallest bitset containing every index in `ones`.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let set = BitSet::from_ones(&[2, 3, 7]);
    /// assert_eq!(set.len(), 8);
    /// assert_eq!(set.ones().collect::<Vec<_>>(), [2, 3, 7]);
    /// ```
    pub fn from_ones(ones: &[usize]) -> Self {
        ones.iter().copied().collect()
    }

    /// Grows the set to `bits` addressable bits, all new bits unset.
    ///
    /// Does nothing if `bits <= len()`; the set never shrinks.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let mut set = BitSet::with_capacity(8);
    /// set.grow(100);
    /// assert_eq!(set.len(), 100);
    /// set.grow(10);
    /// assert_eq!(set.len(), 100);
    /// ```
    pub fn grow(&mut self, bits: usize) {
        if bits <= self.length {
            return;
        }
        let blocks = block_count(bits);
        if blocks != self.blocks.len() {
            trace!(from = self.length, to = bits, blocks, "growing bitset storage");
        }
        self.blocks.resize(blocks, 0);
        self.length = bits;
    }

    /// Grows the set to hold `bit` if needed, then sets it.
    ///
    /// Unlike [`insert`](BitSet::insert) this returns no error.
    ///
    /// # Panics
    /// Panics if `bit == usize::MAX`, which no length can cover.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let mut set = BitSet::new();
    /// set.grow_insert(40);
    /// assert_eq!(set.len(), 41);
    /// assert!(set.contains(40));
    /// ```
    pub fn grow_insert(&mut self, bit: usize) {
        let Some(bits) = bit.checked_add(1) else {
            panic!("bit index {bit} cannot be addressed");
        };
        self.grow(bits);
        let (block, item) = div_rem(bit);
        self.blocks[block] |= bit_mask(item);
    }

    /// Returns the number of addressable bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the set has no addressable bits.
    ///
    /// Use [`is_clear`](BitSet::is_clear) to check whether all bits are unset.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of storage blocks.
    #[inline]
    pub fn block_len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if no bit is set.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let mut set = BitSet::with_capacity(10);
    /// assert!(set.is_clear());
    /// set.insert(4).unwrap();
    /// assert!(!set.is_clear());
    /// ```
    pub fn is_clear(&self) -> bool {
        self.blocks.iter().all(|&block| block == 0)
    }

    /// Returns `true` if every addressable bit is set.
    ///
    /// An empty set is trivially full.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let mut set = BitSet::with_capacity(35);
    /// set.insert_range(..).unwrap();
    /// assert!(set.is_full());
    /// set.remove(34).unwrap();
    /// assert!(!set.is_full());
    /// ```
    pub fn is_full(&self) -> bool {
        self.all_set(Masks::spanning(0, self.length))
    }

    /// Unsets every bit. The length is kept.
    pub fn clear(&mut self) {
        self.blocks.fill(0);
    }

    #[inline]
    fn checked_idxs(&self, bit: usize) -> Result<(usize, usize)> {
        if bit < self.length {
            Ok(div_rem(bit))
        } else {
            Err(BitSetError::OutOfRange {
                bit,
                len: self.length,
            })
        }
    }

    #[inline]
    fn unchecked_idxs(&self, bit: usize) -> (usize, Block) {
        debug_assert!(
            bit < self.length,
            "bit index {bit} out of range for a bitset of length {}",
            self.length
        );
        let (block, item) = div_rem(bit);
        // padding past `len()` stays clear, so writes there are dropped
        let mask = if bit < self.length { bit_mask(item) } else { 0 };
        (block, mask)
    }

    /// Sets the bit at `bit`.
    ///
    /// # Errors
    /// Returns [`BitSetError::OutOfRange`] if `bit >= len()`.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::{BitSet, BitSetError};
    ///
    /// let mut set = BitSet::with_capacity(8);
    /// set.insert(3).unwrap();
    /// assert!(set.contains(3));
    /// assert_eq!(set.insert(8), Err(BitSetError::OutOfRange { bit: 8, len: 8 }));
    /// ```
    #[inline]
    pub fn insert(&mut self, bit: usize) -> Result<()> {
        let (block, item) = self.checked_idxs(bit)?;
        self.blocks[block] |= bit_mask(item);
        Ok(())
    }

    /// Unsets the bit at `bit`.
    ///
    /// # Errors
    /// Returns [`BitSetError::OutOfRange`] if `bit >= len()`.
    #[inline]
    pub fn remove(&mut self, bit: usize) -> Result<()> {
        let (block, item) = self.checked_idxs(bit)?;
        self.blocks[block] &= !bit_mask(item);
        Ok(())
    }

    /// Flips the bit at `bit`.
    ///
    /// # Errors
    /// Returns [`BitSetError::OutOfRange`] if `bit >= len()`.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let mut set = BitSet::with_capacity(8);
    /// set.toggle(4).unwrap();
    /// assert!(set.contains(4));
    /// set.toggle(4).unwrap();
    /// assert!(!set.contains(4));
    /// ```
    #[inline]
    pub fn toggle(&mut self, bit: usize) -> Result<()> {
        let (block, item) = self.checked_idxs(bit)?;
        self.blocks[block] ^= bit_mask(item);
        Ok(())
    }

    /// Sets the bit at `bit` to `enabled`.
    ///
    /// # Errors
    /// Returns [`BitSetError::OutOfRange`] if `bit >= len()`.
    #[inline]
    pub fn set(&mut self, bit: usize, enabled: bool) -> Result<()> {
        let (block, item) = self.checked_idxs(bit)?;
        if enabled {
            self.blocks[block] |= bit_mask(item);
        } else {
            self.blocks[block] &= !bit_mask(item);
        }
        Ok(())
    }

    /// Sets the bit at `bit` and returns its previous value.
    ///
    /// # Errors
    /// Returns [`BitSetError::OutOfRange`] if `bit >= len()`.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let mut set = BitSet::with_capacity(10_000);
    /// assert_eq!(set.put(5000), Ok(false));
    /// assert_eq!(set.put(5000), Ok(true));
    /// ```
    #[inline]
    pub fn put(&mut self, bit: usize) -> Result<bool> {
        let (block, item) = self.checked_idxs(bit)?;
        let previous = self.blocks[block] & bit_mask(item) != 0;
        self.blocks[block] |= bit_mask(item);
        Ok(previous)
    }

    /// Returns `true` if the bit at `bit` is set.
    ///
    /// Bits at or past `len()` read as unset.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let mut set = BitSet::with_capacity(8);
    /// set.insert(1).unwrap();
    /// assert!(set.contains(1));
    /// assert!(!set.contains(0));
    /// assert!(!set.contains(1000));
    /// ```
    #[inline]
    pub fn contains(&self, bit: usize) -> bool {
        if bit >= self.length {
            return false;
        }
        let (block, item) = div_rem(bit);
        self.blocks[block] & bit_mask(item) != 0
    }

    /// Copies the value of bit `from` into bit `to`.
    ///
    /// A `from` past the end reads as unset.
    ///
    /// # Errors
    /// Returns [`BitSetError::OutOfRange`] if `to >= len()`.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let mut set = BitSet::with_capacity(8);
    /// set.insert(2).unwrap();
    /// set.copy_bit(2, 5).unwrap();
    /// assert!(set.contains(5));
    /// set.copy_bit(100, 5).unwrap();
    /// assert!(!set.contains(5));
    /// ```
    pub fn copy_bit(&mut self, from: usize, to: usize) -> Result<()> {
        let enabled = self.contains(from);
        self.set(to, enabled)
    }

    /// Sets the bit at `bit` without reporting an out-of-range index.
    ///
    /// For hot loops whose indices are known to be in range. In release
    /// builds a `bit` that lands in the padding of the last block is ignored.
    ///
    /// # Panics
    /// Panics in debug builds if `bit >= len()`, and in every build if `bit`
    /// lies past the last block.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let mut set = BitSet::with_capacity(64);
    /// for bit in (0..64).step_by(8) {
    ///     set.insert_unchecked(bit);
    /// }
    /// assert_eq!(set.count_ones(..).unwrap(), 8);
    /// ```
    #[inline]
    pub fn insert_unchecked(&mut self, bit: usize) {
        let (block, mask) = self.unchecked_idxs(bit);
        self.blocks[block] |= mask;
    }

    /// Unsets the bit at `bit`; see [`insert_unchecked`](BitSet::insert_unchecked).
    #[inline]
    pub fn remove_unchecked(&mut self, bit: usize) {
        let (block, mask) = self.unchecked_idxs(bit);
        self.blocks[block] &= !mask;
    }

    /// Flips the bit at `bit`; see [`insert_unchecked`](BitSet::insert_unchecked).
    #[inline]
    pub fn toggle_unchecked(&mut self, bit: usize) {
        let (block, mask) = self.unchecked_idxs(bit);
        self.blocks[block] ^= mask;
    }

    /// Sets the bit at `bit` to `enabled`; see
    /// [`insert_unchecked`](BitSet::insert_unchecked).
    #[inline]
    pub fn set_unchecked(&mut self, bit: usize, enabled: bool) {
        let (block, mask) = self.unchecked_idxs(bit);
        if enabled {
            self.blocks[block] |= mask;
        } else {
            self.blocks[block] &= !mask;
        }
    }

    /// Sets the bit at `bit` and returns its previous value; see
    /// [`insert_unchecked`](BitSet::insert_unchecked).
    #[inline]
    pub fn put_unchecked(&mut self, bit: usize) -> bool {
        let (block, mask) = self.unchecked_idxs(bit);
        let previous = self.blocks[block] & mask != 0;
        self.blocks[block] |= mask;
        previous
    }

    /// Returns `true` if the bit at `bit` is set, skipping the length check
    /// of [`contains`](BitSet::contains).
    ///
    /// # Panics
    /// Panics in debug builds if `bit >= len()`, and in every build if `bit`
    /// lies past the last block.
    #[inline]
    pub fn contains_unchecked(&self, bit: usize) -> bool {
        let (block, mask) = self.unchecked_idxs(bit);
        self.blocks[block] & mask != 0
    }

    /// Copies bit `from` into bit `to` with neither index checked.
    ///
    /// # Panics
    /// Same as [`contains_unchecked`](BitSet::contains_unchecked) for `from`
    /// and [`insert_unchecked`](BitSet::insert_unchecked) for `to`.
    pub fn copy_bit_unchecked(&mut self, from: usize, to: usize) {
        let enabled = self.contains_unchecked(from);
        self.set_unchecked(to, enabled);
    }

    /// Sets every bit in `range`.
    ///
    /// # Errors
    /// Returns [`BitSetError::InvalidRange`] unless `start <= end <= len()`.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let mut set = BitSet::with_capacity(10);
    /// set.insert_range(2..6).unwrap();
    /// assert_eq!(set.ones().collect::<Vec<_>>(), [2, 3, 4, 5]);
    /// assert!(set.insert_range(5..11).is_err());
    /// ```
    pub fn insert_range(&mut self, range: impl Into<BitRange>) -> Result<()> {
        for (block, mask) in Masks::new(range, self.length)? {
            self.blocks[block] |= mask;
        }
        Ok(())
    }

    /// Unsets every bit in `range`.
    ///
    /// # Errors
    /// Returns [`BitSetError::InvalidRange`] unless `start <= end <= len()`.
    pub fn remove_range(&mut self, range: impl Into<BitRange>) -> Result<()> {
        for (block, mask) in Masks::new(range, self.length)? {
            self.blocks[block] &= !mask;
        }
        Ok(())
    }

    /// Flips every bit in `range`.
    ///
    /// # Errors
    /// Returns [`BitSetError::InvalidRange`] unless `start <= end <= len()`.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let mut set = BitSet::with_capacity(10);
    /// set.toggle_range(..).unwrap();
    /// set.toggle_range(4..8).unwrap();
    /// assert_eq!(set.ones().collect::<Vec<_>>(), [0, 1, 2, 3, 8, 9]);
    /// ```
    pub fn toggle_range(&mut self, range: impl Into<BitRange>) -> Result<()> {
        for (block, mask) in Masks::new(range, self.length)? {
            self.blocks[block] ^= mask;
        }
        Ok(())
    }

    /// Sets every bit in `range` to `enabled`.
    ///
    /// # Errors
    /// Returns [`BitSetError::InvalidRange`] unless `start <= end <= len()`.
    pub fn set_range(&mut self, range: impl Into<BitRange>, enabled: bool) -> Result<()> {
        if enabled {
            self.insert_range(range)
        } else {
            self.remove_range(range)
        }
    }

    /// Counts the set bits in `range`.
    ///
    /// # Errors
    /// Returns [`BitSetError::InvalidRange`] unless `start <= end <= len()`.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let mut set = BitSet::with_capacity(10_000);
    /// set.insert_range(1000..2000).unwrap();
    /// assert_eq!(set.count_ones(..).unwrap(), 1000);
    /// assert_eq!(set.count_ones(1500..).unwrap(), 500);
    /// ```
    pub fn count_ones(&self, range: impl Into<BitRange>) -> Result<usize> {
        Ok(Masks::new(range, self.length)?
            .map(|(block, mask)| (self.blocks[block] & mask).count_ones() as usize)
            .sum())
    }

    /// Counts the unset bits in `range`.
    ///
    /// # Errors
    /// Returns [`BitSetError::InvalidRange`] unless `start <= end <= len()`.
    pub fn count_zeroes(&self, range: impl Into<BitRange>) -> Result<usize> {
        Ok(Masks::new(range, self.length)?
            .map(|(block, mask)| (!self.blocks[block] & mask).count_ones() as usize)
            .sum())
    }

    /// Returns `true` if at least one bit in `range` is set.
    ///
    /// # Errors
    /// Returns [`BitSetError::InvalidRange`] unless `start <= end <= len()`.
    pub fn contains_any_in_range(&self, range: impl Into<BitRange>) -> Result<bool> {
        Ok(Masks::new(range, self.length)?.any(|(block, mask)| self.blocks[block] & mask != 0))
    }

    /// Returns `true` if every bit in `range` is set.
    ///
    /// # Errors
    /// Returns [`BitSetError::InvalidRange`] unless `start <= end <= len()`.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let mut set = BitSet::with_capacity(10_000);
    /// set.toggle_range(373..690).unwrap();
    /// assert!(set.contains_all_in_range(373..690).unwrap());
    /// assert!(!set.contains_all_in_range(372..690).unwrap());
    /// ```
    pub fn contains_all_in_range(&self, range: impl Into<BitRange>) -> Result<bool> {
        Ok(self.all_set(Masks::new(range, self.length)?))
    }

    fn all_set(&self, mut masks: Masks) -> bool {
        masks.all(|(block, mask)| self.blocks[block] & mask == mask)
    }

    /// Returns the raw storage blocks.
    ///
    /// Bit `i` of the set is bit `i % 32` of block `i / 32`.
    #[inline]
    pub fn as_slice(&self) -> &[Block] {
        &self.blocks
    }

    /// Returns a copy of the raw storage blocks.
    pub fn to_blocks(&self) -> Vec<Block> {
        self.blocks.clone()
    }

    /// Returns an iterator over the indices of set bits.
    ///
    /// The iterator is double-ended: `next` walks up from index 0 and
    /// `next_back` walks down from the last bit. It borrows the set, so the set
    /// cannot change while the iterator is alive:
    ///
    /// ```compile_fail
    /// use block_bitset::BitSet;
    ///
    /// let mut set = BitSet::with_capacity(8);
    /// let ones = set.ones();
    /// set.insert(3).unwrap();
    /// assert_eq!(ones.count(), 0);
    /// ```
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let set = BitSet::from_ones(&[0, 2, 40]);
    /// assert_eq!(set.ones().collect::<Vec<_>>(), [0, 2, 40]);
    /// assert_eq!(set.ones().rev().collect::<Vec<_>>(), [40, 2, 0]);
    /// ```
    #[inline]
    pub fn ones(&self) -> Ones<'_> {
        Ones::new(&self.blocks, self.length)
    }

    /// Returns an iterator over the indices of unset bits.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let set = BitSet::with_capacity_and_blocks(5, [0b10101]);
    /// assert_eq!(set.zeroes().collect::<Vec<_>>(), [1, 3]);
    /// ```
    #[inline]
    pub fn zeroes(&self) -> Zeroes<'_> {
        Zeroes::new(&self.blocks, self.length)
    }

    /// Returns a lazy iterator over the bits set in both `self` and `other`.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let mut a = BitSet::with_capacity(21);
    /// let mut b = BitSet::with_capacity(21);
    /// a.insert_range(..15).unwrap();
    /// b.insert_range(8..).unwrap();
    /// assert_eq!(a.intersection(&b).collect::<Vec<_>>(), (8..15).collect::<Vec<_>>());
    /// ```
    pub fn intersection<'a>(&'a self, other: &'a BitSet) -> Intersection<'a> {
        Intersection::new(self.ones(), other)
    }

    /// Returns a lazy iterator over the bits set in `self` or `other`.
    ///
    /// All of `self`'s ones come first, then the ones only `other` has.
    pub fn union<'a>(&'a self, other: &'a BitSet) -> Union<'a> {
        Union::new(self.ones(), other.difference(self))
    }

    /// Returns a lazy iterator over the bits set in `self` but not in `other`.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let mut a = BitSet::with_capacity(10);
    /// let mut b = BitSet::with_capacity(10);
    /// a.insert_range(..6).unwrap();
    /// b.insert_range(6..).unwrap();
    /// assert_eq!(a.difference(&b).collect::<Vec<_>>(), [0, 1, 2, 3, 4, 5]);
    /// ```
    pub fn difference<'a>(&'a self, other: &'a BitSet) -> Difference<'a> {
        Difference::new(self.ones(), other)
    }

    /// Returns a lazy iterator over the bits set in exactly one of `self` and
    /// `other`.
    pub fn symmetric_difference<'a>(&'a self, other: &'a BitSet) -> SymmetricDifference<'a> {
        SymmetricDifference::new(self.difference(other), other.difference(self))
    }

    /// In-place union: `self |= other`.
    ///
    /// `self` grows to `other.len()` if `other` is longer.
    pub fn union_with(&mut self, other: &BitSet) {
        self.grow(other.length);
        for (x, y) in self.blocks.iter_mut().zip(&other.blocks) {
            *x |= *y;
        }
    }

    /// In-place intersection: `self &= other`.
    ///
    /// The length of `self` is kept; bits past `other.len()` end up unset.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let mut a = BitSet::from_ones(&[2, 3, 7, 19, 31, 32, 37, 41, 43, 47, 71, 73, 101]);
    /// let b = BitSet::from_ones(&[2, 7, 8, 11, 23, 31, 32]);
    /// a.intersect_with(&b);
    /// assert_eq!(a.ones().collect::<Vec<_>>(), [2, 7, 31, 32]);
    /// assert_eq!(a.len(), 102);
    /// ```
    pub fn intersect_with(&mut self, other: &BitSet) {
        for (x, y) in self.blocks.iter_mut().zip(&other.blocks) {
            *x &= *y;
        }
        let shared = self.blocks.len().min(other.blocks.len());
        self.blocks[shared..].fill(0);
    }

    /// In-place difference: `self &= !other`.
    ///
    /// The length of `self` is kept.
    pub fn difference_with(&mut self, other: &BitSet) {
        for (x, y) in self.blocks.iter_mut().zip(&other.blocks) {
            *x &= !*y;
        }
    }

    /// In-place symmetric difference: `self ^= other`.
    ///
    /// `self` grows to `other.len()` if `other` is longer.
    pub fn symmetric_difference_with(&mut self, other: &BitSet) {
        self.grow(other.length);
        for (x, y) in self.blocks.iter_mut().zip(&other.blocks) {
            *x ^= *y;
        }
    }

    /// Returns a new bitset with the bits set in both operands.
    ///
    /// The result has the length of the shorter operand.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let a = BitSet::from_ones(&[1, 5, 40]);
    /// let b = BitSet::from_ones(&[5, 6]);
    /// let c = a.bit_and(&b);
    /// assert_eq!(c.len(), 7);
    /// assert_eq!(c.ones().collect::<Vec<_>>(), [5]);
    /// ```
    pub fn bit_and(&self, other: &BitSet) -> BitSet {
        let (short, long) = self.order_by_len(other);
        let mut result = short.clone();
        for (x, y) in result.blocks.iter_mut().zip(&long.blocks) {
            *x &= *y;
        }
        result
    }

    /// Returns a new bitset with the bits set in either operand.
    ///
    /// The result has the length of the longer operand.
    pub fn bit_or(&self, other: &BitSet) -> BitSet {
        let (short, long) = self.order_by_len(other);
        let mut result = long.clone();
        for (x, y) in result.blocks.iter_mut().zip(&short.blocks) {
            *x |= *y;
        }
        result
    }

    /// Returns a new bitset with the bits set in exactly one operand.
    ///
    /// The result has the length of the longer operand.
    pub fn bit_xor(&self, other: &BitSet) -> BitSet {
        let (short, long) = self.order_by_len(other);
        let mut result = long.clone();
        for (x, y) in result.blocks.iter_mut().zip(&short.blocks) {
            *x ^= *y;
        }
        result
    }

    /// Returns a new bitset with every addressable bit inverted.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let set = BitSet::from_ones(&[0, 2]);
    /// assert_eq!(set.bit_not().ones().collect::<Vec<_>>(), [1]);
    /// ```
    pub fn bit_not(&self) -> BitSet {
        let mut result = Self {
            blocks: self.blocks.iter().map(|block| !block).collect(),
            length: self.length,
        };
        result.clean_unused_bits();
        result
    }

    fn order_by_len<'a>(&'a self, other: &'a BitSet) -> (&'a BitSet, &'a BitSet) {
        if self.length <= other.length {
            (self, other)
        } else {
            (other, self)
        }
    }

    /// Counts the bits set in both `self` and `other`.
    ///
    /// Equal to `self.intersection(other).count()` without walking the bits.
    pub fn intersection_count(&self, other: &BitSet) -> usize {
        self.blocks
            .iter()
            .zip(&other.blocks)
            .map(|(x, y)| (x & y).count_ones() as usize)
            .sum()
    }

    /// Counts the bits set in `self` or `other`.
    pub fn union_count(&self, other: &BitSet) -> usize {
        let shared: usize = self
            .blocks
            .iter()
            .zip(&other.blocks)
            .map(|(x, y)| (x | y).count_ones() as usize)
            .sum();
        shared + self.ones_from_block(other.blocks.len()) + other.ones_from_block(self.blocks.len())
    }

    /// Counts the bits set in `self` but not in `other`.
    pub fn difference_count(&self, other: &BitSet) -> usize {
        let shared: usize = self
            .blocks
            .iter()
            .zip(&other.blocks)
            .map(|(x, y)| (x & !y).count_ones() as usize)
            .sum();
        shared + self.ones_from_block(other.blocks.len())
    }

    /// Counts the bits set in exactly one of `self` and `other`.
    pub fn symmetric_difference_count(&self, other: &BitSet) -> usize {
        let shared: usize = self
            .blocks
            .iter()
            .zip(&other.blocks)
            .map(|(x, y)| (x ^ y).count_ones() as usize)
            .sum();
        shared + self.ones_from_block(other.blocks.len()) + other.ones_from_block(self.blocks.len())
    }

    fn ones_from_block(&self, first: usize) -> usize {
        self.blocks
            .iter()
            .skip(first)
            .map(|block| block.count_ones() as usize)
            .sum()
    }

    /// Returns `true` if `self` and `other` have no set bit in common.
    pub fn is_disjoint(&self, other: &BitSet) -> bool {
        self.blocks
            .iter()
            .zip(&other.blocks)
            .all(|(x, y)| x & y == 0)
    }

    /// Returns `true` if every bit set in `self` is also set in `other`.
    ///
    /// # Examples
    /// ```
    /// use block_bitset::BitSet;
    ///
    /// let small = BitSet::from_ones(&[1, 3]);
    /// let big = BitSet::from_ones(&[1, 2, 3, 64]);
    /// assert!(small.is_subset(&big));
    /// assert!(big.is_superset(&small));
    /// assert!(!big.is_subset(&small));
    /// ```
    pub fn is_subset(&self, other: &BitSet) -> bool {
        self.blocks
            .iter()
            .zip(&other.blocks)
            .all(|(x, y)| x & !y == 0)
            && self.ones_from_block(other.blocks.len()) == 0
    }

    /// Returns `true` if every bit set in `other` is also set in `self`.
    pub fn is_superset(&self, other: &BitSet) -> bool {
        other.is_subset(self)
    }

    fn clean_unused_bits(&mut self) {
        let end = self.blocks.len() * BITS;
        for (block, mask) in Masks::spanning(self.length, end) {
            self.blocks[block] &= !mask;
        }
    }
}

impl Clone for BitSet {
    fn clone(&self) -> Self {
        Self {
            blocks: self.blocks.clone(),
            length: self.length,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.blocks.clone_from(&source.blocks);
        self.length = source.length;
    }
}

impl PartialEq for BitSet {
    fn eq(&self, other: &Self) -> bool {
        let (short, long) = if self.blocks.len() <= other.blocks.len() {
            (&self.blocks, &other.blocks)
        } else {
            (&other.blocks, &self.blocks)
        };
        short[..] == long[..short.len()] && long[short.len()..].iter().all(|&block| block == 0)
    }
}

impl Eq for BitSet {}

impl Hash for BitSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // trailing zero blocks do not affect equality, so they must not affect the hash
        let significant = self
            .blocks
            .iter()
            .rposition(|&block| block != 0)
            .map_or(0, |last| last + 1);
        self.blocks[..significant].hash(state);
    }
}

/// Returns `&true` if the bit is set and `&false` otherwise, including for
/// indices past the end.
impl Index<usize> for BitSet {
    type Output = bool;

    #[inline]
    fn index(&self, bit: usize) -> &bool {
        if self.contains(bit) { &true } else { &false }
    }
}

impl<'a> IntoIterator for &'a BitSet {
    type Item = usize;
    type IntoIter = Ones<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.ones()
    }
}

/// Sets every yielded index, growing the set as needed.
impl Extend<usize> for BitSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for bit in iter {
            self.grow_insert(bit);
        }
    }
}

/// Builds the smallest bitset containing every yielded index.
impl FromIterator<usize> for BitSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Writes `len()` binary digits, bit 0 first. `{:#b}` adds a `0b` prefix;
/// width, fill and alignment flags apply to the whole output.
impl Binary for BitSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let digits: String = (0..self.length)
            .map(|bit| if self.contains(bit) { '1' } else { '0' })
            .collect();
        f.pad_integral(true, "0b", &digits)
    }
}

impl Display for BitSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Binary::fmt(self, f)
    }
}

impl Debug for BitSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("LSB ->")?;
        for bit in 0..self.length {
            if bit % BITS == 0 {
                write!(f, " {bit}: ")?;
            }
            f.write_char(if self.contains(bit) { '1' } else { '0' })?;
        }
        write!(f, " <- MSB")
    }
}

impl BitAnd for &BitSet {
    type Output = BitSet;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.bit_and(rhs)
    }
}

impl BitAndAssign<&BitSet> for BitSet {
    fn bitand_assign(&mut self, rhs: &BitSet) {
        self.intersect_with(rhs)
    }
}

impl BitAndAssign for BitSet {
    fn bitand_assign(&mut self, rhs: Self) {
        self.intersect_with(&rhs)
    }
}

impl BitOr for &BitSet {
    type Output = BitSet;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.bit_or(rhs)
    }
}

impl BitOrAssign<&BitSet> for BitSet {
    fn bitor_assign(&mut self, rhs: &BitSet) {
        self.union_with(rhs)
    }
}

impl BitOrAssign for BitSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.union_with(&rhs)
    }
}

impl BitXor for &BitSet {
    type Output = BitSet;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.bit_xor(rhs)
    }
}

impl BitXorAssign<&BitSet> for BitSet {
    fn bitxor_assign(&mut self, rhs: &BitSet) {
        self.symmetric_difference_with(rhs)
    }
}

impl BitXorAssign for BitSet {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.symmetric_difference_with(&rhs)
    }
}

impl Not for &BitSet {
    type Output = BitSet;

    fn not(self) -> Self::Output {
        self.bit_not()
    }
}
