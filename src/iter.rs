use crate::bitset::BitSet;
use crate::masks::{BITS, Block, tail_mask};
use core::iter::{Chain, FusedIterator};
use core::mem;
use core::slice;

/// Word-draining state shared by [`Ones`] and [`Zeroes`].
///
/// The first and last block are loaded up front; interior blocks are pulled
/// from whichever end runs dry first. Once the interior is exhausted an end
/// takes over the other end's word, so each bit is reported exactly once no
/// matter how `next` and `next_back` calls interleave.
#[derive(Debug, Clone)]
struct Positions<'a> {
    front: Block,
    back: Block,
    front_offset: usize,
    back_offset: usize,
    remaining: slice::Iter<'a, Block>,
    // XORed into every loaded block, all ones to walk the unset bits
    flip: Block,
}

impl<'a> Positions<'a> {
    fn new(blocks: &'a [Block], len: usize, flip: Block) -> Self {
        let tail = tail_mask(len);
        let Some((&first, rest)) = blocks.split_first() else {
            return Self {
                front: 0,
                back: 0,
                front_offset: 0,
                back_offset: 0,
                remaining: [].iter(),
                flip,
            };
        };
        match rest.split_last() {
            Some((&last, interior)) => Self {
                front: first ^ flip,
                back: (last ^ flip) & tail,
                front_offset: 0,
                back_offset: (interior.len() + 1) * BITS,
                remaining: interior.iter(),
                flip,
            },
            None => Self {
                front: (first ^ flip) & tail,
                back: 0,
                front_offset: 0,
                back_offset: BITS,
                remaining: rest.iter(),
                flip,
            },
        }
    }

    #[inline]
    fn next_front(&mut self) -> Option<usize> {
        while self.front == 0 {
            match self.remaining.next() {
                Some(&block) => {
                    self.front = block ^ self.flip;
                    self.front_offset += BITS;
                }
                None => {
                    if self.back == 0 {
                        return None;
                    }
                    self.front = mem::take(&mut self.back);
                    self.front_offset = self.back_offset;
                }
            }
        }
        let position = self.front_offset + self.front.trailing_zeros() as usize;
        self.front &= self.front - 1; // unset LSB
        Some(position)
    }

    #[inline]
    fn next_back(&mut self) -> Option<usize> {
        while self.back == 0 {
            match self.remaining.next_back() {
                Some(&block) => {
                    self.back = block ^ self.flip;
                    self.back_offset -= BITS;
                }
                None => {
                    if self.front == 0 {
                        return None;
                    }
                    self.back = mem::take(&mut self.front);
                    self.back_offset = self.front_offset;
                }
            }
        }
        let high = BITS - 1 - self.back.leading_zeros() as usize;
        self.back &= !(1 << high); // unset MSB
        Some(self.back_offset + high)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let loaded = (self.front.count_ones() + self.back.count_ones()) as usize;
        (loaded, Some(loaded + self.remaining.len() * BITS))
    }
}

/// Iterator over the indices of set bits.
///
/// Yields ascending indices from the front and descending indices from the
/// back. Each index costs O(1) amortized; empty blocks are skipped one word at
/// a time.
///
/// Returned by [`BitSet::ones()`] and by iterating over `&BitSet`.
#[derive(Debug, Clone)]
pub struct Ones<'a> {
    inner: Positions<'a>,
}

impl<'a> Ones<'a> {
    pub(crate) fn new(blocks: &'a [Block], len: usize) -> Self {
        Self {
            inner: Positions::new(blocks, len, 0),
        }
    }
}

impl Iterator for Ones<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Ones<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl FusedIterator for Ones<'_> {}

/// Iterator over the indices of unset bits.
///
/// Works like [`Ones`] on the complement of every block. Padding bits past the
/// length of the set are never reported.
///
/// Returned by [`BitSet::zeroes()`].
#[derive(Debug, Clone)]
pub struct Zeroes<'a> {
    inner: Positions<'a>,
    len: usize,
}

impl<'a> Zeroes<'a> {
    pub(crate) fn new(blocks: &'a [Block], len: usize) -> Self {
        Self {
            inner: Positions::new(blocks, len, Block::MAX),
            len,
        }
    }
}

impl Iterator for Zeroes<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_front().filter(|&bit| bit < self.len)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.inner.size_hint();
        (lower, upper.map(|upper| upper.min(self.len)))
    }
}

impl DoubleEndedIterator for Zeroes<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl FusedIterator for Zeroes<'_> {}

/// Iterator over the elements of one set that are missing from another.
///
/// Returned by [`BitSet::difference()`].
#[derive(Debug, Clone)]
pub struct Difference<'a> {
    iter: Ones<'a>,
    other: &'a BitSet,
}

impl<'a> Difference<'a> {
    pub(crate) fn new(iter: Ones<'a>, other: &'a BitSet) -> Self {
        Self { iter, other }
    }
}

impl Iterator for Difference<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let other = self.other;
        self.iter.find(|&bit| !other.contains(bit))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

impl DoubleEndedIterator for Difference<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let other = self.other;
        self.iter.rfind(|&bit| !other.contains(bit))
    }
}

impl FusedIterator for Difference<'_> {}

/// Iterator over the elements shared by two sets.
///
/// Returned by [`BitSet::intersection()`].
#[derive(Debug, Clone)]
pub struct Intersection<'a> {
    iter: Ones<'a>,
    other: &'a BitSet,
}

impl<'a> Intersection<'a> {
    pub(crate) fn new(iter: Ones<'a>, other: &'a BitSet) -> Self {
        Self { iter, other }
    }
}

impl Iterator for Intersection<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let other = self.other;
        self.iter.find(|&bit| other.contains(bit))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

impl DoubleEndedIterator for Intersection<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let other = self.other;
        self.iter.rfind(|&bit| other.contains(bit))
    }
}

impl FusedIterator for Intersection<'_> {}

/// Iterator over the elements of either of two sets.
///
/// The first set's ones come first, followed by the ones of the second set
/// that the first lacks; no index is yielded twice.
///
/// Returned by [`BitSet::union()`].
#[derive(Debug, Clone)]
pub struct Union<'a> {
    iter: Chain<Ones<'a>, Difference<'a>>,
}

impl<'a> Union<'a> {
    pub(crate) fn new(ones: Ones<'a>, rest: Difference<'a>) -> Self {
        Self {
            iter: ones.chain(rest),
        }
    }
}

impl Iterator for Union<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl DoubleEndedIterator for Union<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back()
    }
}

impl FusedIterator for Union<'_> {}

/// Iterator over the elements in exactly one of two sets.
///
/// Returned by [`BitSet::symmetric_difference()`].
#[derive(Debug, Clone)]
pub struct SymmetricDifference<'a> {
    iter: Chain<Difference<'a>, Difference<'a>>,
}

impl<'a> SymmetricDifference<'a> {
    pub(crate) fn new(left: Difference<'a>, right: Difference<'a>) -> Self {
        Self {
            iter: left.chain(right),
        }
    }
}

impl Iterator for SymmetricDifference<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl DoubleEndedIterator for SymmetricDifference<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back()
    }
}

impl FusedIterator for SymmetricDifference<'_> {}
