//! A growable bitset packed into 32-bit blocks, with range masks and lazy
//! set-algebra iterators.
//!
//! [`BitSet`] is the main struct in this library. Its [features](#features)
//! are listed below.
//!
//! # Examples
//! ```
//! use block_bitset::BitSet;
//!
//! let mut visited = BitSet::with_capacity(10);
//! assert_eq!(visited.count_ones(..).unwrap(), 0);
//! assert!(!visited.contains(3));
//! visited.insert(3).unwrap();
//! assert!(visited.contains(3));
//! assert_eq!(visited.count_ones(..).unwrap(), 1);
//! ```
//!
//! # Use Cases
//!
//! - Visited-sets in graph traversals
//! - Sieve-style filters
//! - Marking intervals of a fixed index space
//!
//! # Features
//!
//! - Word-parallel range operations over any half-open [`BitRange`]:
//!   - `insert_range`, `remove_range`, `toggle_range`, `set_range`
//!   - `count_ones`, `count_zeroes`
//!   - `contains_any_in_range`, `contains_all_in_range`
//! - Allocation-free, double-ended iteration:
//!   - `ones()` (indices of set bits)
//!   - `zeroes()` (indices of unset bits)
//! - Set algebra in four flavours:
//!   - lazy iterators: `union`, `intersection`, `difference`,
//!     `symmetric_difference`
//!   - in place: `union_with`, `intersect_with`, `difference_with`,
//!     `symmetric_difference_with` (also `|=`, `&=`, `^=`)
//!   - new sets: `bit_or`, `bit_and`, `bit_xor`, `bit_not` (also `|`, `&`,
//!     `^`, `!` on references)
//!   - counts: `union_count`, `intersection_count`, `difference_count`,
//!     `symmetric_difference_count`
//! - Checked mutators returning [`BitSetError`] instead of panicking
//!   - `*_unchecked` variants for indices already known to be in range
//! - Binary formatting with bit 0 first: `format!("{set:b}")`

#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod bitset;
mod error;
mod iter;
mod masks;
mod range;

pub use bitset::BitSet;
pub use error::{BitSetError, Result};
pub use iter::{Difference, Intersection, Ones, SymmetricDifference, Union, Zeroes};
pub use masks::{BITS, Block, block_count};
pub use range::BitRange;
