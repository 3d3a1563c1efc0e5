use thiserror::Error;

/// Errors returned by the checked operations on [`BitSet`].
///
/// Both variants are precondition violations on the caller's side; nothing is
/// modified when one is returned.
///
/// [`BitSet`]: crate::BitSet
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BitSetError {
    /// A single-bit operation addressed a bit at or past the length.
    #[error("bit index {bit} out of range for a bitset of length {len}")]
    OutOfRange {
        /// The offending bit index.
        bit: usize,
        /// Length of the bitset at the time of the call.
        len: usize,
    },

    /// A range operation got `start > end` or `end > len`.
    #[error("invalid range {start}..{end} for a bitset of length {len}")]
    InvalidRange {
        /// Resolved start of the range.
        start: usize,
        /// Resolved (exclusive) end of the range.
        end: usize,
        /// Length of the bitset at the time of the call.
        len: usize,
    },
}

/// Shorthand for results of fallible [`BitSet`] operations.
///
/// [`BitSet`]: crate::BitSet
pub type Result<T> = core::result::Result<T, BitSetError>;
