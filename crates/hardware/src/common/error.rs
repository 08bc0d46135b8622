//! Error types for the fallible construction paths.
//!
//! The simulator proper is a total function over fixed-width integers and
//! never fails at runtime. The only fallible surfaces are the ones that
//! consume external data: building a GAL from a raw fuse array and parsing
//! a JEDEC fuse listing. Both fail fast rather than produce a partially
//! initialized device.

use thiserror::Error;

/// Errors produced when constructing a device from a raw fuse array.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FuseMapError {
    /// The fuse array does not have the exact length the device requires.
    #[error("fuse map has {got} fuses, device requires exactly {expected}")]
    WrongLength {
        /// Number of fuses the caller supplied.
        got: usize,
        /// Number of fuses the device defines.
        expected: usize,
    },
}

/// Errors produced while parsing a JEDEC fuse listing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JedecError {
    /// An `*L` record carried an unparsable fuse offset.
    #[error("line {line}: malformed fuse offset in `*L` record")]
    BadOffset {
        /// 1-based line number of the offending record.
        line: usize,
    },

    /// An `*L` record contained a character other than `0` or `1` in its
    /// fuse run.
    #[error("line {line}: invalid fuse character {found:?} (expected '0' or '1')")]
    BadFuseChar {
        /// 1-based line number of the offending record.
        line: usize,
        /// The character that was rejected.
        found: char,
    },

    /// An `*L` record addressed fuses beyond the end of the device.
    #[error("line {line}: fuse run ends at {end}, device has only {capacity} fuses")]
    FuseOutOfRange {
        /// 1-based line number of the offending record.
        line: usize,
        /// One past the highest fuse index the record addressed.
        end: usize,
        /// Total fuse count of the device.
        capacity: usize,
    },

    /// The listing contained no `*L` records at all.
    #[error("listing contains no fuse records")]
    Empty,

    /// The underlying fuse array was rejected by the device model.
    #[error(transparent)]
    FuseMap(#[from] FuseMapError),
}
