//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// Transparent wrapper for [`deblob_dds::Error`]
    #[error(transparent)]
    DdsError(#[from] deblob_dds::Error),

    /// buffer does not start with the "TRB" signature
    #[error("buffer does not start with the \"TRB\" signature")]
    InvalidSignature,

    /// the declared tables or pools extend past the end of the buffer
    #[error("truncated container: need {declared} bytes, have {available}")]
    Truncated {
        /// Bytes required by the declared layout
        declared: usize,
        /// Bytes actually available
        available: usize,
    },

    /// a structural invariant of the container layout does not hold
    #[error("container layout invariant violated")]
    LayoutInvariant(#[from] LayoutInvariantError),

    /// a recognized sub-format whose embedded structure does not match its
    /// fixed layout; the owning entry is kept as an opaque file
    #[error("unsupported {magic} sub-resource: {reason}")]
    UnsupportedSubResource {
        /// Magic of the sub-format that failed to decode
        magic: &'static str,
        /// What did not line up
        reason: String,
    },

    /// unable to find requested file
    #[error("unable to find requested file")]
    FileNotFound(#[from] FileNotFoundError),
}

/// Error type describing which layout invariant was violated
#[derive(Error, Diagnostic, Debug)]
pub enum LayoutInvariantError {
    /// tag data offsets must be stored in ascending order
    #[error("tag {0} has a data offset below its predecessor")]
    TagOrder(usize),

    /// a declared or computed byte length came out negative
    #[error("{region} has a negative byte length")]
    NegativeLength {
        /// Which structure the length belongs to
        region: String,
    },

    /// a pool-relative offset resolved before the start of its pool
    #[error("relative offset {offset} resolves before the start of the {pool} pool")]
    OffsetBeforePool {
        /// Pool the offset is relative to
        pool: &'static str,
        /// The offending relative offset
        offset: i64,
    },

    /// the container declares fewer sections than the format requires
    #[error("container declares {0} data sections, at least 2 are required")]
    TooFewSections(usize),

    /// a write landed outside its writable span
    #[error("corrupt layout on write: {region} at {offset:#x}..{end:#x} exceeds the writable bound {bound:#x}")]
    WriteOutOfBounds {
        /// Which structure was being written
        region: &'static str,
        /// Absolute start of the write
        offset: usize,
        /// Absolute end of the write
        end: usize,
        /// Highest absolute offset the write may reach
        bound: usize,
    },
}

/// Error type to provide further information when a file has not been found
#[derive(Error, Diagnostic, Debug)]
#[error("unable to find requested file")]
pub enum FileNotFoundError {
    /// at index {0}
    #[error("at index {0}")]
    Index(usize),

    /// by name {0}
    #[error("by name {0}")]
    Name(String),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
