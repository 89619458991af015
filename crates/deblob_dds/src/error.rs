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

    /// buffer does not start with the "DDS " signature
    #[error("buffer does not start with the \"DDS \" signature")]
    InvalidSignature,

    /// the buffer ends before the declared structures
    #[error("texture container truncated: need {declared} bytes, have {available}")]
    Truncated {
        /// Bytes required by the declared layout
        declared: usize,
        /// Bytes actually available
        available: usize,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
