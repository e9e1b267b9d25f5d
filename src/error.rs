//! Error types for SLDC record decoding.
//!
//! This module provides [`DecompressError`], the category of failure, and
//! [`RecordError`], which pairs a failure with the bytes that were decoded
//! before it happened.
//!
//! ## Error Categories
//!
//! | Category | Errors | Description |
//! |----------|--------|-------------|
//! | Input | [`TruncatedInput`] | The record ends before a read, peek or alignment completes |
//! | Control | [`InvalidControlSymbol`], [`UnexpectedEndMarker`] | Control word is undefined, unhandled, or misplaced |
//! | Copy | [`InvalidMatchCount`], [`InvalidDisplacement`] | Copy pointer is out of range |
//! | Scheme | [`UnsupportedScheme`] | Data symbol under a scheme this decoder does not implement |
//!
//! A leading End Marker is not an error: it is reported as
//! [`Record::EndOfStream`](crate::Record::EndOfStream).
//!
//! ## Example
//!
//! ```rust
//! use sldc_stream::{decompress, DecompressError};
//!
//! match decompress(&[0x00, 0x80]) {
//!     Ok(record) => println!("decoded {:?}", record),
//!     Err(e) if matches!(e.error, DecompressError::TruncatedInput) => {
//!         eprintln!("record cut short after {} bytes", e.partial.len());
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! [`TruncatedInput`]: DecompressError::TruncatedInput
//! [`InvalidControlSymbol`]: DecompressError::InvalidControlSymbol
//! [`UnexpectedEndMarker`]: DecompressError::UnexpectedEndMarker
//! [`InvalidMatchCount`]: DecompressError::InvalidMatchCount
//! [`InvalidDisplacement`]: DecompressError::InvalidDisplacement
//! [`UnsupportedScheme`]: DecompressError::UnsupportedScheme

use std::fmt;

use crate::decompress::{ControlWord, Scheme};

/// Decode failure categories.
///
/// Every variant is terminal for the record being decoded; nothing is
/// retried internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecompressError {
    /// A bit read, peek or alignment needed more bits than remain.
    TruncatedInput,

    /// A control word marker was seen but the 4-bit code is undefined
    /// (7-14) or not handled by this decoder (File Mark).
    ///
    /// The `u8` value is the raw 4-bit code, or `u8::MAX` when the 9-bit
    /// marker itself did not match.
    InvalidControlSymbol(u8),

    /// A copy pointer decoded to a match count above
    /// [`MAX_MATCH_COUNT`](crate::decompress::MAX_MATCH_COUNT).
    InvalidMatchCount(u32),

    /// A copy read from a history offset outside the buffer, or, with
    /// strict history checking, from a slot not written since the last reset.
    InvalidDisplacement {
        /// The offending history offset.
        offset: usize,
        /// Number of history slots populated when the read was attempted.
        filled: usize,
    },

    /// A data symbol must be decoded under a scheme this decoder does not
    /// implement.
    UnsupportedScheme(Scheme),

    /// An End Marker arrived after the record already produced output.
    UnexpectedEndMarker,
}

impl fmt::Display for DecompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedInput => write!(f, "Truncated input"),
            Self::InvalidControlSymbol(code) => match ControlWord::from_code(*code) {
                Some(ctrl) => write!(f, "Invalid control symbol {}", ctrl),
                None => write!(f, "Invalid control symbol {{ctrl {}}}", code),
            },
            Self::InvalidMatchCount(count) => write!(f, "Invalid match count {}", count),
            Self::InvalidDisplacement { offset, filled } => {
                write!(
                    f,
                    "Invalid displacement {} ({} history bytes populated)",
                    offset, filled
                )
            }
            Self::UnsupportedScheme(scheme) => write!(f, "{} rules not implemented", scheme),
            Self::UnexpectedEndMarker => write!(f, "End Marker inside a non-empty record"),
        }
    }
}

impl std::error::Error for DecompressError {}

/// A fatal record decode error together with the output decoded before it.
///
/// The partial output is diagnostic context only; it must not be treated as
/// a valid record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordError {
    /// What went wrong.
    pub error: DecompressError,
    /// Bytes reconstructed before the failure.
    pub partial: Vec<u8>,
}

impl RecordError {
    pub fn new(error: DecompressError, partial: Vec<u8>) -> Self {
        Self { error, partial }
    }

    /// The failure category.
    pub fn kind(&self) -> &DecompressError {
        &self.error
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (after {} decoded bytes)",
            self.error,
            self.partial.len()
        )
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl From<DecompressError> for RecordError {
    fn from(error: DecompressError) -> Self {
        Self::new(error, Vec::new())
    }
}

pub type Result<T> = std::result::Result<T, DecompressError>;
